//! Debug dump of a pixel buffer as a binary PPM (`P6`) image.
//!
//! The buffer is converted to 8-bit RGB first unless it already is.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use alloc::borrow::Cow;
use alloc::format;

use crate::PixelError;
use crate::buffer::PixelRef;
use crate::convert::convert;
use crate::format::{PixelEncoding, PixelFormat, PixelType};

const RGB8: PixelEncoding = PixelEncoding::new(PixelFormat::Rgb, PixelType::UnsignedByte);

/// 8-bit RGB bytes of `src`, borrowed when no conversion is needed.
fn rgb8_bytes<'a>(src: PixelRef<'a>) -> Result<Cow<'a, [u8]>, PixelError> {
    if src.encoding() == RGB8 {
        Ok(Cow::Borrowed(src.as_bytes()))
    } else {
        Ok(Cow::Owned(convert(src, PixelFormat::Rgb, PixelType::UnsignedByte)?.into_vec()))
    }
}

fn write_rgb8<W: Write>(width: usize, height: usize, rgb: &[u8], mut out: W) -> Result<(), PixelError> {
    writeln!(out, "P6 {width} {height} 255")?;
    out.write_all(rgb)?;
    out.flush()?;
    Ok(())
}

/// Serialize `src` as `P6 <w> <h> 255\n` followed by row-major RGB bytes.
pub fn write_ppm<W: Write>(src: PixelRef<'_>, out: W) -> Result<(), PixelError> {
    let rgb = rgb8_bytes(src)?;
    write_rgb8(src.width(), src.height(), &rgb, out)
}

/// Where debug dumps go. Files are named `tex.<id>.ppm`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DumpTarget {
    pub dir: PathBuf,
}

impl Default for DumpTarget {
    /// The platform temporary directory.
    fn default() -> Self {
        Self {
            dir: std::env::temp_dir(),
        }
    }
}

impl DumpTarget {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, id: u32) -> PathBuf {
        self.dir.join(format!("tex.{id}.ppm"))
    }

    /// Write `src` to [`path_for(id)`](Self::path_for), returning the path.
    ///
    /// A failed conversion leaves no file behind; I/O failures surface as
    /// [`PixelError::Sink`].
    pub fn dump(&self, src: PixelRef<'_>, id: u32) -> Result<PathBuf, PixelError> {
        let rgb = rgb8_bytes(src)?;
        let path = self.path_for(id);
        log::trace!("dumping {}x{} to {}", src.width(), src.height(), path.display());
        write_rgb8(src.width(), src.height(), &rgb, BufWriter::new(File::create(&path)?))?;
        Ok(path)
    }
}

/// Dump `src` into the platform temporary directory as `tex.<id>.ppm`.
pub fn dump(src: PixelRef<'_>, id: u32) -> Result<PathBuf, PixelError> {
    DumpTarget::default().dump(src, id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn header_and_body() {
        let data = [255u8, 0, 0, 0, 255, 0];
        let src = PixelRef::new(&data, 2, 1, PixelFormat::Rgb, PixelType::UnsignedByte).unwrap();
        let mut out = Vec::new();
        write_ppm(src, &mut out).unwrap();
        let mut expected = b"P6 2 1 255\n".to_vec();
        expected.extend_from_slice(&data);
        assert_eq!(out, expected);
    }

    #[test]
    fn converts_before_writing() {
        let data = [0u8, 0, 255, 9, 10, 20, 30, 9];
        let src = PixelRef::new(&data, 1, 2, PixelFormat::Bgra, PixelType::UnsignedByte).unwrap();
        let mut out = Vec::new();
        write_ppm(src, &mut out).unwrap();
        assert_eq!(&out[..11], b"P6 1 2 255\n");
        assert_eq!(&out[11..], &[255, 0, 0, 30, 20, 10]);
    }

    #[test]
    fn dump_writes_named_file() {
        let dir = std::env::temp_dir().join(format!("pixconv-dump-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let target = DumpTarget::new(&dir);
        let data = vec![128u8; 2 * 2];
        let src = PixelRef::new(&data, 2, 2, PixelFormat::Red, PixelType::UnsignedByte).unwrap();

        let path = target.dump(src, 42).unwrap();
        assert_eq!(path, dir.join("tex.42.ppm"));
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..11], b"P6 2 2 255\n");
        assert_eq!(&bytes[11..], &[128, 0, 0].repeat(4)[..]);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_directory_is_a_sink_error() {
        let target = DumpTarget::new(std::env::temp_dir().join("pixconv-no-such-dir").join("nested"));
        let data = [0u8; 3];
        let src = PixelRef::new(&data, 1, 1, PixelFormat::Rgb, PixelType::UnsignedByte).unwrap();
        assert!(matches!(target.dump(src, 1), Err(PixelError::Sink(_))));
    }
}
