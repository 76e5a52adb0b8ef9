//! Length-checked pixel buffers.
//!
//! [`PixelRef`] borrows caller-owned source bytes; [`PixelVec`] owns bytes the
//! engine allocated. Every allocating entry point returns a `PixelVec`, which
//! transfers ownership of the allocation to the caller: the engine keeps no
//! reference to it.

use alloc::vec;
use alloc::vec::Vec;

use crate::PixelError;
use crate::format::{PixelEncoding, PixelFormat, PixelType};

/// `width * height`, rejecting empty or overflowing geometry.
#[inline]
pub(crate) fn pixel_count(width: usize, height: usize) -> Result<usize, PixelError> {
    match width.checked_mul(height) {
        Some(n) if n > 0 => Ok(n),
        _ => Err(PixelError::InvalidGeometry { width, height }),
    }
}

/// Bytes needed for `count` pixels of `encoding`.
#[inline]
pub(crate) fn byte_len(count: usize, encoding: PixelEncoding) -> Result<usize, PixelError> {
    count
        .checked_mul(encoding.checked_pixel_size()?)
        .ok_or(PixelError::InvalidGeometry {
            width: count,
            height: 1,
        })
}

#[inline]
pub(crate) fn check_len(len: usize, needed: usize) -> Result<(), PixelError> {
    if len < needed {
        Err(PixelError::BufferTooSmall {
            needed,
            actual: len,
        })
    } else {
        Ok(())
    }
}

/// A borrowed, tightly packed (row stride = `width * pixel_size`) image.
#[derive(Clone, Copy, Debug)]
pub struct PixelRef<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    encoding: PixelEncoding,
}

impl<'a> PixelRef<'a> {
    /// Wrap `data`, checking it holds `width * height` pixels of the given
    /// encoding. Trailing bytes beyond that are ignored.
    pub fn new(
        data: &'a [u8],
        width: usize,
        height: usize,
        format: PixelFormat,
        ty: PixelType,
    ) -> Result<Self, PixelError> {
        let encoding = PixelEncoding::new(format, ty);
        let needed = byte_len(pixel_count(width, height)?, encoding)?;
        check_len(data.len(), needed)?;
        Ok(Self {
            data: &data[..needed],
            width,
            height,
            encoding,
        })
    }

    /// Exactly `width * height * pixel_size` bytes.
    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn encoding(&self) -> PixelEncoding {
        self.encoding
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Bytes per pixel; always valid for a constructed `PixelRef`.
    #[inline]
    pub fn pixel_size(&self) -> usize {
        self.data.len() / self.pixel_count()
    }
}

/// An owned, tightly packed image produced by the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelVec {
    data: Vec<u8>,
    width: usize,
    height: usize,
    encoding: PixelEncoding,
}

impl PixelVec {
    /// Zero-filled buffer for `width * height` pixels.
    pub(crate) fn zeroed(
        width: usize,
        height: usize,
        encoding: PixelEncoding,
    ) -> Result<Self, PixelError> {
        let len = byte_len(pixel_count(width, height)?, encoding)?;
        Ok(Self {
            data: vec![0u8; len],
            width,
            height,
            encoding,
        })
    }

    /// Take ownership of `data`, checking its length like [`PixelRef::new`].
    /// Surplus trailing bytes are dropped.
    pub fn from_vec(
        mut data: Vec<u8>,
        width: usize,
        height: usize,
        format: PixelFormat,
        ty: PixelType,
    ) -> Result<Self, PixelError> {
        let needed = PixelRef::new(&data, width, height, format, ty)?.as_bytes().len();
        data.truncate(needed);
        Ok(Self {
            data,
            width,
            height,
            encoding: PixelEncoding::new(format, ty),
        })
    }

    #[inline]
    pub fn as_ref(&self) -> PixelRef<'_> {
        PixelRef {
            data: &self.data,
            width: self.width,
            height: self.height,
            encoding: self.encoding,
        }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Release the bytes to the caller.
    #[inline]
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn encoding(&self) -> PixelEncoding {
        self.encoding
    }
}
