//! Resampling: 2×2 box-filter halving and nearest-neighbor rescaling.

use rgb::Rgba;

use crate::PixelError;
use crate::buffer::{PixelRef, PixelVec};
use crate::codec::{NormalizedPixel, decode_pixel, encode_pixel};

#[inline]
fn average4(p: [NormalizedPixel; 4]) -> NormalizedPixel {
    Rgba::new(
        (p[0].r + p[1].r + p[2].r + p[3].r) * 0.25,
        (p[0].g + p[1].g + p[2].g + p[3].g) * 0.25,
        (p[0].b + p[1].b + p[2].b + p[3].b) * 0.25,
        (p[0].a + p[1].a + p[2].a + p[3].a) * 0.25,
    )
}

/// Halve both dimensions by averaging every 2×2 block into one pixel.
///
/// This produces exactly one mip level below `src`, in `src`'s encoding.
/// Width and height must both be even; otherwise nothing is allocated and
/// [`PixelError::InvalidGeometry`] is returned. The result is owned by the
/// caller.
pub fn halve(src: PixelRef<'_>) -> Result<PixelVec, PixelError> {
    let (width, height) = (src.width(), src.height());
    if !width.is_multiple_of(2) || !height.is_multiple_of(2) {
        log::warn!("cannot halve {width}x{height}: odd dimension");
        return Err(PixelError::InvalidGeometry { width, height });
    }
    let (new_width, new_height) = (width / 2, height / 2);
    log::debug!("halving {width}x{height} -> {new_width}x{new_height}");

    let enc = src.encoding();
    let layout = enc.layout();
    let bpp = src.pixel_size();
    let row = width * bpp;
    let data = src.as_bytes();

    let mut out = PixelVec::zeroed(new_width, new_height, enc)?;
    for (y, dst_row) in out.as_bytes_mut().chunks_exact_mut(new_width * bpp).enumerate() {
        let top = &data[2 * y * row..][..row];
        let bottom = &data[(2 * y + 1) * row..][..row];
        let blocks = top.chunks_exact(2 * bpp).zip(bottom.chunks_exact(2 * bpp));
        for ((t, b), d) in blocks.zip(dst_row.chunks_exact_mut(bpp)) {
            let read = |p: &[u8]| decode_pixel(p, &layout, enc.ty);
            let px = average4([read(&t[..bpp]), read(&t[bpp..]), read(&b[..bpp]), read(&b[bpp..])]);
            encode_pixel(px, d, &layout, enc.ty);
        }
    }
    Ok(out)
}

/// Rescale by `ratio` with nearest-neighbor sampling.
///
/// The new size is `(width * ratio, height * ratio)`, truncated. Destination
/// pixel (x, y) is a raw byte copy of source pixel
/// `(floor(x / ratio), floor(y / ratio))`, so colors are reproduced exactly.
/// Fails with [`PixelError::InvalidGeometry`] for a non-finite or
/// non-positive ratio, or when the result would be empty. The result is
/// owned by the caller.
pub fn scale_nearest(src: PixelRef<'_>, ratio: f32) -> Result<PixelVec, PixelError> {
    let (width, height) = (src.width(), src.height());
    let new_width = (width as f32 * ratio) as usize;
    let new_height = (height as f32 * ratio) as usize;
    if !ratio.is_finite() || ratio <= 0.0 || new_width == 0 || new_height == 0 {
        log::warn!("cannot scale {width}x{height} by {ratio}");
        return Err(PixelError::InvalidGeometry {
            width: new_width,
            height: new_height,
        });
    }
    log::debug!("scaling {width}x{height} -> {new_width}x{new_height}");

    let bpp = src.pixel_size();
    let data = src.as_bytes();
    // Float rounding can land exactly on the edge; clamp to the last pixel.
    let sample = |i: usize, max: usize| ((i as f32 / ratio) as usize).min(max - 1);

    let mut out = PixelVec::zeroed(new_width, new_height, src.encoding())?;
    for (y, dst_row) in out.as_bytes_mut().chunks_exact_mut(new_width * bpp).enumerate() {
        let src_row = &data[sample(y, height) * width * bpp..][..width * bpp];
        for (x, d) in dst_row.chunks_exact_mut(bpp).enumerate() {
            d.copy_from_slice(&src_row[sample(x, width) * bpp..][..bpp]);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{PixelFormat, PixelType};
    use alloc::vec::Vec;

    fn rgba8(data: &[u8], w: usize, h: usize) -> PixelRef<'_> {
        PixelRef::new(data, w, h, PixelFormat::Rgba, PixelType::UnsignedByte).unwrap()
    }

    #[test]
    fn halve_identical_block_is_exact() {
        let words = [0.3f32, 0.6, 0.9, 0.25].repeat(4);
        let bytes: &[u8] = bytemuck::cast_slice(&words);
        let src = PixelRef::new(bytes, 2, 2, PixelFormat::Rgba, PixelType::Float).unwrap();
        let out = halve(src).unwrap();
        assert_eq!(out.as_bytes(), &bytes[..16]);
    }

    #[test]
    fn halve_averages_every_block() {
        // 4x2 gray ramp in the red channel: two blocks, both rows used.
        #[rustfmt::skip]
        let data = [
            0, 0, 0, 255,   100, 0, 0, 255,   200, 0, 0, 255,   40, 0, 0, 255,
            20, 0, 0, 255,  80, 0, 0, 255,    60, 0, 0, 0,      100, 0, 0, 0,
        ];
        let out = halve(rgba8(&data, 4, 2)).unwrap();
        assert_eq!((out.width(), out.height()), (2, 1));
        // (0+100+20+80)/4 = 50, (200+40+60+100)/4 = 100, alpha (255*2)/4
        assert_eq!(out.as_bytes(), &[50, 0, 0, 255, 100, 0, 0, 128]);
    }

    #[test]
    fn halve_covers_all_rows() {
        let data: Vec<u8> = (0..4 * 4 * 4).map(|i| if i % 4 == 0 { (i / 4) as u8 * 10 } else { 0 }).collect();
        let out = halve(rgba8(&data, 4, 4)).unwrap();
        let reds: Vec<u8> = out.as_bytes().chunks_exact(4).map(|p| p[0]).collect();
        // Block means of the pixel index ramp 0..16 scaled by 10.
        assert_eq!(reds, [25, 45, 105, 125]);
    }

    #[test]
    fn halve_odd_is_rejected() {
        let data = [0u8; 3 * 4 * 4];
        assert!(matches!(
            halve(rgba8(&data, 3, 4)),
            Err(PixelError::InvalidGeometry { width: 3, height: 4 })
        ));
    }

    #[test]
    fn halve_packed_1555() {
        let white: u16 = 0xFFFF;
        let black: u16 = 0x0000;
        let words = [white, black, black, white];
        let bytes: &[u8] = bytemuck::cast_slice(&words);
        let src = PixelRef::new(bytes, 2, 2, PixelFormat::Rgba, PixelType::UnsignedShort1555Rev).unwrap();
        let out = halve(src).unwrap();
        // 0.5 * 31 rounds to 16 per color field; alpha 0.5 rounds up to 1.
        let v = u16::from_ne_bytes([out.as_bytes()[0], out.as_bytes()[1]]);
        assert_eq!(v, 16 | (16 << 5) | (16 << 10) | 0x8000);
    }

    #[test]
    fn scale_up_duplicates_pixels() {
        let data = [1, 2, 3, 4, 5, 6, 7, 8];
        let out = scale_nearest(rgba8(&data, 2, 1), 2.0).unwrap();
        assert_eq!((out.width(), out.height()), (4, 2));
        let row = [1, 2, 3, 4, 1, 2, 3, 4, 5, 6, 7, 8, 5, 6, 7, 8];
        assert_eq!(&out.as_bytes()[..16], &row);
        assert_eq!(&out.as_bytes()[16..], &row);
    }

    #[test]
    fn scale_down_picks_nearest() {
        let data: Vec<u8> = (0..16).collect();
        let src = PixelRef::new(&data, 4, 4, PixelFormat::Red, PixelType::UnsignedByte).unwrap();
        let out = scale_nearest(src, 0.5).unwrap();
        assert_eq!(out.as_bytes(), &[0, 2, 8, 10]);
    }

    #[test]
    fn scale_rejects_bad_ratio() {
        let data = [0u8; 4];
        for ratio in [0.0, -1.0, f32::NAN, f32::INFINITY, 0.1] {
            assert!(
                matches!(scale_nearest(rgba8(&data, 1, 1), ratio), Err(PixelError::InvalidGeometry { .. })),
                "{ratio}"
            );
        }
    }
}
