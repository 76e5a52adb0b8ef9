//! Per-channel affine color transform (scale + bias) in normalized space.
//!
//! Format and storage type are unchanged: each pixel is decoded, every
//! channel becomes `clamp(c * scale[i] + bias[i], 0, 1)` with i = r, g, b, a,
//! and the result is encoded back with the same layout.

use rgb::Rgba;

use crate::PixelError;
use crate::buffer::{PixelRef, PixelVec, check_len};
use crate::codec::{NormalizedPixel, decode_pixel, encode_pixel};

/// Scale and bias for r, g, b, a.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine {
    pub scale: [f32; 4],
    pub bias: [f32; 4],
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Self = Self {
        scale: [1.0; 4],
        bias: [0.0; 4],
    };

    pub const fn new(scale: [f32; 4], bias: [f32; 4]) -> Self {
        Self { scale, bias }
    }

    /// Apply to one normalized pixel, clamping every channel to `0.0..=1.0`.
    #[inline]
    pub fn apply(&self, px: NormalizedPixel) -> NormalizedPixel {
        let c = |v: f32, i: usize| (v * self.scale[i] + self.bias[i]).clamp(0.0, 1.0);
        Rgba::new(c(px.r, 0), c(px.g, 1), c(px.b, 2), c(px.a, 3))
    }
}

fn transform_pixels(src: PixelRef<'_>, dst: &mut [u8], affine: &Affine) {
    let enc = src.encoding();
    let layout = enc.layout();
    let bpp = src.pixel_size();
    for (s, d) in src.as_bytes().chunks_exact(bpp).zip(dst.chunks_exact_mut(bpp)) {
        let px = affine.apply(decode_pixel(s, &layout, enc.ty));
        encode_pixel(px, d, &layout, enc.ty);
    }
}

/// Transform `src` into a newly allocated buffer of the same encoding,
/// owned by the caller.
pub fn transform(src: PixelRef<'_>, affine: &Affine) -> Result<PixelVec, PixelError> {
    let mut out = PixelVec::zeroed(src.width(), src.height(), src.encoding())?;
    transform_pixels(src, out.as_bytes_mut(), affine);
    Ok(out)
}

/// Transform `src` into the caller's `dst`, which must be at least as long
/// as `src`'s pixel data. Nothing is allocated.
pub fn transform_into(src: PixelRef<'_>, dst: &mut [u8], affine: &Affine) -> Result<(), PixelError> {
    check_len(dst.len(), src.as_bytes().len())?;
    transform_pixels(src, dst, affine);
    Ok(())
}

/// Transform `buf` in place. The result is built in a fresh allocation and
/// swapped in.
pub fn transform_in_place(buf: &mut PixelVec, affine: &Affine) -> Result<(), PixelError> {
    *buf = transform(buf.as_ref(), affine)?;
    Ok(())
}
