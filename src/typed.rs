//! Conversions between [`rgb`] crate pixel slices via bytemuck.
//!
//! ```rust
//! use rgb::{Rgb, Rgba};
//! use pixconv::typed;
//!
//! let src = vec![Rgb::new(255u8, 0, 128); 4];
//! let rgba: Vec<Rgba<f32>> = typed::convert_slice(&src).unwrap();
//! assert_eq!(rgba[0], Rgba::new(1.0, 0.0, 128.0 / 255.0, 1.0));
//! ```

use alloc::vec;
use alloc::vec::Vec;

use bytemuck::Pod;
use rgb::{Bgr, Bgra, GrayAlpha, Rgb, Rgba};

use crate::PixelError;
use crate::buffer::PixelRef;
use crate::convert::convert_into;
use crate::format::{PixelEncoding, PixelFormat, PixelType};

/// A pixel type whose memory representation is one pixel of a fixed encoding.
pub trait TypedPixel: Pod {
    const ENCODING: PixelEncoding;
}

macro_rules! typed_pixel {
    ($($ty:ty => $format:ident, $storage:ident;)*) => {$(
        impl TypedPixel for $ty {
            const ENCODING: PixelEncoding =
                PixelEncoding::new(PixelFormat::$format, PixelType::$storage);
        }
    )*};
}

typed_pixel! {
    Rgb<u8> => Rgb, UnsignedByte;
    Bgr<u8> => Bgr, UnsignedByte;
    Rgba<u8> => Rgba, UnsignedByte;
    Bgra<u8> => Bgra, UnsignedByte;
    GrayAlpha<u8> => LuminanceAlpha, UnsignedByte;
    Rgb<f32> => Rgb, Float;
    Rgba<f32> => Rgba, Float;
    Rgb<f64> => Rgb, Double;
    Rgba<f64> => Rgba, Double;
}

/// Borrow a typed slice as a `width × height` [`PixelRef`].
pub fn as_pixel_ref<P: TypedPixel>(
    pixels: &[P],
    width: usize,
    height: usize,
) -> Result<PixelRef<'_>, PixelError> {
    let e = P::ENCODING;
    PixelRef::new(bytemuck::cast_slice(pixels), width, height, e.format, e.ty)
}

/// Convert a slice of one pixel type into a freshly allocated `Vec` of another.
pub fn convert_slice<S: TypedPixel, D: TypedPixel>(src: &[S]) -> Result<Vec<D>, PixelError> {
    let mut dst = vec![D::zeroed(); src.len()];
    convert_slice_into(src, &mut dst)?;
    Ok(dst)
}

/// Convert into a caller-owned slice of at least `src.len()` pixels.
pub fn convert_slice_into<S: TypedPixel, D: TypedPixel>(
    src: &[S],
    dst: &mut [D],
) -> Result<(), PixelError> {
    let src = as_pixel_ref(src, src.len(), 1)?;
    let e = D::ENCODING;
    convert_into(src, bytemuck::cast_slice_mut(dst), e.format, e.ty)
}
