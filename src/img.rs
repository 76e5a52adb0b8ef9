//! Whole-image operations on [`imgref`] types.
//!
//! Strided sources are handled row by row; results are always tightly packed
//! [`ImgVec`]s owned by the caller.
//!
//! ```rust
//! use rgb::{Bgra, Rgb};
//! use imgref::ImgVec;
//! use pixconv::img;
//!
//! let rgb_img = ImgVec::new(vec![Rgb::new(255u8, 0, 128); 100], 10, 10);
//! let bgra_img: ImgVec<Bgra<u8>> = img::convert(rgb_img.as_ref()).unwrap();
//! assert_eq!(bgra_img.buf()[0], Bgra { b: 128, g: 0, r: 255, a: 255 });
//! ```

use alloc::borrow::Cow;
use alloc::vec;
use alloc::vec::Vec;

use imgref::{ImgRef, ImgVec};

use crate::PixelError;
use crate::buffer::{PixelVec, pixel_count};
use crate::resample;
use crate::transform::{self, Affine};
use crate::typed::{TypedPixel, as_pixel_ref, convert_slice_into};

/// The image's pixels without stride padding, borrowed when already packed.
fn packed<P: TypedPixel>(img: ImgRef<'_, P>) -> Cow<'_, [P]> {
    let (w, h) = (img.width(), img.height());
    if img.stride() == w {
        Cow::Borrowed(&img.buf()[..w * h])
    } else {
        Cow::Owned(img.rows().flatten().copied().collect())
    }
}

fn into_img<P: TypedPixel>(buf: PixelVec) -> ImgVec<P> {
    let (w, h) = (buf.width(), buf.height());
    let pixels: Vec<P> = bytemuck::allocation::pod_collect_to_vec(buf.as_bytes());
    ImgVec::new(pixels, w, h)
}

/// Convert every pixel of `img` to `D`'s encoding.
pub fn convert<S: TypedPixel, D: TypedPixel>(img: ImgRef<'_, S>) -> Result<ImgVec<D>, PixelError> {
    let (w, h) = (img.width(), img.height());
    let mut dst = ImgVec::new(vec![D::zeroed(); pixel_count(w, h)?], w, h);
    for (src_row, dst_row) in img.rows().zip(dst.rows_mut()) {
        convert_slice_into(src_row, dst_row)?;
    }
    Ok(dst)
}

/// Apply `affine` to every pixel, keeping the pixel type.
pub fn transform<P: TypedPixel>(img: ImgRef<'_, P>, affine: &Affine) -> Result<ImgVec<P>, PixelError> {
    let pixels = packed(img);
    let src = as_pixel_ref(&pixels, img.width(), img.height())?;
    Ok(into_img(transform::transform(src, affine)?))
}

/// One 2×2 box-filtered mip level below `img`.
pub fn halve<P: TypedPixel>(img: ImgRef<'_, P>) -> Result<ImgVec<P>, PixelError> {
    let pixels = packed(img);
    let src = as_pixel_ref(&pixels, img.width(), img.height())?;
    Ok(into_img(resample::halve(src)?))
}

/// Nearest-neighbor rescale by `ratio`.
pub fn scale_nearest<P: TypedPixel>(img: ImgRef<'_, P>, ratio: f32) -> Result<ImgVec<P>, PixelError> {
    let pixels = packed(img);
    let src = as_pixel_ref(&pixels, img.width(), img.height())?;
    Ok(into_img(resample::scale_nearest(src, ratio)?))
}
