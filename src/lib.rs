//! # pixconv
//!
//! Pixel format conversion for texture uploads.
//!
//! Convert whole images between channel layouts (red, RG, RGB, BGR, RGBA,
//! BGRA, luminance-alpha, alpha) and storage types (8-bit, packed
//! 8-8-8-8, 1-5-5-5 and 5-6-5, `f32`, `f64`), apply a per-channel affine
//! color transform, halve an image with a 2×2 box filter, rescale it with
//! nearest-neighbor sampling, or dump it to a PPM file for inspection.
//!
//! Every pixel travels through a normalized RGBA intermediate. When both
//! sides store whole bytes per channel, the conversion is compiled into a
//! byte shuffle and run by a SIMD-dispatched kernel (x86-64 AVX2, ARM NEON,
//! WASM SIMD128, scalar fallback) with identical results.
//!
//! ```rust
//! use pixconv::{PixelFormat, PixelRef, PixelType, convert};
//!
//! let rgba = [255u8, 0, 0, 255, 0, 255, 0, 128];
//! let src = PixelRef::new(&rgba, 2, 1, PixelFormat::Rgba, PixelType::UnsignedByte).unwrap();
//! let rgb = convert(src, PixelFormat::Rgb, PixelType::UnsignedByte).unwrap();
//! assert_eq!(rgb.as_bytes(), &[255, 0, 0, 0, 255, 0]);
//! ```
//!
//! ## Feature flags
//!
//! - **`std`** (default): PPM dumps ([`dump`], [`DumpTarget`]) and
//!   runtime SIMD tier detection.
//! - **`imgref`**: whole-image operations on [`imgref`] types, see [`img`].

#![no_std]
#![forbid(unsafe_code)]

#[cfg(any(feature = "std", test))]
extern crate std;

extern crate alloc;

mod buffer;
mod codec;
mod convert;
mod error;
mod format;
mod kernels;
mod layout;
mod resample;
mod transform;

#[cfg(feature = "std")]
mod dump;

pub mod typed;

#[cfg(feature = "imgref")]
pub mod img;

pub use buffer::{PixelRef, PixelVec};
pub use codec::{NormalizedPixel, decode, encode};
pub use convert::{convert, convert_in_place, convert_into};
pub use error::PixelError;
pub use format::{PixelEncoding, PixelFormat, PixelType};
pub use layout::ColorLayout;
pub use resample::{halve, scale_nearest};
pub use transform::{Affine, transform, transform_in_place, transform_into};

#[cfg(feature = "std")]
pub use dump::{DumpTarget, dump, write_ppm};
