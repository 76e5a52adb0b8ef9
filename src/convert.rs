//! Conversion driver: whole-buffer format/type conversion.
//!
//! Three paths, picked per call:
//!
//! 1. **Identity**: same storage type and same layout. The output is an exact
//!    byte copy of the input; no pixel is decoded.
//! 2. **Byte shuffle**: both sides store channels as whole bytes. The
//!    decode/encode round trip is exact there, so it is compiled into a
//!    per-byte plan and run by a SIMD-dispatched kernel.
//! 3. **General**: every pixel is decoded to normalized RGBA and re-encoded.

use crate::PixelError;
use crate::buffer::{PixelRef, PixelVec, byte_len, check_len};
use crate::codec::{decode_pixel, encode_pixel};
use crate::format::{PixelEncoding, PixelFormat, PixelType};
use crate::kernels::{BytePlan, shuffle_bytes};

/// Convert `count` pixels from `src` into `dst`. Both slices are already
/// length-checked.
pub(crate) fn convert_pixels(
    src: &[u8],
    src_enc: PixelEncoding,
    dst: &mut [u8],
    dst_enc: PixelEncoding,
    count: usize,
) -> Result<(), PixelError> {
    let src_bpp = src_enc.checked_pixel_size()?;
    let dst_bpp = dst_enc.checked_pixel_size()?;

    if src_enc.ty == dst_enc.ty && src_enc.layout() == dst_enc.layout() {
        log::debug!("convert {count}px {src_enc:?}: identity copy");
        let n = count * src_bpp;
        dst[..n].copy_from_slice(&src[..n]);
        return Ok(());
    }

    if let Some(plan) = BytePlan::compile(src_enc, dst_enc) {
        log::debug!("convert {count}px {src_enc:?} -> {dst_enc:?}: byte shuffle");
        shuffle_bytes(src, dst, count, plan);
        return Ok(());
    }

    log::debug!("convert {count}px {src_enc:?} -> {dst_enc:?}: decode/encode");
    let (src_layout, dst_layout) = (src_enc.layout(), dst_enc.layout());
    for (s, d) in src
        .chunks_exact(src_bpp)
        .zip(dst.chunks_exact_mut(dst_bpp))
        .take(count)
    {
        let px = decode_pixel(s, &src_layout, src_enc.ty);
        encode_pixel(px, d, &dst_layout, dst_enc.ty);
    }
    Ok(())
}

/// Convert `src` into a newly allocated buffer of `format`/`ty`.
///
/// The returned [`PixelVec`] is owned by the caller.
pub fn convert(src: PixelRef<'_>, format: PixelFormat, ty: PixelType) -> Result<PixelVec, PixelError> {
    let dst_enc = PixelEncoding::new(format, ty);
    let mut out = PixelVec::zeroed(src.width(), src.height(), dst_enc)?;
    convert_pixels(
        src.as_bytes(),
        src.encoding(),
        out.as_bytes_mut(),
        dst_enc,
        src.pixel_count(),
    )?;
    Ok(out)
}

/// Convert `src` into the caller's `dst`, which must hold
/// `width * height` pixels of `format`/`ty`. Nothing is allocated.
///
/// Bytes of `dst` belonging to channels the destination format does not
/// define keep their previous value. On error `dst` may be partly written.
pub fn convert_into(
    src: PixelRef<'_>,
    dst: &mut [u8],
    format: PixelFormat,
    ty: PixelType,
) -> Result<(), PixelError> {
    let dst_enc = PixelEncoding::new(format, ty);
    check_len(dst.len(), byte_len(src.pixel_count(), dst_enc)?)?;
    convert_pixels(
        src.as_bytes(),
        src.encoding(),
        dst,
        dst_enc,
        src.pixel_count(),
    )
}

/// Convert `buf` to `format`/`ty`, replacing its contents.
///
/// Source and destination are the same buffer here, so the result is always
/// built in a fresh allocation and swapped in afterwards; `buf` is left
/// unchanged when the conversion fails.
pub fn convert_in_place(buf: &mut PixelVec, format: PixelFormat, ty: PixelType) -> Result<(), PixelError> {
    *buf = convert(buf.as_ref(), format, ty)?;
    Ok(())
}
