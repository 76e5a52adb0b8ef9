// ---------------------------------------------------------------------------
// Byte-shuffle kernels for 8-bit to 8-bit conversions, with SIMD dispatch.
//
// When both sides store every channel slot as a whole byte, decoding to
// normalized RGBA and re-encoding is exact, so the conversion collapses to a
// per-destination-byte plan: copy a source byte, fill a constant, or leave
// the byte alone. Common plans get dedicated row loops; the rest run the
// generic plan interpreter. Every tier runs the same loops; the #[arcane]
// wrappers only widen the target features LLVM may vectorize with.
// ---------------------------------------------------------------------------

use archmage::incant;
use archmage::prelude::*;

use crate::codec::byte_index;
use crate::format::PixelEncoding;

mod scalar;
use scalar::*;

#[cfg(test)]
mod tests;

// ===========================================================================
// Plan
// ===========================================================================

/// What happens to one byte of a destination pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ByteOp {
    Keep,
    Copy(u8),
    Fill(u8),
}

/// Byte-level recipe for one pixel; applied to every pixel of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct BytePlan {
    pub src_bpp: usize,
    pub dst_bpp: usize,
    pub ops: [ByteOp; 4],
}

impl BytePlan {
    /// Compile a conversion into a byte plan, or `None` when either side is
    /// not byte-addressable.
    pub(crate) fn compile(src: PixelEncoding, dst: PixelEncoding) -> Option<Self> {
        if !src.ty.is_byte_addressable() || !dst.ty.is_byte_addressable() {
            return None;
        }
        let src_bpp = src.pixel_size()?;
        let dst_bpp = dst.pixel_size()?;
        let src_slots = src.layout().slots();
        let defaults = [0u8, 0, 0, 255];

        let mut ops = [ByteOp::Keep; 4];
        // r, g, b, a order: a later channel sharing a slot overwrites.
        for ((dst_slot, src_slot), default) in dst.layout().slots().into_iter().zip(src_slots).zip(defaults) {
            let Some(dst_slot) = dst_slot else { continue };
            let op = match src_slot {
                Some(s) => ByteOp::Copy(byte_index(src.ty, usize::from(s)) as u8),
                None => ByteOp::Fill(default),
            };
            ops[byte_index(dst.ty, usize::from(dst_slot))] = op;
        }
        Some(Self {
            src_bpp,
            dst_bpp,
            ops,
        })
    }

    /// Match the plan against the shapes that have dedicated row loops.
    pub(crate) fn classify(self) -> Shuffle {
        use ByteOp::{Copy as C, Fill as F};
        match (self.src_bpp, self.dst_bpp, self.ops) {
            (4, 4, [C(2), C(1), C(0), C(3)]) => Shuffle::SwapBr4,
            (4, 3, [C(0), C(1), C(2), _]) => Shuffle::DropAlpha,
            (4, 3, [C(2), C(1), C(0), _]) => Shuffle::SwapDropAlpha,
            (3, 4, [C(0), C(1), C(2), F(255)]) => Shuffle::AddAlpha,
            (3, 4, [C(2), C(1), C(0), F(255)]) => Shuffle::SwapAddAlpha,
            (3, 3, [C(2), C(1), C(0), _]) => Shuffle::SwapBr3,
            _ => Shuffle::Generic(self),
        }
    }
}

/// A byte plan resolved to the loop that runs it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Shuffle {
    /// 4bpp ↔ 4bpp, bytes 0 and 2 exchanged (RGBA ↔ BGRA).
    SwapBr4,
    /// 4bpp → 3bpp, byte 3 dropped (RGBA → RGB).
    DropAlpha,
    /// 4bpp → 3bpp, byte 3 dropped and 0 ↔ 2 exchanged (BGRA → RGB).
    SwapDropAlpha,
    /// 3bpp → 4bpp with alpha 255 (RGB → RGBA).
    AddAlpha,
    /// 3bpp → 4bpp with alpha 255 and 0 ↔ 2 exchanged (RGB → BGRA).
    SwapAddAlpha,
    /// 3bpp ↔ 3bpp, bytes 0 and 2 exchanged (RGB ↔ BGR).
    SwapBr3,
    Generic(BytePlan),
}

// ===========================================================================
// Arch wrappers
// ===========================================================================

#[cfg(target_arch = "x86_64")]
#[arcane]
fn shuffle_pixels_v3(_t: X64V3Token, src: &[u8], dst: &mut [u8], shuffle: Shuffle) {
    run_shuffle(src, dst, shuffle);
}

#[cfg(target_arch = "aarch64")]
#[arcane]
fn shuffle_pixels_neon(_t: NeonToken, src: &[u8], dst: &mut [u8], shuffle: Shuffle) {
    run_shuffle(src, dst, shuffle);
}

#[cfg(target_arch = "wasm32")]
#[arcane]
fn shuffle_pixels_wasm128(_t: Wasm128Token, src: &[u8], dst: &mut [u8], shuffle: Shuffle) {
    run_shuffle(src, dst, shuffle);
}

fn shuffle_pixels_scalar(_t: ScalarToken, src: &[u8], dst: &mut [u8], shuffle: Shuffle) {
    run_shuffle(src, dst, shuffle);
}

// ===========================================================================
// Entry point
// ===========================================================================

/// Apply `plan` to `count` pixels. Both slices must hold at least `count`
/// whole pixels; the caller checks this.
pub(crate) fn shuffle_bytes(src: &[u8], dst: &mut [u8], count: usize, plan: BytePlan) {
    let src = &src[..count * plan.src_bpp];
    let dst = &mut dst[..count * plan.dst_bpp];
    let shuffle = plan.classify();
    incant!(shuffle_pixels(src, dst, shuffle), [v3, neon, wasm128, scalar]);
}
