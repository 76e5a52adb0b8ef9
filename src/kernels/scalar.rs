use super::{ByteOp, BytePlan, Shuffle};

// ===========================================================================
// Row loops (inlined into every dispatch tier)
// ===========================================================================

#[inline(always)]
fn swap_br4(src: &[u8], dst: &mut [u8]) {
    for (s, d) in src.chunks_exact(4).zip(dst.chunks_exact_mut(4)) {
        d[0] = s[2];
        d[1] = s[1];
        d[2] = s[0];
        d[3] = s[3];
    }
}

#[inline(always)]
fn drop_alpha(src: &[u8], dst: &mut [u8]) {
    for (s, d) in src.chunks_exact(4).zip(dst.chunks_exact_mut(3)) {
        d[0] = s[0];
        d[1] = s[1];
        d[2] = s[2];
    }
}

#[inline(always)]
fn swap_drop_alpha(src: &[u8], dst: &mut [u8]) {
    for (s, d) in src.chunks_exact(4).zip(dst.chunks_exact_mut(3)) {
        d[0] = s[2];
        d[1] = s[1];
        d[2] = s[0];
    }
}

#[inline(always)]
fn add_alpha(src: &[u8], dst: &mut [u8]) {
    for (s, d) in src.chunks_exact(3).zip(dst.chunks_exact_mut(4)) {
        d[0] = s[0];
        d[1] = s[1];
        d[2] = s[2];
        d[3] = 0xFF;
    }
}

#[inline(always)]
fn swap_add_alpha(src: &[u8], dst: &mut [u8]) {
    for (s, d) in src.chunks_exact(3).zip(dst.chunks_exact_mut(4)) {
        d[0] = s[2];
        d[1] = s[1];
        d[2] = s[0];
        d[3] = 0xFF;
    }
}

#[inline(always)]
fn swap_br3(src: &[u8], dst: &mut [u8]) {
    for (s, d) in src.chunks_exact(3).zip(dst.chunks_exact_mut(3)) {
        d[0] = s[2];
        d[1] = s[1];
        d[2] = s[0];
    }
}

#[inline(always)]
fn generic(src: &[u8], dst: &mut [u8], plan: &BytePlan) {
    let ops = &plan.ops[..plan.dst_bpp];
    for (s, d) in src
        .chunks_exact(plan.src_bpp)
        .zip(dst.chunks_exact_mut(plan.dst_bpp))
    {
        for (byte, op) in d.iter_mut().zip(ops) {
            match *op {
                ByteOp::Keep => {}
                ByteOp::Copy(i) => *byte = s[usize::from(i)],
                ByteOp::Fill(v) => *byte = v,
            }
        }
    }
}

#[inline(always)]
pub(super) fn run_shuffle(src: &[u8], dst: &mut [u8], shuffle: Shuffle) {
    match shuffle {
        Shuffle::SwapBr4 => swap_br4(src, dst),
        Shuffle::DropAlpha => drop_alpha(src, dst),
        Shuffle::SwapDropAlpha => swap_drop_alpha(src, dst),
        Shuffle::AddAlpha => add_alpha(src, dst),
        Shuffle::SwapAddAlpha => swap_add_alpha(src, dst),
        Shuffle::SwapBr3 => swap_br3(src, dst),
        Shuffle::Generic(plan) => generic(src, dst, &plan),
    }
}
