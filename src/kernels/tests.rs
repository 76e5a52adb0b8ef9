extern crate std;
use super::*;
use crate::codec::{decode_pixel, encode_pixel};
use crate::format::{PixelFormat, PixelType};
use alloc::{vec, vec::Vec};
use archmage::testing::{CompileTimePolicy, for_each_token_permutation};

fn policy() -> CompileTimePolicy {
    if std::env::var_os("CI").is_some() {
        CompileTimePolicy::Fail
    } else {
        CompileTimePolicy::WarnStderr
    }
}

fn make_bytes(n: usize) -> Vec<u8> {
    (0..n).map(|i| (i % 251) as u8).collect()
}

/// Decode/encode reference the shuffle must reproduce bit for bit.
fn reference(src: &[u8], s: PixelEncoding, d: PixelEncoding, count: usize) -> Vec<u8> {
    let (sb, db) = (s.pixel_size().unwrap(), d.pixel_size().unwrap());
    let (sl, dl) = (s.layout(), d.layout());
    let mut out = vec![0u8; count * db];
    for (sp, dp) in src.chunks_exact(sb).zip(out.chunks_exact_mut(db)).take(count) {
        encode_pixel(decode_pixel(sp, &sl, s.ty), dp, &dl, d.ty);
    }
    out
}

fn byte_encodings() -> Vec<PixelEncoding> {
    let mut all = Vec::new();
    for format in PixelFormat::ALL {
        for ty in [
            PixelType::UnsignedByte,
            PixelType::UnsignedInt8888,
            PixelType::UnsignedInt8888Rev,
        ] {
            let e = PixelEncoding::new(format, ty);
            if e.pixel_size().is_some() {
                all.push(e);
            }
        }
    }
    all
}

#[test]
fn compile_rejects_non_byte_types() {
    let rgba = PixelEncoding::new(PixelFormat::Rgba, PixelType::UnsignedByte);
    let f = PixelEncoding::new(PixelFormat::Rgba, PixelType::Float);
    let p = PixelEncoding::new(PixelFormat::Rgba, PixelType::UnsignedShort1555Rev);
    assert_eq!(BytePlan::compile(rgba, f), None);
    assert_eq!(BytePlan::compile(p, rgba), None);
}

#[test]
fn classify_common_shapes() {
    let ub = |f| PixelEncoding::new(f, PixelType::UnsignedByte);
    let shape = |s, d| BytePlan::compile(ub(s), ub(d)).unwrap().classify();
    use PixelFormat::*;
    assert_eq!(shape(Rgba, Bgra), Shuffle::SwapBr4);
    assert_eq!(shape(Bgra, Rgba), Shuffle::SwapBr4);
    assert_eq!(shape(Rgba, Rgb), Shuffle::DropAlpha);
    assert_eq!(shape(Bgra, Rgb), Shuffle::SwapDropAlpha);
    assert_eq!(shape(Rgb, Rgba), Shuffle::AddAlpha);
    assert_eq!(shape(Rgb, Bgra), Shuffle::SwapAddAlpha);
    assert_eq!(shape(Bgr, Rgb), Shuffle::SwapBr3);
    assert!(matches!(shape(LuminanceAlpha, Rgba), Shuffle::Generic(_)));
}

#[test]
fn alpha_default_fills_255() {
    let plan = BytePlan::compile(
        PixelEncoding::new(PixelFormat::Rg, PixelType::UnsignedByte),
        PixelEncoding::new(PixelFormat::Rgba, PixelType::UnsignedInt8888),
    )
    .unwrap();
    // 8888 stores slot 0 in byte 3.
    assert_eq!(
        plan.ops,
        [ByteOp::Fill(255), ByteOp::Fill(0), ByteOp::Copy(1), ByteOp::Copy(0)]
    );
}

#[test]
fn permutation_matches_codec_for_every_byte_pair() {
    let count = 67;
    let report = for_each_token_permutation(policy(), |perm| {
        for s in byte_encodings() {
            for d in byte_encodings() {
                let plan = BytePlan::compile(s, d).unwrap();
                let src = make_bytes(count * plan.src_bpp);
                let mut dst = vec![0u8; count * plan.dst_bpp];
                shuffle_bytes(&src, &mut dst, count, plan);
                assert_eq!(dst, reference(&src, s, d, count), "{s:?} -> {d:?} tier={perm}");
            }
        }
    });
    std::eprintln!("byte_pairs: {report}");
}

#[test]
fn permutation_ignores_trailing_bytes() {
    let report = for_each_token_permutation(policy(), |perm| {
        let plan = BytePlan::compile(
            PixelEncoding::new(PixelFormat::Rgba, PixelType::UnsignedByte),
            PixelEncoding::new(PixelFormat::Bgra, PixelType::UnsignedByte),
        )
        .unwrap();
        let src = make_bytes(4 * 9);
        let mut dst = vec![0xCCu8; 4 * 9];
        shuffle_bytes(&src, &mut dst, 8, plan);
        assert_eq!(&dst[32..], &[0xCC; 4], "tier={perm}");
        assert_eq!(&dst[..4], &[src[2], src[1], src[0], src[3]], "tier={perm}");
    });
    std::eprintln!("trailing: {report}");
}
