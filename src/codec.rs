//! Per-pixel decode to / encode from normalized RGBA.
//!
//! Every storage type reads and writes individual channel *slots*; the
//! [`ColorLayout`] decides which slot each of r, g, b, a lives in. Unsigned
//! integer slots are normalized by their maximum value (255, 63, 31 or 1),
//! float slots pass through unscaled.

use rgb::Rgba;

use crate::PixelError;
use crate::format::{PixelEncoding, PixelType};
use crate::layout::ColorLayout;

/// Intermediate color: r, g, b, a nominally in `0.0..=1.0`.
pub type NormalizedPixel = Rgba<f32>;

/// A bit field inside a packed 16-bit word.
#[derive(Clone, Copy)]
struct Field {
    shift: u32,
    bits: u32,
}

impl Field {
    const fn new(shift: u32, bits: u32) -> Self {
        Self { shift, bits }
    }

    #[inline(always)]
    const fn max(self) -> u32 {
        (1 << self.bits) - 1
    }

    #[inline(always)]
    fn extract(self, word: u16) -> f32 {
        ((u32::from(word) >> self.shift) & self.max()) as f32 / self.max() as f32
    }

    #[inline(always)]
    fn insert(self, word: u16, value: f32) -> u16 {
        let mask = (self.max() << self.shift) as u16;
        let v = (unorm(value, self.max()) << self.shift) as u16;
        (word & !mask) | (v & mask)
    }
}

const FIELDS_1555_REV: [Field; 4] = [
    Field::new(0, 5),
    Field::new(5, 5),
    Field::new(10, 5),
    Field::new(15, 1),
];

const FIELDS_565: [Field; 3] = [Field::new(11, 5), Field::new(5, 6), Field::new(0, 5)];

/// Scale a normalized value to `0..=max`, clamping and rounding to nearest.
#[inline(always)]
fn unorm(value: f32, max: u32) -> u32 {
    (value.clamp(0.0, 1.0) * max as f32 + 0.5) as u32
}

/// Byte holding `slot` for the byte-addressable storage types.
#[inline(always)]
pub(crate) const fn byte_index(ty: PixelType, slot: usize) -> usize {
    match ty {
        PixelType::UnsignedInt8888 => 3 - slot,
        _ => slot,
    }
}

#[inline(always)]
fn read_word(raw: &[u8]) -> u16 {
    u16::from_ne_bytes([raw[0], raw[1]])
}

#[inline(always)]
fn write_word(raw: &mut [u8], word: u16) {
    raw[..2].copy_from_slice(&word.to_ne_bytes());
}

#[inline(always)]
fn read_slot(raw: &[u8], ty: PixelType, slot: usize) -> f32 {
    match ty {
        PixelType::Double => bytemuck::pod_read_unaligned::<f64>(&raw[slot * 8..][..8]) as f32,
        PixelType::Float => bytemuck::pod_read_unaligned::<f32>(&raw[slot * 4..][..4]),
        PixelType::UnsignedByte | PixelType::UnsignedInt8888 | PixelType::UnsignedInt8888Rev => {
            f32::from(raw[byte_index(ty, slot)]) / 255.0
        }
        PixelType::UnsignedShort1555Rev => FIELDS_1555_REV[slot].extract(read_word(raw)),
        PixelType::UnsignedShort565 => FIELDS_565[slot].extract(read_word(raw)),
    }
}

#[inline(always)]
fn write_slot(raw: &mut [u8], ty: PixelType, slot: usize, value: f32) {
    match ty {
        PixelType::Double => {
            raw[slot * 8..][..8].copy_from_slice(bytemuck::bytes_of(&f64::from(value)));
        }
        PixelType::Float => raw[slot * 4..][..4].copy_from_slice(bytemuck::bytes_of(&value)),
        PixelType::UnsignedByte | PixelType::UnsignedInt8888 | PixelType::UnsignedInt8888Rev => {
            raw[byte_index(ty, slot)] = unorm(value, 255) as u8;
        }
        PixelType::UnsignedShort1555Rev => {
            let word = FIELDS_1555_REV[slot].insert(read_word(raw), value);
            write_word(raw, word);
        }
        PixelType::UnsignedShort565 => {
            let word = FIELDS_565[slot].insert(read_word(raw), value);
            write_word(raw, word);
        }
    }
}

/// Decode one pixel. `raw` must hold at least one whole pixel.
#[inline(always)]
pub(crate) fn decode_pixel(raw: &[u8], layout: &ColorLayout, ty: PixelType) -> NormalizedPixel {
    let read = |slot: u8| read_slot(raw, ty, usize::from(slot));
    Rgba::new(
        layout.red.map_or(0.0, read),
        layout.green.map_or(0.0, read),
        layout.blue.map_or(0.0, read),
        layout.alpha.map_or(1.0, read),
    )
}

/// Encode one pixel, writing only the slots the layout defines.
///
/// Channels are written in r, g, b, a order, so when several share a slot
/// the last one wins.
#[inline(always)]
pub(crate) fn encode_pixel(
    px: NormalizedPixel,
    raw: &mut [u8],
    layout: &ColorLayout,
    ty: PixelType,
) {
    let values = [px.r, px.g, px.b, px.a];
    for (slot, value) in layout.slots().into_iter().zip(values) {
        if let Some(slot) = slot {
            write_slot(raw, ty, usize::from(slot), value);
        }
    }
}

fn check_raw(len: usize, encoding: PixelEncoding) -> Result<(), PixelError> {
    let needed = encoding.checked_pixel_size()?;
    if len < needed {
        return Err(PixelError::BufferTooSmall {
            needed,
            actual: len,
        });
    }
    Ok(())
}

/// Decode the first pixel of `raw` to normalized RGBA.
///
/// Channels absent from the format decode as 0.0 (color) or 1.0 (alpha).
pub fn decode(raw: &[u8], encoding: PixelEncoding) -> Result<NormalizedPixel, PixelError> {
    check_raw(raw.len(), encoding)?;
    Ok(decode_pixel(raw, &encoding.layout(), encoding.ty))
}

/// Encode `px` into the first pixel of `raw`.
///
/// Bytes (or packed bits) belonging to channels the format does not define
/// are left untouched.
pub fn encode(px: NormalizedPixel, raw: &mut [u8], encoding: PixelEncoding) -> Result<(), PixelError> {
    check_raw(raw.len(), encoding)?;
    encode_pixel(px, raw, &encoding.layout(), encoding.ty);
    Ok(())
}
