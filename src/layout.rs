//! Channel-slot registry: which slot of a pixel holds red, green, blue and alpha.

use crate::format::PixelFormat;

/// Per-channel slot indices for one pixel format.
///
/// `None` means the channel is absent: decoding yields the channel default
/// (0.0 for color, 1.0 for alpha) and encoding leaves it unwritten. Several
/// channels may share a slot (luminance-alpha stores R=G=B in slot 0).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColorLayout {
    pub red: Option<u8>,
    pub green: Option<u8>,
    pub blue: Option<u8>,
    pub alpha: Option<u8>,
}

impl ColorLayout {
    const fn new(red: Option<u8>, green: Option<u8>, blue: Option<u8>, alpha: Option<u8>) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// The fixed layout of a known format.
    pub const fn of(format: PixelFormat) -> Self {
        match format {
            PixelFormat::Red => Self::new(Some(0), None, None, None),
            PixelFormat::Rg => Self::new(Some(0), Some(1), None, None),
            PixelFormat::Rgba => Self::new(Some(0), Some(1), Some(2), Some(3)),
            PixelFormat::Rgb => Self::new(Some(0), Some(1), Some(2), None),
            PixelFormat::Bgra => Self::new(Some(2), Some(1), Some(0), Some(3)),
            PixelFormat::Bgr => Self::new(Some(2), Some(1), Some(0), None),
            PixelFormat::LuminanceAlpha => Self::new(Some(0), Some(0), Some(0), Some(1)),
            PixelFormat::Alpha => Self::new(None, None, None, Some(0)),
        }
    }

    /// Layout for a raw GL format enumerant; `None` (with a warning) when unknown.
    pub fn from_gl(code: u32) -> Option<Self> {
        PixelFormat::try_from(code).ok().map(Self::of)
    }

    /// Slots in channel order r, g, b, a.
    #[inline]
    pub const fn slots(&self) -> [Option<u8>; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_channel_has_no_alpha() {
        let rgb = ColorLayout::of(PixelFormat::Rgb);
        assert_eq!(rgb.slots(), [Some(0), Some(1), Some(2), None]);
        let bgr = ColorLayout::of(PixelFormat::Bgr);
        assert_eq!(bgr.slots(), [Some(2), Some(1), Some(0), None]);
    }

    #[test]
    fn luminance_alpha_shares_slot_zero() {
        let la = ColorLayout::of(PixelFormat::LuminanceAlpha);
        assert_eq!(la.slots(), [Some(0), Some(0), Some(0), Some(1)]);
    }

    #[test]
    fn alpha_only() {
        assert_eq!(
            ColorLayout::of(PixelFormat::Alpha).slots(),
            [None, None, None, Some(0)]
        );
    }

    #[test]
    fn every_layout_is_distinct_and_in_range() {
        for (i, a) in PixelFormat::ALL.iter().enumerate() {
            let layout = a.layout();
            for slot in layout.slots().into_iter().flatten() {
                assert!((slot as usize) < a.channel_count(), "{a:?}");
            }
            for b in &PixelFormat::ALL[i + 1..] {
                assert_ne!(layout, b.layout(), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn raw_lookup() {
        assert_eq!(
            ColorLayout::from_gl(0x80E1),
            Some(ColorLayout::of(PixelFormat::Bgra))
        );
        assert_eq!(ColorLayout::from_gl(0x1909), None);
    }
}
