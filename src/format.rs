//! Pixel format and storage type identifiers.
//!
//! Both enums carry the GL enumerant they stand for, so raw identifiers coming
//! from a graphics API can be validated once at the boundary with
//! [`TryFrom<u32>`] and handled as closed sets everywhere else.

use crate::PixelError;
use crate::layout::ColorLayout;

/// The set and order of color channels a pixel exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelFormat {
    Red = 0x1903,
    Rg = 0x8227,
    Rgb = 0x1907,
    Bgr = 0x80E0,
    Rgba = 0x1908,
    Bgra = 0x80E1,
    /// One value replicated to R, G and B, a second one for alpha.
    LuminanceAlpha = 0x190A,
    Alpha = 0x1906,
}

impl PixelFormat {
    pub const ALL: [PixelFormat; 8] = [
        PixelFormat::Red,
        PixelFormat::Rg,
        PixelFormat::Rgb,
        PixelFormat::Bgr,
        PixelFormat::Rgba,
        PixelFormat::Bgra,
        PixelFormat::LuminanceAlpha,
        PixelFormat::Alpha,
    ];

    #[inline]
    pub const fn gl_code(self) -> u32 {
        self as u32
    }

    /// Number of channel slots one pixel of this format occupies.
    pub const fn channel_count(self) -> usize {
        match self {
            PixelFormat::Red | PixelFormat::Alpha => 1,
            PixelFormat::Rg | PixelFormat::LuminanceAlpha => 2,
            PixelFormat::Rgb | PixelFormat::Bgr => 3,
            PixelFormat::Rgba | PixelFormat::Bgra => 4,
        }
    }

    /// Channel-slot mapping for this format.
    #[inline]
    pub const fn layout(self) -> ColorLayout {
        ColorLayout::of(self)
    }
}

impl TryFrom<u32> for PixelFormat {
    type Error = PixelError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match PixelFormat::ALL.into_iter().find(|f| f.gl_code() == code) {
            Some(format) => Ok(format),
            None => {
                log::warn!("unknown pixel format {code:#06x}");
                Err(PixelError::UnsupportedFormat(code))
            }
        }
    }
}

/// How one pixel's channel slots are stored in memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelType {
    /// 64-bit float per channel, native byte order.
    Double = 0x140A,
    /// 32-bit float per channel, native byte order.
    Float = 0x1406,
    /// One byte per channel.
    UnsignedByte = 0x1401,
    /// Four bytes, slot 0 in the most significant byte of a little-endian word.
    UnsignedInt8888 = 0x8035,
    /// Four bytes, slot 0 first in memory.
    UnsignedInt8888Rev = 0x8367,
    /// 16-bit word: 5 bits per color slot from the low end, 1 alpha bit on top.
    UnsignedShort1555Rev = 0x8366,
    /// 16-bit word: 5 bits slot 0 (high), 6 bits slot 1, 5 bits slot 2 (low).
    UnsignedShort565 = 0x8363,
}

impl PixelType {
    pub const ALL: [PixelType; 7] = [
        PixelType::Double,
        PixelType::Float,
        PixelType::UnsignedByte,
        PixelType::UnsignedInt8888,
        PixelType::UnsignedInt8888Rev,
        PixelType::UnsignedShort1555Rev,
        PixelType::UnsignedShort565,
    ];

    #[inline]
    pub const fn gl_code(self) -> u32 {
        self as u32
    }

    /// True when every channel slot is a whole byte somewhere in the pixel.
    #[inline]
    pub const fn is_byte_addressable(self) -> bool {
        matches!(
            self,
            PixelType::UnsignedByte | PixelType::UnsignedInt8888 | PixelType::UnsignedInt8888Rev
        )
    }
}

impl TryFrom<u32> for PixelType {
    type Error = PixelError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match PixelType::ALL.into_iter().find(|t| t.gl_code() == code) {
            Some(ty) => Ok(ty),
            None => {
                log::warn!("unsupported pixel type {code:#06x}");
                Err(PixelError::UnsupportedType(code))
            }
        }
    }
}

/// A (format, type) pair: everything needed to interpret one pixel's bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelEncoding {
    pub format: PixelFormat,
    pub ty: PixelType,
}

impl PixelEncoding {
    pub const fn new(format: PixelFormat, ty: PixelType) -> Self {
        Self { format, ty }
    }

    /// Bytes per pixel, or `None` when the type cannot hold the format.
    pub const fn pixel_size(self) -> Option<usize> {
        let channels = self.format.channel_count();
        match self.ty {
            PixelType::Double => Some(channels * 8),
            PixelType::Float => Some(channels * 4),
            PixelType::UnsignedByte => Some(channels),
            PixelType::UnsignedInt8888 | PixelType::UnsignedInt8888Rev if channels == 4 => Some(4),
            PixelType::UnsignedShort1555Rev if channels == 4 => Some(2),
            PixelType::UnsignedShort565 if channels == 3 => Some(2),
            _ => None,
        }
    }

    /// Like [`pixel_size`](Self::pixel_size), but as an error for `?` callers.
    pub fn checked_pixel_size(self) -> Result<usize, PixelError> {
        self.pixel_size().ok_or(PixelError::IncompatibleType {
            format: self.format,
            ty: self.ty,
        })
    }

    #[inline]
    pub const fn layout(self) -> ColorLayout {
        ColorLayout::of(self.format)
    }
}
