use thiserror::Error;

use crate::format::{PixelFormat, PixelType};

/// Everything that can make a conversion, resample or dump fail.
///
/// None of these are retried internally. When a call fails after it started
/// writing into a caller-supplied destination, that destination holds a mix
/// of converted and stale bytes and must not be trusted.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PixelError {
    /// The format identifier is not in the layout registry.
    #[error("unknown pixel format {0:#06x}")]
    UnsupportedFormat(u32),

    /// The storage type identifier is not handled by the codec.
    #[error("unsupported pixel type {0:#06x}")]
    UnsupportedType(u32),

    /// The format and type are both known but cannot be combined
    /// (e.g. packed 5-6-5 with a four-channel format).
    #[error("pixel type {ty:?} cannot store format {format:?}")]
    IncompatibleType { format: PixelFormat, ty: PixelType },

    /// Dimensions are incompatible with the requested operation.
    #[error("invalid geometry {width}x{height}")]
    InvalidGeometry { width: usize, height: usize },

    /// A buffer is shorter than its dimensions and encoding require.
    #[error("buffer holds {actual} bytes, {needed} required")]
    BufferTooSmall { needed: usize, actual: usize },

    /// The debug dump could not be written.
    #[cfg(feature = "std")]
    #[error("dump sink failed: {0}")]
    Sink(#[from] std::io::Error),
}
