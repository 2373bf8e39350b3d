use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("color count must be at least 1")]
    InvalidColorCount,

    #[error("sample cap must be at least 1")]
    InvalidSampleCap,

    #[error("maximum working side must be at least 1 pixel")]
    InvalidMaxSide,

    #[error("image dimensions cannot be zero")]
    ZeroDimension,

    #[error("pixel buffer length {len} does not match dimensions {width}x{height}")]
    DimensionMismatch {
        len: usize,
        width: u32,
        height: u32,
    },

    #[error("invalid hex color: {0:?}")]
    InvalidHex(String),

    #[error("unable to decode image: {0}")]
    Decode(#[from] image::ImageError),
}
