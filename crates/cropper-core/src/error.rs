use thiserror::Error;

#[derive(Error, Debug)]
pub enum CropperError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Failed to load image from {origin}: {reason}")]
    ImageLoad { origin: String, reason: String },

    #[error("Invalid data URI: {0}")]
    InvalidDataUri(String),

    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("No image loaded")]
    NotReady,

    #[error("Image loader stopped before delivering a result")]
    LoaderDisconnected,
}

pub type Result<T> = std::result::Result<T, CropperError>;
