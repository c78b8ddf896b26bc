use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::RgbaImage;
use kurbo::Size;

use crate::error::{CropperError, Result};

/// Where an image comes from.
#[derive(Clone, Debug, PartialEq)]
pub enum ImageSource {
    Path(PathBuf),
    /// `data:<mime>;base64,<payload>`.
    DataUri(String),
    /// Encoded image bytes (PNG, JPEG, ...).
    Bytes(Vec<u8>),
    /// A URL whose scheme cannot be fetched locally.
    Url(String),
}

impl ImageSource {
    /// Interpret a textual image reference.
    ///
    /// `data:` URIs stay inline and `file://` URLs become paths. Other URL
    /// schemes are kept as [`ImageSource::Url`] and fail to decode. Anything
    /// else is a path.
    pub fn parse(reference: &str) -> Self {
        if reference.starts_with("data:") {
            Self::DataUri(reference.to_string())
        } else if let Some(path) = reference.strip_prefix("file://") {
            Self::Path(PathBuf::from(path))
        } else if url_scheme(reference).is_some() {
            Self::Url(reference.to_string())
        } else {
            Self::Path(PathBuf::from(reference))
        }
    }

    /// Short human-readable description used in logs and errors.
    pub fn origin(&self) -> String {
        match self {
            Self::Path(p) => p.display().to_string(),
            Self::DataUri(uri) => {
                let header = uri.split(',').next().unwrap_or_default();
                format!("{header},...")
            }
            Self::Bytes(b) => format!("<{} bytes in memory>", b.len()),
            Self::Url(url) => url.clone(),
        }
    }

    /// Decode the source into RGBA pixels.
    ///
    /// Every failure is reported as [`CropperError::ImageLoad`].
    pub fn decode(&self) -> Result<LoadedImage> {
        let origin = self.origin();
        let decoded = match self {
            Self::Path(p) => decode_path(p),
            Self::DataUri(uri) => decode_data_uri(uri),
            Self::Bytes(b) => decode_bytes(b),
            Self::Url(url) => Err(CropperError::ImageLoad {
                origin: origin.clone(),
                reason: format!(
                    "unsupported URL scheme `{}`",
                    url_scheme(url).unwrap_or_default()
                ),
            }),
        };

        decoded
            .and_then(|pixels| LoadedImage::new(pixels, origin.clone()))
            .map_err(|e| match e {
                CropperError::ImageLoad { .. } => e,
                other => CropperError::ImageLoad {
                    origin,
                    reason: other.to_string(),
                },
            })
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for ImageSource {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

/// Scheme of `reference` if it looks like `scheme://...`.
fn url_scheme(reference: &str) -> Option<&str> {
    let (scheme, _) = reference.split_once("://")?;
    let mut chars = scheme.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some(scheme)
}

fn decode_path(path: &Path) -> Result<RgbaImage> {
    Ok(image::open(path)?.to_rgba8())
}

fn decode_bytes(bytes: &[u8]) -> Result<RgbaImage> {
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

fn decode_data_uri(uri: &str) -> Result<RgbaImage> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| CropperError::InvalidDataUri("missing `data:` prefix".into()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| CropperError::InvalidDataUri("missing `,` separator".into()))?;
    if !header.ends_with(";base64") {
        return Err(CropperError::InvalidDataUri(
            "only base64 payloads are supported".into(),
        ));
    }

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| CropperError::InvalidDataUri(e.to_string()))?;
    decode_bytes(&bytes)
}

/// A decoded image ready to be assigned to the viewport.
#[derive(Clone, Debug)]
pub struct LoadedImage {
    pixels: RgbaImage,
    origin: String,
}

impl LoadedImage {
    pub fn new(pixels: RgbaImage, origin: impl Into<String>) -> Result<Self> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(CropperError::InvalidDimensions {
                width: pixels.width() as f64,
                height: pixels.height() as f64,
            });
        }
        Ok(Self {
            pixels,
            origin: origin.into(),
        })
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> Size {
        Size::new(self.width() as f64, self.height() as f64)
    }
}
