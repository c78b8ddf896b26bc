use std::io::Cursor;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{ImageFormat, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Still-image encoding used for exported crops.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    Bmp,
}

impl ExportFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Bmp => "image/bmp",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Bmp => "bmp",
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Bmp => ImageFormat::Bmp,
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Png => write!(f, "PNG"),
            Self::Bmp => write!(f, "BMP"),
        }
    }
}

/// An encoded still of the viewport surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub format: ExportFormat,
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

impl Snapshot {
    pub fn encode(pixels: &RgbaImage, format: ExportFormat) -> Result<Self> {
        let mut bytes = Vec::new();
        pixels.write_to(&mut Cursor::new(&mut bytes), format.image_format())?;
        Ok(Self {
            format,
            width: pixels.width(),
            height: pixels.height(),
            bytes,
        })
    }

    /// `data:<mime>;base64,<payload>`, the same shape a canvas `toDataURL` produces.
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.format.mime_type(),
            STANDARD.encode(&self.bytes)
        )
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, &self.bytes)?;
        Ok(())
    }
}
