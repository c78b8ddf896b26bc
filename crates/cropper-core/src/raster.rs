use image::{Rgba, RgbaImage};
use kurbo::{Rect, Size};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::validate_size;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Pixel filter used when a source region is stretched onto the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sampling {
    #[default]
    Nearest,
    Bilinear,
}

/// A 2D drawing surface with canvas-style blit semantics.
pub trait RasterContext {
    /// Surface size in pixels.
    fn size(&self) -> Size;

    /// Reset every pixel whose center lies in `rect` to transparent.
    fn clear(&mut self, rect: Rect);

    /// Draw the `src` region of `image` stretched onto `dst`.
    ///
    /// Parts of `src` that fall outside the image leave the surface untouched.
    fn draw_image(&mut self, image: &RgbaImage, src: Rect, dst: Rect);

    /// Current surface contents.
    fn pixels(&self) -> &RgbaImage;
}

/// CPU raster surface backed by an RGBA buffer.
#[derive(Clone, Debug)]
pub struct SoftwareSurface {
    pixels: RgbaImage,
    sampling: Sampling,
}

impl SoftwareSurface {
    pub fn new(width: u32, height: u32, sampling: Sampling) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
            sampling,
        }
    }

    /// Build a surface from a (possibly fractional) layout size, rounding to whole pixels.
    pub fn from_size(size: Size, sampling: Sampling) -> Result<Self> {
        validate_size(size)?;
        let width = size.width.round().max(1.0) as u32;
        let height = size.height.round().max(1.0) as u32;
        Ok(Self::new(width, height, sampling))
    }

    pub fn sampling(&self) -> Sampling {
        self.sampling
    }

    pub fn into_pixels(self) -> RgbaImage {
        self.pixels
    }

    /// Pixel index range whose centers fall within `[lo, hi)`, clipped to `len`.
    fn covered(lo: f64, hi: f64, len: u32) -> std::ops::Range<u32> {
        let start = (lo - 0.5).ceil().max(0.0);
        let end = (hi - 0.5).ceil().min(len as f64);
        if end <= start {
            0..0
        } else {
            start as u32..end as u32
        }
    }
}

impl RasterContext for SoftwareSurface {
    fn size(&self) -> Size {
        Size::new(self.pixels.width() as f64, self.pixels.height() as f64)
    }

    fn clear(&mut self, rect: Rect) {
        let rect = rect.abs();
        for y in Self::covered(rect.y0, rect.y1, self.pixels.height()) {
            for x in Self::covered(rect.x0, rect.x1, self.pixels.width()) {
                self.pixels.put_pixel(x, y, TRANSPARENT);
            }
        }
    }

    fn draw_image(&mut self, image: &RgbaImage, src: Rect, dst: Rect) {
        let (src, dst) = (src.abs(), dst.abs());
        if src.area() <= 0.0 || dst.area() <= 0.0 {
            return;
        }

        let sx = src.width() / dst.width();
        let sy = src.height() / dst.height();

        for y in Self::covered(dst.y0, dst.y1, self.pixels.height()) {
            let v = src.y0 + (y as f64 + 0.5 - dst.y0) * sy;
            for x in Self::covered(dst.x0, dst.x1, self.pixels.width()) {
                let u = src.x0 + (x as f64 + 0.5 - dst.x0) * sx;
                let texel = match self.sampling {
                    Sampling::Nearest => sample_nearest(image, u, v),
                    Sampling::Bilinear => sample_bilinear(image, u, v),
                };
                if let Some(p) = texel {
                    self.pixels.put_pixel(x, y, p);
                }
            }
        }
    }

    fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

fn inside(image: &RgbaImage, u: f64, v: f64) -> bool {
    u >= 0.0 && v >= 0.0 && u < image.width() as f64 && v < image.height() as f64
}

fn sample_nearest(image: &RgbaImage, u: f64, v: f64) -> Option<Rgba<u8>> {
    if !inside(image, u, v) {
        return None;
    }
    Some(*image.get_pixel(u.floor() as u32, v.floor() as u32))
}

fn sample_bilinear(image: &RgbaImage, u: f64, v: f64) -> Option<Rgba<u8>> {
    if !inside(image, u, v) {
        return None;
    }

    // Texel centers sit at +0.5; edge texels are clamped.
    let max_x = (image.width() - 1) as f64;
    let max_y = (image.height() - 1) as f64;
    let fx = u - 0.5;
    let fy = v - 0.5;
    let x0 = fx.floor();
    let y0 = fy.floor();
    let tx = fx - x0;
    let ty = fy - y0;

    let xa = x0.clamp(0.0, max_x) as u32;
    let xb = (x0 + 1.0).clamp(0.0, max_x) as u32;
    let ya = y0.clamp(0.0, max_y) as u32;
    let yb = (y0 + 1.0).clamp(0.0, max_y) as u32;

    let p00 = image.get_pixel(xa, ya);
    let p10 = image.get_pixel(xb, ya);
    let p01 = image.get_pixel(xa, yb);
    let p11 = image.get_pixel(xb, yb);

    let mut out = [0u8; 4];
    for (c, slot) in out.iter_mut().enumerate() {
        let top = p00.0[c] as f64 * (1.0 - tx) + p10.0[c] as f64 * tx;
        let bottom = p01.0[c] as f64 * (1.0 - tx) + p11.0[c] as f64 * tx;
        *slot = (top * (1.0 - ty) + bottom * ty).round().clamp(0.0, 255.0) as u8;
    }
    Some(Rgba(out))
}
