#![allow(dead_code)]

use std::io::Cursor;

use cropper_core::kurbo::Size;
use cropper_core::{LoadedImage, ViewportState};
use image::{ImageFormat, Rgba, RgbaImage};

/// Image whose pixel at (x, y) encodes its own coordinates.
pub fn gradient_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
    })
}

pub fn loaded(width: u32, height: u32) -> LoadedImage {
    LoadedImage::new(gradient_image(width, height), "test").expect("non-empty image")
}

/// Encode a gradient image as PNG bytes.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut buf = Vec::new();
    gradient_image(width, height)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .expect("encode png");
    buf
}

/// Viewport state already reset for the given image and viewport sizes.
pub fn ready_viewport(image: (f64, f64), viewport: (f64, f64)) -> ViewportState {
    let mut state = ViewportState::default();
    state
        .reset(Size::new(image.0, image.1), Size::new(viewport.0, viewport.1))
        .expect("valid sizes");
    state
}
