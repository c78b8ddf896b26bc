use cropper_core::{RasterContext, SoftwareSurface};

/// Copy the widget surface into an egui ColorImage.
pub fn surface_to_color_image(surface: &SoftwareSurface) -> egui::ColorImage {
    let pixels = surface.pixels();
    egui::ColorImage::from_rgba_unmultiplied(
        [pixels.width() as usize, pixels.height() as usize],
        pixels.as_raw(),
    )
}
