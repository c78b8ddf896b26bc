//! Boundary and zoom math shared by the viewport state and the gesture controller.

use kurbo::{Point, Rect, Size};

use crate::config::BoundsPolicy;
use crate::error::{CropperError, Result};

/// Image-space size of the window sampled at `scale`.
pub fn window_size(viewport: Size, scale: f64) -> Size {
    Size::new(viewport.width * scale, viewport.height * scale)
}

/// Image-space rectangle sampled at `pan` and `scale`.
pub fn sample_rect(pan: Point, viewport: Size, scale: f64) -> Rect {
    Rect::from_origin_size(pan, window_size(viewport, scale))
}

/// Containment test for one axis.
///
/// When the image is longer than the window, the window must sit strictly
/// inside it. Otherwise the axis is letterboxed and the window must contain
/// the whole image.
pub fn axis_within_bounds(origin: f64, window: f64, extent: f64) -> bool {
    if window < extent {
        0.0 < origin && origin + window < extent
    } else {
        origin <= 0.0 && origin + window >= extent
    }
}

/// Containment test for a window of size `window` placed at `pan`.
pub fn within_bounds(pan: Point, window: Size, image: Size) -> bool {
    axis_within_bounds(pan.x, window.width, image.width)
        && axis_within_bounds(pan.y, window.height, image.height)
}

/// Pan that centers the window on the image midpoint. Negative on letterboxed axes.
pub fn centered_pan(image: Size, window: Size) -> Point {
    Point::new(
        (image.width - window.width) / 2.0,
        (image.height - window.height) / 2.0,
    )
}

/// Resolve `(min_scale, max_scale)` for an image under the given policy.
pub fn scale_bounds(
    policy: BoundsPolicy,
    fixed: (f64, f64),
    image: Size,
    viewport: Size,
) -> (f64, f64) {
    match policy {
        BoundsPolicy::Fixed => fixed,
        BoundsPolicy::Derived => {
            let ratio = viewport.width / image.width;
            let inverse = ratio.recip();
            (ratio.min(inverse), ratio.max(inverse))
        }
    }
}

/// Reject empty, negative or non-finite sizes.
pub fn validate_size(size: Size) -> Result<()> {
    let ok = |v: f64| v.is_finite() && v > 0.0;
    if ok(size.width) && ok(size.height) {
        Ok(())
    } else {
        Err(CropperError::InvalidDimensions {
            width: size.width,
            height: size.height,
        })
    }
}
