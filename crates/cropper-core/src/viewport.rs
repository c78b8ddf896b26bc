use std::fmt;

use kurbo::{Point, Rect, Size, Vec2};
use tracing::{debug, trace};

use crate::config::BoundsPolicy;
use crate::consts::{DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE, INITIAL_SCALE, SCALE_EPSILON};
use crate::error::{CropperError, Result};
use crate::geometry::{centered_pan, sample_rect, scale_bounds, validate_size, window_size, within_bounds};
use crate::io::{ExportFormat, LoadedImage, Snapshot};
use crate::raster::RasterContext;

/// Why a pan or zoom step left the state untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// No image has been assigned yet.
    Uninitialized,
    /// The requested movement was zero.
    ZeroDelta,
    /// The resulting window would leave the image bounds.
    OutOfBounds,
    /// The resulting scale would leave `[min_scale, max_scale]`.
    ScaleLimit,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "no image"),
            Self::ZeroDelta => write!(f, "zero delta"),
            Self::OutOfBounds => write!(f, "out of bounds"),
            Self::ScaleLimit => write!(f, "scale limit"),
        }
    }
}

/// Result of a single pan or zoom request. Neither variant is an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Applied,
    Rejected(Rejection),
}

impl StepOutcome {
    pub fn applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Geometry established by the last `reset`.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Layout {
    image: Size,
    viewport: Size,
    pan: Point,
    scale: f64,
    min_scale: f64,
    max_scale: f64,
}

impl Layout {
    fn window(&self, scale: f64) -> Size {
        window_size(self.viewport, scale)
    }

    fn fits(&self, pan: Point, scale: f64) -> bool {
        within_bounds(pan, self.window(scale), self.image)
    }

    fn snap_to_bounds(&self, scale: f64) -> f64 {
        if (scale - self.min_scale).abs() <= SCALE_EPSILON {
            self.min_scale
        } else if (scale - self.max_scale).abs() <= SCALE_EPSILON {
            self.max_scale
        } else {
            scale
        }
    }
}

/// Pan offset and zoom scale of the window mapped onto the viewport.
///
/// Uninitialized until [`ViewportState::reset`] runs; every mutation after
/// that keeps the sampled window inside the image bounds or is rejected whole.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewportState {
    policy: BoundsPolicy,
    fixed_bounds: (f64, f64),
    layout: Option<Layout>,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new(BoundsPolicy::default(), DEFAULT_MIN_SCALE, DEFAULT_MAX_SCALE)
    }
}

impl ViewportState {
    pub fn new(policy: BoundsPolicy, min_scale: f64, max_scale: f64) -> Self {
        Self {
            policy,
            fixed_bounds: (min_scale, max_scale),
            layout: None,
        }
    }

    /// Re-initialize for a new image: recompute scale bounds, reset scale
    /// to 1.0 and center the window.
    pub fn reset(&mut self, image: Size, viewport: Size) -> Result<()> {
        validate_size(image)?;
        validate_size(viewport)?;

        let (min_scale, max_scale) = scale_bounds(self.policy, self.fixed_bounds, image, viewport);
        let scale = INITIAL_SCALE;
        let pan = centered_pan(image, window_size(viewport, scale));

        debug!(
            image = ?image,
            viewport = ?viewport,
            policy = ?self.policy,
            min_scale,
            max_scale,
            "Viewport reset"
        );

        self.layout = Some(Layout {
            image,
            viewport,
            pan,
            scale,
            min_scale,
            max_scale,
        });
        Ok(())
    }

    /// Move the window by `-delta * sensitivity` if the result stays in bounds.
    pub fn try_pan(&mut self, delta: Vec2, sensitivity: f64) -> StepOutcome {
        let Some(layout) = self.layout.as_mut() else {
            return StepOutcome::Rejected(Rejection::Uninitialized);
        };
        let shift = delta * sensitivity;
        if shift.x == 0.0 && shift.y == 0.0 {
            return StepOutcome::Rejected(Rejection::ZeroDelta);
        }

        let candidate = layout.pan - shift;
        if !layout.fits(candidate, layout.scale) {
            trace!(pan = ?layout.pan, candidate = ?candidate, "Pan rejected");
            return StepOutcome::Rejected(Rejection::OutOfBounds);
        }

        layout.pan = candidate;
        StepOutcome::Applied
    }

    /// Change the scale by one increment. Zooming in shrinks the sampled window.
    ///
    /// The window's top-left corner stays where it is.
    pub fn try_zoom(&mut self, zoom_in: bool, increment: f64) -> StepOutcome {
        let Some(layout) = self.layout.as_mut() else {
            return StepOutcome::Rejected(Rejection::Uninitialized);
        };
        if increment == 0.0 {
            return StepOutcome::Rejected(Rejection::ZeroDelta);
        }

        let candidate = if zoom_in {
            layout.scale - increment
        } else {
            layout.scale + increment
        };

        if candidate < layout.min_scale - SCALE_EPSILON
            || candidate > layout.max_scale + SCALE_EPSILON
        {
            trace!(scale = layout.scale, candidate, "Zoom rejected by scale limit");
            return StepOutcome::Rejected(Rejection::ScaleLimit);
        }
        // Repeated steps drift; land exactly on a bound once within tolerance.
        let candidate = layout.snap_to_bounds(candidate);
        if !layout.fits(layout.pan, candidate) {
            trace!(scale = layout.scale, candidate, "Zoom rejected by bounds");
            return StepOutcome::Rejected(Rejection::OutOfBounds);
        }

        layout.scale = candidate;
        StepOutcome::Applied
    }

    /// Clear `surface` and draw the sampled window stretched over the viewport.
    pub fn paint(&self, image: &LoadedImage, surface: &mut impl RasterContext) -> Result<()> {
        let layout = self.layout.ok_or(CropperError::NotReady)?;
        let target = Rect::from_origin_size(Point::ZERO, layout.viewport);
        surface.clear(Rect::from_origin_size(Point::ZERO, surface.size()));
        surface.draw_image(
            image.pixels(),
            sample_rect(layout.pan, layout.viewport, layout.scale),
            target,
        );
        Ok(())
    }

    /// Paint the visible window and encode the surface.
    pub fn export_region(
        &self,
        image: &LoadedImage,
        surface: &mut impl RasterContext,
        format: ExportFormat,
    ) -> Result<Snapshot> {
        self.paint(image, surface)?;
        Snapshot::encode(surface.pixels(), format)
    }

    pub fn is_ready(&self) -> bool {
        self.layout.is_some()
    }

    /// Whether the current window satisfies the boundary invariant.
    /// Always true before the first reset.
    pub fn is_within_bounds(&self) -> bool {
        self.layout.map_or(true, |l| l.fits(l.pan, l.scale))
    }

    pub fn policy(&self) -> BoundsPolicy {
        self.policy
    }

    pub fn pan(&self) -> Option<Point> {
        self.layout.map(|l| l.pan)
    }

    pub fn scale(&self) -> Option<f64> {
        self.layout.map(|l| l.scale)
    }

    /// `(min_scale, max_scale)` for the current image.
    pub fn scale_bounds(&self) -> Option<(f64, f64)> {
        self.layout.map(|l| (l.min_scale, l.max_scale))
    }

    pub fn image_size(&self) -> Option<Size> {
        self.layout.map(|l| l.image)
    }

    pub fn viewport_size(&self) -> Option<Size> {
        self.layout.map(|l| l.viewport)
    }

    /// Image-space rectangle currently mapped onto the viewport.
    pub fn sample_rect(&self) -> Option<Rect> {
        self.layout
            .map(|l| sample_rect(l.pan, l.viewport, l.scale))
    }
}
