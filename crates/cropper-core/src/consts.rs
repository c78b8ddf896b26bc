/// Default zoom step applied per wheel notch or pinch step.
pub const DEFAULT_ZOOM_INCREMENT: f64 = 0.05;

/// Default multiplier from pointer movement (device pixels) to pan (image pixels).
pub const DEFAULT_PAN_SENSITIVITY: f64 = 2.0;

/// Default change in two-finger distance, in device-independent pixels,
/// required before a pinch produces a zoom step.
pub const DEFAULT_PINCH_DEADZONE_PX: f64 = 5.0;

/// Default lower scale bound for the fixed bounds policy.
pub const DEFAULT_MIN_SCALE: f64 = 0.25;

/// Default upper scale bound for the fixed bounds policy.
pub const DEFAULT_MAX_SCALE: f64 = 4.0;

/// Scale every image assignment starts from.
pub const INITIAL_SCALE: f64 = 1.0;

/// Name given to the background image decode thread.
pub const LOADER_THREAD_NAME: &str = "cropper-loader";

/// Tolerance for comparing an accumulated scale against its bounds.
pub const SCALE_EPSILON: f64 = 1e-9;
