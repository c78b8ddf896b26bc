pub mod config;
pub mod consts;
pub mod cropper;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod io;
pub mod raster;
pub mod viewport;

pub use kurbo;

pub use config::{BoundsPolicy, CropperConfig};
pub use cropper::{Cropper, EventOutcome};
pub use error::{CropperError, Result};
pub use gesture::{GestureController, GestureOutcome, InputEvent, Listeners, Touch};
pub use io::{ExportFormat, ImageSource, LoadedImage, Snapshot};
pub use raster::{RasterContext, Sampling, SoftwareSurface};
pub use viewport::{Rejection, StepOutcome, ViewportState};
