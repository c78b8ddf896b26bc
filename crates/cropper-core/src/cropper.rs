use std::path::Path;

use kurbo::Size;
use tracing::{info, warn};

use crate::config::CropperConfig;
use crate::error::{CropperError, Result};
use crate::geometry::validate_size;
use crate::gesture::{GestureController, GestureOutcome, InputEvent, Listeners};
use crate::io::{spawn_load, ImageSource, LoadedImage, PendingImage, Snapshot};
use crate::raster::SoftwareSurface;
use crate::viewport::ViewportState;

type RenderHook = Box<dyn FnMut(&SoftwareSurface)>;

/// Result of feeding one input event to the widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventOutcome {
    pub gesture: GestureOutcome,
    /// The surface was redrawn before returning.
    pub repainted: bool,
}

/// The cropping widget: an image, the window into it, and the gestures that move the window.
pub struct Cropper {
    config: CropperConfig,
    viewport_size: Size,
    viewport: ViewportState,
    gestures: GestureController,
    surface: SoftwareSurface,
    image: Option<LoadedImage>,
    pending: Option<PendingImage>,
    on_render: Option<RenderHook>,
}

impl Cropper {
    pub fn new(config: CropperConfig, viewport_size: Size) -> Result<Self> {
        config.validate()?;
        validate_size(viewport_size)?;

        let surface = SoftwareSurface::from_size(viewport_size, config.sampling)?;
        Ok(Self {
            viewport: ViewportState::new(config.bounds_policy, config.min_scale, config.max_scale),
            gestures: GestureController::new(&config),
            config,
            viewport_size,
            surface,
            image: None,
            pending: None,
            on_render: None,
        })
    }

    /// Start loading a new image in the background, superseding any pending load.
    ///
    /// The current image stays interactive until [`Cropper::poll_image`]
    /// delivers the new one.
    pub fn set_image(&mut self, source: ImageSource) -> Result<()> {
        info!(origin = %source.origin(), "Loading image");
        self.pending = Some(spawn_load(source)?);
        Ok(())
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Apply a finished background load. `None` while nothing has finished.
    ///
    /// A failed load leaves the previous image and view untouched.
    pub fn poll_image(&mut self) -> Option<Result<()>> {
        let result = self.pending.as_ref()?.try_ready()?;
        self.pending = None;
        Some(self.apply_load(result))
    }

    /// Block until the pending load finishes and apply it.
    pub fn wait_for_image(&mut self) -> Result<()> {
        let pending = self.pending.take().ok_or(CropperError::NotReady)?;
        self.apply_load(pending.wait())
    }

    fn apply_load(&mut self, result: Result<LoadedImage>) -> Result<()> {
        match result {
            Ok(image) => self.set_loaded_image(image),
            Err(e) => {
                warn!(error = %e, "Image load failed; keeping previous view");
                Err(e)
            }
        }
    }

    /// Assign an already decoded image: reset the view and repaint.
    pub fn set_loaded_image(&mut self, image: LoadedImage) -> Result<()> {
        self.viewport.reset(image.size(), self.viewport_size)?;
        self.gestures.cancel_all();
        info!(
            origin = %image.origin(),
            width = image.width(),
            height = image.height(),
            "Image assigned"
        );
        self.image = Some(image);
        self.render()
    }

    /// Route one input event. Applied steps repaint before this returns.
    pub fn handle_event(&mut self, event: InputEvent) -> EventOutcome {
        let gesture = self.gestures.handle(event, &mut self.viewport);
        let mut repainted = false;
        if gesture.changed_view() {
            match self.render() {
                Ok(()) => repainted = true,
                Err(e) => warn!(error = %e, "Repaint failed"),
            }
        }
        EventOutcome { gesture, repainted }
    }

    /// Redraw the surface from the current view and notify the render hook.
    pub fn render(&mut self) -> Result<()> {
        let image = self.image.as_ref().ok_or(CropperError::NotReady)?;
        self.viewport.paint(image, &mut self.surface)?;
        if let Some(hook) = self.on_render.as_mut() {
            hook(&self.surface);
        }
        Ok(())
    }

    /// Called with the surface after every repaint.
    pub fn on_render(&mut self, hook: impl FnMut(&SoftwareSurface) + 'static) {
        self.on_render = Some(Box::new(hook));
    }

    /// Encode the visible window in the configured export format.
    pub fn export_image(&mut self) -> Result<Snapshot> {
        let image = self.image.as_ref().ok_or(CropperError::NotReady)?;
        let snapshot =
            self.viewport
                .export_region(image, &mut self.surface, self.config.export_format)?;
        info!(
            format = %snapshot.format,
            bytes = snapshot.bytes.len(),
            "Crop exported"
        );
        Ok(snapshot)
    }

    pub fn export_to_file(&mut self, path: &Path) -> Result<Snapshot> {
        let snapshot = self.export_image()?;
        snapshot.save(path)?;
        info!(path = %path.display(), "Crop saved");
        Ok(snapshot)
    }

    pub fn config(&self) -> &CropperConfig {
        &self.config
    }

    pub fn viewport_size(&self) -> Size {
        self.viewport_size
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    pub fn gestures(&self) -> &GestureController {
        &self.gestures
    }

    pub fn surface(&self) -> &SoftwareSurface {
        &self.surface
    }

    pub fn image(&self) -> Option<&LoadedImage> {
        self.image.as_ref()
    }

    /// Session listeners the host must currently forward events for.
    pub fn listeners(&self) -> Listeners {
        self.gestures.listeners()
    }
}
