use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::Context as _;
use cropper_core::kurbo::Size;
use cropper_core::{Cropper, ImageSource};
use tracing::warn;

use crate::convert::surface_to_color_image;
use crate::input::InputAdapter;
use crate::messages::DialogResult;
use crate::panels;
use crate::states::{AppConfig, UiState};

const LOAD_POLL_INTERVAL: Duration = Duration::from_millis(30);

pub struct CropperApp {
    pub cropper: Cropper,
    /// Configuration the running widget was built from.
    pub config: AppConfig,
    /// Edited in the settings panel, applied on demand.
    pub draft: AppConfig,
    pub ui_state: UiState,
    pub input: InputAdapter,
    pub texture: Option<egui::TextureHandle>,
    /// Source of the load currently running, re-issued if the widget is rebuilt.
    loading: Option<ImageSource>,
    pub dialog_tx: mpsc::Sender<DialogResult>,
    dialog_rx: mpsc::Receiver<DialogResult>,
    surface_dirty: Rc<Cell<bool>>,
}

impl CropperApp {
    pub fn new(_ctx: &egui::Context) -> anyhow::Result<Self> {
        let config = AppConfig::default();
        let surface_dirty = Rc::new(Cell::new(false));
        let cropper = build_cropper(&config, &surface_dirty)?;
        let (dialog_tx, dialog_rx) = mpsc::channel();

        Ok(Self {
            cropper,
            draft: config.clone(),
            config,
            ui_state: UiState::default(),
            input: InputAdapter::default(),
            texture: None,
            loading: None,
            dialog_tx,
            dialog_rx,
            surface_dirty,
        })
    }

    fn poll_dialogs(&mut self) {
        while let Ok(result) = self.dialog_rx.try_recv() {
            match result {
                DialogResult::OpenImage { path } => self.open_image(ImageSource::from(path)),
                DialogResult::ExportCrop { path } => self.export_crop(&path),
                DialogResult::ImportConfig { path } => {
                    match AppConfig::load(&path).and_then(|config| self.apply_config(config)) {
                        Ok(()) => self
                            .ui_state
                            .add_log(format!("Config imported: {}", path.display())),
                        Err(e) => self.ui_state.add_log(format!("ERROR: {e:#}")),
                    }
                }
                DialogResult::ExportConfig { path } => match self.config.save(&path) {
                    Ok(()) => self
                        .ui_state
                        .add_log(format!("Config exported: {}", path.display())),
                    Err(e) => self.ui_state.add_log(format!("ERROR: {e:#}")),
                },
            }
        }
    }

    pub fn open_image(&mut self, source: ImageSource) {
        let origin = source.origin();
        match self.cropper.set_image(source.clone()) {
            Ok(()) => {
                self.loading = Some(source);
                self.ui_state.add_log(format!("Loading {origin}"));
            }
            Err(e) => self.ui_state.add_log(format!("ERROR: {e}")),
        }
    }

    fn poll_image(&mut self, ctx: &egui::Context) {
        let result = self.cropper.poll_image();
        if result.is_some() {
            self.loading = None;
        }
        match result {
            Some(Ok(())) => {
                if let Some(image) = self.cropper.image() {
                    self.ui_state.add_log(format!(
                        "Opened: {} ({}x{})",
                        image.origin(),
                        image.width(),
                        image.height()
                    ));
                }
            }
            Some(Err(e)) => self.ui_state.add_log(format!("ERROR: {e}")),
            None => {}
        }
        if self.cropper.is_loading() {
            ctx.request_repaint_after(LOAD_POLL_INTERVAL);
        }
    }

    fn poll_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Vec<_> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });
        if let Some(path) = dropped.into_iter().last() {
            self.open_image(ImageSource::from(path));
        }
    }

    /// Rebuild the widget from `config`, carrying the current image over.
    pub fn apply_config(&mut self, config: AppConfig) -> anyhow::Result<()> {
        let mut cropper = build_cropper(&config, &self.surface_dirty)?;
        if let Some(image) = self.cropper.image().cloned() {
            cropper
                .set_loaded_image(image)
                .context("re-assigning image to the rebuilt viewport")?;
        }
        let loading = self.loading.take().filter(|_| self.cropper.is_loading());
        if let Some(source) = loading {
            match cropper.set_image(source.clone()) {
                Ok(()) => {
                    self.loading = Some(source);
                    self.ui_state.add_log("Pending image load restarted".into());
                }
                Err(e) => {
                    warn!(error = %e, "Pending image load dropped by config change");
                    self.ui_state
                        .add_log(format!("ERROR: pending image load cancelled: {e}"));
                }
            }
        }

        self.cropper = cropper;
        self.draft = config.clone();
        self.config = config;
        self.input = InputAdapter::default();
        self.texture = None;
        self.surface_dirty.set(true);
        Ok(())
    }

    pub fn export_crop(&mut self, path: &Path) {
        match self.cropper.export_to_file(path) {
            Ok(snapshot) => self.ui_state.add_log(format!(
                "Saved: {} ({}x{} {})",
                path.display(),
                snapshot.width,
                snapshot.height,
                snapshot.format
            )),
            Err(e) => self.ui_state.add_log(format!("ERROR: {e}")),
        }
    }

    pub fn copy_data_uri(&mut self, ctx: &egui::Context) {
        match self.cropper.export_image() {
            Ok(snapshot) => {
                ctx.copy_text(snapshot.to_data_uri());
                self.ui_state
                    .add_log(format!("Copied {} data URI to clipboard", snapshot.format));
            }
            Err(e) => self.ui_state.add_log(format!("ERROR: {e}")),
        }
    }

    /// Upload the surface if the widget repainted since the last upload.
    pub fn sync_texture(&mut self, ctx: &egui::Context) {
        if !self.surface_dirty.replace(false) {
            return;
        }
        let image = surface_to_color_image(self.cropper.surface());
        self.texture = Some(ctx.load_texture("cropper", image, egui::TextureOptions::NEAREST));
    }
}

fn build_cropper(config: &AppConfig, dirty: &Rc<Cell<bool>>) -> anyhow::Result<Cropper> {
    let [width, height] = config.viewport;
    let mut cropper = Cropper::new(config.cropper.clone(), Size::new(width, height))
        .context("building cropper widget")?;
    let flag = Rc::clone(dirty);
    cropper.on_render(move |_| flag.set(true));
    Ok(cropper)
}

impl eframe::App for CropperApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_dialogs();
        self.poll_dropped_files(ctx);
        self.poll_image(ctx);

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::settings::show(ctx, self);
        panels::viewport::show(ctx, self);

        if self.ui_state.show_about {
            egui::Window::new("About Cropper")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Cropper");
                        ui.label("Pan and zoom an image, export the visible window");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.ui_state.show_about = false;
                        }
                    });
                });
        }
    }
}
