use crate::app::CropperApp;
use crate::messages::DialogResult;

pub fn show(ctx: &egui::Context, app: &mut CropperApp) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
                if ui.add(egui::Button::new("Open Image...").shortcut_text(ctx.format_shortcut(&open_shortcut))).clicked() {
                    ui.close();
                    open_image(ctx, app);
                }

                let export_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S);
                let has_image = app.cropper.image().is_some();
                if ui
                    .add_enabled(
                        has_image,
                        egui::Button::new("Export Crop...").shortcut_text(ctx.format_shortcut(&export_shortcut)),
                    )
                    .clicked()
                {
                    ui.close();
                    export_crop(ctx, app);
                }

                ui.separator();

                if ui.button("Import Config...").clicked() {
                    ui.close();
                    import_config(ctx, app);
                }

                if ui.button("Export Config...").clicked() {
                    ui.close();
                    export_config(ctx, app);
                }

                ui.separator();

                let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);
                if ui.add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut))).clicked() {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Edit", |ui| {
                if ui
                    .add_enabled(app.cropper.image().is_some(), egui::Button::new("Copy Crop as Data URI"))
                    .clicked()
                {
                    ui.close();
                    app.copy_data_uri(ctx);
                }

                if ui.button("Reset Defaults").clicked() {
                    ui.close();
                    match app.apply_config(Default::default()) {
                        Ok(()) => app.ui_state.add_log("Config reset to defaults".into()),
                        Err(e) => app.ui_state.add_log(format!("ERROR: {e:#}")),
                    }
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.ui_state.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O))) {
            open_image(ctx, app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S)))
            && app.cropper.image().is_some()
        {
            export_crop(ctx, app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q))) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

fn open_image(ctx: &egui::Context, app: &CropperApp) {
    let tx = app.dialog_tx.clone();
    let ctx = ctx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "bmp", "gif", "webp", "tiff", "tif"])
            .add_filter("All files", &["*"])
            .pick_file()
        {
            let _ = tx.send(DialogResult::OpenImage { path });
            ctx.request_repaint();
        }
    });
}

fn export_crop(ctx: &egui::Context, app: &CropperApp) {
    let tx = app.dialog_tx.clone();
    let ctx = ctx.clone();
    let format = app.config.cropper.export_format;
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter(format.to_string(), &[format.extension()])
            .set_file_name(format!("crop.{}", format.extension()))
            .save_file()
        {
            let _ = tx.send(DialogResult::ExportCrop { path });
            ctx.request_repaint();
        }
    });
}

fn import_config(ctx: &egui::Context, app: &CropperApp) {
    let tx = app.dialog_tx.clone();
    let ctx = ctx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .pick_file()
        {
            let _ = tx.send(DialogResult::ImportConfig { path });
            ctx.request_repaint();
        }
    });
}

fn export_config(ctx: &egui::Context, app: &CropperApp) {
    let tx = app.dialog_tx.clone();
    let ctx = ctx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .set_file_name("cropper_config.toml")
            .save_file()
        {
            let _ = tx.send(DialogResult::ExportConfig { path });
            ctx.request_repaint();
        }
    });
}
