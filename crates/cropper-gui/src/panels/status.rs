use crate::app::CropperApp;

pub fn show(ctx: &egui::Context, app: &mut CropperApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        if app.cropper.is_loading() {
            ui.add(egui::ProgressBar::new(0.0).text("Loading image...").animate(true));
        } else {
            // Invisible placeholder, same height
            ui.add(egui::ProgressBar::new(0.0).text(""));
        }

        // Log area: fixed height for 4 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        let viewport = app.cropper.viewport();
        ui.horizontal(|ui| {
            if let Some(size) = viewport.image_size() {
                ui.label(format!("{}x{}", size.width, size.height));
                ui.separator();
            }
            if let (Some(scale), Some(pan)) = (viewport.scale(), viewport.pan()) {
                ui.label(format!("Zoom: {:.0}%", 100.0 / scale));
                ui.separator();
                ui.label(format!("Pan: {:.0}, {:.0}", pan.x, pan.y));
                ui.separator();
            }
            if let Some((min, max)) = viewport.scale_bounds() {
                ui.label(format!("Scale range: {min:.2}..{max:.2}"));
                ui.separator();
            }
            ui.label(format!("Bounds: {}", viewport.policy()));
        });

        ui.add_space(2.0);
    });
}
