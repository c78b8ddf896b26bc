use cropper_core::{BoundsPolicy, ExportFormat, Sampling};

use crate::app::CropperApp;

use super::section_header;

pub fn show(ctx: &egui::Context, app: &mut CropperApp) {
    egui::SidePanel::left("settings")
        .resizable(false)
        .default_width(220.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                let dirty = app.draft != app.config;
                viewport_section(ui, app);
                ui.separator();
                zoom_section(ui, app);
                ui.separator();
                gesture_section(ui, app);
                ui.separator();
                output_section(ui, app);
                ui.separator();

                ui.horizontal(|ui| {
                    if ui.add_enabled(dirty, egui::Button::new("Apply")).clicked() {
                        let draft = app.draft.clone();
                        match app.apply_config(draft) {
                            Ok(()) => app.ui_state.add_log("Settings applied".into()),
                            Err(e) => app.ui_state.add_log(format!("ERROR: {e:#}")),
                        }
                    }
                    if ui.add_enabled(dirty, egui::Button::new("Revert")).clicked() {
                        app.draft = app.config.clone();
                    }
                });
            });
        });
}

fn viewport_section(ui: &mut egui::Ui, app: &mut CropperApp) {
    section_header(ui, "Viewport", None);
    ui.add_space(4.0);
    let [w, h] = &mut app.draft.viewport;
    ui.horizontal(|ui| {
        ui.add(egui::DragValue::new(w).range(1.0..=4096.0).suffix(" px"));
        ui.label("x");
        ui.add(egui::DragValue::new(h).range(1.0..=4096.0).suffix(" px"));
    });
}

fn zoom_section(ui: &mut egui::Ui, app: &mut CropperApp) {
    let cfg = &mut app.draft.cropper;
    section_header(ui, "Zoom", None);
    ui.add_space(4.0);

    egui::ComboBox::from_label("Bounds")
        .selected_text(cfg.bounds_policy.to_string())
        .show_ui(ui, |ui| {
            for policy in [BoundsPolicy::Fixed, BoundsPolicy::Derived] {
                ui.selectable_value(&mut cfg.bounds_policy, policy, policy.to_string());
            }
        });

    ui.add_enabled_ui(cfg.bounds_policy == BoundsPolicy::Fixed, |ui| {
        ui.add(
            egui::Slider::new(&mut cfg.min_scale, 0.05..=1.0)
                .text("Min scale")
                .clamping(egui::SliderClamping::Always),
        );
        ui.add(
            egui::Slider::new(&mut cfg.max_scale, 1.0..=10.0)
                .text("Max scale")
                .clamping(egui::SliderClamping::Always),
        );
    });

    ui.add(
        egui::Slider::new(&mut cfg.zoom_increment, 0.01..=0.5)
            .text("Step")
            .clamping(egui::SliderClamping::Always),
    );
}

fn gesture_section(ui: &mut egui::Ui, app: &mut CropperApp) {
    let cfg = &mut app.draft.cropper;
    section_header(ui, "Gestures", None);
    ui.add_space(4.0);
    ui.add(
        egui::Slider::new(&mut cfg.pan_sensitivity, 0.1..=5.0)
            .text("Pan sensitivity")
            .clamping(egui::SliderClamping::Always),
    );
    ui.add(
        egui::Slider::new(&mut cfg.pinch_deadzone_px, 0.0..=50.0)
            .text("Pinch deadzone")
            .suffix(" px")
            .clamping(egui::SliderClamping::Always),
    );
}

fn output_section(ui: &mut egui::Ui, app: &mut CropperApp) {
    let cfg = &mut app.draft.cropper;
    section_header(ui, "Output", None);
    ui.add_space(4.0);

    egui::ComboBox::from_label("Sampling")
        .selected_text(format!("{:?}", cfg.sampling))
        .show_ui(ui, |ui| {
            for sampling in [Sampling::Nearest, Sampling::Bilinear] {
                ui.selectable_value(&mut cfg.sampling, sampling, format!("{sampling:?}"));
            }
        });

    egui::ComboBox::from_label("Export format")
        .selected_text(cfg.export_format.to_string())
        .show_ui(ui, |ui| {
            for format in [ExportFormat::Png, ExportFormat::Bmp] {
                ui.selectable_value(&mut cfg.export_format, format, format.to_string());
            }
        });
}
