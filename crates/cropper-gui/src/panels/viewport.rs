use crate::app::CropperApp;
use crate::input::WidgetFrame;

pub fn show(ctx: &egui::Context, app: &mut CropperApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let available = ui.available_rect_before_wrap();
        paint_background(ui, available);

        let size = app.cropper.viewport_size();
        let rect = egui::Rect::from_center_size(
            available.center(),
            egui::vec2(size.width as f32, size.height as f32),
        );
        let response = ui.allocate_rect(rect, egui::Sense::hover());

        forward_input(ui, app, rect, response.hovered());
        app.sync_texture(ctx);

        ui.painter()
            .rect_filled(rect, 0.0, egui::Color32::from_gray(45));
        match app.texture.as_ref() {
            Some(texture) if app.cropper.image().is_some() => {
                ui.painter().image(
                    texture.id(),
                    rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }
            _ => show_placeholder(ui, rect, app.cropper.is_loading()),
        }
        ui.painter().rect_stroke(
            rect,
            0.0,
            egui::Stroke::new(1.0, egui::Color32::from_gray(90)),
            egui::StrokeKind::Outside,
        );
    });
}

/// Feed this frame's raw events to the widget.
fn forward_input(ui: &egui::Ui, app: &mut CropperApp, rect: egui::Rect, hovered: bool) {
    let events = ui.input(|i| i.events.clone());
    for event in &events {
        let frame = WidgetFrame {
            rect,
            hovered,
            listeners: app.cropper.listeners(),
        };
        if let Some(input) = app.input.translate(event, &frame) {
            app.cropper.handle_event(input);
        }
    }
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
}

fn show_placeholder(ui: &egui::Ui, rect: egui::Rect, loading: bool) {
    let text = if loading {
        "Loading..."
    } else {
        "Open or drop an image to begin"
    };
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        text,
        egui::FontId::proportional(18.0),
        egui::Color32::from_gray(100),
    );
}
