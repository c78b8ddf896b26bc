//! Translation of raw egui events into widget input.

use cropper_core::gesture::{InputEvent, Listeners, Touch};
use cropper_core::kurbo::{Point, Vec2};

/// Per-frame facts about the viewport widget.
#[derive(Clone, Copy, Debug)]
pub struct WidgetFrame {
    /// Screen rect the surface is drawn into.
    pub rect: egui::Rect,
    pub hovered: bool,
    /// Session listeners currently attached by the widget.
    pub listeners: Listeners,
}

/// Keeps the table of active touches and filters events the widget is not listening for.
#[derive(Debug, Default)]
pub struct InputAdapter {
    touches: Vec<Touch>,
}

impl InputAdapter {
    #[cfg(test)]
    pub fn active_touches(&self) -> &[Touch] {
        &self.touches
    }

    pub fn translate(&mut self, event: &egui::Event, frame: &WidgetFrame) -> Option<InputEvent> {
        match event {
            egui::Event::Touch { id, phase, pos, .. } => self.touch(id.0, *phase, *pos, frame),
            // egui-winit mirrors the first touch as pointer events.
            _ if !self.touches.is_empty() => None,
            egui::Event::PointerButton {
                pos,
                button: egui::PointerButton::Primary,
                pressed,
                ..
            } => {
                if *pressed {
                    frame.rect.contains(*pos).then(|| InputEvent::PointerDown {
                        position: local(*pos, frame.rect),
                    })
                } else {
                    frame
                        .listeners
                        .contains(Listeners::POINTER_UP)
                        .then_some(InputEvent::PointerUp)
                }
            }
            egui::Event::PointerMoved(pos) => frame
                .listeners
                .contains(Listeners::POINTER_MOVE)
                .then(|| InputEvent::PointerMove {
                    position: local(*pos, frame.rect),
                }),
            egui::Event::PointerGone => frame
                .listeners
                .contains(Listeners::POINTER_UP)
                .then_some(InputEvent::PointerCancel),
            // egui reports content motion; the widget expects scroll direction.
            egui::Event::MouseWheel { delta, .. } if frame.hovered => Some(InputEvent::Wheel {
                delta: Vec2::new(-delta.x as f64, -delta.y as f64),
            }),
            _ => None,
        }
    }

    fn touch(
        &mut self,
        id: u64,
        phase: egui::TouchPhase,
        pos: egui::Pos2,
        frame: &WidgetFrame,
    ) -> Option<InputEvent> {
        let position = local(pos, frame.rect);
        match phase {
            egui::TouchPhase::Start => {
                let in_session = frame.listeners.contains(Listeners::TOUCH_MOVE);
                if !in_session && !frame.rect.contains(pos) {
                    return None;
                }
                self.touches.retain(|t| t.id != id);
                self.touches.push(Touch { id, position });
                Some(InputEvent::TouchStart {
                    touches: self.touches.clone(),
                })
            }
            egui::TouchPhase::Move => {
                let touch = self.touches.iter_mut().find(|t| t.id == id)?;
                touch.position = position;
                frame
                    .listeners
                    .contains(Listeners::TOUCH_MOVE)
                    .then(|| InputEvent::TouchMove {
                        touches: self.touches.clone(),
                    })
            }
            egui::TouchPhase::End => {
                let before = self.touches.len();
                self.touches.retain(|t| t.id != id);
                (self.touches.len() != before).then(|| InputEvent::TouchEnd {
                    touches: self.touches.clone(),
                })
            }
            egui::TouchPhase::Cancel => {
                if !self.touches.iter().any(|t| t.id == id) {
                    return None;
                }
                self.touches.clear();
                Some(InputEvent::TouchCancel)
            }
        }
    }
}

/// Screen position relative to the surface's top-left corner.
fn local(pos: egui::Pos2, rect: egui::Rect) -> Point {
    Point::new((pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64)
}
