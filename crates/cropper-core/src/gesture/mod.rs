//! Gesture decoding: turns pointer, wheel and touch events into pan and zoom
//! steps against a [`ViewportState`].
//!
//! Mouse drags and touch sessions are tracked independently. A touch session
//! is either a one-finger drag or a two-finger pinch, never both.
//!
//! ```
//! use cropper_core::gesture::{GestureController, InputEvent};
//! use cropper_core::kurbo::{Point, Size};
//! use cropper_core::{CropperConfig, ViewportState};
//!
//! let config = CropperConfig::default();
//! let mut viewport = ViewportState::default();
//! viewport
//!     .reset(Size::new(1000.0, 1000.0), Size::new(500.0, 500.0))
//!     .unwrap();
//! let mut gestures = GestureController::new(&config);
//!
//! gestures.handle(InputEvent::PointerDown { position: Point::new(10.0, 10.0) }, &mut viewport);
//! gestures.handle(InputEvent::PointerMove { position: Point::new(15.0, 10.0) }, &mut viewport);
//! gestures.handle(InputEvent::PointerUp, &mut viewport);
//!
//! // Moving right by 5 px at sensitivity 2 pulls the window 10 px left.
//! assert_eq!(viewport.pan(), Some(Point::new(240.0, 250.0)));
//! ```

mod listeners;
mod track;

use kurbo::{Point, Vec2};
use tracing::debug;

use crate::config::CropperConfig;
use crate::viewport::{Rejection, StepOutcome, ViewportState};

pub use listeners::{ListenerLease, ListenerRegistry, Listeners};
pub use track::{PinchTrack, PointerTrack};

/// One active touch point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Touch {
    pub id: u64,
    pub position: Point,
}

impl Touch {
    pub fn new(id: u64, x: f64, y: f64) -> Self {
        Self {
            id,
            position: Point::new(x, y),
        }
    }
}

/// Normalized input delivered by the host.
///
/// Positions are in viewport pixels. Touch events carry every touch that is
/// still down after the event.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    PointerDown { position: Point },
    PointerMove { position: Point },
    PointerUp,
    /// Pointer capture was lost.
    PointerCancel,
    /// Scroll delta, positive = down/right.
    Wheel { delta: Vec2 },
    TouchStart { touches: Vec<Touch> },
    TouchMove { touches: Vec<Touch> },
    TouchEnd { touches: Vec<Touch> },
    TouchCancel,
}

/// What the controller did with an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Not relevant in the current state.
    Ignored,
    /// Session bookkeeping changed; no pan or zoom was attempted.
    Tracked,
    /// A pan or zoom step was attempted.
    Step(StepOutcome),
}

impl GestureOutcome {
    /// Whether the viewport changed and needs a repaint.
    pub fn changed_view(self) -> bool {
        matches!(self, Self::Step(StepOutcome::Applied))
    }
}

/// Tuning shared by all gesture kinds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSettings {
    pub pan_sensitivity: f64,
    pub zoom_increment: f64,
    pub pinch_deadzone_px: f64,
}

impl From<&CropperConfig> for GestureSettings {
    fn from(config: &CropperConfig) -> Self {
        Self {
            pan_sensitivity: config.pan_sensitivity,
            zoom_increment: config.zoom_increment,
            pinch_deadzone_px: config.pinch_deadzone_px,
        }
    }
}

#[derive(Debug)]
struct DragSession {
    track: PointerTrack,
    _lease: ListenerLease,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum TouchMode {
    Drag(PointerTrack),
    Pinch(PinchTrack),
}

#[derive(Debug)]
struct TouchSession {
    mode: TouchMode,
    _lease: ListenerLease,
}

impl TouchMode {
    /// Mode for a fresh set of active touches. The first two touches pinch.
    fn for_touches(touches: &[Touch]) -> Option<Self> {
        match touches {
            [] => None,
            [one] => Some(Self::Drag(PointerTrack::touch(*one))),
            [a, b, ..] => Some(Self::Pinch(PinchTrack::new(*a, *b))),
        }
    }
}

/// Decodes raw input into pan and zoom steps.
#[derive(Debug)]
pub struct GestureController {
    settings: GestureSettings,
    registry: ListenerRegistry,
    drag: Option<DragSession>,
    touch: Option<TouchSession>,
}

impl GestureController {
    pub fn new(config: &CropperConfig) -> Self {
        Self::with_settings(GestureSettings::from(config))
    }

    pub fn with_settings(settings: GestureSettings) -> Self {
        Self {
            settings,
            registry: ListenerRegistry::default(),
            drag: None,
            touch: None,
        }
    }

    pub fn settings(&self) -> GestureSettings {
        self.settings
    }

    /// Listeners the host must forward events for.
    pub fn listeners(&self) -> Listeners {
        self.registry.active()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn pointer_track(&self) -> Option<PointerTrack> {
        self.drag.as_ref().map(|s| s.track)
    }

    /// Single-touch track of the running touch session, if it is a drag.
    pub fn touch_track(&self) -> Option<PointerTrack> {
        match self.touch.as_ref()?.mode {
            TouchMode::Drag(track) => Some(track),
            TouchMode::Pinch(_) => None,
        }
    }

    /// Pinch track of the running touch session, if it is a pinch.
    pub fn pinch_track(&self) -> Option<PinchTrack> {
        match self.touch.as_ref()?.mode {
            TouchMode::Pinch(pinch) => Some(pinch),
            TouchMode::Drag(_) => None,
        }
    }

    /// End every running session and detach its listeners.
    pub fn cancel_all(&mut self) {
        self.drag = None;
        self.touch = None;
    }

    pub fn handle(&mut self, event: InputEvent, viewport: &mut ViewportState) -> GestureOutcome {
        match event {
            InputEvent::PointerDown { position } => self.pointer_down(position, viewport),
            InputEvent::PointerMove { position } => self.pointer_move(position, viewport),
            InputEvent::PointerUp | InputEvent::PointerCancel => self.pointer_end(),
            InputEvent::Wheel { delta } => self.wheel(delta, viewport),
            InputEvent::TouchStart { touches } => self.touch_start(&touches, viewport),
            InputEvent::TouchMove { touches } => self.touch_move(&touches, viewport),
            InputEvent::TouchEnd { touches } => self.touch_end(&touches),
            InputEvent::TouchCancel => self.touch_cancel(),
        }
    }

    fn pointer_down(&mut self, position: Point, viewport: &ViewportState) -> GestureOutcome {
        if !viewport.is_ready() {
            return GestureOutcome::Ignored;
        }
        // Release the old lease before taking a new one.
        self.drag = None;
        self.drag = Some(DragSession {
            track: PointerTrack::mouse(position),
            _lease: self
                .registry
                .lease(Listeners::POINTER_MOVE | Listeners::POINTER_UP),
        });
        debug!(position = ?position, "Drag session started");
        GestureOutcome::Tracked
    }

    fn pointer_move(&mut self, position: Point, viewport: &mut ViewportState) -> GestureOutcome {
        let Some(session) = self.drag.as_mut() else {
            return GestureOutcome::Ignored;
        };
        let delta = session.track.delta_to(position);
        let outcome = viewport.try_pan(delta, self.settings.pan_sensitivity);
        session.track.latch(position);
        GestureOutcome::Step(outcome)
    }

    fn pointer_end(&mut self) -> GestureOutcome {
        if self.drag.take().is_some() {
            debug!("Drag session ended");
            GestureOutcome::Tracked
        } else {
            GestureOutcome::Ignored
        }
    }

    fn wheel(&mut self, delta: Vec2, viewport: &mut ViewportState) -> GestureOutcome {
        if !viewport.is_ready() {
            return GestureOutcome::Ignored;
        }
        let combined = delta.x + delta.y;
        if combined == 0.0 {
            return GestureOutcome::Step(StepOutcome::Rejected(Rejection::ZeroDelta));
        }
        let zoom_in = combined < 0.0;
        GestureOutcome::Step(viewport.try_zoom(zoom_in, self.settings.zoom_increment))
    }

    fn touch_start(&mut self, touches: &[Touch], viewport: &ViewportState) -> GestureOutcome {
        if !viewport.is_ready() {
            return GestureOutcome::Ignored;
        }
        let Some(mode) = TouchMode::for_touches(touches) else {
            return GestureOutcome::Ignored;
        };

        match self.touch.as_mut() {
            Some(session) => {
                // A pinch in progress keeps its latched distance when a third finger lands.
                if let (TouchMode::Pinch(pinch), TouchMode::Pinch(_)) = (session.mode, mode) {
                    if pinch.distance(touches).is_some() {
                        return GestureOutcome::Tracked;
                    }
                }
                session.mode = mode;
            }
            None => {
                self.touch = Some(TouchSession {
                    mode,
                    _lease: self
                        .registry
                        .lease(Listeners::TOUCH_MOVE | Listeners::TOUCH_END),
                });
            }
        }
        debug!(touches = touches.len(), mode = ?mode, "Touch session updated");
        GestureOutcome::Tracked
    }

    fn touch_move(&mut self, touches: &[Touch], viewport: &mut ViewportState) -> GestureOutcome {
        let Some(session) = self.touch.as_mut() else {
            return GestureOutcome::Ignored;
        };

        match &mut session.mode {
            TouchMode::Pinch(pinch) => {
                let Some(distance) = pinch.distance(touches) else {
                    return GestureOutcome::Ignored;
                };
                let change = pinch.change(distance);
                if change.abs() <= self.settings.pinch_deadzone_px {
                    return GestureOutcome::Tracked;
                }
                let outcome = viewport.try_zoom(change > 0.0, self.settings.zoom_increment);
                pinch.latch(distance);
                GestureOutcome::Step(outcome)
            }
            TouchMode::Drag(track) => {
                if touches.len() >= 2 {
                    // Second finger arrived without a start event: switch to a pinch.
                    if let Some(mode) = TouchMode::for_touches(touches) {
                        session.mode = mode;
                    }
                    return GestureOutcome::Tracked;
                }
                let Some(touch) = track.find(touches) else {
                    return GestureOutcome::Ignored;
                };
                let delta = track.delta_to(touch.position);
                let outcome = viewport.try_pan(delta, self.settings.pan_sensitivity);
                track.latch(touch.position);
                GestureOutcome::Step(outcome)
            }
        }
    }

    fn touch_end(&mut self, remaining: &[Touch]) -> GestureOutcome {
        let Some(session) = self.touch.as_mut() else {
            return GestureOutcome::Ignored;
        };

        match (session.mode, TouchMode::for_touches(remaining)) {
            (_, None) => {
                self.touch = None;
                debug!("Touch session ended");
            }
            (TouchMode::Pinch(pinch), Some(TouchMode::Pinch(_)))
                if pinch.distance(remaining).is_some() => {}
            (TouchMode::Drag(track), Some(TouchMode::Drag(_)))
                if track.find(remaining).is_some() => {}
            // Re-latch at the fresh positions so no stale coordinate feeds a step.
            (_, Some(mode)) => session.mode = mode,
        }
        GestureOutcome::Tracked
    }

    fn touch_cancel(&mut self) -> GestureOutcome {
        if self.touch.take().is_some() {
            debug!("Touch session cancelled");
            GestureOutcome::Tracked
        } else {
            GestureOutcome::Ignored
        }
    }
}
