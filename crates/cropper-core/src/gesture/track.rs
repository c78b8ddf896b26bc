use kurbo::{Point, Vec2};

use super::Touch;

/// Last known position of the pointer or touch driving a drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerTrack {
    /// Touch identifier, `None` for the mouse.
    pub touch_id: Option<u64>,
    pub last: Point,
}

impl PointerTrack {
    pub fn mouse(position: Point) -> Self {
        Self {
            touch_id: None,
            last: position,
        }
    }

    pub fn touch(touch: Touch) -> Self {
        Self {
            touch_id: Some(touch.id),
            last: touch.position,
        }
    }

    /// Movement from the last known position to `position`.
    pub fn delta_to(&self, position: Point) -> Vec2 {
        position - self.last
    }

    pub fn latch(&mut self, position: Point) {
        self.last = position;
    }

    /// The tracked touch among `touches`, if still present.
    pub fn find(&self, touches: &[Touch]) -> Option<Touch> {
        let id = self.touch_id?;
        touches.iter().copied().find(|t| t.id == id)
    }
}

/// Two tracked touches and the distance the last zoom step was taken at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchTrack {
    pub ids: (u64, u64),
    pub latched_distance: f64,
}

impl PinchTrack {
    pub fn new(a: Touch, b: Touch) -> Self {
        Self {
            ids: (a.id, b.id),
            latched_distance: a.position.distance(b.position),
        }
    }

    /// Current distance between the tracked pair, if both are still down.
    pub fn distance(&self, touches: &[Touch]) -> Option<f64> {
        let a = touches.iter().find(|t| t.id == self.ids.0)?;
        let b = touches.iter().find(|t| t.id == self.ids.1)?;
        Some(a.position.distance(b.position))
    }

    pub fn change(&self, distance: f64) -> f64 {
        distance - self.latched_distance
    }

    pub fn latch(&mut self, distance: f64) {
        self.latched_distance = distance;
    }
}
