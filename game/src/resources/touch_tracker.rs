use bevy::platform::collections::HashSet;
use bevy::prelude::*;

/// Identifier used for the synthetic touch driven by the left mouse button.
pub const MOUSE_TOUCH_ID: u64 = u64::MAX;

/// One finger (or the simulated mouse finger) at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    /// Stable from press to release.
    pub id: u64,
    /// Window position in logical pixels, origin top-left.
    pub position: Vec2,
    /// Seconds since startup.
    pub time: f32,
}

/// Published in platform delivery order: for one id, `Started` comes before
/// every `Moved`, which come before `Ended`.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum TouchNotification {
    Started(TouchPoint),
    Moved(TouchPoint),
    Ended(TouchPoint),
}

impl TouchNotification {
    pub fn point(&self) -> &TouchPoint {
        match self {
            Self::Started(point) | Self::Moved(point) | Self::Ended(point) => point,
        }
    }
}

/// Bridges raw touches into [`TouchNotification`]s and remembers which touches are down.
#[derive(Resource, Debug, Default)]
pub struct TouchTracker {
    /// Let the left mouse button act as a finger.
    pub simulate_with_mouse: bool,
    active: HashSet<u64>,
}

impl TouchTracker {
    pub fn with_mouse_simulation() -> Self {
        Self {
            simulate_with_mouse: true,
            ..default()
        }
    }

    /// `true` while any touch is down.
    pub fn is_touch_active(&self) -> bool {
        !self.active.is_empty()
    }

    pub fn is_pressed(&self, id: u64) -> bool {
        self.active.contains(&id)
    }

    pub fn start(&mut self, point: TouchPoint) -> TouchNotification {
        self.active.insert(point.id);
        TouchNotification::Started(point)
    }

    pub fn moved(&self, point: TouchPoint) -> TouchNotification {
        TouchNotification::Moved(point)
    }

    pub fn end(&mut self, point: TouchPoint) -> TouchNotification {
        self.active.remove(&point.id);
        TouchNotification::Ended(point)
    }
}
