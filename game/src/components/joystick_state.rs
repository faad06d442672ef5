//! # Joystick Resolver
//!
//! Owns at most one touch at a time and turns its position into a bounded
//! knob offset, a continuous angle and one of four discrete directions.
//!
//! Everything here is plain state; the systems in `plugins::joystick` feed it
//! touch notifications and publish whatever it reports back.

use std::fmt;

use bevy::prelude::*;

/// Discrete direction resolved from the knob angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum JoystickDirection {
    #[default]
    None,
    Up,
    Right,
    Down,
    Left,
}

impl JoystickDirection {
    /// Maps an angle in degrees (`[0, 360)`, as produced by [`knob_angle`]) to a direction.
    ///
    /// | Range                  | Direction |
    /// |------------------------|-----------|
    /// | `[0,45)` / `[315,360)` | `Down`    |
    /// | `[45,135)`             | `Left`    |
    /// | `[135,225)`            | `Up`      |
    /// | `[225,315)`            | `Right`   |
    pub fn from_angle(angle: f32) -> Self {
        if angle.is_nan() {
            return Self::None;
        }
        if angle < 45.0 || angle >= 315.0 {
            Self::Down
        } else if angle < 135.0 {
            Self::Left
        } else if angle < 225.0 {
            Self::Up
        } else {
            Self::Right
        }
    }
}

impl fmt::Display for JoystickDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "NONE",
            Self::Up => "UP",
            Self::Right => "RIGHT",
            Self::Down => "DOWN",
            Self::Left => "LEFT",
        };
        f.write_str(name)
    }
}

/// Angle of an offset in degrees: `atan2(x, y) + 180`, folded into `[0, 360)`.
pub fn knob_angle(offset: Vec2) -> f32 {
    let angle = offset.x.atan2(offset.y).to_degrees() + 180.0;
    if angle >= 360.0 { angle - 360.0 } else { angle }
}

/// Converts screen positions into the joystick's local space.
///
/// How that projection works (plain overlay, camera, ...) is up to the host UI.
pub trait ReferenceFrame {
    fn screen_to_local(&self, screen: Vec2) -> Option<Vec2>;
}

/// Screen-space overlay frame: local origin at `origin` (logical px, y down),
/// local axes x right / y up.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct OverlayFrame {
    pub origin: Vec2,
}

impl OverlayFrame {
    pub fn local_to_screen(&self, local: Vec2) -> Vec2 {
        Vec2::new(self.origin.x + local.x, self.origin.y - local.y)
    }
}

impl ReferenceFrame for OverlayFrame {
    fn screen_to_local(&self, screen: Vec2) -> Option<Vec2> {
        Some(Vec2::new(screen.x - self.origin.x, self.origin.y - screen.y))
    }
}

/// Reported by [`JoystickState::on_touch_move`] when the resolved direction changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionChange {
    pub previous: JoystickDirection,
    pub current: JoystickDirection,
}

/// Per-widget resolver state.
///
/// Invariants:
/// - `offset().length() <= travel_distance()`.
/// - `direction()` is `None` while the offset sits inside the dead zone.
/// - `owner()` is `Some` exactly while `is_dragging()`.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct JoystickState {
    center: Vec2,
    travel_distance: f32,
    input_threshold: f32,
    /// Screen-space rectangle a touch must start in (logical px, y down).
    hit_region: Rect,
    offset: Vec2,
    direction: JoystickDirection,
    angle: f32,
    owner: Option<u64>,
    input_disabled: bool,
}

impl JoystickState {
    pub fn new(center: Vec2, travel_distance: f32, input_threshold: f32) -> Self {
        Self {
            center,
            travel_distance,
            input_threshold,
            hit_region: Rect::default(),
            offset: Vec2::ZERO,
            direction: JoystickDirection::None,
            angle: f32::NAN,
            owner: None,
            input_disabled: false,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn travel_distance(&self) -> f32 {
        self.travel_distance
    }

    pub fn input_threshold(&self) -> f32 {
        self.input_threshold
    }

    pub fn hit_region(&self) -> Rect {
        self.hit_region
    }

    /// Knob offset from `center`.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn direction(&self) -> JoystickDirection {
        self.direction
    }

    /// Degrees in `[0, 360)`, `NaN` while no touch is driving the knob.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn owner(&self) -> Option<u64> {
        self.owner
    }

    pub fn is_dragging(&self) -> bool {
        self.owner.is_some()
    }

    pub fn is_input_disabled(&self) -> bool {
        self.input_disabled
    }

    pub fn set_hit_region(&mut self, hit_region: Rect) {
        self.hit_region = hit_region;
    }

    /// Applies new extents. Ignored mid-drag so the current gesture keeps its bounds.
    pub fn reconfigure(&mut self, travel_distance: f32, input_threshold: f32) -> bool {
        if self.is_dragging() {
            return false;
        }
        self.travel_distance = travel_distance;
        self.input_threshold = input_threshold;
        true
    }

    /// Strict containment; touches on the rectangle's edge do not count.
    pub fn contains_point(&self, point: Vec2) -> bool {
        let Rect { min, max } = self.hit_region;
        min.x < point.x && point.x < max.x && min.y < point.y && point.y < max.y
    }

    /// Claims `id` if input is enabled, no touch is owned yet and `position` hits the widget.
    ///
    /// Returns `true` when ownership was taken.
    pub fn on_touch_start(&mut self, id: u64, position: Vec2) -> bool {
        if self.input_disabled || self.owner.is_some() || !self.contains_point(position) {
            return false;
        }
        self.owner = Some(id);
        true
    }

    /// Moves the knob for the owning touch. Anything else is a no-op.
    pub fn on_touch_move(
        &mut self,
        id: u64,
        position: Vec2,
        frame: &impl ReferenceFrame,
    ) -> Option<DirectionChange> {
        if self.input_disabled || self.owner != Some(id) {
            return None;
        }
        let local = frame.screen_to_local(position)?;
        self.move_knob_to(local)
    }

    fn move_knob_to(&mut self, local: Vec2) -> Option<DirectionChange> {
        let previous = self.direction;
        let raw_offset = local - self.center;

        if raw_offset.length() < self.travel_distance * self.input_threshold {
            // dead zone; a threshold of 1 or more must not push the knob past its travel
            self.offset = raw_offset.clamp_length_max(self.travel_distance);
            self.direction = JoystickDirection::None;
        } else {
            self.offset = raw_offset.clamp_length_max(self.travel_distance);
            self.angle = knob_angle(raw_offset);
            self.direction = JoystickDirection::from_angle(self.angle);
        }

        (previous != self.direction).then_some(DirectionChange {
            previous,
            current: self.direction,
        })
    }

    /// Releases the owning touch and resets to the idle values.
    ///
    /// Returns `true` if `id` was the owner.
    pub fn on_touch_end(&mut self, id: u64) -> bool {
        if self.owner != Some(id) {
            return false;
        }
        self.owner = None;
        self.offset = Vec2::ZERO;
        self.angle = f32::NAN;
        self.direction = JoystickDirection::None;
        true
    }

    /// Disabling force-releases the current owner, if any.
    ///
    /// Returns `true` when a drag was cancelled.
    pub fn set_input_disabled(&mut self, disabled: bool) -> bool {
        self.input_disabled = disabled;
        match self.owner {
            Some(owner) if disabled => self.on_touch_end(owner),
            _ => false,
        }
    }
}
