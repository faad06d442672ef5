use bevy::prelude::*;

use crate::components::joystick_state::JoystickDirection;

/// A touch took ownership of the joystick.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoystickDragStarted {
    pub joystick: Entity,
    pub touch_id: u64,
}

/// The owning touch let go (or input was disabled) and the knob returned to centre.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoystickReleased {
    pub joystick: Entity,
}

/// Only sent while dragging; a release resets the direction silently.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoystickDirectionChanged {
    pub joystick: Entity,
    pub previous: JoystickDirection,
    pub current: JoystickDirection,
}

/// Enables or disables a joystick. Disabling cancels any drag in progress.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetJoystickInputDisabled {
    pub joystick: Entity,
    pub disabled: bool,
}
