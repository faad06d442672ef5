use bevy::prelude::*;

use crate::components::joystick_state::JoystickState;

/// On-screen readout of a joystick's resolved state.
///
/// Leaving `joystick` unset (or pointing it at something that is not a
/// joystick) is a setup error the tester reports instead of the readout.
#[derive(Component, Debug, Default)]
pub struct JoystickTester {
    pub joystick: Option<Entity>,
    pub input_disabled: bool,
    pub(crate) error_reported: bool,
}

impl JoystickTester {
    pub fn new(joystick: Option<Entity>) -> Self {
        Self { joystick, ..default() }
    }
}

pub fn readout(state: &JoystickState, input_enabled: bool) -> String {
    format!(
        "Direction: {}\nAngle: {}\nInput Enabled: {}",
        state.direction(),
        state.angle().round(),
        input_enabled
    )
}

pub fn missing_joystick_message(tester_name: &str) -> String {
    format!("Joystick is missing on JoystickTester attached to {tester_name}")
}
