use bevy::prelude::*;

/// Background circle of the joystick; carries the resolver state.
#[derive(Component, Default, Reflect)]
#[reflect(Component)]
pub struct JoystickBase;

/// The moving knob, a child of [`JoystickBase`].
#[derive(Component, Default, Reflect)]
#[reflect(Component)]
pub struct JoystickKnob;
