pub mod joystick_state;
pub mod joystick_tester;
pub mod joystick_widget;
