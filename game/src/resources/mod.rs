pub mod joystick_config;
pub mod joystick_messages;
pub mod touch_tracker;
