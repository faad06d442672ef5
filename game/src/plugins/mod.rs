pub mod camera;
pub mod debug;
pub mod joystick;
pub mod tester;
pub mod touch;
