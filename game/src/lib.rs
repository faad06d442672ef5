#![allow(unused_imports)]

use bevy::prelude::*;

pub mod components;
mod plugins;
pub mod resources;

pub use plugins::joystick::{JoystickSystems, spawn_joystick};
pub use plugins::touch::TouchTrackingSystems;

mod prelude {
    pub use super::*;
    pub use {components::*, plugins::*, resources::*};
}

/// Dark backdrop so the translucent white joystick stays readable.
const CLEAR_COLOR: Color = Color::srgb(0.08, 0.09, 0.11);

/// Portrait, phone-shaped window: the joystick sits bottom-left under a thumb.
fn primary_window() -> Window {
    Window {
        title: "Joystick Tester".into(),
        resolution: (540, 960).into(),
        resizable: true,
        ..default()
    }
}

pub struct AppPlugin;

impl Plugin for AppPlugin {
    fn build(&self, app: &mut App) {
        // Desktop builds have no touchscreen; let the mouse stand in for a finger.
        app.insert_resource(resources::touch_tracker::TouchTracker::with_mouse_simulation());

        app.insert_resource(ClearColor(CLEAR_COLOR))
            .add_plugins(DefaultPlugins.set(WindowPlugin {
                primary_window: Some(primary_window()),
                ..default()
            }));

        app.add_plugins((
            plugins::camera::plugin,
            plugins::touch::plugin,
            plugins::joystick::plugin,
            plugins::tester::plugin,
            plugins::debug::plugin,
        ));
    }
}
