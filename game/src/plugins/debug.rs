use bevy::prelude::*;

use crate::plugins::joystick::JoystickSystems;
use crate::prelude::joystick_messages::*;

pub(crate) fn plugin(app: &mut App) {
    app.add_systems(Update, log_joystick_hooks.after(JoystickSystems));

    #[cfg(feature = "dev")]
    {
        use bevy::diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin};
        use bevy_egui::EguiPlugin;
        use bevy_inspector_egui::quick::ResourceInspectorPlugin;
        use crate::resources::joystick_config::JoystickConfig;

        app.add_plugins((
            LogDiagnosticsPlugin::default(),
            FrameTimeDiagnosticsPlugin::default(),
        ));

        app.add_plugins(EguiPlugin::default());
        app.add_plugins(ResourceInspectorPlugin::<JoystickConfig>::default());
    }
}

fn log_joystick_hooks(
    mut drag_started: MessageReader<JoystickDragStarted>,
    mut released: MessageReader<JoystickReleased>,
    mut direction_changed: MessageReader<JoystickDirectionChanged>,
) {
    for msg in drag_started.read() {
        debug!("joystick {} grabbed by touch {}", msg.joystick, msg.touch_id);
    }
    for msg in direction_changed.read() {
        debug!("joystick {} direction {} -> {}", msg.joystick, msg.previous, msg.current);
    }
    for msg in released.read() {
        debug!("joystick {} returned to centre", msg.joystick);
    }
}
