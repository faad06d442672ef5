use bevy::prelude::*;

/// UI needs a camera to render into.
pub(crate) fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_ui_camera);
}

fn spawn_ui_camera(mut commands: Commands) {
    commands.spawn((Name::new("UI Camera"), Camera2d));
}
