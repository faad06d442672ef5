//! # Touch Tracker Plugin
//!
//! Turns Bevy's raw [`TouchInput`] stream (and, optionally, the left mouse
//! button) into [`TouchNotification`] messages for widgets to consume.
//!
//! Consumers should order their systems `.after(TouchTrackingSystems)` so a
//! touch is seen the same frame it arrives.

use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::prelude::touch_tracker::{MOUSE_TOUCH_ID, TouchNotification, TouchPoint, TouchTracker};

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct TouchTrackingSystems;

pub(crate) fn plugin(app: &mut App) {
    app
        .init_resource::<TouchTracker>()
        .add_message::<TouchNotification>()
        .add_systems(Update, (
            track_touches,
            simulate_touch_with_mouse.run_if(mouse_simulation_enabled),
        ).chain().in_set(TouchTrackingSystems));
}

fn mouse_simulation_enabled(tracker: Res<TouchTracker>) -> bool {
    tracker.simulate_with_mouse
}

fn track_touches(
    time: Res<Time>,
    mut touch_input: MessageReader<TouchInput>,
    mut tracker: ResMut<TouchTracker>,
    mut notifications: MessageWriter<TouchNotification>,
) {
    for input in touch_input.read() {
        let point = TouchPoint {
            id: input.id,
            position: input.position,
            time: time.elapsed_secs(),
        };
        let notification = match input.phase {
            TouchPhase::Started => tracker.start(point),
            TouchPhase::Moved => tracker.moved(point),
            TouchPhase::Ended | TouchPhase::Canceled => tracker.end(point),
        };
        notifications.write(notification);
    }
}

/// Drives a synthetic touch ([`MOUSE_TOUCH_ID`]) from the left mouse button.
fn simulate_touch_with_mouse(
    time: Res<Time>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    q_window: Query<&Window, With<PrimaryWindow>>,
    mut tracker: ResMut<TouchTracker>,
    mut notifications: MessageWriter<TouchNotification>,
    mut last_position: Local<Option<Vec2>>,
) {
    let Ok(window) = q_window.single() else { return; };
    let point = |position: Vec2| TouchPoint {
        id: MOUSE_TOUCH_ID,
        position,
        time: time.elapsed_secs(),
    };

    if mouse_buttons.just_pressed(MouseButton::Left) && !tracker.is_pressed(MOUSE_TOUCH_ID) {
        if let Some(position) = window.cursor_position() {
            notifications.write(tracker.start(point(position)));
            *last_position = Some(position);
        }
    } else if mouse_buttons.pressed(MouseButton::Left) && tracker.is_pressed(MOUSE_TOUCH_ID) {
        if let Some(position) = window.cursor_position() {
            if *last_position != Some(position) {
                notifications.write(tracker.moved(point(position)));
                *last_position = Some(position);
            }
        }
    }

    if !mouse_buttons.pressed(MouseButton::Left) && tracker.is_pressed(MOUSE_TOUCH_ID) {
        // The cursor may have left the window; release where it was last seen.
        let position = window.cursor_position().or(*last_position).unwrap_or_default();
        notifications.write(tracker.end(point(position)));
        *last_position = None;
    }
}
