//! # Joystick Tester
//!
//! Debug harness: one joystick plus a text readout of its direction, angle
//! and input state. Press SPACE to enable/disable input.

use bevy::prelude::*;

use crate::plugins::joystick::{JoystickSystems, spawn_joystick};
use crate::prelude::{
    joystick_messages::SetJoystickInputDisabled,
    joystick_state::JoystickState,
    joystick_tester::{JoystickTester, missing_joystick_message, readout},
    joystick_widget::JoystickBase,
};

pub(crate) fn plugin(app: &mut App) {
    app
        .add_systems(Startup, (spawn_joystick, spawn_joystick_tester).chain())
        .add_systems(Update, update_joystick_tester.before(JoystickSystems));
}

fn spawn_joystick_tester(mut commands: Commands, q_joystick: Query<Entity, With<JoystickBase>>) {
    let joystick = q_joystick.iter().next();

    commands.spawn((
        Name::new("Joystick Tester"),
        Node {
            position_type: PositionType::Absolute,
            top: Val::VMin(2.0),
            left: Val::VMin(2.0),
            display: Display::Flex,
            flex_direction: FlexDirection::Column,
            row_gap: Val::VMin(1.0),
            ..default()
        },
        ZIndex(100),
    ))
    .with_children(|parent| {
        parent.spawn((
            Name::new("Joystick Readout"),
            JoystickTester::new(joystick),
            Text::new(""),
            TextFont { font_size: 24.0, ..default() },
            TextColor(Color::WHITE),
        ));

        parent.spawn((
            Name::new("Joystick Tester Hint"),
            Text::new("Press SPACE to enable/disable input."),
            TextFont { font_size: 14.0, ..default() },
            TextColor(Color::srgb(0.8, 0.8, 1.0)),
        ));
    });
}

fn update_joystick_tester(
    keys: Res<ButtonInput<KeyCode>>,
    q_joystick: Query<&JoystickState>,
    mut q_tester: Query<(&mut JoystickTester, &mut Text, Option<&Name>)>,
    mut toggles: MessageWriter<SetJoystickInputDisabled>,
) {
    for (mut tester, mut text, name) in &mut q_tester {
        let target = tester
            .joystick
            .and_then(|entity| q_joystick.get(entity).ok().map(|state| (entity, state)));

        let Some((joystick, state)) = target else {
            let message = missing_joystick_message(name.map_or("<unnamed>", Name::as_str));
            if !tester.error_reported {
                error!("{message}");
                tester.error_reported = true;
            }
            if text.0 != message {
                text.0 = message;
            }
            continue;
        };
        tester.error_reported = false;

        if keys.just_pressed(KeyCode::Space) {
            tester.input_disabled = !tester.input_disabled;
            toggles.write(SetJoystickInputDisabled { joystick, disabled: tester.input_disabled });
        }

        let readout = readout(state, !tester.input_disabled);
        if text.0 != readout {
            text.0 = readout;
        }
    }
}
