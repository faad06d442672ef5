//! # Virtual Joystick Plugin
//!
//! Drives every [`JoystickState`] from the touch tracker's notifications.
//!
//! This plugin manages:
//! 1. Keeping each widget's screen rectangle (hit region, local frame) in sync with layout.
//! 2. Feeding start/move/end notifications to the resolver in delivery order.
//! 3. Publishing the drag, release and direction hooks.
//! 4. Rendering the knob at the resolved offset.
//!
//! ## Requirements
//! - Requires `plugins::touch` for [`TouchNotification`]s.
//! - The widget is spawned separately with [`spawn_joystick`].

use bevy::prelude::*;
use bevy::ui::UiGlobalTransform;

use crate::plugins::touch::TouchTrackingSystems;
use crate::prelude::{
    joystick_config::JoystickConfig,
    joystick_messages::*,
    joystick_state::{JoystickState, OverlayFrame},
    joystick_widget::{JoystickBase, JoystickKnob},
    touch_tracker::TouchNotification,
};

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct JoystickSystems;

pub(crate) fn plugin(app: &mut App) {
    app
        .init_resource::<JoystickConfig>()
        .register_type::<JoystickConfig>()
        .register_type::<JoystickState>()
        .register_type::<OverlayFrame>()
        .add_message::<JoystickDragStarted>()
        .add_message::<JoystickReleased>()
        .add_message::<JoystickDirectionChanged>()
        .add_message::<SetJoystickInputDisabled>()
        .add_systems(Update, (
            sync_joystick_layout,
            apply_config_changes,
            apply_input_toggles,
            resolve_joystick_touches,
            joystick_render_system,
        ).chain().in_set(JoystickSystems).after(TouchTrackingSystems));
}

/// Spawns the base and knob. The base is placed in `VMin` units to stay
/// responsive across screen sizes.
pub fn spawn_joystick(mut commands: Commands, config: Res<JoystickConfig>) {
    let travel_distance = config.sanitized_travel_distance();
    let knob_size = travel_distance * config.idle_scale;
    let base_size = JoystickConfig::base_size_for(travel_distance, config.center);

    commands.spawn((
        Name::new("Joystick"),
        JoystickBase,
        JoystickState::new(config.center, travel_distance, config.sanitized_threshold()),
        OverlayFrame::default(),
        Node {
            width: Val::Px(base_size),
            height: Val::Px(base_size),
            position_type: PositionType::Absolute,
            left: Val::VMin(config.pos_left_vmin),
            bottom: Val::VMin(config.pos_bottom_vmin),
            display: Display::Flex,
            align_items: AlignItems::Center,
            justify_content: JustifyContent::Center,
            ..default()
        },
        BackgroundColor(config.base_color.with_alpha(config.alpha_idle)),
        BorderRadius::all(Val::Percent(50.0)),
        ZIndex(100),
    ))
    .with_children(|parent| {
        parent.spawn((
            JoystickKnob,
            Node {
                width: Val::Px(knob_size),
                height: Val::Px(knob_size),
                position_type: PositionType::Relative,
                left: Val::Px(config.center.x),
                top: Val::Px(-config.center.y),
                ..default()
            },
            BackgroundColor(config.knob_color.with_alpha(config.alpha_idle)),
            BorderRadius::all(Val::Percent(50.0)),
        ));
    });
}

/// Tracks where layout put each base: its centre becomes the local origin and
/// the hit region is a `travel_distance` square around the knob's rest position.
fn sync_joystick_layout(
    mut q_base: Query<(&ComputedNode, &UiGlobalTransform, &mut JoystickState, &mut OverlayFrame), With<JoystickBase>>,
) {
    for (computed_node, transform, mut state, mut frame) in &mut q_base {
        // layout works in physical pixels, touches arrive in logical ones
        let origin = transform.translation * computed_node.inverse_scale_factor();
        if frame.origin != origin {
            frame.origin = origin;
        }

        let hit_region = Rect::from_center_size(
            frame.local_to_screen(state.center()),
            Vec2::splat(state.travel_distance()),
        );
        if state.hit_region() != hit_region {
            state.set_hit_region(hit_region);
        }
    }
}

/// Pushes config edits to joysticks once they are idle.
fn apply_config_changes(
    config: Res<JoystickConfig>,
    mut extents: Local<Option<(f32, f32)>>,
    mut q_joystick: Query<(Entity, &mut JoystickState)>,
) {
    if config.is_changed() || extents.is_none() {
        *extents = Some((config.sanitized_travel_distance(), config.sanitized_threshold()));
    }
    let Some((travel_distance, input_threshold)) = *extents else { return; };

    for (entity, mut state) in &mut q_joystick {
        let outdated = state.travel_distance() != travel_distance
            || state.input_threshold() != input_threshold;
        if outdated && state.reconfigure(travel_distance, input_threshold) {
            debug!("joystick {entity} reconfigured: travel {travel_distance}, threshold {input_threshold}");
        }
    }
}

fn apply_input_toggles(
    mut toggles: MessageReader<SetJoystickInputDisabled>,
    mut q_joystick: Query<&mut JoystickState>,
    mut released: MessageWriter<JoystickReleased>,
) {
    for toggle in toggles.read() {
        let Ok(mut state) = q_joystick.get_mut(toggle.joystick) else {
            warn!("cannot toggle input of {}: not a joystick", toggle.joystick);
            continue;
        };

        if state.set_input_disabled(toggle.disabled) {
            released.write(JoystickReleased { joystick: toggle.joystick });
        }
        info!(
            "joystick {} input {}",
            toggle.joystick,
            if toggle.disabled { "disabled" } else { "enabled" }
        );
    }
}

/// Feeds notifications to every joystick in the order they were published.
fn resolve_joystick_touches(
    mut notifications: MessageReader<TouchNotification>,
    mut q_joystick: Query<(Entity, &mut JoystickState, &OverlayFrame)>,
    mut drag_started: MessageWriter<JoystickDragStarted>,
    mut released: MessageWriter<JoystickReleased>,
    mut direction_changed: MessageWriter<JoystickDirectionChanged>,
) {
    for notification in notifications.read() {
        for (joystick, mut state, frame) in &mut q_joystick {
            match *notification {
                TouchNotification::Started(point) => {
                    if state.on_touch_start(point.id, point.position) {
                        drag_started.write(JoystickDragStarted { joystick, touch_id: point.id });
                    }
                }
                TouchNotification::Moved(point) => {
                    if let Some(change) = state.on_touch_move(point.id, point.position, frame) {
                        direction_changed.write(JoystickDirectionChanged {
                            joystick,
                            previous: change.previous,
                            current: change.current,
                        });
                    }
                }
                TouchNotification::Ended(point) => {
                    if state.on_touch_end(point.id) {
                        released.write(JoystickReleased { joystick });
                    }
                }
            }
        }
    }
}

/// Places the knob at the resolved offset and fades the widget in while dragged.
fn joystick_render_system(
    config: Res<JoystickConfig>,
    mut q_base: Query<(&JoystickState, &Children, &mut Node, &mut BackgroundColor), (With<JoystickBase>, Without<JoystickKnob>)>,
    mut q_knob: Query<(&mut Node, &mut BackgroundColor), (With<JoystickKnob>, Without<JoystickBase>)>,
) {
    for (state, children, mut base_node, mut base_color) in &mut q_base {
        let (alpha, scale) = if state.is_dragging() {
            (config.alpha_active, 1.0)
        } else {
            (config.alpha_idle, config.idle_scale)
        };
        let knob_size = state.travel_distance() * scale;
        let position = state.center() + state.offset();

        // travel can change with the config, the base grows with it
        let base_size = Val::Px(JoystickConfig::base_size_for(state.travel_distance(), state.center()));
        if base_node.width != base_size {
            base_node.width = base_size;
            base_node.height = base_size;
        }
        base_color.0.set_alpha(alpha);

        for &child in children {
            let Ok((mut knob_node, mut knob_color)) = q_knob.get_mut(child) else { continue; };
            knob_node.width = Val::Px(knob_size);
            knob_node.height = Val::Px(knob_size);
            knob_node.left = Val::Px(position.x);
            knob_node.top = Val::Px(-position.y);
            knob_color.0.set_alpha(alpha);
        }
    }
}

#[cfg(test)]
mod tests {
    use bevy::input::touch::{TouchInput, TouchPhase};
    use bevy::math::Affine2;

    use super::*;
    use crate::prelude::joystick_state::JoystickDirection;

    const ORIGIN: Vec2 = Vec2::new(300.0, 300.0);

    #[derive(Resource)]
    struct Recorded<M: Message>(Vec<M>);

    impl<M: Message> Default for Recorded<M> {
        fn default() -> Self {
            Self(Vec::new())
        }
    }

    fn record<M: Message + Copy>(mut reader: MessageReader<M>, mut recorded: ResMut<Recorded<M>>) {
        recorded.0.extend(reader.read().copied());
    }

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_message::<TouchInput>()
            .add_plugins((crate::plugins::touch::plugin, plugin))
            .init_resource::<Recorded<JoystickDragStarted>>()
            .init_resource::<Recorded<JoystickReleased>>()
            .init_resource::<Recorded<JoystickDirectionChanged>>()
            .add_systems(Update, (
                record::<JoystickDragStarted>,
                record::<JoystickReleased>,
                record::<JoystickDirectionChanged>,
            ).after(JoystickSystems));
        app
    }

    /// A joystick with the default config extents whose base is centred on [`ORIGIN`].
    fn spawn_test_joystick(app: &mut App) -> Entity {
        let config = JoystickConfig::default();
        let frame = OverlayFrame { origin: ORIGIN };
        let mut state = JoystickState::new(Vec2::ZERO, config.travel_distance, config.input_threshold);
        state.set_hit_region(Rect::from_center_size(ORIGIN, Vec2::splat(config.travel_distance)));
        app.world_mut().spawn((state, frame)).id()
    }

    fn send(app: &mut App, phase: TouchPhase, id: u64, local: Vec2) {
        let position = OverlayFrame { origin: ORIGIN }.local_to_screen(local);
        app.world_mut().write_message(TouchInput {
            phase,
            position,
            window: Entity::PLACEHOLDER,
            force: None,
            id,
        });
    }

    fn state(app: &App, joystick: Entity) -> &JoystickState {
        app.world().get::<JoystickState>(joystick).unwrap()
    }

    fn recorded<M: Message + Clone>(app: &App) -> Vec<M> {
        app.world().resource::<Recorded<M>>().0.clone()
    }

    #[test]
    fn drag_publishes_hooks_and_resolves_direction() {
        let mut app = app();
        let joystick = spawn_test_joystick(&mut app);

        send(&mut app, TouchPhase::Started, 4, Vec2::ZERO);
        send(&mut app, TouchPhase::Moved, 4, Vec2::new(0.0, 50.0));
        app.update();

        assert!(state(&app, joystick).is_dragging());
        assert_eq!(state(&app, joystick).direction(), JoystickDirection::Up);
        assert_eq!(
            recorded::<JoystickDragStarted>(&app),
            vec![JoystickDragStarted { joystick, touch_id: 4 }]
        );
        assert_eq!(
            recorded::<JoystickDirectionChanged>(&app),
            vec![JoystickDirectionChanged {
                joystick,
                previous: JoystickDirection::None,
                current: JoystickDirection::Up,
            }]
        );

        send(&mut app, TouchPhase::Moved, 4, Vec2::new(250.0, 0.0));
        app.update();
        assert_eq!(state(&app, joystick).direction(), JoystickDirection::Right);
        assert!((state(&app, joystick).offset().length() - 100.0).abs() < 1e-3);

        send(&mut app, TouchPhase::Ended, 4, Vec2::new(250.0, 0.0));
        app.update();

        let state = state(&app, joystick);
        assert!(!state.is_dragging());
        assert_eq!(state.direction(), JoystickDirection::None);
        assert!(state.angle().is_nan());
        assert_eq!(recorded::<JoystickReleased>(&app), vec![JoystickReleased { joystick }]);
    }

    #[test]
    fn touches_outside_or_from_other_fingers_are_ignored() {
        let mut app = app();
        let joystick = spawn_test_joystick(&mut app);

        send(&mut app, TouchPhase::Started, 1, Vec2::new(200.0, 0.0));
        app.update();
        assert!(!state(&app, joystick).is_dragging());

        send(&mut app, TouchPhase::Started, 2, Vec2::new(10.0, 10.0));
        send(&mut app, TouchPhase::Moved, 1, Vec2::new(0.0, 80.0));
        send(&mut app, TouchPhase::Ended, 1, Vec2::new(0.0, 80.0));
        app.update();

        let state = state(&app, joystick);
        assert_eq!(state.owner(), Some(2));
        assert_eq!(state.direction(), JoystickDirection::None);
        assert!(recorded::<JoystickReleased>(&app).is_empty());
    }

    #[test]
    fn disabling_input_mid_drag_releases_the_joystick() {
        let mut app = app();
        let joystick = spawn_test_joystick(&mut app);

        send(&mut app, TouchPhase::Started, 9, Vec2::ZERO);
        send(&mut app, TouchPhase::Moved, 9, Vec2::new(-60.0, 0.0));
        app.update();
        assert_eq!(state(&app, joystick).direction(), JoystickDirection::Left);

        app.world_mut().write_message(SetJoystickInputDisabled { joystick, disabled: true });
        app.update();

        assert!(!state(&app, joystick).is_dragging());
        assert!(state(&app, joystick).is_input_disabled());
        assert_eq!(state(&app, joystick).direction(), JoystickDirection::None);
        assert_eq!(recorded::<JoystickReleased>(&app), vec![JoystickReleased { joystick }]);

        // the finger is still down but nothing follows it
        send(&mut app, TouchPhase::Moved, 9, Vec2::new(0.0, 60.0));
        send(&mut app, TouchPhase::Ended, 9, Vec2::new(0.0, 60.0));
        send(&mut app, TouchPhase::Started, 10, Vec2::ZERO);
        app.update();
        assert!(!state(&app, joystick).is_dragging());
        assert_eq!(recorded::<JoystickReleased>(&app).len(), 1);

        app.world_mut().write_message(SetJoystickInputDisabled { joystick, disabled: false });
        app.update();
        send(&mut app, TouchPhase::Started, 11, Vec2::ZERO);
        app.update();
        assert_eq!(state(&app, joystick).owner(), Some(11));
    }

    #[test]
    fn layout_places_frame_and_hit_region_in_logical_pixels() {
        let mut app = app();
        let joystick = app
            .world_mut()
            .spawn((
                JoystickBase,
                JoystickState::new(Vec2::new(10.0, 20.0), 100.0, 0.2),
                OverlayFrame::default(),
                // 2x display: layout reports the base centre at (400, 600) physical
                ComputedNode { inverse_scale_factor: 0.5, ..default() },
                UiGlobalTransform::from(Affine2::from_translation(Vec2::new(400.0, 600.0))),
            ))
            .id();
        app.update();

        let frame = *app.world().get::<OverlayFrame>(joystick).unwrap();
        assert_eq!(frame.origin, Vec2::new(200.0, 300.0));
        // knob rests 10 right and 20 up from the base centre
        assert_eq!(
            state(&app, joystick).hit_region(),
            Rect::from_center_size(Vec2::new(210.0, 280.0), Vec2::splat(100.0))
        );

        let touch = |phase, position| TouchInput {
            phase,
            position,
            window: Entity::PLACEHOLDER,
            force: None,
            id: 5,
        };
        app.world_mut().write_message(touch(TouchPhase::Started, Vec2::new(210.0, 280.0)));
        app.world_mut().write_message(touch(TouchPhase::Moved, Vec2::new(210.0, 230.0)));
        app.update();

        let state = state(&app, joystick);
        assert_eq!(state.owner(), Some(5));
        assert_eq!(state.offset(), Vec2::new(0.0, 50.0));
        assert_eq!(state.direction(), JoystickDirection::Up);
    }

    #[test]
    fn touch_outside_the_synced_hit_region_is_ignored() {
        let mut app = app();
        let joystick = app
            .world_mut()
            .spawn((
                JoystickBase,
                JoystickState::new(Vec2::ZERO, 100.0, 0.2),
                OverlayFrame::default(),
                ComputedNode { inverse_scale_factor: 0.5, ..default() },
                UiGlobalTransform::from(Affine2::from_translation(Vec2::new(400.0, 600.0))),
            ))
            .id();
        app.update();

        // the physical position lies far outside the logical hit region
        app.world_mut().write_message(TouchInput {
            phase: TouchPhase::Started,
            position: Vec2::new(400.0, 600.0),
            window: Entity::PLACEHOLDER,
            force: None,
            id: 6,
        });
        app.update();
        assert!(!state(&app, joystick).is_dragging());
    }

    #[test]
    fn config_edits_apply_once_idle() {
        let mut app = app();
        let joystick = spawn_test_joystick(&mut app);

        send(&mut app, TouchPhase::Started, 3, Vec2::ZERO);
        app.update();

        app.world_mut().resource_mut::<JoystickConfig>().travel_distance = 60.0;
        app.update();
        assert_eq!(state(&app, joystick).travel_distance(), 100.0);

        send(&mut app, TouchPhase::Ended, 3, Vec2::ZERO);
        app.update();
        app.update();
        assert_eq!(state(&app, joystick).travel_distance(), 60.0);
    }
}
