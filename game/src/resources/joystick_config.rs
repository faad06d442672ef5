use bevy::prelude::*;

/// Configuration resource for the on-screen joystick.
///
/// Edits (via code or the `bevy_inspector_egui` panel) are picked up by idle
/// joysticks on the next frame; a joystick mid-drag keeps its old extents
/// until released.
#[derive(Resource, Reflect, Debug, Clone)]
#[reflect(Resource)]
pub struct JoystickConfig {
    /// Dead zone as a fraction of `travel_distance`. Expected in `(0, 1)`.
    pub input_threshold: f32,

    /// How far the knob may move from its rest position, in logical pixels.
    /// Also the side of the square a touch must start in.
    pub travel_distance: f32,

    /// Rest position of the knob relative to the base centre (x right, y up).
    pub center: Vec2,

    /// Distance from the left edge of the screen in responsive `VMin` units.
    pub pos_left_vmin: f32,

    /// Distance from the bottom edge of the screen in responsive `VMin` units.
    pub pos_bottom_vmin: f32,

    /// Knob size while idle, relative to `travel_distance`.
    pub idle_scale: f32,

    /// Transparency of the joystick when it is NOT being touched (0.0 to 1.0).
    pub alpha_idle: f32,

    /// Transparency of the joystick while actively being dragged (0.0 to 1.0).
    pub alpha_active: f32,

    pub base_color: Color,
    pub knob_color: Color,
}

impl Default for JoystickConfig {
    fn default() -> Self {
        Self {
            input_threshold: 0.2,
            travel_distance: 100.0,
            center: Vec2::ZERO,
            pos_left_vmin: 10.0,
            pos_bottom_vmin: 10.0,
            idle_scale: 0.66,
            alpha_idle: 0.3,
            alpha_active: 0.8,
            base_color: Color::srgba(1.0, 1.0, 1.0, 1.0),
            knob_color: Color::WHITE,
        }
    }
}

impl JoystickConfig {
    const MIN_THRESHOLD: f32 = 0.01;
    const MAX_THRESHOLD: f32 = 0.99;

    /// The dead-zone fraction, clamped into `(0, 1)`.
    pub fn sanitized_threshold(&self) -> f32 {
        let threshold = self.input_threshold;
        if threshold > 0.0 && threshold < 1.0 {
            return threshold;
        }
        let clamped = if threshold.is_nan() {
            JoystickConfig::default().input_threshold
        } else {
            threshold.clamp(Self::MIN_THRESHOLD, Self::MAX_THRESHOLD)
        };
        warn!("joystick input_threshold {threshold} is outside (0, 1), using {clamped}");
        clamped
    }

    /// Side of the base circle: wide enough that a full-size knob pushed
    /// `travel_distance` away from its rest position stays inside.
    pub fn base_size_for(travel_distance: f32, center: Vec2) -> f32 {
        let reach = travel_distance + travel_distance / 2.0 + center.length();
        2.0 * reach
    }

    /// Non-negative travel distance.
    pub fn sanitized_travel_distance(&self) -> f32 {
        if self.travel_distance >= 0.0 {
            return self.travel_distance;
        }
        warn!("joystick travel_distance {} is negative, using 0", self.travel_distance);
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_values_pass_through() {
        let config = JoystickConfig { input_threshold: 0.35, ..default() };
        assert_eq!(config.sanitized_threshold(), 0.35);
        assert_eq!(config.sanitized_travel_distance(), 100.0);
    }

    #[test]
    fn out_of_range_threshold_is_clamped() {
        let too_low = JoystickConfig { input_threshold: 0.0, ..default() };
        assert_eq!(too_low.sanitized_threshold(), 0.01);

        let too_high = JoystickConfig { input_threshold: 3.0, ..default() };
        assert_eq!(too_high.sanitized_threshold(), 0.99);

        let nan = JoystickConfig { input_threshold: f32::NAN, ..default() };
        assert_eq!(nan.sanitized_threshold(), 0.2);
    }

    #[test]
    fn base_contains_the_knob_at_full_travel() {
        let config = JoystickConfig::default();
        let travel = config.travel_distance;
        let base_radius = JoystickConfig::base_size_for(travel, config.center) / 2.0;
        // dragged knob is `travel` wide
        assert!(base_radius >= travel + travel / 2.0);
        assert_eq!(base_radius, 150.0);

        let off_center = JoystickConfig::base_size_for(travel, Vec2::new(-10.0, 20.0)) / 2.0;
        assert!(off_center >= Vec2::new(-10.0, 20.0).length() + travel + travel / 2.0 - 1e-3);
    }

    #[test]
    fn negative_travel_distance_collapses_to_zero() {
        let config = JoystickConfig { travel_distance: -5.0, ..default() };
        assert_eq!(config.sanitized_travel_distance(), 0.0);
    }
}
