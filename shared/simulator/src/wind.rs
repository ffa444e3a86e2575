use crate::angle::{self, angle_delta, normalize_angle, polar_to_cartesian, Polar};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Apparent wind felt aboard the boat. Always derived from a [WindState].
pub type ApparentWind = Polar;

/// Angle between apparent wind and heading that the heading solver holds.
pub const CLOSE_HAULED_ANGLE: f64 = 45.0;

/// Half-width of the no-sail zone drawn around the boat's heading.
pub const NO_SAIL_HALF_ANGLE: f64 = 45.0;

/// The four scalars that define the system at any instant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WindState {
    /// Knots.
    pub true_wind_speed: f64,
    /// Degrees in [0, 360).
    pub true_wind_angle: f64,
    /// Knots.
    pub boat_speed: f64,
    /// Heading in degrees, 0 = north.
    pub boat_direction: f64,
}

impl Default for WindState {
    fn default() -> Self {
        Self {
            true_wind_speed: 10.0,
            true_wind_angle: 270.0,
            boat_speed: 10.0,
            boat_direction: 0.0,
        }
    }
}

impl WindState {
    pub fn apparent_wind(&self) -> ApparentWind {
        apparent_wind(self)
    }

    /// Direction of the airflow caused by the boat's own motion.
    pub fn induced_wind_angle(&self) -> f64 {
        normalize_angle(self.boat_direction + 180.0)
    }

    pub fn true_wind_vector(&self) -> Vector2<f64> {
        polar_to_cartesian(self.true_wind_speed, self.true_wind_angle)
    }

    pub fn induced_wind_vector(&self) -> Vector2<f64> {
        polar_to_cartesian(self.boat_speed, self.induced_wind_angle())
    }

    pub fn with_boat_direction(self, boat_direction: f64) -> Self {
        Self {
            boat_direction,
            ..self
        }
    }
}

pub fn apparent_wind(state: &WindState) -> ApparentWind {
    let v = state.true_wind_vector() + state.induced_wind_vector();
    angle::vector_to_polar(&v)
}

pub fn induced_wind(state: &WindState) -> Polar {
    Polar {
        speed: state.boat_speed,
        angle: state.induced_wind_angle(),
    }
}

/// Signed angle from the induced wind to the apparent wind, in (-180, 180].
///
/// Holding this at [CLOSE_HAULED_ANGLE] keeps the boat close-hauled.
pub fn apparent_to_induced_angle(state: &WindState) -> f64 {
    angle_delta(state.induced_wind_angle(), apparent_wind(state).angle)
}

/// Closed-form apparent wind for a true wind angle measured relative to the
/// boat's course.
///
/// Returns the apparent angle relative to the course, in (-180, 180].
pub fn relative_apparent_wind(
    true_wind_speed: f64,
    relative_true_wind_angle: f64,
    boat_speed: f64,
) -> Polar {
    let alpha = angle::deg_to_rad(relative_true_wind_angle);
    let along = true_wind_speed * alpha.cos() + boat_speed;
    let across = true_wind_speed * alpha.sin();
    Polar {
        speed: (along * along + across * across).sqrt(),
        angle: angle_delta(0.0, angle::rad_to_deg(across.atan2(along))),
    }
}

/// Port and starboard edges of the no-sail zone around a heading.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoSailZone {
    pub left: f64,
    pub right: f64,
}

impl NoSailZone {
    pub fn around(boat_direction: f64) -> Self {
        let heading = normalize_angle(boat_direction);
        Self {
            left: normalize_angle(heading - NO_SAIL_HALF_ANGLE),
            right: normalize_angle(heading + NO_SAIL_HALF_ANGLE),
        }
    }

    pub fn contains(&self, angle: f64) -> bool {
        let center = normalize_angle(self.left + NO_SAIL_HALF_ANGLE);
        angle_delta(center, angle).abs() < NO_SAIL_HALF_ANGLE
    }
}
