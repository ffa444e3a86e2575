use nalgebra::{vector, Vector2};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

const COMPASS_POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// A vector in polar form: magnitude plus compass bearing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Polar {
    pub speed: f64,
    pub angle: f64,
}

pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

pub fn rad_to_deg(radians: f64) -> f64 {
    radians * 180.0 / PI
}

/// Maps an angle into [0, 360).
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360, and returns -0
    // for negative multiples of 360.
    if a >= 360.0 || a == 0.0 {
        0.0
    } else {
        a
    }
}

/// Signed shortest rotation from `from` to `to`, in (-180, 180].
pub fn angle_delta(from: f64, to: f64) -> f64 {
    let d = normalize_angle(to - from);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}

/// Compass bearing to canvas vector: 0° is up and angles turn clockwise, with
/// y growing downward.
pub fn polar_to_cartesian(speed: f64, angle: f64) -> Vector2<f64> {
    let rad = deg_to_rad(angle);
    vector![speed * rad.sin(), -speed * rad.cos()]
}

pub fn cartesian_to_polar(x: f64, y: f64) -> Polar {
    let speed = (x * x + y * y).sqrt();
    if x == 0.0 && y == 0.0 {
        // atan2(0, -0) is pi, which would report a zero vector as pointing south.
        return Polar { speed, angle: 0.0 };
    }
    Polar {
        speed,
        angle: normalize_angle(rad_to_deg(x.atan2(-y))),
    }
}

pub fn vector_to_polar(v: &Vector2<f64>) -> Polar {
    cartesian_to_polar(v.x, v.y)
}

pub fn distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    ((x2 - x1).powi(2) + (y2 - y1).powi(2)).sqrt()
}

pub fn format_speed(speed: f64) -> String {
    format!("{:.1}", speed)
}

pub fn format_angle(angle: f64) -> String {
    let rounded = normalize_angle(angle).round() as i64;
    (rounded % 360).to_string()
}

/// Eight-point compass abbreviation for a bearing.
pub fn compass_abbreviation(angle: f64) -> &'static str {
    let index = (normalize_angle(angle) / 45.0).round() as usize % COMPASS_POINTS.len();
    COMPASS_POINTS[index]
}
