use crate::angle::polar_to_cartesian;
use crate::wind::WindState;
use nalgebra::{point, vector, Point2, Vector2};
use serde::{Deserialize, Serialize};

pub const PIXELS_PER_KNOT: f64 = 15.0;
pub const BOAT_FRONT_OFFSET: f64 = 40.0;
/// Hit radius for drag handles. Not scaled by zoom.
pub const DRAG_HANDLE_RADIUS: f64 = 20.0;

pub const MIN_SPEED: f64 = 0.1;
pub const MAX_SPEED: f64 = 30.0;

pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 3.0;
pub const ZOOM_STEP: f64 = 0.25;

pub const DEFAULT_WIDTH: f64 = 800.0;
pub const DEFAULT_HEIGHT: f64 = 600.0;

pub fn clamp_speed(speed: f64) -> f64 {
    speed.clamp(MIN_SPEED, MAX_SPEED)
}

pub fn clamp_zoom(zoom: f64) -> f64 {
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    zoom: f64,
    boat_offset: Vector2<f64>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            zoom: 1.0,
            boat_offset: vector![0.0, 0.0],
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn center(&self) -> Point2<f64> {
        point![self.width / 2.0, self.height / 2.0]
    }

    pub fn boat_position(&self) -> Point2<f64> {
        self.center() + self.boat_offset
    }

    pub fn boat_offset(&self) -> Vector2<f64> {
        self.boat_offset
    }

    pub fn set_boat_offset(&mut self, offset: Vector2<f64>) {
        self.boat_offset = offset;
    }

    pub fn pan(&mut self, delta: Vector2<f64>) {
        self.boat_offset += delta;
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = clamp_zoom(zoom);
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - ZOOM_STEP);
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = 1.0;
    }

    /// Pixels per knot at the current zoom.
    pub fn scale(&self) -> f64 {
        PIXELS_PER_KNOT * self.zoom
    }

    pub fn boat_front_for(&self, boat_direction: f64) -> Point2<f64> {
        self.boat_position() + polar_to_cartesian(BOAT_FRONT_OFFSET * self.zoom, boat_direction)
    }

    /// Radius that reaches every corner of the canvas from any point on it.
    pub fn max_extent(&self) -> f64 {
        self.width
            .max(self.height)
            .max((self.width * self.width + self.height * self.height).sqrt())
    }
}

/// Canvas positions of every arrow endpoint.
///
/// The induced wind arrow ends at the bow, the true wind arrow ends where the
/// induced arrow starts, and the apparent wind arrow closes the triangle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VectorLayout {
    pub boat: Point2<f64>,
    pub boat_front: Point2<f64>,
    pub induced_start: Point2<f64>,
    pub induced_end: Point2<f64>,
    pub true_wind_tail: Point2<f64>,
    pub true_wind_head: Point2<f64>,
    pub apparent_tail: Point2<f64>,
    pub apparent_head: Point2<f64>,
}

impl VectorLayout {
    pub fn compute(viewport: &Viewport, state: &WindState) -> Self {
        let scale = viewport.scale();
        let boat_front = viewport.boat_front_for(state.boat_direction);
        let induced_start = boat_front - state.induced_wind_vector() * scale;
        let true_wind_tail = induced_start - state.true_wind_vector() * scale;
        Self {
            boat: viewport.boat_position(),
            boat_front,
            induced_start,
            induced_end: boat_front,
            true_wind_tail,
            true_wind_head: induced_start,
            apparent_tail: true_wind_tail,
            apparent_head: boat_front,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::angle::vector_to_polar;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_zoom_limits() {
        let mut viewport = Viewport::default();
        for _ in 0..20 {
            viewport.zoom_in();
        }
        assert_eq!(viewport.zoom(), MAX_ZOOM);
        for _ in 0..20 {
            viewport.zoom_out();
        }
        assert_eq!(viewport.zoom(), MIN_ZOOM);
        viewport.reset_zoom();
        assert_eq!(viewport.zoom(), 1.0);
        viewport.set_zoom(100.0);
        assert_eq!(viewport.zoom(), MAX_ZOOM);
    }

    #[test]
    fn test_apparent_arrow_closes_triangle() {
        let viewport = Viewport::new(400.0, 400.0);
        let state = WindState {
            true_wind_speed: 12.0,
            true_wind_angle: 40.0,
            boat_speed: 6.0,
            boat_direction: 10.0,
        };
        let layout = VectorLayout::compute(&viewport, &state);
        let drawn = vector_to_polar(&((layout.apparent_head - layout.apparent_tail) / viewport.scale()));
        let apparent = state.apparent_wind();
        assert_abs_diff_eq!(drawn.speed, apparent.speed, epsilon = 1e-9);
        assert_abs_diff_eq!(drawn.angle, apparent.angle, epsilon = 1e-9);
    }

    #[test]
    fn test_boat_front_follows_heading_and_zoom() {
        let mut viewport = Viewport::new(200.0, 100.0);
        viewport.set_zoom(2.0);
        viewport.pan(vector![10.0, -5.0]);
        let front = viewport.boat_front_for(90.0);
        assert_abs_diff_eq!(front.x, 100.0 + 10.0 + 80.0, epsilon = 1e-9);
        assert_abs_diff_eq!(front.y, 50.0 - 5.0, epsilon = 1e-9);
    }
}
