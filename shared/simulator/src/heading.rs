use crate::angle::normalize_angle;
use crate::wind::{apparent_to_induced_angle, WindState, CLOSE_HAULED_ANGLE};
use serde::{Deserialize, Serialize};

pub const MAX_ITERATIONS: usize = 20;
/// Degrees of error accepted as converged.
pub const TOLERANCE: f64 = 0.5;
/// Fraction of the error applied to the heading each iteration.
pub const GAIN: f64 = 0.4;

// Lull candidate selection. Tunable; the intent is to avoid bearing away too
// far while the wind drops.
pub const LULL_MIN_PREFERRED_ANGLE: f64 = 44.0;
pub const LULL_IMPROVEMENT_RATIO: f64 = 0.8;

/// How the solver picks its answer among the candidates it visits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandidateBias {
    /// Closest to the target angle.
    Nearest,
    /// Closest to the target, but a candidate below
    /// [LULL_MIN_PREFERRED_ANGLE] only wins by a clear margin.
    PreferWide,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeadingSolution {
    pub heading: f64,
    /// Apparent-to-induced angle at `heading`.
    pub angle: f64,
    pub iterations: usize,
    pub converged: bool,
}

impl HeadingSolution {
    pub fn error(&self) -> f64 {
        self.angle - CLOSE_HAULED_ANGLE
    }
}

fn accept(bias: CandidateBias, angle: f64, best: &HeadingSolution) -> bool {
    let distance = (angle - CLOSE_HAULED_ANGLE).abs();
    let best_distance = best.error().abs();
    if distance >= best_distance {
        return false;
    }
    match bias {
        CandidateBias::Nearest => true,
        CandidateBias::PreferWide => {
            angle >= LULL_MIN_PREFERRED_ANGLE || distance < best_distance * LULL_IMPROVEMENT_RATIO
        }
    }
}

/// Searches for a heading where the apparent wind sits [CLOSE_HAULED_ANGLE]
/// off the induced wind, starting from `start_heading`.
///
/// Wind speed, wind angle and boat speed are taken from `state`; its heading
/// is ignored.
pub fn solve_heading(state: &WindState, start_heading: f64, bias: CandidateBias) -> HeadingSolution {
    let evaluate = |heading: f64| apparent_to_induced_angle(&state.with_boat_direction(heading));

    let mut candidate = normalize_angle(start_heading);
    let mut angle = evaluate(candidate);
    let mut iterations = 1;
    let mut best = HeadingSolution {
        heading: candidate,
        angle,
        iterations,
        converged: false,
    };

    loop {
        let error = angle - CLOSE_HAULED_ANGLE;
        if error.abs() < TOLERANCE {
            return HeadingSolution {
                iterations,
                converged: true,
                ..best
            };
        }
        if iterations == MAX_ITERATIONS {
            return HeadingSolution { iterations, ..best };
        }

        candidate = normalize_angle(candidate + error * GAIN);
        angle = evaluate(candidate);
        iterations += 1;
        if accept(bias, angle, &best) {
            best = HeadingSolution {
                heading: candidate,
                angle,
                iterations,
                converged: false,
            };
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_already_close_hauled() {
        let state = WindState {
            true_wind_speed: 10.0,
            true_wind_angle: 0.0,
            boat_speed: 0.0,
            boat_direction: 0.0,
        };
        // With no boat speed the apparent wind is the true wind, so the answer
        // is exact: 0 - (135 + 180) wraps to 45.
        let solution = solve_heading(&state, 135.0, CandidateBias::Nearest);
        assert!(solution.converged);
        assert_eq!(solution.iterations, 1);
        assert!((solution.heading - 135.0).abs() < 1e-9);
    }

    #[test]
    fn test_prefer_wide_needs_clear_margin_below_preferred_angle() {
        let best = HeadingSolution {
            heading: 0.0,
            angle: 47.0,
            iterations: 1,
            converged: false,
        };
        // 43.2 is closer than 47 but not by the 0.8 ratio.
        assert!(accept(CandidateBias::Nearest, 43.2, &best));
        assert!(!accept(CandidateBias::PreferWide, 43.2, &best));
        assert!(accept(CandidateBias::PreferWide, 43.5, &best));
        assert!(accept(CandidateBias::PreferWide, 46.0, &best));
        assert!(!accept(CandidateBias::Nearest, 49.0, &best));
    }

    #[test]
    fn test_calm_never_converges_but_stays_finite() {
        let state = WindState {
            true_wind_speed: 0.0,
            true_wind_angle: 0.0,
            boat_speed: 5.0,
            boat_direction: 0.0,
        };
        let solution = solve_heading(&state, 10.0, CandidateBias::PreferWide);
        assert!(!solution.converged);
        assert_eq!(solution.iterations, MAX_ITERATIONS);
        assert!(solution.heading.is_finite());
        assert!(solution.angle.is_finite());
    }
}
