use crate::config::SimulationConfig;
use crate::easing::{ease_in_cubic, ease_in_expo, ease_out_cubic, ease_out_expo};
use crate::simulation::SimulationKind;
use serde::{Deserialize, Serialize};

/// Fraction of the wind decay that passes before the boat starts slowing.
pub const BOAT_DECAY_LAG: f64 = 0.2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    WindBuildUp,
    Peak,
    WindDecay,
    BoatRecovery,
    Complete,
}

impl Phase {
    pub fn label(&self, kind: SimulationKind) -> &'static str {
        match (self, kind) {
            (Phase::WindBuildUp, _) => "Wind building",
            (Phase::Peak, SimulationKind::Gust) => "Gust peak",
            (Phase::Peak, SimulationKind::Lull) => "Lull trough",
            (Phase::WindDecay, _) => "Wind easing",
            (Phase::BoatRecovery, _) => "Boat recovering",
            (Phase::Complete, _) => "Complete",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseProgress {
    pub phase: Phase,
    pub elapsed_ms: f64,
    pub duration_ms: f64,
}

/// Boundaries in simulated milliseconds since the start of the run. Both
/// multipliers rise from 0 to 1 and fall back to 0.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub wind_build_up_end: f64,
    pub wind_decay_start: f64,
    pub wind_decay_end: f64,
    pub boat_speed_start: f64,
    pub boat_build_up_end: f64,
    pub boat_decay_start: f64,
    pub boat_decay_end: f64,
    pub total: f64,
}

fn progress(t: f64, start: f64, end: f64) -> f64 {
    ((t - start) / (end - start)).clamp(0.0, 1.0)
}

impl Timeline {
    pub fn new(config: &SimulationConfig) -> Self {
        let config = config.sanitized();
        let boat_speed_start = config.boat_speed_delay;
        let boat_build_up_end = boat_speed_start + config.boat_speed_build_up_duration;
        // The wind always reaches its peak before it starts to decay.
        let wind_decay_start = boat_build_up_end.max(config.wind_build_up_duration);
        let wind_decay_end = wind_decay_start + config.wind_decay_duration;
        let boat_decay_start = wind_decay_start + config.wind_decay_duration * BOAT_DECAY_LAG;
        let boat_decay_end = boat_decay_start + config.boat_speed_decay_duration;
        Self {
            wind_build_up_end: config.wind_build_up_duration,
            wind_decay_start,
            wind_decay_end,
            boat_speed_start,
            boat_build_up_end,
            boat_decay_start,
            boat_decay_end,
            total: wind_decay_end.max(boat_decay_end),
        }
    }

    pub fn total_ms(&self) -> f64 {
        self.total
    }

    pub fn wind_multiplier(&self, t: f64) -> f64 {
        if t < self.wind_build_up_end {
            ease_out_expo(progress(t, 0.0, self.wind_build_up_end))
        } else if t < self.wind_decay_start {
            1.0
        } else if t < self.wind_decay_end {
            1.0 - ease_in_expo(progress(t, self.wind_decay_start, self.wind_decay_end))
        } else {
            0.0
        }
    }

    pub fn boat_speed_multiplier(&self, t: f64) -> f64 {
        if t < self.boat_speed_start {
            0.0
        } else if t < self.boat_build_up_end {
            ease_out_cubic(progress(t, self.boat_speed_start, self.boat_build_up_end))
        } else if t < self.boat_decay_start {
            1.0
        } else if t < self.boat_decay_end {
            1.0 - ease_in_cubic(progress(t, self.boat_decay_start, self.boat_decay_end))
        } else {
            0.0
        }
    }

    pub fn phase_at(&self, t: f64) -> PhaseProgress {
        let (phase, start, end) = if t < self.wind_build_up_end {
            (Phase::WindBuildUp, 0.0, self.wind_build_up_end)
        } else if t < self.wind_decay_start {
            (Phase::Peak, self.wind_build_up_end, self.wind_decay_start)
        } else if t < self.wind_decay_end {
            (Phase::WindDecay, self.wind_decay_start, self.wind_decay_end)
        } else if t < self.total {
            (Phase::BoatRecovery, self.wind_decay_end, self.total)
        } else {
            (Phase::Complete, self.total, self.total)
        };
        PhaseProgress {
            phase,
            elapsed_ms: (t - start).max(0.0).min(end - start),
            duration_ms: end - start,
        }
    }
}
