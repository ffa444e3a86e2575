use crate::angle::{angle_delta, normalize_angle};
use crate::config::SimulationConfig;
use crate::heading::{solve_heading, CandidateBias};
use crate::ticker::{Clock, Ticker};
use crate::timeline::{Phase, Timeline};
use crate::wind::WindState;
use serde::{Deserialize, Serialize};

/// Knots of boat speed gained per knot of extra wind.
pub const BOAT_SPEED_RESPONSE: f64 = 0.4;
/// Neither wind nor boat speed drops below this during a lull.
pub const LULL_SPEED_FLOOR: f64 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SimulationKind {
    Gust,
    Lull,
}

impl SimulationKind {
    fn bias(self) -> CandidateBias {
        match self {
            SimulationKind::Gust => CandidateBias::Nearest,
            SimulationKind::Lull => CandidateBias::PreferWide,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Knots added to (gust) or removed from (lull) the true wind at the peak.
    pub magnitude: f64,
    pub auto_head_up: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            magnitude: 10.0,
            auto_head_up: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackSpeed {
    Normal,
    Half,
}

impl PlaybackSpeed {
    pub fn multiplier(self) -> f64 {
        match self {
            PlaybackSpeed::Normal => 1.0,
            PlaybackSpeed::Half => 0.5,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            PlaybackSpeed::Normal => PlaybackSpeed::Half,
            PlaybackSpeed::Half => PlaybackSpeed::Normal,
        }
    }
}

/// Result of a single [SimulationEngine::tick].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    Idle,
    Paused,
    Running,
    Finished,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationProgress {
    pub is_simulating: bool,
    pub is_paused: bool,
    pub speed_multiplier: f64,
    pub kind: Option<SimulationKind>,
    pub phase: Option<Phase>,
    pub phase_label: Option<String>,
    pub phase_elapsed_ms: f64,
    pub phase_duration_ms: f64,
    pub elapsed_ms: f64,
    pub total_ms: f64,
}

#[derive(Clone, Debug)]
struct Run {
    kind: SimulationKind,
    params: SimulationParams,
    config: SimulationConfig,
    baseline: WindState,
    timeline: Timeline,
    elapsed: f64,
    paused: f64,
    last_frame: f64,
    solver_heading: f64,
}

impl Run {
    fn speeds(&self, t: f64) -> (f64, f64) {
        let wind = self.timeline.wind_multiplier(t) * self.params.magnitude;
        let boat = self.timeline.boat_speed_multiplier(t) * self.params.magnitude * BOAT_SPEED_RESPONSE;
        let base = &self.baseline;
        match self.kind {
            SimulationKind::Gust => (base.true_wind_speed + wind, base.boat_speed + boat),
            SimulationKind::Lull => (
                (base.true_wind_speed - wind).max(LULL_SPEED_FLOOR),
                (base.boat_speed - boat).max(LULL_SPEED_FLOOR),
            ),
        }
    }

    /// Heading for this tick, easing from the baseline toward the solver's
    /// close-hauled target.
    fn heading(&mut self, current: &WindState) -> f64 {
        let t = self.elapsed;
        let base = self.baseline.boat_direction;
        if !self.params.auto_head_up || t < self.config.auto_rotation_delay {
            return base;
        }

        let target = solve_heading(current, self.solver_heading, self.kind.bias());
        self.solver_heading = target.heading;

        let window = if self.config.auto_rotation_duration > 0.0 {
            self.config.auto_rotation_duration
        } else {
            self.timeline.total_ms() - self.config.auto_rotation_delay
        };
        let progress = if window > 0.0 {
            ((t - self.config.auto_rotation_delay) / window).clamp(0.0, 1.0)
        } else {
            1.0
        };
        normalize_angle(base + angle_delta(base, target.heading) * progress)
    }

    fn state_at_elapsed(&mut self) -> WindState {
        let (true_wind_speed, boat_speed) = self.speeds(self.elapsed);
        let current = WindState {
            true_wind_speed,
            true_wind_angle: self.baseline.true_wind_angle,
            boat_speed,
            boat_direction: self.baseline.boat_direction,
        };
        let boat_direction = self.heading(&current);
        WindState {
            boat_direction,
            ..current
        }
    }
}

/// Perturbs wind and boat speed from a captured baseline on every tick, and
/// writes the exact baseline back when the run ends.
pub struct SimulationEngine {
    clock: Box<dyn Clock>,
    ticker: Box<dyn Ticker>,
    run: Option<Run>,
    paused: bool,
    speed: PlaybackSpeed,
}

impl SimulationEngine {
    pub fn new(clock: Box<dyn Clock>, ticker: Box<dyn Ticker>) -> Self {
        Self {
            clock,
            ticker,
            run: None,
            paused: false,
            speed: PlaybackSpeed::Normal,
        }
    }

    pub fn is_simulating(&self) -> bool {
        self.run.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn speed(&self) -> PlaybackSpeed {
        self.speed
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.speed.multiplier()
    }

    pub fn kind(&self) -> Option<SimulationKind> {
        self.run.as_ref().map(|run| run.kind)
    }

    /// State captured when the current run started.
    pub fn baseline(&self) -> Option<&WindState> {
        self.run.as_ref().map(|run| &run.baseline)
    }

    pub fn timeline(&self) -> Option<&Timeline> {
        self.run.as_ref().map(|run| &run.timeline)
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.run.as_ref().map_or(0.0, |run| run.elapsed)
    }

    /// Wall-clock milliseconds spent paused during the current run.
    pub fn paused_ms(&self) -> f64 {
        self.run.as_ref().map_or(0.0, |run| run.paused)
    }

    pub fn start_gust(
        &mut self,
        params: SimulationParams,
        config: &SimulationConfig,
        state: &WindState,
    ) -> bool {
        self.start(SimulationKind::Gust, params, config, state)
    }

    pub fn start_lull(
        &mut self,
        params: SimulationParams,
        config: &SimulationConfig,
        state: &WindState,
    ) -> bool {
        self.start(SimulationKind::Lull, params, config, state)
    }

    /// Begins a run. Returns false without touching the current run if one is
    /// already in progress.
    pub fn start(
        &mut self,
        kind: SimulationKind,
        params: SimulationParams,
        config: &SimulationConfig,
        state: &WindState,
    ) -> bool {
        if self.run.is_some() {
            log::debug!("Ignoring {:?} start, simulation already running", kind);
            return false;
        }

        let config = config.sanitized();
        let timeline = Timeline::new(&config);
        log::info!(
            "Starting {:?} of {} kn over {} ms from {:?}",
            kind,
            params.magnitude,
            timeline.total_ms(),
            state
        );
        self.run = Some(Run {
            kind,
            params,
            config,
            baseline: *state,
            timeline,
            elapsed: 0.0,
            paused: 0.0,
            last_frame: self.clock.now_ms(),
            solver_heading: state.boat_direction,
        });
        self.paused = false;
        self.ticker.start();
        true
    }

    /// Advances the run by the wall-clock time since the previous tick and
    /// writes all four scalars at once.
    pub fn tick(&mut self, state: &mut WindState) -> TickOutcome {
        let now = self.clock.now_ms();
        let speed = self.speed.multiplier();
        let run = match self.run.as_mut() {
            Some(run) => run,
            None => return TickOutcome::Idle,
        };

        let dt = (now - run.last_frame).max(0.0);
        run.last_frame = now;
        if self.paused {
            run.paused += dt;
            return TickOutcome::Paused;
        }

        run.elapsed += dt * speed;
        if run.elapsed >= run.timeline.total_ms() {
            *state = run.baseline;
            log::info!("{:?} finished, restored {:?}", run.kind, state);
            self.finish();
            return TickOutcome::Finished;
        }

        *state = run.state_at_elapsed();
        TickOutcome::Running
    }

    pub fn toggle_pause(&mut self) -> bool {
        if self.run.is_none() {
            return false;
        }
        self.paused = !self.paused;
        log::debug!("Simulation paused: {}", self.paused);
        self.paused
    }

    pub fn toggle_speed(&mut self) -> PlaybackSpeed {
        self.speed = self.speed.toggled();
        log::debug!("Playback speed x{}", self.speed.multiplier());
        self.speed
    }

    /// Abandons the current run. State keeps whatever the last tick wrote.
    pub fn cancel(&mut self) {
        if let Some(run) = &self.run {
            log::info!("Cancelling {:?} at {} ms", run.kind, run.elapsed);
        }
        self.finish();
    }

    fn finish(&mut self) {
        self.run = None;
        self.paused = false;
        if self.ticker.is_running() {
            self.ticker.stop();
        }
    }

    pub fn progress(&self) -> SimulationProgress {
        match &self.run {
            Some(run) => {
                let phase = run.timeline.phase_at(run.elapsed);
                SimulationProgress {
                    is_simulating: true,
                    is_paused: self.paused,
                    speed_multiplier: self.speed.multiplier(),
                    kind: Some(run.kind),
                    phase: Some(phase.phase),
                    phase_label: Some(phase.phase.label(run.kind).to_string()),
                    phase_elapsed_ms: phase.elapsed_ms,
                    phase_duration_ms: phase.duration_ms,
                    elapsed_ms: run.elapsed,
                    total_ms: run.timeline.total_ms(),
                }
            }
            None => SimulationProgress {
                is_simulating: false,
                is_paused: false,
                speed_multiplier: self.speed.multiplier(),
                kind: None,
                phase: None,
                phase_label: None,
                phase_elapsed_ms: 0.0,
                phase_duration_ms: 0.0,
                elapsed_ms: 0.0,
                total_ms: 0.0,
            },
        }
    }
}

impl Drop for SimulationEngine {
    fn drop(&mut self) {
        self.cancel();
    }
}
