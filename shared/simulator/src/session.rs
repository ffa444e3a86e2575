use crate::angle::Polar;
use crate::config::SimulationConfig;
use crate::drag::{DragController, DragFeedback, SurfaceRect};
use crate::layout::{VectorLayout, Viewport};
use crate::simulation::{PlaybackSpeed, SimulationEngine, SimulationParams, SimulationProgress, TickOutcome};
use crate::snapshot::Snapshot;
use crate::ticker::{Clock, Ticker};
use crate::wind::{self, NoSailZone, WindState};
use nalgebra::Point2;

pub const MIN_MAGNITUDE: f64 = 5.0;
pub const MAX_MAGNITUDE: f64 = 25.0;

/// Owns the wind state and lends it to the drag controller and the engine
/// for one call at a time.
pub struct Session {
    wind: WindState,
    viewport: Viewport,
    drag: DragController,
    engine: SimulationEngine,
    config: SimulationConfig,
    gust: SimulationParams,
    lull: SimulationParams,
}

impl Session {
    pub fn new(clock: Box<dyn Clock>, ticker: Box<dyn Ticker>, config: SimulationConfig) -> Self {
        Self {
            wind: WindState::default(),
            viewport: Viewport::default(),
            drag: DragController::default(),
            engine: SimulationEngine::new(clock, ticker),
            config: config.sanitized(),
            gust: SimulationParams::default(),
            lull: SimulationParams::default(),
        }
    }

    pub fn wind(&self) -> &WindState {
        &self.wind
    }

    /// Replaces the wind state. Ignored while a simulation owns it.
    pub fn set_wind(&mut self, wind: WindState) -> bool {
        if self.engine.is_simulating() {
            log::debug!("Ignoring wind update during simulation");
            return false;
        }
        self.wind = wind;
        true
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Takes effect from the next simulation start.
    pub fn set_config(&mut self, config: SimulationConfig) {
        if let Err(e) = config.validate() {
            log::warn!("Sanitizing simulation config: {}", e);
        }
        self.config = config.sanitized();
    }

    pub fn gust_params(&self) -> SimulationParams {
        self.gust
    }

    pub fn lull_params(&self) -> SimulationParams {
        self.lull
    }

    pub fn set_gust_params(&mut self, params: SimulationParams) {
        self.gust = clamp_params(params);
    }

    pub fn set_lull_params(&mut self, params: SimulationParams) {
        self.lull = clamp_params(params);
    }

    pub fn set_surface(&mut self, surface: Option<SurfaceRect>) {
        self.drag.set_surface(surface);
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport.resize(width, height);
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    pub fn reset_zoom(&mut self) {
        self.viewport.reset_zoom();
    }

    fn sync_lock(&mut self) {
        self.drag.set_handles_locked(self.engine.is_simulating());
    }

    pub fn on_pointer_down(&mut self, client_x: f64, client_y: f64) -> bool {
        self.sync_lock();
        self.drag
            .on_pointer_down(client_x, client_y, &self.wind, &self.viewport)
    }

    pub fn on_pointer_move(&mut self, client_x: f64, client_y: f64) -> DragFeedback {
        self.drag
            .on_pointer_move(client_x, client_y, &mut self.wind, &mut self.viewport)
    }

    pub fn on_pointer_up(&mut self) -> DragFeedback {
        self.drag.on_pointer_up()
    }

    pub fn on_pointer_leave(&mut self) -> DragFeedback {
        self.drag.on_pointer_leave()
    }

    pub fn on_touch_start(&mut self, touches: &[Point2<f64>]) -> bool {
        self.sync_lock();
        self.drag.on_touch_start(touches, &self.wind, &self.viewport)
    }

    pub fn on_touch_move(&mut self, touches: &[Point2<f64>]) -> DragFeedback {
        self.drag
            .on_touch_move(touches, &mut self.wind, &mut self.viewport)
    }

    pub fn on_touch_end(&mut self, remaining: usize) -> DragFeedback {
        self.drag.on_touch_end(remaining)
    }

    pub fn start_gust(&mut self) -> bool {
        self.drag.cancel();
        let started = self.engine.start_gust(self.gust, &self.config, &self.wind);
        self.sync_lock();
        started
    }

    pub fn start_lull(&mut self) -> bool {
        self.drag.cancel();
        let started = self.engine.start_lull(self.lull, &self.config, &self.wind);
        self.sync_lock();
        started
    }

    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.engine.tick(&mut self.wind);
        if outcome == TickOutcome::Finished {
            self.sync_lock();
        }
        outcome
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.engine.toggle_pause()
    }

    pub fn toggle_speed(&mut self) -> PlaybackSpeed {
        self.engine.toggle_speed()
    }

    /// Stops any simulation where it is, without restoring the baseline.
    pub fn cancel_simulation(&mut self) {
        self.engine.cancel();
        self.sync_lock();
    }

    /// Back to the default wind, centred boat and unit zoom.
    pub fn reset(&mut self) {
        self.engine.cancel();
        self.drag.cancel();
        self.sync_lock();
        self.wind = WindState::default();
        let (width, height) = (self.viewport.width, self.viewport.height);
        self.viewport = Viewport::new(width, height);
        log::info!("Session reset");
    }

    pub fn apparent_wind(&self) -> Polar {
        wind::apparent_wind(&self.wind)
    }

    pub fn layout(&self) -> VectorLayout {
        VectorLayout::compute(&self.viewport, &self.wind)
    }

    pub fn progress(&self) -> SimulationProgress {
        self.engine.progress()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            wind: self.wind,
            apparent: self.apparent_wind(),
            apparent_to_induced_angle: wind::apparent_to_induced_angle(&self.wind),
            no_sail_zone: NoSailZone::around(self.wind.boat_direction),
            layout: self.layout(),
            zoom: self.viewport.zoom(),
            drag: self.drag.feedback(),
            progress: self.progress(),
        }
    }
}

fn clamp_params(params: SimulationParams) -> SimulationParams {
    SimulationParams {
        magnitude: params.magnitude.clamp(MIN_MAGNITUDE, MAX_MAGNITUDE),
        ..params
    }
}
