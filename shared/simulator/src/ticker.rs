use instant::Instant;
use std::cell::Cell;
use std::rc::Rc;

pub const FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

pub trait Clock {
    /// Monotonic milliseconds.
    fn now_ms(&self) -> f64;
}

pub trait Ticker {
    fn start(&mut self);

    fn stop(&mut self);

    fn is_running(&self) -> bool;
}

pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Clone, Default, Debug)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// A ticker whose state the host polls. Clones share the same state.
#[derive(Clone, Default, Debug)]
pub struct ManualTicker {
    running: Rc<Cell<bool>>,
    starts: Rc<Cell<u32>>,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times the ticker has been started.
    pub fn starts(&self) -> u32 {
        self.starts.get()
    }
}

impl Ticker for ManualTicker {
    fn start(&mut self) {
        self.running.set(true);
        self.starts.set(self.starts.get() + 1);
    }

    fn stop(&mut self) {
        self.running.set(false);
    }

    fn is_running(&self) -> bool {
        self.running.get()
    }
}
