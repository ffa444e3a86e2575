use awind_simulator::config::{self, FileStore, SimulationConfig};
use awind_simulator::simulation::{SimulationEngine, SimulationKind, SimulationParams, TickOutcome};
use awind_simulator::ticker::{ManualClock, ManualTicker, FRAME_INTERVAL_MS};
use awind_simulator::timeline::Phase;
use awind_simulator::wind::{self, WindState};
use std::path::Path;

/// One recorded frame of a headless run.
#[derive(Clone, Debug)]
pub struct Sample {
    pub elapsed_ms: f64,
    pub phase: Option<Phase>,
    pub wind: WindState,
    pub apparent_speed: f64,
    pub apparent_angle: f64,
}

impl Sample {
    fn new(elapsed_ms: f64, phase: Option<Phase>, wind: WindState) -> Self {
        let apparent = wind::apparent_wind(&wind);
        Self {
            elapsed_ms,
            phase,
            wind,
            apparent_speed: apparent.speed,
            apparent_angle: apparent.angle,
        }
    }
}

/// Default `env_logger` filter for a tool binary. Includes the engine so its
/// start and finish lines show up.
pub fn default_log_filter(bin: &str) -> String {
    format!("{bin}=info,awind_simulator=info")
}

pub fn parse_kind(s: &str) -> anyhow::Result<SimulationKind> {
    match s {
        "gust" => Ok(SimulationKind::Gust),
        "lull" => Ok(SimulationKind::Lull),
        _ => anyhow::bail!("Unknown simulation kind {:?}, expected gust or lull", s),
    }
}

/// Loads the saved configuration from `dir`, or the defaults without one.
pub fn load_config(dir: Option<&Path>) -> SimulationConfig {
    match dir {
        Some(dir) => config::load_config(&FileStore::new(dir)),
        None => SimulationConfig::default(),
    }
}

/// Runs a whole gust or lull at 60 frames per second on a manual clock,
/// keeping a sample every `interval_ms` of simulated time plus the final
/// restored state.
pub fn simulate(
    kind: SimulationKind,
    params: SimulationParams,
    config: &SimulationConfig,
    initial: WindState,
    interval_ms: f64,
) -> Vec<Sample> {
    let clock = ManualClock::new();
    let mut engine = SimulationEngine::new(Box::new(clock.clone()), Box::new(ManualTicker::new()));
    let mut state = initial;
    let mut samples = vec![Sample::new(0.0, Some(Phase::WindBuildUp), state)];
    engine.start(kind, params, config, &state);
    let total_ms = engine.timeline().map_or(0.0, |timeline| timeline.total_ms());

    let mut next_sample = interval_ms;
    loop {
        clock.advance(FRAME_INTERVAL_MS);
        match engine.tick(&mut state) {
            TickOutcome::Running => {
                if engine.elapsed_ms() >= next_sample {
                    samples.push(Sample::new(engine.elapsed_ms(), engine.progress().phase, state));
                    next_sample += interval_ms;
                }
            }
            _ => break,
        }
    }
    samples.push(Sample::new(total_ms, Some(Phase::Complete), state));
    samples
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_simulate_ends_at_baseline() {
        let params = SimulationParams {
            magnitude: 10.0,
            auto_head_up: true,
        };
        let samples = simulate(
            SimulationKind::Gust,
            params,
            &SimulationConfig::default(),
            WindState::default(),
            1000.0,
        );
        assert!(samples.len() > 10);
        assert_eq!(samples.last().unwrap().wind, WindState::default());
        assert!(samples.iter().any(|s| s.wind.true_wind_speed > 15.0));
    }

    #[test]
    fn test_samples_use_simulated_time() {
        let config = SimulationConfig::default();
        let samples = simulate(
            SimulationKind::Lull,
            SimulationParams::default(),
            &config,
            WindState::default(),
            500.0,
        );
        // The final row is stamped with the timeline total.
        assert_eq!(samples.last().unwrap().elapsed_ms, 13700.0);
        assert!(samples
            .windows(2)
            .all(|pair| pair[0].elapsed_ms <= pair[1].elapsed_ms));
        let before_last = &samples[samples.len() - 2];
        assert!(before_last.elapsed_ms < 13700.0);
    }

    #[test]
    fn test_default_log_filter_includes_engine() {
        let filter = default_log_filter("gust");
        assert!(filter.split(',').any(|d| d == "gust=info"), "{}", filter);
        assert!(filter.split(',').any(|d| d == "awind_simulator=info"), "{}", filter);
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!(parse_kind("lull").unwrap(), SimulationKind::Lull);
        assert!(parse_kind("squall").is_err());
    }
}
