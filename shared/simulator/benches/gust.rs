use awind_simulator::config::SimulationConfig;
use awind_simulator::simulation::{SimulationEngine, SimulationKind, SimulationParams, TickOutcome};
use awind_simulator::ticker::{ManualClock, ManualTicker, FRAME_INTERVAL_MS};
use awind_simulator::wind::WindState;
use criterion::{criterion_group, criterion_main, Criterion};

fn run(kind: SimulationKind) {
    let clock = ManualClock::new();
    let mut engine = SimulationEngine::new(Box::new(clock.clone()), Box::new(ManualTicker::new()));
    let mut state = WindState::default();
    let params = SimulationParams {
        magnitude: 15.0,
        auto_head_up: true,
    };
    engine.start(kind, params, &SimulationConfig::default(), &state);
    loop {
        clock.advance(FRAME_INTERVAL_MS);
        if engine.tick(&mut state) != TickOutcome::Running {
            break;
        }
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("gust", |b| b.iter(|| run(SimulationKind::Gust)));
    c.bench_function("lull", |b| b.iter(|| run(SimulationKind::Lull)));
}

pub fn criterion_config() -> Criterion {
    Criterion::default()
        .sample_size(10)
        .measurement_time(core::time::Duration::from_secs(20))
}

criterion_group!(name = benches;
                 config = criterion_config();
                 targets = criterion_benchmark);
criterion_main!(benches);
