use awind_simulator::heading::{solve_heading, CandidateBias};
use awind_simulator::wind::WindState;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn sweep(bias: CandidateBias) {
    for tenths in 50..300 {
        let state = WindState {
            true_wind_speed: tenths as f64 / 10.0,
            true_wind_angle: 270.0,
            boat_speed: 8.0,
            boat_direction: 0.0,
        };
        black_box(solve_heading(&state, 0.0, bias));
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("heading_nearest", |b| b.iter(|| sweep(CandidateBias::Nearest)));
    c.bench_function("heading_prefer_wide", |b| {
        b.iter(|| sweep(CandidateBias::PreferWide))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
