use awind_simulator::angle::{format_angle, format_speed};
use awind_simulator::simulation::SimulationParams;
use awind_simulator::wind::WindState;
use clap::Parser as _;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use std::path::PathBuf;

#[derive(clap::Parser, Debug)]
struct Arguments {
    /// "gust" or "lull".
    #[clap(value_parser, default_value = "gust")]
    kind: String,

    #[clap(short, long, value_parser, default_value = "10")]
    magnitude: f64,

    #[clap(short, long)]
    auto_head_up: bool,

    #[clap(long, value_parser, default_value = "10")]
    true_wind_speed: f64,

    #[clap(long, value_parser, default_value = "270")]
    true_wind_angle: f64,

    #[clap(long, value_parser, default_value = "10")]
    boat_speed: f64,

    #[clap(long, value_parser, default_value = "0")]
    boat_direction: f64,

    /// Milliseconds of simulated time between rows.
    #[clap(short, long, value_parser, default_value = "500")]
    interval: f64,

    /// Directory holding a saved simulation config.
    #[clap(long)]
    config_dir: Option<PathBuf>,

    /// Print samples as JSON instead of a table.
    #[clap(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(awind_tools::default_log_filter("gust")),
    )
    .init();
    let args = Arguments::parse();

    let kind = awind_tools::parse_kind(&args.kind)?;
    let config = awind_tools::load_config(args.config_dir.as_deref());
    let params = SimulationParams {
        magnitude: args.magnitude,
        auto_head_up: args.auto_head_up,
    };
    let initial = WindState {
        true_wind_speed: args.true_wind_speed,
        true_wind_angle: args.true_wind_angle,
        boat_speed: args.boat_speed,
        boat_direction: args.boat_direction,
    };
    if args.interval <= 0.0 {
        anyhow::bail!("Interval must be positive, got {}", args.interval);
    }

    log::info!("Simulating {:?} with {:?}", kind, config);
    let samples = awind_tools::simulate(kind, params, &config, initial, args.interval);

    if args.json {
        let rows: Vec<_> = samples
            .iter()
            .map(|s| {
                serde_json::json!({
                    "elapsedMs": s.elapsed_ms,
                    "phase": s.phase,
                    "wind": s.wind,
                    "apparentSpeed": s.apparent_speed,
                    "apparentAngle": s.apparent_angle,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["ms", "Phase", "TWS", "TWA", "BS", "Heading", "AWS", "AWA"]);
    for s in samples.iter() {
        table.add_row(vec![
            format!("{:.0}", s.elapsed_ms),
            s.phase.map(|p| format!("{p:?}")).unwrap_or_default(),
            format_speed(s.wind.true_wind_speed),
            format_angle(s.wind.true_wind_angle),
            format_speed(s.wind.boat_speed),
            format_angle(s.wind.boat_direction),
            format_speed(s.apparent_speed),
            format_angle(s.apparent_angle),
        ]);
    }
    println!("{:?} of {} kn:\n{}", kind, args.magnitude, table);
    Ok(())
}
