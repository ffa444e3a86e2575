use awind_simulator::angle::{compass_abbreviation, format_angle, format_speed};
use awind_simulator::heading::{solve_heading, CandidateBias};
use awind_simulator::wind::{self, WindState};
use clap::Parser as _;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;

#[derive(clap::Parser, Debug)]
struct Arguments {
    #[clap(long, value_parser, default_value = "10")]
    true_wind_speed: f64,

    #[clap(long, value_parser, default_value = "270")]
    true_wind_angle: f64,

    #[clap(long, value_parser, default_value = "10")]
    boat_speed: f64,

    /// Degrees between rows of the heading sweep.
    #[clap(short, long, value_parser, default_value = "30")]
    step: f64,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(awind_tools::default_log_filter("apparent")),
    )
    .init();
    let args = Arguments::parse();
    if args.step <= 0.0 || args.step > 360.0 {
        anyhow::bail!("Step must be in (0, 360], got {}", args.step);
    }

    let state = WindState {
        true_wind_speed: args.true_wind_speed,
        true_wind_angle: args.true_wind_angle,
        boat_speed: args.boat_speed,
        boat_direction: 0.0,
    };

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Heading", "AWS", "AWA", "", "Off induced"]);
    let mut heading = 0.0;
    while heading < 360.0 {
        let s = state.with_boat_direction(heading);
        let apparent = s.apparent_wind();
        table.add_row(vec![
            format_angle(heading),
            format_speed(apparent.speed),
            format_angle(apparent.angle),
            compass_abbreviation(apparent.angle).to_string(),
            format!("{:.1}", wind::apparent_to_induced_angle(&s)),
        ]);
        heading += args.step;
    }
    println!(
        "Apparent wind for {} kn true wind at {} and {} kn boat speed:\n{}\n",
        format_speed(args.true_wind_speed),
        format_angle(args.true_wind_angle),
        format_speed(args.boat_speed),
        table
    );

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Bias", "Heading", "Angle", "Iterations", "Converged"]);
    for bias in [CandidateBias::Nearest, CandidateBias::PreferWide] {
        let solution = solve_heading(&state, 0.0, bias);
        log::debug!("{:?}: {:?}", bias, solution);
        table.add_row(vec![
            format!("{bias:?}"),
            format!("{:.1}", solution.heading),
            format!("{:.2}", solution.angle),
            solution.iterations.to_string(),
            solution.converged.to_string(),
        ]);
    }
    println!("Close-hauled headings:\n{}", table);
    Ok(())
}
