use approx::assert_abs_diff_eq;
use awind_simulator::config::SimulationConfig;
use awind_simulator::drag::DragType;
use awind_simulator::session::Session;
use awind_simulator::simulation::{SimulationParams, TickOutcome};
use awind_simulator::ticker::{ManualClock, ManualTicker, Ticker, FRAME_INTERVAL_MS};
use awind_simulator::wind::WindState;
use nalgebra::vector;
use test_log::test;

fn session() -> (Session, ManualClock, ManualTicker) {
    let clock = ManualClock::new();
    let ticker = ManualTicker::new();
    let session = Session::new(
        Box::new(clock.clone()),
        Box::new(ticker.clone()),
        SimulationConfig::default(),
    );
    (session, clock, ticker)
}

#[test]
fn test_drag_updates_snapshot() {
    let (mut session, _clock, _ticker) = session();
    assert!(session.on_pointer_down(550.0, 110.0));
    let feedback = session.on_pointer_move(550.0, 410.0);
    assert_eq!(feedback.drag_type, Some(DragType::TrueWind));

    let snapshot = session.snapshot();
    assert_eq!(snapshot.wind, *session.wind());
    assert!(snapshot.drag.is_dragging);
    assert_eq!(snapshot.apparent, session.apparent_wind());
    assert_eq!(snapshot.layout, session.layout());

    session.on_pointer_up();
    assert!(!session.snapshot().drag.is_dragging);
}

#[test]
fn test_simulation_locks_handles() {
    let (mut session, clock, ticker) = session();
    assert!(session.start_gust());
    assert!(ticker.is_running());

    // Hovering a handle shows nothing and grabbing it pans the boat instead.
    assert!(!session.on_pointer_move(550.0, 110.0).is_hovering_handle);
    session.on_pointer_down(550.0, 110.0);
    assert_eq!(session.drag().state().drag_type(), Some(DragType::Boat));
    session.on_pointer_move(600.0, 110.0);
    assert_eq!(session.viewport().boat_offset(), vector![50.0, 0.0]);
    session.on_pointer_up();

    assert!(!session.set_wind(WindState::default().with_boat_direction(90.0)));

    let mut outcome = TickOutcome::Running;
    while outcome == TickOutcome::Running {
        clock.advance(FRAME_INTERVAL_MS);
        outcome = session.tick();
    }
    assert_eq!(outcome, TickOutcome::Finished);
    assert_eq!(*session.wind(), WindState::default());

    // Handles are usable again once the run is over.
    session.set_wind(WindState::default());
    session.on_pointer_down(550.0 + 50.0, 110.0);
    assert_eq!(session.drag().state().drag_type(), Some(DragType::TrueWind));
}

#[test]
fn test_starting_simulation_ends_drag() {
    let (mut session, _clock, _ticker) = session();
    session.on_pointer_down(550.0, 110.0);
    assert!(session.drag().state().is_dragging());
    session.start_lull();
    assert!(!session.drag().state().is_dragging());
    assert!(!session.start_gust());
}

#[test]
fn test_params_reach_engine() {
    let (mut session, clock, _ticker) = session();
    session.set_gust_params(SimulationParams {
        magnitude: 5.0,
        auto_head_up: false,
    });
    session.start_gust();
    clock.advance(3000.0);
    session.tick();
    assert_abs_diff_eq!(session.wind().true_wind_speed, 15.0, epsilon = 1e-9);
    let progress = session.progress();
    assert_eq!(progress.phase_label.as_deref(), Some("Gust peak"));
}

#[test]
fn test_config_changes_apply_to_next_run() {
    let (mut session, clock, _ticker) = session();
    session.set_config(SimulationConfig {
        wind_build_up_duration: -1.0,
        wind_decay_duration: 100.0,
        boat_speed_delay: 0.0,
        boat_speed_build_up_duration: 100.0,
        boat_speed_decay_duration: 100.0,
        ..Default::default()
    });
    assert_eq!(session.config().wind_build_up_duration, 2000.0);
    session.start_gust();
    // Wind decay starts once the wind has peaked at 2000 ms, and the boat
    // decay lags it by 20 ms.
    assert_eq!(session.progress().total_ms, 2120.0);
    clock.advance(2120.0);
    assert_eq!(session.tick(), TickOutcome::Finished);
}

#[test]
fn test_reset() {
    let (mut session, _clock, ticker) = session();
    session.resize(1000.0, 700.0);
    session.zoom_in();
    session.on_pointer_down(10.0, 10.0);
    session.on_pointer_move(60.0, 10.0);
    session.start_gust();

    session.reset();
    assert!(!ticker.is_running());
    assert!(!session.engine().is_simulating());
    assert_eq!(*session.wind(), WindState::default());
    assert_eq!(session.viewport().zoom(), 1.0);
    assert_eq!(session.viewport().boat_offset(), vector![0.0, 0.0]);
    assert_eq!(session.viewport().width, 1000.0);
}
