use awind_simulator::config::{
    load_config, save_config, ConfigError, ConfigStore, FileStore, MemoryStore, SimulationConfig,
    SIMULATION_CONFIG_KEY,
};
use std::path::PathBuf;
use test_log::test;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("awind-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn test_missing_config_uses_defaults() {
    let store = MemoryStore::new();
    assert_eq!(load_config(&store), SimulationConfig::default());
}

#[test]
fn test_malformed_config_uses_defaults() {
    let mut store = MemoryStore::new();
    store.set(SIMULATION_CONFIG_KEY, "{not json").unwrap();
    assert_eq!(load_config(&store), SimulationConfig::default());

    store
        .set(SIMULATION_CONFIG_KEY, r#"{"windBuildUpDuration": "fast"}"#)
        .unwrap();
    assert_eq!(load_config(&store), SimulationConfig::default());
}

#[test]
fn test_negative_fields_are_replaced() {
    let mut store = MemoryStore::new();
    store
        .set(
            SIMULATION_CONFIG_KEY,
            r#"{"windBuildUpDuration": -5, "windDecayDuration": 100}"#,
        )
        .unwrap();
    let config = load_config(&store);
    assert_eq!(config.wind_build_up_duration, 2000.0);
    assert_eq!(config.wind_decay_duration, 100.0);
}

#[test]
fn test_memory_round_trip() {
    let mut store = MemoryStore::new();
    let config = SimulationConfig {
        auto_rotation_duration: 2500.0,
        boat_speed_delay: 0.0,
        ..Default::default()
    };
    save_config(&mut store, &config).unwrap();
    assert_eq!(load_config(&store), config);
}

#[test]
fn test_save_rejects_invalid() {
    let mut store = MemoryStore::new();
    let config = SimulationConfig {
        wind_decay_duration: f64::NAN,
        ..Default::default()
    };
    match save_config(&mut store, &config) {
        Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "windDecayDuration"),
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(store.get(SIMULATION_CONFIG_KEY).unwrap(), None);
}

#[test]
fn test_file_store_round_trip() {
    let dir = scratch_dir("file-store");
    let mut store = FileStore::new(&dir);
    assert_eq!(load_config(&store), SimulationConfig::default());

    let config = SimulationConfig {
        wind_build_up_duration: 1500.0,
        ..Default::default()
    };
    save_config(&mut store, &config).unwrap();
    assert_eq!(load_config(&FileStore::new(&dir)), config);

    let saved = store.get(SIMULATION_CONFIG_KEY).unwrap().unwrap();
    assert!(saved.contains("\"windBuildUpDuration\":1500"), "{}", saved);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_file_store_unreadable_uses_defaults() {
    let dir = scratch_dir("unreadable");
    let mut store = FileStore::new(&dir);
    store.set(SIMULATION_CONFIG_KEY, "{}").unwrap();
    assert_eq!(load_config(&store), SimulationConfig::default());

    // A file path standing in for the directory makes reads fail.
    let file = dir.join("not-a-dir");
    std::fs::write(&file, "x").unwrap();
    let broken = FileStore::new(&file);
    assert!(broken.get(SIMULATION_CONFIG_KEY).is_err());
    assert_eq!(load_config(&broken), SimulationConfig::default());

    std::fs::remove_dir_all(&dir).unwrap();
}
