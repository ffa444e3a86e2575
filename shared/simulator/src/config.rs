use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const SIMULATION_CONFIG_KEY: &str = "apparent-wind-simulator:simulation-config";

/// Phase timings for a gust or lull, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationConfig {
    pub wind_build_up_duration: f64,
    pub wind_decay_duration: f64,
    pub boat_speed_delay: f64,
    pub boat_speed_build_up_duration: f64,
    pub boat_speed_decay_duration: f64,
    pub auto_rotation_delay: f64,
    /// Zero rotates until the end of the whole simulation.
    pub auto_rotation_duration: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            wind_build_up_duration: 2000.0,
            wind_decay_duration: 6000.0,
            boat_speed_delay: 500.0,
            boat_speed_build_up_duration: 4000.0,
            boat_speed_decay_duration: 8000.0,
            auto_rotation_delay: 800.0,
            auto_rotation_duration: 0.0,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("Serialization error")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid value for {field}: {value}")]
    Invalid { field: &'static str, value: f64 },
}

fn valid(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

impl SimulationConfig {
    fn fields(&self) -> [(&'static str, f64); 7] {
        [
            ("windBuildUpDuration", self.wind_build_up_duration),
            ("windDecayDuration", self.wind_decay_duration),
            ("boatSpeedDelay", self.boat_speed_delay),
            ("boatSpeedBuildUpDuration", self.boat_speed_build_up_duration),
            ("boatSpeedDecayDuration", self.boat_speed_decay_duration),
            ("autoRotationDelay", self.auto_rotation_delay),
            ("autoRotationDuration", self.auto_rotation_duration),
        ]
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.fields().into_iter().find(|(_, v)| !valid(*v)) {
            Some((field, value)) => Err(ConfigError::Invalid { field, value }),
            None => Ok(()),
        }
    }

    /// Replaces every negative or non-finite field with its default.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let pick = |v: f64, d: f64| if valid(v) { v } else { d };
        Self {
            wind_build_up_duration: pick(self.wind_build_up_duration, defaults.wind_build_up_duration),
            wind_decay_duration: pick(self.wind_decay_duration, defaults.wind_decay_duration),
            boat_speed_delay: pick(self.boat_speed_delay, defaults.boat_speed_delay),
            boat_speed_build_up_duration: pick(
                self.boat_speed_build_up_duration,
                defaults.boat_speed_build_up_duration,
            ),
            boat_speed_decay_duration: pick(
                self.boat_speed_decay_duration,
                defaults.boat_speed_decay_duration,
            ),
            auto_rotation_delay: pick(self.auto_rotation_delay, defaults.auto_rotation_delay),
            auto_rotation_duration: pick(self.auto_rotation_duration, defaults.auto_rotation_duration),
        }
    }
}

/// Flat string key-value storage, in the manner of browser local storage.
pub trait ConfigStore {
    fn get(&self, key: &str) -> Result<Option<String>, ConfigError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError>;
}

#[derive(Default, Debug, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Stores each key as a `.json` file in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", name))
    }
}

impl ConfigStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path(key), value)?;
        Ok(())
    }
}

/// Loads the saved configuration. Anything missing or malformed falls back to
/// defaults.
pub fn load_config(store: &dyn ConfigStore) -> SimulationConfig {
    let saved = match store.get(SIMULATION_CONFIG_KEY) {
        Ok(Some(saved)) => saved,
        Ok(None) => {
            log::info!("No saved simulation config, using defaults");
            return SimulationConfig::default();
        }
        Err(e) => {
            log::warn!("Failed to load simulation config: {:?}", e);
            return SimulationConfig::default();
        }
    };
    match serde_json::from_str::<SimulationConfig>(&saved) {
        Ok(config) => {
            if let Err(e) = config.validate() {
                log::warn!("Saved simulation config has bad fields: {}", e);
            }
            config.sanitized()
        }
        Err(e) => {
            log::warn!("Malformed simulation config: {}", e);
            SimulationConfig::default()
        }
    }
}

pub fn save_config(store: &mut dyn ConfigStore, config: &SimulationConfig) -> Result<(), ConfigError> {
    config.validate()?;
    store.set(SIMULATION_CONFIG_KEY, &serde_json::to_string(config)?)
}
