use crate::builder::Builder;
use crate::direction::Direction;
use crate::order::Order;
use crate::robot::SensorSet;
use log::{info, warn};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub maze: MazeConfig,
    #[serde(default)]
    pub robot: RobotConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct MazeConfig {
    /// "DFS", "Prim" or "Kruskal"; anything else means DFS
    #[serde(default = "default_builder")]
    pub builder: String,
    #[serde(default = "default_skill_level")]
    pub skill_level: u8,
    #[serde(default = "default_perfect")]
    pub perfect: bool,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct RobotConfig {
    #[serde(default = "default_sensor")]
    pub forward_sensor: bool,
    #[serde(default = "default_sensor")]
    pub backward_sensor: bool,
    #[serde(default = "default_sensor")]
    pub left_sensor: bool,
    #[serde(default = "default_sensor")]
    pub right_sensor: bool,
    #[serde(default = "default_sensor")]
    pub room_sensor: bool,
    #[serde(default)]
    pub initial_energy: Option<f32>,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_journey_log")]
    pub journey_log: bool,
}

// Default values
fn default_builder() -> String { "Kruskal".to_string() }
fn default_skill_level() -> u8 { 0 }
fn default_perfect() -> bool { true }
fn default_sensor() -> bool { true }
fn default_log_level() -> String { "info".to_string() }
fn default_journey_log() -> bool { true }

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            builder: default_builder(),
            skill_level: default_skill_level(),
            perfect: default_perfect(),
            seed: None,
        }
    }
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            forward_sensor: default_sensor(),
            backward_sensor: default_sensor(),
            left_sensor: default_sensor(),
            right_sensor: default_sensor(),
            room_sensor: default_sensor(),
            initial_energy: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            journey_log: default_journey_log(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            maze: MazeConfig::default(),
            robot: RobotConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl MazeConfig {
    /// The production order this section describes
    pub fn to_order(&self) -> Order {
        let order = Order::new(Builder::from_name(&self.builder), self.skill_level, self.perfect);
        match self.seed {
            Some(seed) => order.with_seed(seed),
            None => order,
        }
    }
}

impl RobotConfig {
    pub fn sensors(&self) -> SensorSet {
        [
            (self.forward_sensor, Direction::Forward),
            (self.backward_sensor, Direction::Backward),
            (self.left_sensor, Direction::Left),
            (self.right_sensor, Direction::Right),
        ]
        .into_iter()
        .filter(|(enabled, _)| *enabled)
        .fold(SensorSet::NONE, |set, (_, d)| set.with(d))
    }
}

impl Config {
    /// Load configuration from config.toml, or use defaults if it is missing or invalid
    pub fn load() -> Self {
        Self::load_from(Path::new("config.toml"))
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(config) => {
                    info!("Loaded configuration from {}", path.display());
                    config
                }
                Err(e) => {
                    warn!("Failed to parse {}: {}; using default configuration", path.display(), e);
                    Config::default()
                }
            },
            Err(_) => {
                info!("No {} found, using default configuration", path.display());
                Config::default()
            }
        }
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}
