//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `roomlink.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::path::PathBuf;

use roomlink_adapter_render::RenderSettings;
use roomlink_app::occlusion::DEFAULT_ATTENUATION_PER_WALL;
use roomlink_app::resolver::ResolverConfig;
use roomlink_domain::error::ValidationError;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Connectivity thresholds and ranges.
    pub simulation: SimulationConfig,
    /// Link rendering settings.
    pub render: RenderConfig,
    /// Frame loop settings.
    pub runner: RunnerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Connectivity model settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Signal lost per wall crossed, within `[0, 1]`.
    pub attenuation_per_wall: f64,
    /// Minimum signal for a hub link.
    pub bridge_min_signal: f64,
    /// Minimum signal for a Wi-Fi link.
    pub wifi_min_signal: f64,
    /// Hub links must be strictly shorter than this, in metres.
    pub bridge_range_m: f64,
    /// Wi-Fi links must be strictly shorter than this, in metres.
    pub wifi_range_m: f64,
    /// Automation links must be strictly shorter than this, in metres.
    pub logic_radius_m: f64,
}

/// Link rendering settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub logic_lift: f64,
    pub marker_lift: f64,
    pub dash_step: f64,
}

/// Frame loop settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Room layout to simulate.
    pub layout: PathBuf,
    /// Frames per second.
    pub fps: u32,
    /// Frames to run before stopping; `0` runs until Ctrl-C.
    pub frames: u64,
    /// Seed for simulated readings; random when absent.
    pub seed: Option<u64>,
    /// Where to write the final render snapshot; stdout when absent.
    pub snapshot: Option<PathBuf>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `roomlink.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("roomlink.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("ROOMLINK_LAYOUT") {
            self.runner.layout = PathBuf::from(val);
        }
        if let Some(fps) = var("ROOMLINK_FPS").and_then(|v| v.parse().ok()) {
            self.runner.fps = fps;
        }
        if let Some(frames) = var("ROOMLINK_FRAMES").and_then(|v| v.parse().ok()) {
            self.runner.frames = frames;
        }
        if let Some(seed) = var("ROOMLINK_SEED").and_then(|v| v.parse().ok()) {
            self.runner.seed = Some(seed);
        }
        if let Some(val) = var("ROOMLINK_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.runner.fps == 0 {
            return Err(ConfigError::Validation("fps must be non-zero".to_string()));
        }
        let attenuation = self.simulation.attenuation_per_wall;
        if !(0.0..=1.0).contains(&attenuation) {
            return Err(ValidationError::OutOfRange {
                field: "attenuation_per_wall",
                min: 0.0,
                max: 1.0,
                value: attenuation,
            }
            .into());
        }
        self.resolver_config().validate()?;
        self.render_settings().validate()?;
        Ok(())
    }

    /// Thresholds and ranges for the connection resolver.
    #[must_use]
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            bridge_min_signal: self.simulation.bridge_min_signal,
            wifi_min_signal: self.simulation.wifi_min_signal,
            bridge_range_m: self.simulation.bridge_range_m,
            wifi_range_m: self.simulation.wifi_range_m,
            logic_radius_m: self.simulation.logic_radius_m,
        }
    }

    #[must_use]
    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            logic_lift: self.render.logic_lift,
            marker_lift: self.render.marker_lift,
            dash_step: self.render.dash_step,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let resolver = ResolverConfig::default();
        Self {
            attenuation_per_wall: DEFAULT_ATTENUATION_PER_WALL,
            bridge_min_signal: resolver.bridge_min_signal,
            wifi_min_signal: resolver.wifi_min_signal,
            bridge_range_m: resolver.bridge_range_m,
            wifi_range_m: resolver.wifi_range_m,
            logic_radius_m: resolver.logic_radius_m,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        let settings = RenderSettings::default();
        Self {
            logic_lift: settings.logic_lift,
            marker_lift: settings.marker_lift,
            dash_step: settings.dash_step,
        }
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            layout: PathBuf::from("layout.json"),
            fps: 30,
            frames: 0,
            seed: None,
            snapshot: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "roomlinkd=info,roomlink=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// A numeric setting is out of bounds.
    #[error("invalid configuration")]
    Invalid(#[from] ValidationError),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert!((config.simulation.attenuation_per_wall - 0.25).abs() < f64::EPSILON);
        assert_eq!(config.resolver_config(), ResolverConfig::default());
        assert_eq!(config.render_settings(), RenderSettings::default());
        assert_eq!(config.runner.fps, 30);
        assert_eq!(config.runner.frames, 0);
        assert_eq!(config.logging.filter, "roomlinkd=info,roomlink=info");
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.runner.layout, PathBuf::from("layout.json"));
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [simulation]
            attenuation_per_wall = 0.3
            bridge_min_signal = 0.25
            wifi_min_signal = 0.05
            bridge_range_m = 12.0
            wifi_range_m = 40.0
            logic_radius_m = 4.5

            [render]
            logic_lift = 0.5
            marker_lift = 0.4
            dash_step = 0.01

            [runner]
            layout = 'flat.json'
            fps = 60
            frames = 120
            seed = 7
            snapshot = 'out.json'

            [logging]
            filter = 'debug'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert!((config.simulation.attenuation_per_wall - 0.3).abs() < f64::EPSILON);
        assert!((config.resolver_config().logic_radius_m - 4.5).abs() < f64::EPSILON);
        assert!((config.render_settings().dash_step - 0.01).abs() < f64::EPSILON);
        assert_eq!(config.runner.layout, PathBuf::from("flat.json"));
        assert_eq!(config.runner.fps, 60);
        assert_eq!(config.runner.frames, 120);
        assert_eq!(config.runner.seed, Some(7));
        assert_eq!(config.runner.snapshot, Some(PathBuf::from("out.json")));
        assert_eq!(config.logging.filter, "debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_parse_partial_toml_with_defaults() {
        let toml = "
            [simulation]
            wifi_range_m = 50.0
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert!((config.simulation.wifi_range_m - 50.0).abs() < f64::EPSILON);
        assert!((config.simulation.bridge_range_m - 15.0).abs() < f64::EPSILON);
        assert_eq!(config.runner.fps, 30);
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.runner.fps, 30);
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }

    #[test]
    fn should_apply_env_overrides() {
        let mut config = Config::default();
        config.apply_overrides(env(&[
            ("ROOMLINK_LAYOUT", "home.json"),
            ("ROOMLINK_FPS", "10"),
            ("ROOMLINK_FRAMES", "5"),
            ("ROOMLINK_SEED", "99"),
            ("ROOMLINK_LOG", "trace"),
        ]));
        assert_eq!(config.runner.layout, PathBuf::from("home.json"));
        assert_eq!(config.runner.fps, 10);
        assert_eq!(config.runner.frames, 5);
        assert_eq!(config.runner.seed, Some(99));
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_prefer_rust_log_over_roomlink_log() {
        let mut config = Config::default();
        config.apply_overrides(env(&[("ROOMLINK_LOG", "trace"), ("RUST_LOG", "warn")]));
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn should_ignore_unparseable_overrides() {
        let mut config = Config::default();
        config.apply_overrides(env(&[("ROOMLINK_FPS", "fast")]));
        assert_eq!(config.runner.fps, 30);
    }

    #[test]
    fn should_reject_zero_fps() {
        let mut config = Config::default();
        config.runner.fps = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_threshold_above_one() {
        let mut config = Config::default();
        config.simulation.bridge_min_signal = 1.5;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn should_reject_attenuation_above_one() {
        let mut config = Config::default();
        config.simulation.attenuation_per_wall = 2.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn should_reject_non_positive_range() {
        let mut config = Config::default();
        config.simulation.wifi_range_m = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_accept_defaults() {
        assert!(Config::default().validate().is_ok());
    }
}
