// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/qcvision

//! Configuration module

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::defects::DEFAULT_LOG_CAPACITY;
use crate::detection::SCAN_WRAP;

/// Rejected configuration values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} must be greater than zero")]
    ZeroPeriod { name: &'static str },

    #[error("{name} must be within [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },

    #[error("scan step must be between 1 and {max}, got {value}")]
    InvalidScanStep { value: u32, max: u32 },

    #[error("defect log capacity must be greater than zero")]
    ZeroLogCapacity,
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application name
    pub app_name: String,

    /// Application version
    pub version: String,

    /// Log level
    pub log_level: String,

    /// Fixed seed for reproducible runs; entropy-seeded when absent
    #[serde(default)]
    pub seed: Option<u64>,

    /// Simulation timing and probabilities
    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "QC Vision".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            log_level: "info".to_string(),
            seed: None,
            simulation: SimulationConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Load or create default configuration
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            let config = Self::default();

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            config.save(path)?;
            Ok(config)
        }
    }

    /// Get configuration directory
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("qcvision"))
            .unwrap_or_else(|| PathBuf::from("./config"))
    }

    /// Get default configuration path
    pub fn default_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.simulation.validate()
    }
}

/// Simulation timing and probabilities. Periods are in milliseconds of simulated time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Scan line tick period
    pub scan_period_ms: u64,

    /// Scan progress added per tick, in percent
    pub scan_step: u32,

    /// Camera analysis period
    pub analysis_period_ms: u64,

    /// Garment inspection period
    pub inspection_period_ms: u64,

    /// How long a camera detection stays on screen
    pub detection_display_ms: u64,

    /// How long the "analyzing" indicator stays up after each analysis
    pub analyzing_window_ms: u64,

    /// Chance an analysis cycle shows a camera detection
    pub detection_probability: f64,

    /// Chance an inspection cycle counts a defect
    pub inspection_defect_probability: f64,

    /// Camera detections also bump the defect counter and the log
    pub camera_defects_counted: bool,

    /// Defect log length
    pub log_capacity: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            scan_period_ms: 30,
            scan_step: 2,
            analysis_period_ms: 3000,
            inspection_period_ms: 3000,
            detection_display_ms: 4000,
            analyzing_window_ms: 800,
            detection_probability: 0.15,
            inspection_defect_probability: 0.08,
            camera_defects_counted: true,
            log_capacity: DEFAULT_LOG_CAPACITY,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let periods = [
            ("scan_period_ms", self.scan_period_ms),
            ("analysis_period_ms", self.analysis_period_ms),
            ("inspection_period_ms", self.inspection_period_ms),
            ("detection_display_ms", self.detection_display_ms),
            ("analyzing_window_ms", self.analyzing_window_ms),
        ];
        for (name, value) in periods {
            if value == 0 {
                return Err(ConfigError::ZeroPeriod { name });
            }
        }

        let probabilities = [
            ("detection_probability", self.detection_probability),
            ("inspection_defect_probability", self.inspection_defect_probability),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ProbabilityOutOfRange { name, value });
            }
        }

        if self.scan_step == 0 || self.scan_step >= SCAN_WRAP {
            return Err(ConfigError::InvalidScanStep {
                value: self.scan_step,
                max: SCAN_WRAP - 1,
            });
        }

        if self.log_capacity == 0 {
            return Err(ConfigError::ZeroLogCapacity);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.simulation.log_capacity, 50);
        assert_eq!(config.simulation.detection_display_ms, 4000);
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut sim = SimulationConfig::default();
        sim.analysis_period_ms = 0;
        assert_eq!(
            sim.validate(),
            Err(ConfigError::ZeroPeriod { name: "analysis_period_ms" })
        );

        let mut sim = SimulationConfig::default();
        sim.detection_probability = 1.5;
        assert!(matches!(
            sim.validate(),
            Err(ConfigError::ProbabilityOutOfRange { name: "detection_probability", .. })
        ));

        let mut sim = SimulationConfig::default();
        sim.scan_step = 100;
        assert!(matches!(sim.validate(), Err(ConfigError::InvalidScanStep { .. })));

        let mut sim = SimulationConfig::default();
        sim.log_capacity = 0;
        assert_eq!(sim.validate(), Err(ConfigError::ZeroLogCapacity));
    }

    #[test]
    fn test_toml_partial_simulation_section() {
        let config: Config = toml::from_str(
            r#"
            app_name = "Line A"
            version = "2.0.0"
            log_level = "debug"
            seed = 42

            [simulation]
            detection_probability = 0.5
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, Some(42));
        assert_eq!(config.simulation.detection_probability, 0.5);
        assert_eq!(config.simulation.inspection_period_ms, 3000);
    }

    #[test]
    fn test_load_or_create_round_trip() {
        let dir = std::env::temp_dir().join(format!("qcvision-config-{}", std::process::id()));
        let path = dir.join("config.toml");
        let _ = std::fs::remove_file(&path);

        let created = Config::load_or_create(&path).unwrap();
        let loaded = Config::load(&path).unwrap();
        assert_eq!(created.app_name, loaded.app_name);
        assert_eq!(loaded.simulation.scan_step, 2);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
