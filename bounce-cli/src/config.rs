//! Startup configuration: optional TOML file, then command-line overrides

use bounce_core::config::{consts, require_positive, ConfigError};
use bounce_core::{SceneLayout, SimulationConfig};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Physics parameters as written in the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSection {
    pub initial_height: f64,
    pub gravitational_acceleration: f64,
    pub total_duration_secs: f64,
    pub max_observed_impact_velocity: f64,
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            initial_height: consts::INITIAL_HEIGHT,
            gravitational_acceleration: consts::GRAVITATIONAL_ACCELERATION,
            total_duration_secs: consts::TOTAL_DURATION_SECS as f64,
            max_observed_impact_velocity: consts::MAX_OBSERVED_IMPACT_VELOCITY,
        }
    }
}

impl SimulationSection {
    pub fn to_config(&self) -> Result<SimulationConfig, ConfigError> {
        SimulationConfig::from_secs(
            self.initial_height,
            self.gravitational_acceleration,
            self.total_duration_secs,
            self.max_observed_impact_velocity,
        )
    }
}

/// Scene dimensions as written in the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSection {
    pub ball_radius: f64,
    pub pad_size: [f64; 3],
    pub marker_size: f64,
}

impl Default for SceneSection {
    fn default() -> Self {
        let layout = SceneLayout::default();
        Self {
            ball_radius: layout.ball_radius,
            pad_size: layout.pad_size,
            marker_size: layout.marker_size,
        }
    }
}

impl SceneSection {
    pub fn to_layout(&self) -> Result<SceneLayout, ConfigError> {
        require_positive("ball_radius", self.ball_radius)?;
        require_positive("marker_size", self.marker_size)?;
        for extent in self.pad_size {
            require_positive("pad_size", extent)?;
        }
        Ok(SceneLayout {
            ball_radius: self.ball_radius,
            pad_size: self.pad_size,
            marker_size: self.marker_size,
            ..SceneLayout::default()
        })
    }
}

/// Top-level layout of a `bounce.toml` file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub simulation: SimulationSection,
    pub scene: SceneSection,
}

impl ConfigFile {
    pub fn parse(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        let file = Self::parse(&source).map_err(|e| format!("{}: {}", path.display(), e))?;
        log::info!("loaded configuration from {}", path.display());
        Ok(file)
    }
}

/// Configuration flags shared by the simulation commands
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// TOML file with [simulation] and [scene] sections
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Starting height of the ball
    #[arg(long)]
    pub height: Option<f64>,
    /// Magnitude of gravitational acceleration
    #[arg(long)]
    pub gravity: Option<f64>,
    /// Run length in seconds of wall-clock time
    #[arg(long, value_name = "SECS")]
    pub duration: Option<f64>,
    /// Calibrated impact velocity used to size the bounce window
    #[arg(long)]
    pub impact_velocity: Option<f64>,
}

impl ConfigArgs {
    /// Load the config file (if any), apply flag overrides and validate
    pub fn resolve(&self) -> Result<(SimulationConfig, SceneLayout), Box<dyn std::error::Error>> {
        let file = match &self.config {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };
        let file = self.apply(file);
        let config = file.simulation.to_config()?;
        let layout = file.scene.to_layout()?;
        Ok((config, layout))
    }

    fn apply(&self, mut file: ConfigFile) -> ConfigFile {
        let sim = &mut file.simulation;
        if let Some(height) = self.height {
            sim.initial_height = height;
        }
        if let Some(gravity) = self.gravity {
            sim.gravitational_acceleration = gravity;
        }
        if let Some(duration) = self.duration {
            sim.total_duration_secs = duration;
        }
        if let Some(velocity) = self.impact_velocity {
            sim.max_observed_impact_velocity = velocity;
        }
        file
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_empty_file_gives_defaults() {
        let file = ConfigFile::parse("").unwrap();
        assert_eq!(file, ConfigFile::default());
        assert_eq!(
            file.simulation.to_config().unwrap(),
            SimulationConfig::default()
        );
        assert_eq!(file.scene.to_layout().unwrap(), SceneLayout::default());
    }

    #[test]
    fn test_partial_sections() {
        let file = ConfigFile::parse(
            r#"
[simulation]
initial_height = 50.0
total_duration_secs = 7.5

[scene]
ball_radius = 1.0
"#,
        )
        .unwrap();

        let config = file.simulation.to_config().unwrap();
        assert_eq!(config.initial_height(), 50.0);
        assert_eq!(config.gravitational_acceleration(), 9.8);
        assert_eq!(config.total_duration(), Duration::from_millis(7500));

        let layout = file.scene.to_layout().unwrap();
        assert_eq!(layout.ball_radius, 1.0);
        assert_eq!(layout.pad_size, [50.0, 0.5, 50.0]);
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        assert!(ConfigFile::parse("[simulation]\ninitial_height = \"high\"\n").is_err());
    }

    #[test]
    fn test_flags_override_file() {
        let args = ConfigArgs {
            height: Some(25.0),
            impact_velocity: Some(22.2),
            ..ConfigArgs::default()
        };
        let file = args.apply(ConfigFile::default());
        assert_eq!(file.simulation.initial_height, 25.0);
        assert_eq!(file.simulation.max_observed_impact_velocity, 22.2);
        assert_eq!(file.simulation.gravitational_acceleration, 9.8);
    }

    #[test]
    fn test_invalid_override_fails_validation() {
        let args = ConfigArgs {
            gravity: Some(-1.0),
            ..ConfigArgs::default()
        };
        assert!(args.resolve().is_err());
    }

    #[test]
    fn test_invalid_scene_rejected() {
        let scene = SceneSection {
            pad_size: [50.0, 0.0, 50.0],
            ..SceneSection::default()
        };
        assert!(scene.to_layout().is_err());
    }
}
