use std::fs;
use std::path::PathBuf;
use config::{Config, ConfigError};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use quantum_drive::{CommonTank, TankOverride};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ReferenceDistance {
    pub label: String,
    pub metres: u64
}

impl ReferenceDistance {
    fn new(label: &str, metres: u64) -> ReferenceDistance {
        ReferenceDistance { label: label.to_string(), metres }
    }
}

/// Everything a chart run needs. Loaded once and handed to planning and rendering.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChartSettings {
    item_dump_path: String,
    ship_sizes_path: String,
    output_dir: String,
    pub game_version: String,
    pub x_min: u64,
    pub x_max: u64,
    pub step: u64,
    pub figure_width: u32,
    pub figure_height: u32,
    pub drive_sizes: Vec<u32>,
    pub tank_range_sizes: Vec<u32>,
    pub best_in_show: Vec<String>,
    pub colours: Vec<String>,
    pub colour_seed: Option<u64>,
    pub common_tank: Option<CommonTank>,
    pub tank_overrides: Vec<TankOverride>,
    pub reference_distances: Vec<ReferenceDistance>
}

impl ChartSettings {
    const CONFIG_FILENAME: &'static str = "qdrive-charts-conf";
    const ENV_PREFIX: &'static str = "QDRIVE";

    pub fn default() -> Self {
        ChartSettings {
            item_dump_path: "dump.json".to_string(),
            ship_sizes_path: "qdrive_sizes.json".to_string(),
            output_dir: "results".to_string(),
            game_version: "3.21.0".to_string(),
            x_min: 0,
            x_max: 60_000_000_000,
            step: 10_000_000,
            figure_width: 4400,
            figure_height: 2200,
            drive_sizes: vec![1, 2, 3],
            tank_range_sizes: vec![1],
            best_in_show: ["xl1", "voyage", "vk00", "ts2", "atlas", "spectre"]
                .iter().map(|s| s.to_string()).collect(),
            colours: [
                "#e6194b", "#3cb44b", "#ffe119", "#4363d8", "#f58231", "#911eb4",
                "#46f0f0", "#f032e6", "#bcf60c", "#fabebe", "#008080", "#e6beff",
                "#9a6324", "#c0c0c0", "#800000", "#aaffc3", "#808000", "#ffd8b1",
                "#000075", "#808080", "#404040", "#000000"
            ].iter().map(|s| s.to_string()).collect(),
            colour_seed: None,
            common_tank: Some(CommonTank { capacity: 583, label: "Most S1 ships".to_string() }),
            tank_overrides: vec![
                TankOverride { size: 1, capacity: 700, name: "125a".to_string() },
                TankOverride { size: 1, capacity: 1960, name: "Cutter".to_string() }
            ],
            reference_distances: vec![
                ReferenceDistance::new("ARC <> CRU", 42_307_000_000),
                ReferenceDistance::new("CRU <> HUR", 32_916_000_000),
                ReferenceDistance::new("CRU <> MIC", 57_481_000_000),
                ReferenceDistance::new("ARC <> HUR", 22_882_000_000),
                ReferenceDistance::new("HUR <> MIC", 38_407_000_000),
                ReferenceDistance::new("ARC <> MIC", 59_464_000_000),
                ReferenceDistance::new("Earth <> Mars (Min)", 54_600_000_000)
            ]
        }
    }

    /// Defaults, overlaid by `qdrive-charts-conf.toml` and then `QDRIVE_*` environment variables.
    /// If that fails the defaults are used and written out so there is a file to edit next time.
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = Config::try_from(&ChartSettings::default())?;
        let settings = match Config::builder()
            .add_source(defaults.clone())
            .add_source(config::File::with_name(ChartSettings::CONFIG_FILENAME))
            .add_source(config::Environment::with_prefix(ChartSettings::ENV_PREFIX))
            .build() {
            Ok(settings) => {
                settings.try_deserialize()?
            }
            Err(e) => {
                warn!("Failed to load settings. {}", e.to_string());
                let settings = Config::builder()
                    .add_source(defaults)
                    .add_source(config::Environment::with_prefix(ChartSettings::ENV_PREFIX))
                    .build()?;
                let ret: ChartSettings = settings.try_deserialize()?;
                ret.write().unwrap_or_else(|e| { error!("Failed to write settings. {}", e.to_string())});
                ret
            }
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.step == 0 {
            return Err(ConfigError::Message("step must be greater than zero".to_string()));
        }
        if self.x_max <= self.x_min.saturating_add(self.step) {
            return Err(ConfigError::Message(
                format!("x_max ({}) must be at least one step beyond x_min ({})", self.x_max, self.x_min)
            ));
        }
        if self.colours.is_empty() {
            return Err(ConfigError::Message("at least one colour is required".to_string()));
        }
        if self.figure_width == 0 || self.figure_height == 0 {
            return Err(ConfigError::Message("figure dimensions must be non-zero".to_string()));
        }
        Ok(())
    }

    pub fn item_dump_path(&self) -> PathBuf {
        PathBuf::from(&self.item_dump_path)
    }

    pub fn ship_sizes_path(&self) -> PathBuf {
        PathBuf::from(&self.ship_sizes_path)
    }

    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(&self.output_dir)
    }

    #[cfg(test)]
    pub fn set_output_dir(&mut self, dir: &str) {
        self.output_dir = dir.to_string();
    }

    pub fn distance_sweep(&self) -> Vec<f64> {
        utils::numeric::distance_sweep(self.x_min, self.x_max, self.step)
    }

    pub fn write(&self) -> std::io::Result<()> {
        fs::write(format!("{}.toml", ChartSettings::CONFIG_FILENAME), toml::to_string(&self).map_err(|_e|{
            std::io::Error::new(std::io::ErrorKind::Other, "Failed to encode settings to toml")
        })?)
    }
}
