/*
 * Copyright (c):
 * 2025 zephyrj
 * zephyrj@protonmail.com
 *
 * This file is part of qdrive-charts.
 *
 * qdrive-charts is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * qdrive-charts is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with qdrive-charts. If not, see <https://www.gnu.org/licenses/>.
 */

mod layout;
mod palette;
mod render;

use std::io;
use std::path::PathBuf;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};
use quantum_drive::{QuantumDrive, TankCatalog};
use utils::filesystem::{ensure_directory, output_path};

use crate::chart::layout::FigureLayout;
use crate::chart::palette::Palette;
use crate::settings::ChartSettings;

#[derive(thiserror::Error, Debug)]
pub enum ChartError {
    #[error("io error. {0}")]
    IoError(#[from] io::Error),
    #[error("quantum drive data error. {0}")]
    DataError(#[from] quantum_drive::error::Error),
    #[error("settings error. {0}")]
    SettingsError(#[from] config::ConfigError),
    #[error("invalid colour `{0}`")]
    InvalidColour(String),
    #[error("failed to render `{0}`. `{1}`")]
    RenderError(String, String)
}

const TRAVEL_TIME_SUBTITLE: &'static str =
    "Travel time (including spool up time) for any realistic distance in Stanton given each quantum drive (Remember: Lower time is better)";
const PAPER_SUBTITLE: &'static str =
    "Calculations are based on the paper \"A study on travel time and the underlying physical model of Quantum Drives in Star Citizen\" by @Erec (https://gitlab.com/Erecco/a-study-on-quantum-travel-time).";

/// One chart to produce: which drives, how to title it and what to call the files.
#[derive(Clone, Debug)]
pub struct FigurePlan {
    pub title: String,
    pub file_stem: String,
    pub subtitle: Vec<String>,
    pub drives: Vec<QuantumDrive>,
    /// `(capacity, ships)` pairs, ascending by capacity. Empty for charts without range markers.
    pub tank_legend: Vec<(u32, String)>,
    pub show_size: bool
}

fn subtitle(settings: &ChartSettings, tank_size: Option<u32>) -> Vec<String> {
    let mut lines = vec![TRAVEL_TIME_SUBTITLE.to_string()];
    if let Some(size) = tank_size {
        lines.push(format!("Numbers have been placed at the point when each size {} quantum fuel tank runs out of fuel, \
                            i.e. that tank's/ship's maximum range with the specific quantum drive (see legend)", size));
    }
    lines.push(format!("Data has been extracted directly from the {} game files via \"scdatatools\" \
                        (https://gitlab.com/scmodding/frameworks/scdatatools).", settings.game_version));
    lines.push(PAPER_SUBTITLE.to_string());
    lines
}

fn is_best_in_show(drive: &QuantumDrive, best_in_show: &[String]) -> bool {
    let name = drive.name().to_lowercase();
    best_in_show.iter().any(|entry| entry.to_lowercase().contains(&name))
}

/// Per drive size: a chart with tank range markers where configured (plus an `_alt` copy
/// without them), otherwise a plain chart. Finally a comparison of the best in show drives.
pub fn plan_figures(settings: &ChartSettings, drives: &[QuantumDrive], tanks: &TankCatalog) -> Vec<FigurePlan> {
    let mut plans = Vec::new();
    for size in settings.drive_sizes.iter().copied() {
        let sized_drives: Vec<QuantumDrive> = drives.iter()
            .filter(|d| d.size() == size)
            .cloned()
            .collect();
        let tank_legend = tanks.legend_entries(size);
        let plain = FigurePlan {
            title: format!("Size {} quantum drives", size),
            file_stem: format!("res{}", size),
            subtitle: subtitle(settings, None),
            drives: sized_drives,
            tank_legend: Vec::new(),
            show_size: false
        };
        if settings.tank_range_sizes.contains(&size) && !tank_legend.is_empty() {
            plans.push(FigurePlan {
                title: format!("Size {} quantum drives - including maximum ranges", size),
                subtitle: subtitle(settings, Some(size)),
                tank_legend,
                ..plain.clone()
            });
            plans.push(FigurePlan { file_stem: format!("res{}_alt", size), ..plain });
        } else {
            plans.push(plain);
        }
    }
    plans.push(FigurePlan {
        title: "Common quantum drives".to_string(),
        file_stem: "resb".to_string(),
        subtitle: subtitle(settings, None),
        drives: drives.iter()
            .filter(|d| is_best_in_show(d, &settings.best_in_show))
            .cloned()
            .collect(),
        tank_legend: Vec::new(),
        show_size: true
    });
    plans
}

/// Renders every plan as PNG and SVG into the output directory, returning the written paths.
pub fn render_figures(plans: &[FigurePlan], settings: &ChartSettings) -> Result<Vec<PathBuf>, ChartError> {
    let output_dir = settings.output_dir();
    ensure_directory(&output_dir)?;
    let sweep = settings.distance_sweep();
    let mut palette = Palette::from_hex(&settings.colours)?;
    let mut rng = match settings.colour_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy()
    };

    let mut written = Vec::new();
    for plan in plans {
        let layout = match FigureLayout::build(plan, &sweep, settings.x_min as f64, settings.x_max as f64) {
            Some(layout) => layout,
            None => {
                warn!("No drives for \"{}\", skipping {}", plan.title, plan.file_stem);
                continue;
            }
        };
        debug!("{} labels for {} drawn from {} colours", layout.curves.len(), plan.file_stem, palette.len());
        palette.shuffle(&mut rng);
        let figure = render::Figure {
            plan,
            layout: &layout,
            palette: &palette,
            reference_distances: &settings.reference_distances,
            size: (settings.figure_width, settings.figure_height)
        };

        let png_path = output_path(&output_dir, &plan.file_stem, "png");
        render::write_png(&figure, &png_path)?;
        info!("Wrote {}", png_path.display());
        written.push(png_path);

        let svg_path = output_path(&output_dir, &plan.file_stem, "svg");
        render::write_svg(&figure, &svg_path)?;
        info!("Wrote {}", svg_path.display());
        written.push(svg_path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use quantum_drive::{DriveParameters, QuantumDrive, TankCatalog};
    use crate::chart::{plan_figures, render_figures};
    use crate::settings::ChartSettings;

    fn drive(name: &str, size: u32) -> QuantumDrive {
        let params = DriveParameters::new(1.65e8, 3.5e6, 3.0e7, 4.5).unwrap();
        QuantumDrive::new(format!("QDRV_{}", name), name.to_string(), size, params, 0.09)
    }

    fn drives() -> Vec<QuantumDrive> {
        vec![drive("Atlas", 1), drive("Expedition", 1), drive("Spectre", 2), drive("XL1", 2), drive("TS2", 3)]
    }

    #[test]
    fn plans_follow_sizes_and_tank_ranges() {
        let mut tanks = TankCatalog::default();
        tanks.insert(1, 583, "Most S1 ships".to_string());
        tanks.insert(1, 700, "125a".to_string());
        tanks.insert(2, 2500, "Cutlass Black".to_string());
        let plans = plan_figures(&ChartSettings::default(), &drives(), &tanks);
        let stems: Vec<&str> = plans.iter().map(|p| p.file_stem.as_str()).collect();
        assert_eq!(stems, vec!["res1", "res1_alt", "res2", "res3", "resb"]);

        assert_eq!(plans[0].tank_legend, vec![(583, "Most S1 ships".to_string()), (700, "125a".to_string())]);
        assert_eq!(plans[0].subtitle.len(), 4);
        assert!(plans[0].title.ends_with("including maximum ranges"));
        assert!(plans[1].tank_legend.is_empty());
        assert_eq!(plans[1].drives.len(), 2);
        // size 2 has tanks but isn't a tank range size
        assert!(plans[2].tank_legend.is_empty());
        assert_eq!(plans[3].drives.len(), 1);
        assert_eq!(plans[3].subtitle.len(), 3);
    }

    #[test]
    fn best_in_show_matches_names_case_insensitively() {
        let plans = plan_figures(&ChartSettings::default(), &drives(), &TankCatalog::default());
        let common = plans.last().unwrap();
        assert!(common.show_size);
        let names: Vec<&str> = common.drives.iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["Atlas", "Spectre", "XL1", "TS2"]);
        assert_eq!(plans.len(), 4);
    }

    #[test]
    fn renders_png_and_svg_for_each_populated_figure() {
        let mut settings = ChartSettings::default();
        let dir = std::env::temp_dir().join("qdrive_charts_s1_render");
        let _ = std::fs::remove_dir_all(&dir);
        settings.set_output_dir(&dir.to_string_lossy());
        settings.step = 100_000_000;
        settings.colour_seed = Some(3);
        let mut tanks = TankCatalog::default();
        tanks.insert(1, 583, "Most S1 ships".to_string());
        let drives = vec![drive("Atlas", 1), drive("Expedition", 1)];

        let plans = plan_figures(&settings, &drives, &tanks);
        let written = render_figures(&plans, &settings).unwrap();
        assert_eq!(written.len(), 6);
        for stem in ["res1", "res1_alt", "resb"] {
            for ext in ["png", "svg"] {
                let path = dir.join(format!("{}.{}", stem, ext));
                assert!(written.contains(&path), "{} not reported", path.display());
                let size = std::fs::metadata(&path).unwrap().len();
                assert!(size > 0, "{} is empty", path.display());
            }
        }
        let svg = std::fs::read_to_string(dir.join("res1.svg")).unwrap();
        assert!(svg.contains("Atlas"));
        assert!(svg.contains("Most S1 ships"));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn nothing_is_rendered_without_drives() {
        let mut settings = ChartSettings::default();
        let dir = std::env::temp_dir().join("qdrive_charts_empty_render");
        settings.set_output_dir(&dir.to_string_lossy());
        let plans = plan_figures(&settings, &[], &TankCatalog::default());
        let written = render_figures(&plans, &settings).unwrap();
        assert!(written.is_empty());
        assert!(dir.is_dir());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
