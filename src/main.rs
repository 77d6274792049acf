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

mod chart;
mod settings;

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_appender;
use tracing_subscriber;

use quantum_drive::{load_quantum_drives, ItemDump, ShipSizeTable, TankCatalog};
use crate::chart::ChartError;
use crate::settings::ChartSettings;

fn init_logging() {
    match env::current_dir() {
        Ok(current_dir) => {
            let file_appender = tracing_appender::rolling::never(current_dir, "qdrive_charts.log");
            let subscriber = tracing_subscriber::fmt()
                .with_writer(file_appender)
                .with_ansi(false)
                .compact()
                .finish();
            match tracing::subscriber::set_global_default(subscriber) {
                Ok(_) => {
                    info!("Logging initialised");
                }
                Err(e) => {
                    eprintln!("Failed to init logging. {}", e.to_string());
                }
            }
        }
        Err(e) => {
            eprintln!("Failed to init logging. Couldn't determine current dir {}", e.to_string());
        }
    }
}

fn generate_charts() -> Result<Vec<PathBuf>, ChartError> {
    let settings = ChartSettings::load()?;

    info!("Loading item dump from {}", settings.item_dump_path().display());
    let dump = ItemDump::from_path(&settings.item_dump_path())?;
    info!("Item dump holds {} items", dump.len());
    let drives = load_quantum_drives(&dump)?;

    info!("Loading ship sizes from {}", settings.ship_sizes_path().display());
    let size_table = ShipSizeTable::from_path(&settings.ship_sizes_path())?;
    let tanks = TankCatalog::from_dump(&dump,
                                       &size_table,
                                       &settings.tank_overrides,
                                       settings.common_tank.as_ref())?;

    let plans = chart::plan_figures(&settings, &drives, &tanks);
    info!("Rendering {} figures into {}", plans.len(), settings.output_dir().display());
    chart::render_figures(&plans, &settings)
}

fn main() -> ExitCode {
    init_logging();
    match generate_charts() {
        Ok(written) => {
            info!("Finished. {} files written", written.len());
            for path in written {
                println!("{}", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Chart generation failed. {}", e.to_string());
            eprintln!("Chart generation failed. {}", e.to_string());
            ExitCode::FAILURE
        }
    }
}
