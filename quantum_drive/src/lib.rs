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

pub mod error;
pub mod travel;
pub mod item;
pub mod drive;
pub mod fuel_tank;

pub use drive::{load_quantum_drives, DriveParameters, QuantumDrive};
pub use fuel_tank::{CommonTank, ShipSizeTable, TankCatalog, TankOverride};
pub use item::ItemDump;
pub use travel::{max_range, total_time, VelocityProfile};
