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

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use utils::numeric::round_to_u32;
use crate::error::{Error, ErrorKind, Result};
use crate::item::{FuelTankComponent, ItemDump};

pub const FUEL_TANK_PREFIX: &'static str = "QTNK_";

const DEFAULT_TANK_SHIP_NAME: &'static str = "Default";

/// A tank that isn't (correctly) present in the game files.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TankOverride {
    pub size: u32,
    pub capacity: u32,
    pub name: String
}

/// Capacity shared by so many ships that listing them individually is pointless.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CommonTank {
    pub capacity: u32,
    pub label: String
}

/// Ordered `[size, ship name fragment]` pairs; first fragment contained in a ship's name wins.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct ShipSizeTable {
    entries: Vec<(u32, String)>
}

impl ShipSizeTable {
    pub fn new(entries: Vec<(u32, String)>) -> ShipSizeTable {
        ShipSizeTable { entries }
    }

    pub fn from_path(path: &Path) -> Result<ShipSizeTable> {
        let file = File::open(path).map_err(|err| {
            Error::new(ErrorKind::IOError,
                       format!("Couldn't open {}. {}", path.display(), err.to_string()))
        })?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    pub fn from_json_str(json: &str) -> Result<ShipSizeTable> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn size_of(&self, ship_name: &str) -> Option<u32> {
        let lower_name = ship_name.to_lowercase();
        self.entries.iter()
            .find(|(_, fragment)| lower_name.contains(fragment.as_str()))
            .map(|(size, _)| *size)
    }
}

/// Quantum fuel tank capacities grouped by drive size, each with the ships carrying them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TankCatalog {
    sizes: BTreeMap<u32, BTreeMap<u32, BTreeSet<String>>>
}

impl TankCatalog {
    pub fn from_dump(dump: &ItemDump,
                     size_table: &ShipSizeTable,
                     overrides: &[TankOverride],
                     common_tank: Option<&CommonTank>) -> Result<TankCatalog>
    {
        let mut catalog = TankCatalog::default();
        let mut unknown_ships = Vec::new();
        for (key, record) in dump.items_with_prefix(FUEL_TANK_PREFIX) {
            let ship_name = ship_name_from_key(key);
            let capacity = round_to_u32(record.component::<FuelTankComponent>()?.capacity);
            if ship_name == DEFAULT_TANK_SHIP_NAME {
                continue;
            }
            let size = match size_table.size_of(&ship_name) {
                Some(size) => size,
                None => {
                    error!("\"{}\" not in ship size table", ship_name);
                    unknown_ships.push(ship_name);
                    continue;
                }
            };
            if overrides.iter().any(|o| o.name.to_lowercase() == ship_name.to_lowercase()) {
                info!("\"{}\" in overrides, skipping game file", ship_name);
                continue;
            }
            let entry_name = match common_tank {
                Some(common) if common.capacity == capacity => common.label.clone(),
                _ => ship_name
            };
            catalog.insert(size, capacity, entry_name);
        }
        if !unknown_ships.is_empty() {
            return Err(Error::aggregate(ErrorKind::UnknownShips, unknown_ships));
        }
        for tank in overrides {
            catalog.insert(tank.size, tank.capacity, tank.name.clone());
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, size: u32, capacity: u32, ship_name: String) {
        self.sizes.entry(size)
            .or_default()
            .entry(capacity)
            .or_default()
            .insert(ship_name);
    }

    pub fn sizes(&self) -> impl Iterator<Item=u32> + '_ {
        self.sizes.keys().copied()
    }

    /// Ascending by capacity.
    pub fn capacities(&self, size: u32) -> Vec<u32> {
        self.sizes.get(&size)
            .map(|tanks| tanks.keys().copied().collect())
            .unwrap_or_default()
    }

    pub fn ships(&self, size: u32, capacity: u32) -> Option<&BTreeSet<String>> {
        self.sizes.get(&size).and_then(|tanks| tanks.get(&capacity))
    }

    /// `(capacity, "ship a, ship b")` for each tank of `size`, ascending by capacity.
    pub fn legend_entries(&self, size: u32) -> Vec<(u32, String)> {
        match self.sizes.get(&size) {
            Some(tanks) => tanks.iter()
                .map(|(capacity, ships)| (*capacity, ships.iter().join(", ")))
                .collect(),
            None => Vec::new()
        }
    }
}

/// `QTNK_AEGS_Avenger_Titan` -> `Avenger Titan`
fn ship_name_from_key(key: &str) -> String {
    key.splitn(3, '_').last().unwrap_or(key).replace('_', " ")
}
