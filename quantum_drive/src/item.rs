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

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use crate::error::{Error, ErrorKind, Result};

/// A named block inside an item's `Components` list.
pub trait ComponentSection: DeserializeOwned {
    const KEY: &'static str;
}

/// The full item dump, keyed by component identifier (e.g. `QDRV_RSI_S01_Hyperion`).
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct ItemDump {
    items: BTreeMap<String, ItemRecord>
}

impl ItemDump {
    pub fn from_path(path: &Path) -> Result<ItemDump> {
        let file = File::open(path).map_err(|err| {
            Error::new(ErrorKind::IOError,
                       format!("Couldn't open {}. {}", path.display(), err.to_string()))
        })?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    pub fn from_json_str(json: &str) -> Result<ItemDump> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&ItemRecord> {
        self.items.get(key)
    }

    pub fn items_with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item=(&'a str, &'a ItemRecord)> + 'a {
        self.items.iter()
            .filter(move |(key, _)| key.starts_with(prefix))
            .map(|(key, record)| (key.as_str(), record))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ItemRecord {
    #[serde(rename = "Components", default)]
    components: Vec<Map<String, Value>>
}

impl ItemRecord {
    pub fn component<T: ComponentSection>(&self) -> Result<T> {
        let value = self.components.iter()
            .find_map(|component| component.get(T::KEY))
            .ok_or_else(|| {
                Error::new(ErrorKind::MissingComponent, format!("no {} component", T::KEY))
            })?;
        T::deserialize(value).map_err(|e| {
            Error::new(ErrorKind::JsonDecodeError, format!("bad {} component. {}", T::KEY, e))
        })
    }

    pub fn has_component<T: ComponentSection>(&self) -> bool {
        self.components.iter().any(|component| component.contains_key(T::KEY))
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct AttachableComponentParams {
    #[serde(rename = "AttachDef")]
    pub attach_def: AttachDef
}

impl ComponentSection for AttachableComponentParams {
    const KEY: &'static str = "SAttachableComponentParams";
}

#[derive(Clone, Debug, Deserialize)]
pub struct AttachDef {
    #[serde(rename = "Size")]
    pub size: u32,
    #[serde(rename = "Localization")]
    pub localization: Localization
}

#[derive(Clone, Debug, Deserialize)]
pub struct Localization {
    #[serde(rename = "Name")]
    pub name: String
}

#[derive(Clone, Debug, Deserialize)]
pub struct QuantumDriveComponent {
    pub params: QuantumDriveParams,
    #[serde(rename = "quantumFuelRequirement")]
    pub quantum_fuel_requirement: f64
}

impl ComponentSection for QuantumDriveComponent {
    const KEY: &'static str = "SCItemQuantumDriveParams";
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantumDriveParams {
    pub drive_speed: f64,
    pub stage_one_accel_rate: f64,
    pub stage_two_accel_rate: f64,
    pub spool_up_time: f64
}

#[derive(Clone, Debug, Deserialize)]
pub struct FuelTankComponent {
    pub capacity: f64
}

impl ComponentSection for FuelTankComponent {
    const KEY: &'static str = "SCItemFuelTankParams";
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;
    use crate::item::{AttachableComponentParams, FuelTankComponent, ItemDump, QuantumDriveComponent};

    const DUMP: &'static str = r#"{
        "QDRV_TEST_S01_Atlas": {
            "Components": [
                {"SAttachableComponentParams": {"AttachDef": {"Size": 1, "Localization": {"Name": "item_NameQDRV_TEST_S01_Atlas_SCItem"}}}},
                {"SCItemQuantumDriveParams": {
                    "quantumFuelRequirement": 0.09,
                    "params": {"driveSpeed": 165000000.0, "stageOneAccelRate": 3.5e6, "stageTwoAccelRate": 3.0e7, "spoolUpTime": 4.5}
                }}
            ]
        },
        "QTNK_TEST_Aurora_MR": {
            "Components": [{"SCItemFuelTankParams": {"capacity": 583.33}}]
        }
    }"#;

    #[test]
    fn typed_components_are_found_by_key() {
        let dump = ItemDump::from_json_str(DUMP).unwrap();
        assert_eq!(dump.len(), 2);
        let drive = dump.get("QDRV_TEST_S01_Atlas").unwrap();
        let attach = drive.component::<AttachableComponentParams>().unwrap();
        assert_eq!(attach.attach_def.size, 1);
        let qd = drive.component::<QuantumDriveComponent>().unwrap();
        assert_eq!(qd.params.spool_up_time, 4.5);
        assert_eq!(qd.quantum_fuel_requirement, 0.09);
        assert!(!drive.has_component::<FuelTankComponent>());
    }

    #[test]
    fn missing_component_is_reported() {
        let dump = ItemDump::from_json_str(DUMP).unwrap();
        let tank = dump.get("QTNK_TEST_Aurora_MR").unwrap();
        let err = tank.component::<QuantumDriveComponent>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingComponent);
        assert_eq!(tank.component::<FuelTankComponent>().unwrap().capacity, 583.33);
    }

    #[test]
    fn prefix_filter() {
        let dump = ItemDump::from_json_str(DUMP).unwrap();
        let keys: Vec<&str> = dump.items_with_prefix("QTNK_").map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["QTNK_TEST_Aurora_MR"]);
    }

    #[test]
    fn malformed_component_is_a_decode_error() {
        let dump = ItemDump::from_json_str(
            r#"{"QTNK_X": {"Components": [{"SCItemFuelTankParams": {"capacity": "lots"}}]}}"#
        ).unwrap();
        let err = dump.get("QTNK_X").unwrap().component::<FuelTankComponent>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::JsonDecodeError);
    }
}
