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

use itertools::{Either, Itertools};
use tracing::{info, warn};
use crate::error::{Error, ErrorKind, Result};
use crate::item::{AttachableComponentParams, ItemDump, ItemRecord, QuantumDriveComponent};
use crate::travel;
use crate::travel::VelocityProfile;

pub const QUANTUM_DRIVE_PREFIX: &'static str = "QDRV_";

const SC_ITEM_SUFFIX: &'static str = "_SCItem";
const TEMP_SUFFIX: &'static str = "_TEMP";
const PLACEHOLDER_NAME: &'static str = "PLACEHOLDER";

/// Physical constants of a quantum drive. Only constructible with values the travel model
/// can evaluate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriveParameters {
    max_speed: f64,
    stage_one_accel_rate: f64,
    stage_two_accel_rate: f64,
    spool_up_time: f64
}

impl DriveParameters {
    pub fn new(max_speed: f64,
               stage_one_accel_rate: f64,
               stage_two_accel_rate: f64,
               spool_up_time: f64) -> Result<DriveParameters>
    {
        let fields = [
            ("max speed", max_speed),
            ("stage one acceleration", stage_one_accel_rate),
            ("stage two acceleration", stage_two_accel_rate),
            ("spool up time", spool_up_time)
        ];
        if let Some((name, value)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(invalid_parameters(format!("{} must be finite, got {}", name, value)));
        }
        if let Some((name, value)) = fields[..3].iter().find(|(_, value)| *value <= 0.0) {
            return Err(invalid_parameters(format!("{} must be positive, got {}", name, value)));
        }
        if spool_up_time < 0.0 {
            return Err(invalid_parameters(format!("spool up time can't be negative, got {}", spool_up_time)));
        }
        if stage_one_accel_rate == stage_two_accel_rate {
            return Err(invalid_parameters(
                format!("stage one and stage two acceleration must differ, both are {}", stage_one_accel_rate)
            ));
        }
        Ok(DriveParameters { max_speed, stage_one_accel_rate, stage_two_accel_rate, spool_up_time })
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    pub fn stage_one_accel_rate(&self) -> f64 {
        self.stage_one_accel_rate
    }

    pub fn stage_two_accel_rate(&self) -> f64 {
        self.stage_two_accel_rate
    }

    pub fn spool_up_time(&self) -> f64 {
        self.spool_up_time
    }

    /// Stage one accelerating harder than stage two falls outside the regime the cubic
    /// solution was derived for; short hops can come out below the spool up time.
    pub fn has_inverted_stages(&self) -> bool {
        self.stage_one_accel_rate > self.stage_two_accel_rate
    }

    pub fn travel_time(&self, distance: f64) -> f64 {
        travel::total_time(self.max_speed,
                           self.stage_one_accel_rate,
                           self.stage_two_accel_rate,
                           distance,
                           self.spool_up_time)
    }

    pub fn travel_times(&self, distances: &[f64]) -> Vec<f64> {
        distances.iter().map(|d| self.travel_time(*d)).collect()
    }

    pub fn profile_at(&self, distance: f64) -> VelocityProfile {
        VelocityProfile::classify(self.max_speed,
                                  self.stage_one_accel_rate,
                                  self.stage_two_accel_rate,
                                  distance)
    }
}

fn invalid_parameters(details: String) -> Error {
    Error::new(ErrorKind::InvalidDriveParameters, details)
}

#[derive(Clone, Debug)]
pub struct QuantumDrive {
    key: String,
    name: String,
    size: u32,
    parameters: DriveParameters,
    fuel_requirement: f64
}

impl QuantumDrive {
    pub fn new(key: String, name: String, size: u32, parameters: DriveParameters, fuel_requirement: f64) -> QuantumDrive {
        QuantumDrive { key, name, size, parameters, fuel_requirement }
    }

    pub fn from_item(key: &str, record: &ItemRecord) -> Result<QuantumDrive> {
        let attachable = record.component::<AttachableComponentParams>()?;
        let drive = record.component::<QuantumDriveComponent>()?;
        let parameters = DriveParameters::new(drive.params.drive_speed,
                                              drive.params.stage_one_accel_rate,
                                              drive.params.stage_two_accel_rate,
                                              drive.params.spool_up_time)?;
        Ok(QuantumDrive {
            key: key.to_string(),
            name: display_name(&attachable.attach_def.localization.name, key),
            size: attachable.attach_def.size,
            parameters,
            fuel_requirement: drive.quantum_fuel_requirement
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn parameters(&self) -> &DriveParameters {
        &self.parameters
    }

    pub fn fuel_requirement(&self) -> f64 {
        self.fuel_requirement
    }

    pub fn label(&self, show_size: bool) -> String {
        match show_size {
            true => format!("{}({})", self.name, self.size),
            false => self.name.clone()
        }
    }

    pub fn travel_time(&self, distance: f64) -> f64 {
        self.parameters.travel_time(distance)
    }

    pub fn max_range(&self, tank_capacity: f64) -> f64 {
        travel::max_range(tank_capacity, self.fuel_requirement)
    }
}

/// Short display name from a localisation key such as `item_NameQDRV_WETK_S01_Atlas_SCItem`.
/// Falls back to the item key when the localisation is still a placeholder.
pub fn display_name(localised_name: &str, item_key: &str) -> String {
    let name = last_segment(&localised_name.replace(SC_ITEM_SUFFIX, ""));
    if !name.contains(PLACEHOLDER_NAME) {
        return name;
    }
    let key = item_key.replace(SC_ITEM_SUFFIX, "").replace(TEMP_SUFFIX, "");
    key.splitn(4, '_').last().unwrap_or(&key).to_string()
}

fn last_segment(name: &str) -> String {
    match name.rsplit_once('_') {
        Some((_, tail)) => tail.to_string(),
        None => name.to_string()
    }
}

/// Every `QDRV_` item in the dump. All failing drives are reported together.
pub fn load_quantum_drives(dump: &ItemDump) -> Result<Vec<QuantumDrive>> {
    let (drives, failures): (Vec<QuantumDrive>, Vec<String>) = dump
        .items_with_prefix(QUANTUM_DRIVE_PREFIX)
        .partition_map(|(key, record)| match QuantumDrive::from_item(key, record) {
            Ok(drive) => Either::Left(drive),
            Err(e) => Either::Right(format!("{}: {}", key, e))
        });
    if !failures.is_empty() {
        return Err(Error::aggregate(ErrorKind::InvalidDrives, failures));
    }
    for drive in drives.iter().filter(|d| d.parameters().has_inverted_stages()) {
        warn!("{} accelerates harder in stage one ({}) than stage two ({}); short range times may be unreliable",
              drive.key(),
              drive.parameters().stage_one_accel_rate(),
              drive.parameters().stage_two_accel_rate());
    }
    info!("Loaded {} quantum drives", drives.len());
    Ok(drives)
}

#[cfg(test)]
mod tests {
    use crate::drive::{display_name, load_quantum_drives, DriveParameters, QuantumDrive};
    use crate::error::ErrorKind;
    use crate::item::ItemDump;

    fn drive_json(key: &str, name: &str, size: u32, speed: f64, s1: f64, s2: f64) -> String {
        format!(r#""{}": {{"Components": [
            {{"SAttachableComponentParams": {{"AttachDef": {{"Size": {}, "Localization": {{"Name": "{}"}}}}}}}},
            {{"SCItemQuantumDriveParams": {{"quantumFuelRequirement": 0.09,
                "params": {{"driveSpeed": {}, "stageOneAccelRate": {}, "stageTwoAccelRate": {}, "spoolUpTime": 4.5}}}}}}
        ]}}"#, key, size, name, speed, s1, s2)
    }

    #[test]
    fn rejects_parameters_the_model_cannot_evaluate() {
        let cases = [
            (0.0, 1.0, 2.0, 1.0),
            (100.0, -1.0, 2.0, 1.0),
            (100.0, 1.0, 0.0, 1.0),
            (100.0, 2.0, 2.0, 1.0),
            (100.0, 1.0, 2.0, -0.1),
            (f64::NAN, 1.0, 2.0, 1.0),
            (100.0, 1.0, f64::INFINITY, 1.0)
        ];
        for (v, a1, a2, k) in cases {
            let err = DriveParameters::new(v, a1, a2, k).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidDriveParameters, "{:?}", (v, a1, a2, k));
        }
        assert!(DriveParameters::new(100.0, 1.0, 2.0, 0.0).is_ok());
    }

    #[test]
    fn travel_time_matches_model() {
        let params = DriveParameters::new(200.0, 27.566, 0.625, 10.604).unwrap();
        assert!(params.has_inverted_stages());
        assert!((params.travel_time(42_307_000_000.0) - 211_535_020.2729979).abs() < 1e-3);
        let times = params.travel_times(&[0.0, 42_307_000_000.0]);
        assert_eq!(times.len(), 2);
        assert!((times[0] - 10.604).abs() < 1e-9);
    }

    #[test]
    fn display_names() {
        assert_eq!(display_name("item_NameQDRV_WETK_S01_Atlas_SCItem", "QDRV_WETK_S01_Atlas_SCItem"), "Atlas");
        assert_eq!(display_name("Voyage", "QDRV_X"), "Voyage");
        assert_eq!(display_name("item_Name_PLACEHOLDER", "QDRV_ACAS_S02_Spectre_TEMP_SCItem"), "Spectre");
    }

    #[test]
    fn labels_optionally_carry_size() {
        let params = DriveParameters::new(100.0, 1.0, 2.0, 1.0).unwrap();
        let drive = QuantumDrive::new("QDRV_A".to_string(), "Atlas".to_string(), 1, params, 0.09);
        assert_eq!(drive.label(false), "Atlas");
        assert_eq!(drive.label(true), "Atlas(1)");
        assert!((drive.max_range(583.33) - 583.33 / 0.09 * 1_000_000.0).abs() < 1e-3);
    }

    #[test]
    fn loads_drives_from_dump() {
        let json = format!("{{{}, {}, \"QTNK_Other\": {{\"Components\": []}}}}",
                           drive_json("QDRV_A_S01_Atlas", "item_NameQDRV_A_S01_Atlas_SCItem", 1, 1.65e8, 3.5e6, 3.0e7),
                           drive_json("QDRV_B_S02_Crossfield", "item_NameQDRV_B_S02_Crossfield", 2, 1.7e8, 4.0e6, 2.5e7));
        let dump = ItemDump::from_json_str(&json).unwrap();
        let drives = load_quantum_drives(&dump).unwrap();
        let names: Vec<&str> = drives.iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["Atlas", "Crossfield"]);
        assert_eq!(drives[1].size(), 2);
    }

    #[test]
    fn every_bad_drive_is_reported() {
        let json = format!("{{{}, {}, {}}}",
                           drive_json("QDRV_A", "A", 1, 1.65e8, 3.5e6, 3.5e6),
                           drive_json("QDRV_B", "B", 1, 0.0, 3.5e6, 3.0e7),
                           drive_json("QDRV_C", "C", 1, 1.65e8, 3.5e6, 3.0e7));
        let dump = ItemDump::from_json_str(&json).unwrap();
        let err = load_quantum_drives(&dump).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDrives);
        assert!(err.details().contains("QDRV_A"));
        assert!(err.details().contains("QDRV_B"));
        assert!(!err.details().contains("QDRV_C"));
    }
}
