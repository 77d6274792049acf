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

/// Values from `min` up to but excluding `max`, `step` apart.
pub fn distance_sweep(min: u64, max: u64, step: u64) -> Vec<f64> {
    if step == 0 {
        return Vec::new();
    }
    (min..max).step_by(step as usize).map(|d| d as f64).collect()
}

/// `count` values spread evenly from `low` to `high` inclusive. A single value sits at `low`.
pub fn evenly_spaced(low: f64, high: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![low],
        _ => {
            let gap = (high - low) / (count - 1) as f64;
            (0..count).map(|i| low + i as f64 * gap).collect()
        }
    }
}

pub fn round_to_u32(val: f64) -> u32 {
    val.round().max(0.0) as u32
}

/// Multiples of `step` in `[0, limit)`
pub fn multiples_below(limit: f64, step: u32) -> Vec<u32> {
    if step == 0 || limit <= 0.0 {
        return Vec::new();
    }
    let limit = limit as u32;
    (0..limit).step_by(step as usize).collect()
}
