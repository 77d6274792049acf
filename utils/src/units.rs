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

/// `42307000000.0` -> `42,307,000,000m`
pub fn format_metres(metres: f64) -> String {
    let rounded = metres.round();
    let digits = format!("{}", rounded.abs() as u64);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    if rounded < 0.0 {
        grouped.push('-');
    }
    for (idx, digit) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped.push('m');
    grouped
}

/// Seconds as `m:ss`, minutes not wrapped at the hour. `3725.0` -> `62:05`
pub fn format_minutes_seconds(seconds: f64) -> String {
    let minutes = (seconds / 60.0).floor();
    let remainder = (seconds - minutes * 60.0).round();
    // rounding the remainder can spill into the next minute
    let (minutes, remainder) = match remainder >= 60.0 {
        true => (minutes + 1.0, 0.0),
        false => (minutes, remainder)
    };
    format!("{:2.0}:{:02.0}", minutes, remainder)
}
