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

use itertools::Itertools;
use quantum_drive::QuantumDrive;
use utils::numeric::{evenly_spaced, multiples_below};
use crate::chart::FigurePlan;

/// Share of the distance axis kept free to the right of the curves for drive labels.
pub const LABEL_PAD_FRACTION: f64 = 0.05;

/// Share of the slowest time added above it on the time axis.
pub const TIME_HEADROOM_FRACTION: f64 = 0.05;

const MINUTE: u32 = 60;
const HALF_MINUTE: u32 = 30;

/// Number placed on a curve where a tank runs dry.
#[derive(Clone, Debug, PartialEq)]
pub struct TankMarker {
    pub index: usize,
    pub distance: f64,
    pub time: f64
}

#[derive(Clone, Debug)]
pub struct DriveCurve {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    /// Travel time at the last sampled distance, used for ordering.
    pub end_time: f64,
    /// Where the label sits once labels have been spread out.
    pub label_time: f64,
    pub tank_markers: Vec<TankMarker>
}

/// Everything needed to draw one figure, in data coordinates.
#[derive(Clone, Debug)]
pub struct FigureLayout {
    pub x_min: f64,
    pub x_max: f64,
    pub label_pad: f64,
    pub max_time: f64,
    /// Ordered fastest first.
    pub curves: Vec<DriveCurve>,
    pub minute_lines: Vec<f64>,
    pub half_minute_lines: Vec<f64>
}

impl FigureLayout {
    /// `None` when the plan has no drives to draw.
    pub fn build(plan: &FigurePlan, sweep: &[f64], x_min: f64, x_max: f64) -> Option<FigureLayout> {
        let last_distance = *sweep.last()?;
        let sorted_drives = plan.drives.iter()
            .map(|drive| (drive, drive.travel_time(last_distance)))
            .sorted_by(|(_, a), (_, b)| a.total_cmp(b))
            .collect_vec();
        let (fastest, slowest) = match (sorted_drives.first(), sorted_drives.last()) {
            (Some((_, fastest)), Some((_, slowest))) => (*fastest, *slowest),
            _ => return None
        };
        let label_times = evenly_spaced(fastest, slowest, sorted_drives.len());
        let capacities = plan.tank_legend.iter().map(|(capacity, _)| *capacity).collect_vec();

        let curves = sorted_drives.into_iter()
            .zip(label_times)
            .map(|((drive, end_time), label_time)| {
                DriveCurve {
                    label: drive.label(plan.show_size),
                    points: sweep.iter().map(|d| (*d, drive.travel_time(*d))).collect(),
                    end_time,
                    label_time,
                    tank_markers: tank_markers(drive, &capacities, x_max)
                }
            })
            .collect_vec();

        Some(FigureLayout {
            x_min,
            x_max,
            label_pad: (x_max - x_min) * LABEL_PAD_FRACTION,
            max_time: slowest,
            curves,
            minute_lines: multiples_below(slowest, MINUTE).into_iter().map(f64::from).collect(),
            half_minute_lines: multiples_below(slowest, HALF_MINUTE).into_iter()
                .filter(|s| s % MINUTE != 0)
                .map(f64::from)
                .collect()
        })
    }

    /// Right hand edge of the plotting area, leaving space for labels.
    pub fn x_end(&self) -> f64 {
        self.x_max + self.label_pad * 3.0
    }

    /// Top of the time axis, a little above the slowest curve.
    pub fn y_end(&self) -> f64 {
        self.max_time * (1.0 + TIME_HEADROOM_FRACTION)
    }

    /// Time axis labels, one per whole minute up to the top of the axis.
    pub fn time_ticks(&self) -> Vec<f64> {
        multiples_below(self.y_end(), MINUTE).into_iter().map(f64::from).collect()
    }

    /// Leader line from the end of a curve to its spread out label.
    pub fn leader_line(&self, curve: &DriveCurve) -> Vec<(f64, f64)> {
        vec![
            (self.x_max, curve.end_time),
            (self.x_max + self.label_pad * 0.75, curve.label_time),
            (self.x_max + self.label_pad, curve.label_time)
        ]
    }
}

/// Tanks are walked in ascending capacity order and the walk stops at the first tank that
/// outlasts the chart, since every larger tank would sit on the same spot.
pub fn tank_markers(drive: &QuantumDrive, capacities: &[u32], x_max: f64) -> Vec<TankMarker> {
    let mut markers = Vec::new();
    for (index, capacity) in capacities.iter().enumerate() {
        let max_range = drive.max_range(*capacity as f64);
        let distance = x_max.min(max_range);
        markers.push(TankMarker { index, distance, time: drive.travel_time(distance) });
        if max_range > x_max {
            break;
        }
    }
    markers
}

/// Splits a straight line into dashes of `dash` length separated by `gap`, both in data units.
pub fn dash_segments(from: (f64, f64), to: (f64, f64), dash: f64, gap: f64) -> Vec<[(f64, f64); 2]> {
    let length = ((to.0 - from.0).powi(2) + (to.1 - from.1).powi(2)).sqrt();
    if length == 0.0 || dash <= 0.0 || gap < 0.0 {
        return Vec::new();
    }
    let at = |distance: f64| {
        let fraction = distance / length;
        (from.0 + (to.0 - from.0) * fraction, from.1 + (to.1 - from.1) * fraction)
    };
    let mut segments = Vec::new();
    let mut start = 0.0;
    while start < length {
        let end = (start + dash).min(length);
        segments.push([at(start), at(end)]);
        start = end + gap;
    }
    segments
}

#[cfg(test)]
mod tests {
    use quantum_drive::{DriveParameters, QuantumDrive};
    use crate::chart::FigurePlan;
    use crate::chart::layout::{dash_segments, tank_markers, FigureLayout};

    fn drive(name: &str, max_speed: f64, fuel_requirement: f64) -> QuantumDrive {
        let params = DriveParameters::new(max_speed, 3.5e6, 3.0e7, 4.5).unwrap();
        QuantumDrive::new(format!("QDRV_{}", name), name.to_string(), 1, params, fuel_requirement)
    }

    fn plan(drives: Vec<QuantumDrive>, tank_legend: Vec<(u32, String)>) -> FigurePlan {
        FigurePlan {
            title: "test".to_string(),
            file_stem: "test".to_string(),
            subtitle: Vec::new(),
            drives,
            tank_legend,
            show_size: false
        }
    }

    #[test]
    fn curves_are_ordered_fastest_first_with_spread_labels() {
        let sweep: Vec<f64> = (0..100).map(|i| i as f64 * 1.0e9).collect();
        let p = plan(vec![drive("Slow", 1.0e8, 0.1), drive("Fast", 2.0e8, 0.1), drive("Mid", 1.5e8, 0.1)], Vec::new());
        let layout = FigureLayout::build(&p, &sweep, 0.0, 1.0e11).unwrap();
        let labels: Vec<&str> = layout.curves.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Fast", "Mid", "Slow"]);
        assert_eq!(layout.curves[0].label_time, layout.curves[0].end_time);
        assert!((layout.curves[2].label_time - layout.curves[2].end_time).abs() < 1e-9);
        let mid = (layout.curves[0].end_time + layout.curves[2].end_time) / 2.0;
        assert!((layout.curves[1].label_time - mid).abs() < 1e-9);
        assert_eq!(layout.max_time, layout.curves[2].end_time);
        assert_eq!(layout.curves[0].points.len(), 100);
        assert_eq!(layout.label_pad, 5.0e9);
        assert_eq!(layout.x_end(), 1.15e11);
    }

    #[test]
    fn gridlines_split_into_minutes_and_half_minutes() {
        let sweep = vec![0.0, 1.0e11];
        // ~1000 s at 1e11 m
        let layout = FigureLayout::build(&plan(vec![drive("Only", 1.0e8, 0.1)], Vec::new()), &sweep, 0.0, 1.0e11).unwrap();
        assert!(layout.max_time > 1000.0 && layout.max_time < 1020.0);
        assert_eq!(layout.minute_lines.first(), Some(&0.0));
        assert!(layout.minute_lines.iter().all(|y| *y as u32 % 60 == 0));
        assert!(layout.half_minute_lines.iter().all(|y| *y as u32 % 60 == 30));
        assert_eq!(layout.minute_lines.len(), 17);
        assert_eq!(layout.half_minute_lines.len(), 17);
        assert_eq!(layout.curves[0].label_time, layout.curves[0].end_time);
    }

    #[test]
    fn time_ticks_fall_on_whole_minutes() {
        let sweep = vec![0.0, 1.0e11];
        let layout = FigureLayout::build(&plan(vec![drive("Only", 1.0e8, 0.1)], Vec::new()), &sweep, 0.0, 1.0e11).unwrap();
        let ticks = layout.time_ticks();
        assert_eq!(ticks.first(), Some(&0.0));
        assert!(ticks.windows(2).all(|pair| pair[1] - pair[0] == 60.0));
        assert!(*ticks.last().unwrap() < layout.y_end());
        assert!(*ticks.last().unwrap() + 60.0 >= layout.y_end());
        assert!(ticks.len() >= layout.minute_lines.len());
        assert!((layout.y_end() - layout.max_time * 1.05).abs() < 1e-9);
    }

    #[test]
    fn empty_plans_have_no_layout() {
        assert!(FigureLayout::build(&plan(Vec::new(), Vec::new()), &[0.0, 1.0], 0.0, 1.0).is_none());
        assert!(FigureLayout::build(&plan(vec![drive("A", 1.0e8, 0.1)], Vec::new()), &[], 0.0, 1.0).is_none());
    }

    #[test]
    fn tank_markers_stop_once_past_the_chart() {
        let d = drive("Atlas", 1.65e8, 0.09);
        // 583 -> 6.48e9 m, 1960 -> 2.18e10 m, 6000 -> 6.67e10 m (off chart), 9000 never reached
        let markers = tank_markers(&d, &[583, 1960, 6000, 9000], 6.0e10);
        assert_eq!(markers.len(), 3);
        assert!((markers[0].distance - 583.0 / 0.09 * 1.0e6).abs() < 1e-3);
        assert_eq!(markers[2].distance, 6.0e10);
        assert_eq!(markers[2].index, 2);
        assert_eq!(markers[1].time, d.travel_time(markers[1].distance));
    }

    #[test]
    fn markers_come_from_the_tank_legend() {
        let p = plan(vec![drive("Atlas", 1.65e8, 0.09)], vec![(583, "Most S1 ships".to_string())]);
        let layout = FigureLayout::build(&p, &[0.0, 5.0e10], 0.0, 6.0e10).unwrap();
        assert_eq!(layout.curves[0].tank_markers.len(), 1);
    }

    #[test]
    fn leader_lines_end_at_the_label() {
        let p = plan(vec![drive("Atlas", 1.65e8, 0.09)], Vec::new());
        let layout = FigureLayout::build(&p, &[0.0, 5.0e10], 0.0, 6.0e10).unwrap();
        let line = layout.leader_line(&layout.curves[0]);
        assert_eq!(line[0], (6.0e10, layout.curves[0].end_time));
        assert_eq!(line[2], (6.0e10 + 3.0e9, layout.curves[0].label_time));
    }

    #[test]
    fn dashes_cover_the_line() {
        let dashes = dash_segments((0.0, 0.0), (10.0, 0.0), 2.0, 1.0);
        assert_eq!(dashes.len(), 4);
        assert_eq!(dashes[0], [(0.0, 0.0), (2.0, 0.0)]);
        assert_eq!(dashes[3], [(9.0, 0.0), (10.0, 0.0)]);
        assert_eq!(dash_segments((0.0, 5.0), (0.0, 5.0), 1.0, 1.0).len(), 0);
        let vertical = dash_segments((3.0, 0.0), (3.0, 4.0), 1.0, 1.0);
        assert_eq!(vertical.len(), 2);
        assert!(vertical.iter().all(|[a, b]| a.0 == 3.0 && b.0 == 3.0));
    }
}
