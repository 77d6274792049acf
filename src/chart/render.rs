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

use std::path::Path;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontTransform;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use utils::units::{format_metres, format_minutes_seconds};

use crate::chart::{ChartError, FigurePlan};
use crate::chart::layout::{dash_segments, FigureLayout};
use crate::chart::palette::{Palette, GREY10, GREY30, GREY40, GREY60, GREY75, GREY91, GREY98};
use crate::settings::ReferenceDistance;

const FONT: &'static str = "sans-serif";
const HEADER_HEIGHT: i32 = 190;

pub struct Figure<'a> {
    pub plan: &'a FigurePlan,
    pub layout: &'a FigureLayout,
    pub palette: &'a Palette,
    pub reference_distances: &'a [ReferenceDistance],
    pub size: (u32, u32)
}

pub fn write_png(figure: &Figure, path: &Path) -> Result<(), ChartError> {
    let root = BitMapBackend::new(path, figure.size).into_drawing_area();
    draw_figure(&root, figure)
        .and_then(|_| root.present())
        .map_err(|e| ChartError::RenderError(path.display().to_string(), e.to_string()))
}

pub fn write_svg(figure: &Figure, path: &Path) -> Result<(), ChartError> {
    let root = SVGBackend::new(path, figure.size).into_drawing_area();
    draw_figure(&root, figure)
        .and_then(|_| root.present())
        .map_err(|e| ChartError::RenderError(path.display().to_string(), e.to_string()))
}

fn metres_label(x: &f64) -> String {
    format_metres(*x)
}

fn minutes_label(y: &f64) -> String {
    format_minutes_seconds(*y)
}

fn draw_figure<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>,
                                   figure: &Figure) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let layout = figure.layout;
    let (width, _) = figure.size;
    root.fill(&GREY98)?;

    let centred = Pos::new(HPos::Center, VPos::Top);
    root.draw(&Text::new(figure.plan.title.clone(),
                         (width as i32 / 2, 20),
                         (FONT, 48).into_font().color(&GREY10).pos(centred)))?;
    for (idx, line) in figure.plan.subtitle.iter().enumerate() {
        root.draw(&Text::new(line.clone(),
                             (width as i32 / 2, 85 + idx as i32 * 24),
                             (FONT, 20).into_font().color(&GREY30).pos(centred)))?;
    }

    let chart_area = root.margin(HEADER_HEIGHT, 20, 20, 20);
    let y_end = layout.y_end();
    let time_ticks = layout.time_ticks();
    let tick_count = time_ticks.len();
    let mut chart = ChartBuilder::on(&chart_area)
        .set_label_area_size(LabelAreaPosition::Left, 90)
        .set_label_area_size(LabelAreaPosition::Bottom, 60)
        .build_cartesian_2d(layout.x_min..layout.x_end(), (0f64..y_end).with_key_points(time_ticks))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(8)
        .x_label_formatter(&metres_label)
        .y_labels(tick_count)
        .y_label_formatter(&minutes_label)
        .label_style((FONT, 18).into_font().color(&GREY30))
        .axis_style(&GREY60)
        .draw()?;

    chart.draw_series(layout.minute_lines.iter().map(|y| {
        PathElement::new(vec![(layout.x_min, *y), (layout.x_max, *y)], GREY91.stroke_width(1))
    }))?;
    let half_minute_dash = (layout.x_max - layout.x_min) / 400.0;
    chart.draw_series(layout.half_minute_lines.iter()
        .flat_map(|y| dash_segments((layout.x_min, *y), (layout.x_max, *y), half_minute_dash, half_minute_dash))
        .map(|segment| PathElement::new(segment.to_vec(), GREY91.stroke_width(1))))?;

    // reference distances, dotted with the name running up the line
    let dot = y_end / 300.0;
    let distance_font = (FONT, 26).into_font().transform(FontTransform::Rotate270).color(&GREY40);
    for distance in figure.reference_distances {
        let x = distance.metres as f64;
        chart.draw_series(dash_segments((x, 0.0), (x, y_end), dot, dot)
            .into_iter()
            .map(|segment| PathElement::new(segment.to_vec(), GREY40.stroke_width(1))))?;
        chart.draw_series(std::iter::once(Text::new(distance.label.clone(),
                                                    (x - layout.x_max * 0.012, 0.0),
                                                    distance_font.clone())))?;
    }

    for (idx, curve) in layout.curves.iter().enumerate() {
        let colour = figure.palette.colour(idx);
        chart.draw_series(LineSeries::new(curve.points.iter().copied(), colour.stroke_width(2)))?;

        let leader_line = layout.leader_line(curve);
        let leader_dash = layout.label_pad / 20.0;
        chart.draw_series(leader_line.windows(2)
            .flat_map(|pair| dash_segments(pair[0], pair[1], leader_dash, leader_dash))
            .map(|segment| PathElement::new(segment.to_vec(), colour.mix(0.5).stroke_width(1))))?;
        chart.draw_series(std::iter::once(Text::new(
            curve.label.clone(),
            (layout.x_max + layout.label_pad, curve.label_time),
            (FONT, 20).into_font().style(FontStyle::Bold).color(&GREY10).pos(Pos::new(HPos::Left, VPos::Center))
        )))?;

        chart.draw_series(curve.tank_markers.iter().map(|marker| {
            Text::new(marker.index.to_string(),
                      (marker.distance, marker.time),
                      (FONT, 14).into_font().color(&colour).pos(Pos::new(HPos::Center, VPos::Center)))
        }))?;
    }

    if !figure.plan.tank_legend.is_empty() {
        for (idx, (capacity, ships)) in figure.plan.tank_legend.iter().enumerate() {
            chart.draw_series(std::iter::empty::<Circle<(f64, f64), i32>>())?
                .label(format!("{}: {} ({})", idx, capacity, ships))
                .legend(|(x, y)| EmptyElement::at((x, y)));
        }
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .label_font((FONT, 18).into_font().color(&GREY30))
            .background_style(&GREY98)
            .border_style(&GREY75)
            .draw()?;
    }
    Ok(())
}
