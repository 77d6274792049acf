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

use plotters::style::RGBColor;
use rand::Rng;
use rand::seq::SliceRandom;
use crate::chart::ChartError;

pub const GREY10: RGBColor = RGBColor(0x1a, 0x1a, 0x1a);
pub const GREY30: RGBColor = RGBColor(0x4d, 0x4d, 0x4d);
pub const GREY40: RGBColor = RGBColor(0x66, 0x66, 0x66);
pub const GREY60: RGBColor = RGBColor(0x99, 0x99, 0x99);
pub const GREY75: RGBColor = RGBColor(0xbf, 0xbf, 0xbf);
pub const GREY91: RGBColor = RGBColor(0xe8, 0xe8, 0xe8);
pub const GREY98: RGBColor = RGBColor(0xfa, 0xfa, 0xfa);

/// `#rrggbb` (leading `#` optional)
pub fn parse_hex_colour(hex: &str) -> Option<RGBColor> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |idx: usize| u8::from_str_radix(&digits[idx..idx + 2], 16).ok();
    Some(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}

#[derive(Clone, Debug)]
pub struct Palette {
    colours: Vec<RGBColor>
}

impl Palette {
    pub fn from_hex(colours: &[String]) -> Result<Palette, ChartError> {
        let colours = colours.iter()
            .map(|hex| parse_hex_colour(hex).ok_or_else(|| ChartError::InvalidColour(hex.clone())))
            .collect::<Result<Vec<RGBColor>, ChartError>>()?;
        if colours.is_empty() {
            return Err(ChartError::InvalidColour(String::from("empty palette")));
        }
        Ok(Palette { colours })
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.colours.shuffle(rng);
    }

    /// Wraps around when there are more drives than colours.
    pub fn colour(&self, idx: usize) -> RGBColor {
        self.colours[idx % self.colours.len()]
    }

    pub fn len(&self) -> usize {
        self.colours.len()
    }
}
