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

//! Closed-form quantum travel time.
//!
//! The motion profile follows "A study on travel time and the underlying physical model of
//! Quantum Drives in Star Citizen" (https://gitlab.com/Erecco/a-study-on-quantum-travel-time).
//! A drive either reaches its speed cap and cruises (trapezoidal velocity profile) or turns
//! around before reaching it, in which case the time comes from the root of a depressed cubic.

/// Fuel requirements in the game data are given per megameter.
pub const METRES_PER_FUEL_REQUIREMENT_UNIT: f64 = 1_000_000.0;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VelocityProfile {
    /// The drive reaches `v_max` and cruises for part of the trip.
    CruiseCapReached,
    /// Cap never reached, single real root (`z > 1`).
    Hyperbolic,
    /// Cap never reached, three real roots (`z <= 1`).
    Trigonometric
}

impl VelocityProfile {
    pub fn classify(v_max: f64, a_1: f64, a_2: f64, d_tot: f64) -> VelocityProfile {
        if critical_distance_deficit(v_max, a_1, a_2, d_tot) >= 0.0 {
            return VelocityProfile::CruiseCapReached;
        }
        match cubic_argument(v_max, a_1, a_2, d_tot) > 1.0 {
            true => VelocityProfile::Hyperbolic,
            false => VelocityProfile::Trigonometric
        }
    }
}

/// Distance remaining once the full accelerate/decelerate ramp has been covered.
/// Non-negative values mean the drive reaches its speed cap.
pub fn critical_distance_deficit(v_max: f64, a_1: f64, a_2: f64, d_tot: f64) -> f64 {
    d_tot - ramp_distance(v_max, a_1, a_2)
}

/// The `z` argument of the cubic solution used when the speed cap is never reached.
pub fn cubic_argument(v_max: f64, a_1: f64, a_2: f64, d_tot: f64) -> f64 {
    (3.0 * (a_2 - a_1).powi(2) * (a_1 + a_2).powi(2) * d_tot)
        / (8.0 * a_1.powi(3) * v_max.powi(2)) - 1.0
}

/// Total time in seconds, spool-up included, to travel `d_tot` metres.
pub fn total_time(v_max: f64, a_1: f64, a_2: f64, d_tot: f64, k: f64) -> f64 {
    match VelocityProfile::classify(v_max, a_1, a_2, d_tot) {
        VelocityProfile::CruiseCapReached => {
            (4.0 * v_max) / (a_1 + a_2)
                + d_tot / v_max
                - ramp_distance(v_max, a_1, a_2) / v_max
                + k
        }
        VelocityProfile::Hyperbolic => {
            // cosh is even so acosh(z) stands in for -ln(z - sqrt(z^2 - 1))
            let z = cubic_argument(v_max, a_1, a_2, d_tot);
            cubic_scale(v_max, a_1, a_2) * (2.0 * (z.acosh() / 3.0).cosh() - 1.0) + k
        }
        VelocityProfile::Trigonometric => {
            let z = cubic_argument(v_max, a_1, a_2, d_tot).clamp(-1.0, 1.0);
            cubic_scale(v_max, a_1, a_2) * (2.0 * (z.acos() / 3.0).cos() - 1.0) + k
        }
    }
}

/// Distance the drive can cover before running dry of a tank holding `capacity` fuel.
pub fn max_range(capacity: f64, fuel_requirement: f64) -> f64 {
    capacity / fuel_requirement * METRES_PER_FUEL_REQUIREMENT_UNIT
}

fn ramp_distance(v_max: f64, a_1: f64, a_2: f64) -> f64 {
    (4.0 * v_max.powi(2) * (2.0 * a_1 + a_2)) / (3.0 * (a_1 + a_2).powi(2))
}

fn cubic_scale(v_max: f64, a_1: f64, a_2: f64) -> f64 {
    (4.0 * a_1 * v_max) / (a_2.powi(2) - a_1.powi(2))
}
