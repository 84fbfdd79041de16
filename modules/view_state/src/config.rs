// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use common::position::Position;

/// Start values and bounds of the view state.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewConfig {
    /// Map center before the user picked a location.
    pub default_center: Position,
    /// Name shown for the default center.
    pub default_location: String,
    pub default_radius_miles: f64,
    /// Smallest radius the input layer offers.
    pub min_radius_miles: f64,
    /// Largest radius the input layer offers.
    pub max_radius_miles: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            default_center: Position::new(40.7128, -74.0060),
            default_location: "New York".to_string(),
            default_radius_miles: 10.0,
            min_radius_miles: 1.0,
            max_radius_miles: 50.0,
        }
    }
}

impl ViewConfig {
    pub fn is_radius_in_bounds(&self, radius_miles: f64) -> bool {
        (self.min_radius_miles..=self.max_radius_miles).contains(&radius_miles)
    }
}
