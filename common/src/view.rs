// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::{
    criteria::{Mode, SportFilter},
    entity::{Court, GeoEntity, Tournament},
    place::Place,
    position::Position,
};
use serde::{Deserialize, Serialize};

/// The screen the user is currently looking at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Screen {
    /// Choosing between tournaments and play.
    #[default]
    Landing,
    /// Choosing the search location.
    LocationPick,
    /// Map and list of the filtered venues.
    Main,
}

/// An immutable copy of the view state after a transition.
///
/// Snapshots are what the rendering side consumes. `visible` already holds
/// the filtered entities of the active mode in catalog order. A selected
/// entity is always part of `visible`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSnapshot {
    pub screen: Screen,
    pub mode: Mode,
    pub search_location: String,
    pub search_text: String,
    pub map_center: Position,
    pub radius_miles: f64,
    pub sport_filter: SportFilter,
    pub selected_court: Option<Court>,
    pub selected_tournament: Option<Tournament>,
    pub visible: Vec<GeoEntity>,
    pub search_results: Vec<Place>,
    pub searching: bool,
    pub locating: bool,
}

impl ViewSnapshot {
    /// Returns the selection that belongs to the active mode.
    pub fn selected(&self) -> Option<GeoEntity> {
        match self.mode {
            Mode::Play => self.selected_court.clone().map(GeoEntity::Court),
            Mode::Tournament => self
                .selected_tournament
                .clone()
                .map(GeoEntity::Tournament),
        }
    }

    pub fn visible_ids(&self) -> Vec<&str> {
        self.visible.iter().map(|e| e.id()).collect()
    }
}
