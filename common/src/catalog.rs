// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::{
    criteria::Mode,
    entity::{Court, GeoEntity, Sport, Tournament},
};
use std::collections::HashSet;

/// The complete set of venues known to the application.
///
/// A catalog is loaded once at startup and never mutated afterwards. Every
/// filter run derives a new collection from it.
///
/// Ids must be unique within each collection and tournaments never carry
/// [`Sport::Both`]. Both conditions are caller preconditions, checked in
/// debug builds only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    courts: Vec<Court>,
    tournaments: Vec<Tournament>,
}

impl Catalog {
    /// Creates a new [`Catalog`] from the given collections.
    ///
    /// # Panics
    ///
    /// In debug builds, if an id occurs twice in one collection or a
    /// tournament is declared for both sports.
    pub fn new(courts: Vec<Court>, tournaments: Vec<Tournament>) -> Self {
        debug_assert!(
            has_unique_ids(courts.iter().map(|c| c.id.as_str())),
            "duplicate court id in catalog"
        );
        debug_assert!(
            has_unique_ids(tournaments.iter().map(|t| t.id.as_str())),
            "duplicate tournament id in catalog"
        );
        debug_assert!(
            tournaments.iter().all(|t| t.sport != Sport::Both),
            "tournaments must carry a single sport"
        );
        Catalog {
            courts,
            tournaments,
        }
    }

    /// Builds a [`Catalog`] from the JSON arrays of courts and tournaments.
    ///
    /// The JSON layout matches the catalog files, e.g. `courts.json` holds an
    /// array of camelCase court objects.
    pub fn from_json(courts: &str, tournaments: &str) -> serde_json::Result<Self> {
        let courts: Vec<Court> = serde_json::from_str(courts)?;
        let tournaments: Vec<Tournament> = serde_json::from_str(tournaments)?;
        Ok(Catalog::new(courts, tournaments))
    }

    pub fn courts(&self) -> &[Court] {
        &self.courts
    }

    pub fn tournaments(&self) -> &[Tournament] {
        &self.tournaments
    }

    /// Returns the collection that is active in `mode`: tournaments in
    /// tournament mode, courts in play mode.
    pub fn entities(&self, mode: Mode) -> Vec<GeoEntity> {
        match mode {
            Mode::Tournament => self
                .tournaments
                .iter()
                .cloned()
                .map(GeoEntity::from)
                .collect(),
            Mode::Play => self.courts.iter().cloned().map(GeoEntity::from).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.courts.is_empty() && self.tournaments.is_empty()
    }
}

fn has_unique_ids<'a>(ids: impl Iterator<Item = &'a str>) -> bool {
    let mut seen = HashSet::new();
    ids.into_iter().all(|id| seen.insert(id))
}
