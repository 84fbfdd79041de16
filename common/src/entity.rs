// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::position::Position;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The sport played at a venue or in a tournament.
///
/// Courts may serve both sports, tournaments carry a single sport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    Tennis,
    Pickleball,
    Both,
}

/// Anything with a location and a sport that the filter engine can inspect.
///
/// The filter only ever reads these two properties, every other attribute of
/// a venue is opaque to it.
pub trait Geolocated {
    fn location(&self) -> &Position;
    fn sport(&self) -> Sport;
}

/// A tennis or pickleball court.
///
/// # Example
///
/// ```rust
/// use common::{entity::{Court, Sport}, position::Position};
///
/// let court = Court {
///     id: "1".into(),
///     name: "Central Park Tennis Courts".into(),
///     sport: Sport::Tennis,
///     location: Position::new(40.7829, -73.9654),
///     address: "Central Park, New York, NY".into(),
///     city: "New York".into(),
///     state: "NY".into(),
///     is_open: true,
///     court_count: 4,
///     surface: "Hard".into(),
///     lighting: true,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Court {
    pub id: String,
    pub name: String,
    pub sport: Sport,
    pub location: Position,
    pub address: String,
    pub city: String,
    pub state: String,
    pub is_open: bool,
    pub court_count: u32,
    pub surface: String,
    pub lighting: bool,
}

impl Geolocated for Court {
    fn location(&self) -> &Position {
        &self.location
    }

    fn sport(&self) -> Sport {
        self.sport
    }
}

/// The skill level a tournament is open for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TournamentLevel {
    Beginner,
    Intermediate,
    Advanced,
    All,
}

/// A tournament hosted at a venue.
///
/// Dates are ISO formatted (`YYYY-MM-DD`) in the catalog files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: String,
    pub name: String,
    pub sport: Sport,
    pub location: Position,
    pub address: String,
    pub city: String,
    pub state: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub registration_deadline: NaiveDate,
    pub level: TournamentLevel,
    pub price: f64,
    pub spots_available: u32,
    pub total_spots: u32,
}

impl Tournament {
    pub fn is_full(&self) -> bool {
        self.spots_available == 0
    }
}

impl Geolocated for Tournament {
    fn location(&self) -> &Position {
        &self.location
    }

    fn sport(&self) -> Sport {
        self.sport
    }
}

/// Discriminant of a [`GeoEntity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Court,
    Tournament,
}

/// Identifies a rendered entity, e.g. the target of a marker click.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityKey {
    pub kind: EntityKind,
    pub id: String,
}

impl EntityKey {
    pub fn new(kind: EntityKind, id: &str) -> Self {
        EntityKey {
            kind,
            id: id.to_string(),
        }
    }
}

/// A court or a tournament.
///
/// Serialized with a `kind` discriminant so that consumers never have to
/// guess the variant from the present fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GeoEntity {
    Court(Court),
    Tournament(Tournament),
}

impl GeoEntity {
    pub fn id(&self) -> &str {
        match self {
            GeoEntity::Court(court) => &court.id,
            GeoEntity::Tournament(tournament) => &tournament.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            GeoEntity::Court(court) => &court.name,
            GeoEntity::Tournament(tournament) => &tournament.name,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            GeoEntity::Court(_) => EntityKind::Court,
            GeoEntity::Tournament(_) => EntityKind::Tournament,
        }
    }

    pub fn key(&self) -> EntityKey {
        EntityKey::new(self.kind(), self.id())
    }

    pub fn as_court(&self) -> Option<&Court> {
        match self {
            GeoEntity::Court(court) => Some(court),
            GeoEntity::Tournament(_) => None,
        }
    }

    pub fn as_tournament(&self) -> Option<&Tournament> {
        match self {
            GeoEntity::Tournament(tournament) => Some(tournament),
            GeoEntity::Court(_) => None,
        }
    }
}

impl Geolocated for GeoEntity {
    fn location(&self) -> &Position {
        match self {
            GeoEntity::Court(court) => court.location(),
            GeoEntity::Tournament(tournament) => tournament.location(),
        }
    }

    fn sport(&self) -> Sport {
        match self {
            GeoEntity::Court(court) => court.sport(),
            GeoEntity::Tournament(tournament) => tournament.sport(),
        }
    }
}

impl From<Court> for GeoEntity {
    fn from(court: Court) -> Self {
        GeoEntity::Court(court)
    }
}

impl From<Tournament> for GeoEntity {
    fn from(tournament: Tournament) -> Self {
        GeoEntity::Tournament(tournament)
    }
}
