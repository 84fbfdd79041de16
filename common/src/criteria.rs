// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::{entity::Sport, position::Position};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Top-level context of the application.
///
/// The mode decides which collection of the catalog is shown and which
/// sport-matching rule applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Tournament,
    #[default]
    Play,
}

impl Mode {
    /// Returns the other mode.
    pub fn toggled(self) -> Self {
        match self {
            Mode::Tournament => Mode::Play,
            Mode::Play => Mode::Tournament,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Tournament => write!(f, "tournament"),
            Mode::Play => write!(f, "play"),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tournament" => Ok(Mode::Tournament),
            "play" => Ok(Mode::Play),
            other => Err(format!("unknown mode '{other}'")),
        }
    }
}

/// The sport selection of the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SportFilter {
    #[default]
    All,
    Tennis,
    Pickleball,
}

impl SportFilter {
    /// Decides whether an entity of `sport` passes this filter in `mode`.
    ///
    /// In tournament mode the sport has to match exactly. In play mode a
    /// court serving both sports matches either single-sport filter.
    ///
    /// # Example
    ///
    /// ```rust
    /// use common::{criteria::{Mode, SportFilter}, entity::Sport};
    ///
    /// assert!(SportFilter::Pickleball.matches(Mode::Play, Sport::Both));
    /// assert!(!SportFilter::Pickleball.matches(Mode::Tournament, Sport::Tennis));
    /// ```
    pub fn matches(self, mode: Mode, sport: Sport) -> bool {
        let exact = match self {
            SportFilter::All => return true,
            SportFilter::Tennis => sport == Sport::Tennis,
            SportFilter::Pickleball => sport == Sport::Pickleball,
        };
        match mode {
            Mode::Tournament => exact,
            Mode::Play => exact || sport == Sport::Both,
        }
    }
}

impl fmt::Display for SportFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SportFilter::All => write!(f, "all"),
            SportFilter::Tennis => write!(f, "tennis"),
            SportFilter::Pickleball => write!(f, "pickleball"),
        }
    }
}

impl FromStr for SportFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(SportFilter::All),
            "tennis" => Ok(SportFilter::Tennis),
            "pickleball" => Ok(SportFilter::Pickleball),
            other => Err(format!("unknown sport filter '{other}'")),
        }
    }
}

/// The criteria a filter run is evaluated against.
///
/// Rebuilt from the view state on every recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub mode: Mode,
    pub sport_filter: SportFilter,
    pub center: Position,
    pub radius_miles: f64,
}
