// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::{position::Position, serde::lng_lat};
use serde::{Deserialize, Serialize};

/// A resolved location, as returned by a geocoding service.
///
/// `center` is transported as a `[lng, lat]` pair, the order geocoding
/// services use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub place_name: String,
    #[serde(with = "lng_lat")]
    pub center: Position,
    #[serde(rename = "text")]
    pub short_name: String,
}

impl Place {
    pub fn new(place_name: &str, center: Position, short_name: &str) -> Self {
        Place {
            place_name: place_name.to_string(),
            center,
            short_name: short_name.to_string(),
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
