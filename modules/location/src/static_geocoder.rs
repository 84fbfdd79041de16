// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::{Geocoder, GeocodingError};
use algorithm::distance_between;
use async_trait::async_trait;
use common::{place::Place, position::Position};

/// An in-memory gazetteer.
///
/// Searches match the place name case-insensitively anywhere in the name.
/// Reverse lookups name the closest known place.
#[derive(Debug, Clone, Default)]
pub struct StaticGeocoder {
    places: Vec<Place>,
}

impl StaticGeocoder {
    pub fn new(places: Vec<Place>) -> Self {
        StaticGeocoder { places }
    }

    /// A few places around New York City.
    pub fn new_york() -> Self {
        StaticGeocoder::new(vec![
            Place::new(
                "New York, New York, United States",
                Position::new(40.7128, -74.0060),
                "New York",
            ),
            Place::new(
                "Brooklyn, New York, United States",
                Position::new(40.6782, -73.9442),
                "Brooklyn",
            ),
            Place::new(
                "Queens, New York, United States",
                Position::new(40.7282, -73.7949),
                "Queens",
            ),
            Place::new(
                "Hoboken, New Jersey, United States",
                Position::new(40.7440, -74.0324),
                "Hoboken",
            ),
            Place::new(
                "New Jersey, United States",
                Position::new(40.0583, -74.4057),
                "New Jersey",
            ),
        ])
    }
}

#[async_trait]
impl Geocoder for StaticGeocoder {
    async fn search(&self, text: &str) -> Result<Vec<Place>, GeocodingError> {
        let needle = text.trim().to_lowercase();
        Ok(self
            .places
            .iter()
            .filter(|place| place.place_name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn reverse_geocode(&self, position: &Position) -> Result<String, GeocodingError> {
        self.places
            .iter()
            .map(|place| (distance_between(position, &place.center), place))
            .min_by(|(a, _), (b, _)| a.total_cmp(b))
            .map(|(_, place)| place.place_name.clone())
            .ok_or(GeocodingError::NoResult)
    }
}
