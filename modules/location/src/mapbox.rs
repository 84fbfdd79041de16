// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::{Geocoder, GeocodingError};
use async_trait::async_trait;
use common::{place::Place, position::Position};
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.mapbox.com/geocoding/v5/mapbox.places/";

/// Country the forward search is restricted to.
const COUNTRY: &str = "US";
/// Feature types the forward search returns, cities and states.
const TYPES: &str = "place,region";
const TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Place>,
}

/// Parses a Mapbox places response into its features.
pub fn parse_features(json: &str) -> Result<Vec<Place>, GeocodingError> {
    let collection: FeatureCollection = serde_json::from_str(json)?;
    Ok(collection.features)
}

/// Geocoder backed by the Mapbox places API.
pub struct MapboxGeocoder {
    client: Client,
    base_url: Url,
    access_token: String,
}

impl MapboxGeocoder {
    pub fn new(access_token: &str) -> Result<Self, GeocodingError> {
        MapboxGeocoder::with_base_url(DEFAULT_BASE_URL, access_token)
    }

    /// Creates a geocoder that sends its requests to `base_url` instead of
    /// the public Mapbox endpoint.
    pub fn with_base_url(base_url: &str, access_token: &str) -> Result<Self, GeocodingError> {
        let base_url =
            Url::parse(base_url).map_err(|e| GeocodingError::InvalidUrl(e.to_string()))?;
        let client = Client::builder().timeout(TIMEOUT).build()?;
        Ok(MapboxGeocoder {
            client,
            base_url,
            access_token: access_token.to_string(),
        })
    }

    /// The forward search url for `text`.
    pub fn search_url(&self, text: &str) -> Result<Url, GeocodingError> {
        let mut url = self.places_url(&format!("{}.json", text.trim()))?;
        url.query_pairs_mut()
            .append_pair("access_token", &self.access_token)
            .append_pair("country", COUNTRY)
            .append_pair("types", TYPES);
        Ok(url)
    }

    /// The reverse lookup url for `position`.
    pub fn reverse_url(&self, position: &Position) -> Result<Url, GeocodingError> {
        let mut url = self.places_url(&format!(
            "{},{}.json",
            position.longitude, position.latitude
        ))?;
        url.query_pairs_mut()
            .append_pair("access_token", &self.access_token);
        Ok(url)
    }

    fn places_url(&self, segment: &str) -> Result<Url, GeocodingError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GeocodingError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(segment);
        Ok(url)
    }

    async fn features(&self, url: Url) -> Result<Vec<Place>, GeocodingError> {
        debug!("Requesting {}", url.path());
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GeocodingError::Status(status.as_u16()));
        }
        let body = response.text().await?;
        parse_features(&body)
    }
}

#[async_trait]
impl Geocoder for MapboxGeocoder {
    async fn search(&self, text: &str) -> Result<Vec<Place>, GeocodingError> {
        self.features(self.search_url(text)?).await
    }

    async fn reverse_geocode(&self, position: &Position) -> Result<String, GeocodingError> {
        self.features(self.reverse_url(position)?)
            .await?
            .into_iter()
            .next()
            .map(|place| place.place_name)
            .ok_or(GeocodingError::NoResult)
    }
}
