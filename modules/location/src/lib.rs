// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! Location modul of the court finder
//!
//! Provides the interfaces to geocode free text, reverse-geocode positions
//! and determine the device position, plus the [`LocationServices`] module
//! that answers the lookup requests of the view state.

use async_trait::async_trait;
use common::{place::Place, position::Position};
use module_core::{
    EmptyRequestPtr, Event, EventKind, LocationSearchRequestPtr, Module, ModuleCtx,
};
use std::sync::Arc;
use tokio::sync::broadcast::{Sender, error::RecvError};
use tracing::{debug, error, warn};

pub mod constant_location;
pub mod mapbox;
pub mod static_geocoder;

#[derive(Debug, thiserror::Error)]
pub enum GeocodingError {
    #[error("Invalid geocoding url: {0}")]
    InvalidUrl(String),

    #[error("Geocoding request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Geocoding service answered with status {0}")]
    Status(u16),

    #[error("Malformed geocoding response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("No place found")]
    NoResult,
}

#[derive(Debug, thiserror::Error)]
pub enum GeolocationError {
    #[error("Device position is not available")]
    Unavailable,

    #[error("Device position {0:?} is invalid")]
    Invalid(Position),
}

/// Common interface of every geocoding service.
#[async_trait]
pub trait Geocoder {
    /// Returns the places matching `text`, best match first.
    async fn search(&self, text: &str) -> Result<Vec<Place>, GeocodingError>;

    /// Returns the name of the place at `position`.
    async fn reverse_geocode(&self, position: &Position) -> Result<String, GeocodingError>;
}

/// Source of the device position.
#[async_trait]
pub trait GeolocationProvider {
    async fn current_position(&self) -> Result<Position, GeolocationError>;
}

/// The `LocationServices` module answers location search and current
/// location requests.
///
/// Every request is served on its own task, so a slow lookup never blocks
/// the next one. Responses may therefore arrive out of order and carry the
/// id of their request.
pub struct LocationServices<G, P> {
    ctx: ModuleCtx,
    geocoder: Arc<G>,
    geolocation: Arc<P>,
}

impl<G, P> LocationServices<G, P>
where
    G: Geocoder + Send + Sync + 'static,
    P: GeolocationProvider + Send + Sync + 'static,
{
    pub fn new(ctx: ModuleCtx, geocoder: G, geolocation: P) -> Self {
        LocationServices {
            ctx,
            geocoder: Arc::new(geocoder),
            geolocation: Arc::new(geolocation),
        }
    }

    fn handle_search_request(&self, req: LocationSearchRequestPtr) {
        let geocoder = self.geocoder.clone();
        let sender = self.ctx.sender.clone();
        tokio::spawn(async move {
            let places = search(&*geocoder, &req.data).await;
            publish(
                &sender,
                EventKind::LocationSearchResponseEvent(req.response(places)),
            );
        });
    }

    fn handle_current_location_request(&self, req: EmptyRequestPtr) {
        let geocoder = self.geocoder.clone();
        let geolocation = self.geolocation.clone();
        let sender = self.ctx.sender.clone();
        tokio::spawn(async move {
            let place = current_location(&*geocoder, &*geolocation).await;
            publish(
                &sender,
                EventKind::CurrentLocationResponseEvent(req.response(place)),
            );
        });
    }
}

/// Runs a location search. `None` reports a failed lookup.
pub async fn search<G: Geocoder + ?Sized>(geocoder: &G, text: &str) -> Option<Vec<Place>> {
    if text.trim().is_empty() {
        return Some(vec![]);
    }
    match geocoder.search(text).await {
        Ok(places) => {
            debug!("Found {} places for '{}'", places.len(), text);
            Some(places)
        }
        Err(e) => {
            warn!("Location search for '{}' failed. Error: {}", text, e);
            None
        }
    }
}

/// Determines the device position and names it.
///
/// The place is centered on the device position, not on the center of the
/// named area. `None` reports that either step failed.
pub async fn current_location<G, P>(geocoder: &G, geolocation: &P) -> Option<Place>
where
    G: Geocoder + ?Sized,
    P: GeolocationProvider + ?Sized,
{
    let position = geolocation
        .current_position()
        .await
        .inspect_err(|e| warn!("Failed to get device position. Error: {}", e))
        .ok()?;
    let name = geocoder
        .reverse_geocode(&position)
        .await
        .inspect_err(|e| warn!("Failed to name position {:?}. Error: {}", position, e))
        .ok()?;
    debug!("Current location is {} at {:?}", name, position);
    Some(Place::new(&name, position, &name))
}

fn publish(sender: &Sender<Event>, kind: EventKind) {
    if let Err(e) = sender.send(Event { kind }) {
        error!("Failed to publish location response. Error: {}", e);
    }
}

#[async_trait]
impl<G, P> Module for LocationServices<G, P>
where
    G: Geocoder + Send + Sync + 'static,
    P: GeolocationProvider + Send + Sync + 'static,
{
    async fn run(&mut self) -> Result<(), ()> {
        loop {
            match self.ctx.receiver.recv().await {
                Ok(event) => match event.kind {
                    EventKind::QuitEvent => break,
                    EventKind::LocationSearchRequestEvent(req) => self.handle_search_request(req),
                    EventKind::CurrentLocationRequestEvent(req) => {
                        self.handle_current_location_request(req)
                    }
                    _ => (),
                },
                Err(RecvError::Closed) => {
                    error!("Event bus closed, stopping location services");
                    return Err(());
                }
                Err(e) => error!("Failed to receive event in module LocationServices. Error: {e}"),
            }
        }
        Ok(())
    }
}
