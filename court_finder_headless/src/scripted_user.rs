use algorithm::distance_between;
use async_trait::async_trait;
use common::{
    criteria::{Mode, SportFilter},
    entity::{EntityKey, EntityKind, GeoEntity, Geolocated},
    place::Place,
    view::{Screen, ViewSnapshot},
};
use module_core::{EventKind, Module, ModuleCtx, ViewSnapshotPtr};
use std::{sync::Arc, time::Duration};
use tokio::{
    sync::broadcast::error::RecvError,
    time::{Instant, timeout},
};
use tracing::{debug, error, info, warn};
use view_state::config::ViewConfig;

/// Upper bound for a single step, geocoding over the network included.
const STEP_TIMEOUT: Duration = Duration::from_secs(10);

/// What the scripted user does, taken from the command line.
#[derive(Debug, Clone)]
pub struct Script {
    pub mode: Mode,
    pub sport_filter: SportFilter,
    pub radius_miles: f64,
    pub location: Option<String>,
    pub current_location: bool,
    pub select: Option<String>,
}

/// Plays a user walking through the screens and reports what was found.
///
/// Publishes a `QuitEvent` when done, which stops all other modules.
pub struct ScriptedUser {
    ctx: ModuleCtx,
    script: Script,
    config: ViewConfig,
}

impl ScriptedUser {
    pub fn new(ctx: ModuleCtx, script: Script, config: ViewConfig) -> Self {
        ScriptedUser {
            ctx,
            script,
            config,
        }
    }

    fn publish(&self, kind: EventKind) {
        if let Err(e) = self.ctx.publish_event(kind) {
            error!("Failed to publish event. Error: {}", e);
        }
    }

    /// Waits for the next event that `select` maps to a value.
    async fn next_event<T, F>(&mut self, what: &str, select: F) -> Result<T, ()>
    where
        F: Fn(EventKind) -> Option<T>,
    {
        let deadline = Instant::now() + STEP_TIMEOUT;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match timeout(remaining, self.ctx.receiver.recv()).await {
                Ok(Ok(event)) => {
                    if let Some(value) = select(event.kind) {
                        return Ok(value);
                    }
                }
                Ok(Err(RecvError::Lagged(skipped))) => {
                    warn!("Skipped {} events while waiting for {}", skipped, what)
                }
                Ok(Err(RecvError::Closed)) => {
                    error!("Event bus closed while waiting for {}", what);
                    return Err(());
                }
                Err(_) => {
                    error!("Timed out waiting for {}", what);
                    return Err(());
                }
            }
        }
    }

    async fn next_snapshot<P>(&mut self, what: &str, predicate: P) -> Result<ViewSnapshotPtr, ()>
    where
        P: Fn(&ViewSnapshot) -> bool,
    {
        self.next_event(what, |kind| match kind {
            EventKind::ViewStateChangedEvent(snapshot) if predicate(snapshot.as_ref()) => {
                Some(snapshot)
            }
            _ => None,
        })
        .await
    }

    async fn search_place(&mut self, text: &str) -> Result<Place, ()> {
        self.publish(EventKind::SearchTextChangedEvent(Arc::new(text.to_string())));
        let snapshot = self
            .next_snapshot("search results", |s| !s.searching)
            .await?;
        match snapshot.search_results.first() {
            Some(place) => {
                info!("'{}' resolved to {}", text, place.place_name);
                Ok(place.clone())
            }
            None => {
                error!("No place found for '{}'", text);
                Err(())
            }
        }
    }

    async fn pick_location(&mut self) -> Result<(), ()> {
        if self.script.current_location {
            self.publish(EventKind::UseCurrentLocationEvent);
            let snapshot = self
                .next_snapshot("current location", |s| !s.locating)
                .await?;
            if snapshot.screen != Screen::Main {
                error!("Current location is not available");
                return Err(());
            }
            return Ok(());
        }
        let text = self
            .script
            .location
            .clone()
            .unwrap_or_else(|| self.config.default_location.clone());
        let place = self.search_place(&text).await?;
        self.publish(EventKind::LocationSelectedEvent(Arc::new(place)));
        self.next_snapshot("main screen", |s| s.screen == Screen::Main)
            .await?;
        Ok(())
    }

    async fn play(&mut self) -> Result<(), ()> {
        let catalog = self
            .next_event("catalog", |kind| match kind {
                EventKind::LoadCatalogResponseEvent(response) => Some(response.data.clone()),
                _ => None,
            })
            .await?;
        debug!(
            "Catalog with {} courts and {} tournaments",
            catalog.courts().len(),
            catalog.tournaments().len()
        );

        let mode = self.script.mode;
        self.publish(EventKind::PathSelectedEvent(mode));
        self.next_snapshot("location pick", |s| s.screen == Screen::LocationPick)
            .await?;
        self.pick_location().await?;

        let (sport_filter, radius_miles) = (self.script.sport_filter, self.script.radius_miles);
        self.publish(EventKind::SportFilterChangedEvent(sport_filter));
        self.publish(EventKind::RadiusChangedEvent(radius_miles));
        let mut snapshot = self
            .next_snapshot("filter update", |s| {
                s.sport_filter == sport_filter && s.radius_miles == radius_miles
            })
            .await?;

        if let Some(id) = self.script.select.clone() {
            let kind = match mode {
                Mode::Play => EntityKind::Court,
                Mode::Tournament => EntityKind::Tournament,
            };
            let key = EntityKey::new(kind, &id);
            if snapshot.visible.iter().any(|e| e.key() == key) {
                self.publish(EventKind::EntityClickedEvent(Arc::new(key.clone())));
                snapshot = self
                    .next_snapshot("selection", |s| s.selected().is_some_and(|e| e.key() == key))
                    .await?;
            } else {
                warn!("{:?} {} is not within the search area", kind, id);
            }
        }

        report(&snapshot);
        Ok(())
    }
}

fn report(snapshot: &ViewSnapshot) {
    let what = match snapshot.mode {
        Mode::Play => "courts",
        Mode::Tournament => "tournaments",
    };
    info!(
        "{} {} for {} within {} miles of {}",
        snapshot.visible.len(),
        what,
        snapshot.sport_filter,
        snapshot.radius_miles,
        snapshot.search_location
    );
    for entity in &snapshot.visible {
        let distance = distance_between(&snapshot.map_center, entity.location());
        info!("{:>7.2} mi  {}", distance, entity.name());
    }
    match snapshot.selected() {
        Some(GeoEntity::Court(court)) => info!(
            "Selected {}: {}, {}, {}. {} {} courts, lights: {}, {}",
            court.name,
            court.address,
            court.city,
            court.state,
            court.court_count,
            court.surface,
            if court.lighting { "yes" } else { "no" },
            if court.is_open { "open" } else { "closed" }
        ),
        Some(GeoEntity::Tournament(tournament)) => info!(
            "Selected {}: {} to {}, register by {}, {:?}, ${:.2}, {} of {} spots left{}",
            tournament.name,
            tournament.start_date,
            tournament.end_date,
            tournament.registration_deadline,
            tournament.level,
            tournament.price,
            tournament.spots_available,
            tournament.total_spots,
            if tournament.is_full() { " (full)" } else { "" }
        ),
        None => (),
    }
}

#[async_trait]
impl Module for ScriptedUser {
    async fn run(&mut self) -> Result<(), ()> {
        let result = self.play().await;
        self.publish(EventKind::QuitEvent);
        result
    }
}
