// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::{config::ViewConfig, sequence::RequestSequence};
use algorithm::filter_catalog;
use common::{
    catalog::Catalog,
    criteria::{FilterCriteria, Mode, SportFilter},
    entity::{Court, EntityKey, EntityKind, GeoEntity, Tournament},
    place::Place,
    position::Position,
    view::{Screen, ViewSnapshot},
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The selection and view state machine.
///
/// `ViewController` owns the canonical state of the user interface: the
/// screen, the mode, the search center and radius, the sport filter and the
/// selection. Every transition is a total function; input that does not
/// apply to the current screen is ignored.
///
/// After each transition that can affect the filter result the visible set
/// is recomputed and a selection that dropped out of it is cleared. The
/// selected entity is therefore always part of [`ViewController::visible`].
///
/// The controller performs no I/O. Transitions that need an external
/// service return the id of the request to issue, and the answers come back
/// through [`ViewController::apply_search_results`] and
/// [`ViewController::apply_current_location`]. Only the answer to the most
/// recent request of each kind is applied.
#[derive(Debug)]
pub struct ViewController {
    config: ViewConfig,
    catalog: Arc<Catalog>,
    screen: Screen,
    mode: Mode,
    search_location: String,
    search_text: String,
    map_center: Position,
    radius_miles: f64,
    sport_filter: SportFilter,
    selected_court: Option<Court>,
    selected_tournament: Option<Tournament>,
    visible: Vec<GeoEntity>,
    search_results: Vec<Place>,
    searches: RequestSequence,
    locates: RequestSequence,
}

impl ViewController {
    /// Creates a controller on the landing screen with an empty catalog.
    pub fn new(config: ViewConfig) -> Self {
        ViewController::with_catalog(config, Arc::new(Catalog::default()))
    }

    /// Creates a controller on the landing screen showing `catalog`.
    pub fn with_catalog(config: ViewConfig, catalog: Arc<Catalog>) -> Self {
        let mut controller = ViewController {
            search_location: config.default_location.clone(),
            search_text: config.default_location.clone(),
            map_center: config.default_center,
            radius_miles: config.default_radius_miles,
            config,
            catalog,
            screen: Screen::Landing,
            mode: Mode::default(),
            sport_filter: SportFilter::default(),
            selected_court: None,
            selected_tournament: None,
            visible: vec![],
            search_results: vec![],
            searches: RequestSequence::default(),
            locates: RequestSequence::default(),
        };
        controller.recompute();
        controller
    }

    /// Replaces the catalog, e.g. once the data source answered.
    pub fn set_catalog(&mut self, catalog: Arc<Catalog>) {
        info!(
            "Catalog with {} courts and {} tournaments loaded",
            catalog.courts().len(),
            catalog.tournaments().len()
        );
        self.catalog = catalog;
        self.recompute();
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn map_center(&self) -> Position {
        self.map_center
    }

    pub fn radius_miles(&self) -> f64 {
        self.radius_miles
    }

    pub fn selected_court(&self) -> Option<&Court> {
        self.selected_court.as_ref()
    }

    pub fn selected_tournament(&self) -> Option<&Tournament> {
        self.selected_tournament.as_ref()
    }

    /// The filtered entities of the active mode in catalog order.
    pub fn visible(&self) -> &[GeoEntity] {
        &self.visible
    }

    pub fn search_results(&self) -> &[Place] {
        &self.search_results
    }

    /// `true` while the latest location search has not been answered.
    pub fn is_searching(&self) -> bool {
        self.searches.is_pending()
    }

    /// `true` while the latest current-location lookup has not been answered.
    pub fn is_locating(&self) -> bool {
        self.locates.is_pending()
    }

    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            mode: self.mode,
            sport_filter: self.sport_filter,
            center: self.map_center,
            radius_miles: self.radius_miles,
        }
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            screen: self.screen,
            mode: self.mode,
            search_location: self.search_location.clone(),
            search_text: self.search_text.clone(),
            map_center: self.map_center,
            radius_miles: self.radius_miles,
            sport_filter: self.sport_filter,
            selected_court: self.selected_court.clone(),
            selected_tournament: self.selected_tournament.clone(),
            visible: self.visible.clone(),
            search_results: self.search_results.clone(),
            searching: self.is_searching(),
            locating: self.is_locating(),
        }
    }

    /// Landing → location pick. Sets the mode the user is looking for.
    pub fn select_path(&mut self, mode: Mode) {
        if self.screen != Screen::Landing {
            debug!("Ignoring path selection on screen {:?}", self.screen);
            return;
        }
        self.mode = mode;
        self.screen = Screen::LocationPick;
        self.clear_selection();
        self.recompute();
    }

    /// Location pick → main, or a new search location while on main.
    ///
    /// Moves the map center to the place and closes the search results.
    pub fn select_location(&mut self, place: &Place) {
        match self.screen {
            Screen::Landing => {
                debug!("Ignoring location {} on landing screen", place.place_name);
                return;
            }
            Screen::LocationPick => self.screen = Screen::Main,
            Screen::Main => (),
        }
        info!(
            "Search location {} at {:?}",
            place.place_name, place.center
        );
        self.search_location = place.place_name.clone();
        self.search_text = place.place_name.clone();
        self.search_results.clear();
        self.searches.invalidate();
        self.map_center = place.center;
        self.recompute();
    }

    /// Main → location pick → landing. Clears the selection and drops
    /// pending lookups.
    pub fn back(&mut self) {
        self.screen = match self.screen {
            Screen::Main => Screen::LocationPick,
            Screen::LocationPick | Screen::Landing => Screen::Landing,
        };
        self.clear_selection();
        self.searches.invalidate();
        self.locates.invalidate();
    }

    /// Toggles between tournament and play mode on the main screen.
    ///
    /// Both selections are cleared, a selection never outlives its mode.
    pub fn switch_mode(&mut self) {
        if self.screen != Screen::Main {
            debug!("Ignoring mode switch on screen {:?}", self.screen);
            return;
        }
        self.mode = self.mode.toggled();
        info!("Switched to {} mode", self.mode);
        self.clear_selection();
        self.recompute();
    }

    /// Selects the clicked entity, or clears the selection if it is already
    /// selected.
    ///
    /// Only entities in the visible set can be selected. A click on anything
    /// else, including entities of the inactive mode, is ignored.
    pub fn click_entity(&mut self, key: &EntityKey) {
        if self.screen != Screen::Main {
            debug!("Ignoring click on {:?} on screen {:?}", key, self.screen);
            return;
        }
        let Some(entity) = self.visible.iter().find(|e| e.key() == *key).cloned() else {
            debug!("Ignoring click on {:?}, not visible", key);
            return;
        };
        match entity {
            GeoEntity::Court(court) => {
                let toggle_off = is_same(self.selected_court.as_ref().map(|c| &c.id), &court.id);
                info!(
                    "Court {} {}",
                    court.name,
                    if toggle_off { "deselected" } else { "selected" }
                );
                self.selected_court = (!toggle_off).then_some(court);
            }
            GeoEntity::Tournament(tournament) => {
                let toggle_off = is_same(
                    self.selected_tournament.as_ref().map(|t| &t.id),
                    &tournament.id,
                );
                info!(
                    "Tournament {} {}",
                    tournament.name,
                    if toggle_off { "deselected" } else { "selected" }
                );
                self.selected_tournament = (!toggle_off).then_some(tournament);
            }
        }
    }

    pub fn change_radius(&mut self, radius_miles: f64) {
        debug_assert!(
            self.config.is_radius_in_bounds(radius_miles),
            "radius {radius_miles} outside of the configured bounds"
        );
        self.radius_miles = radius_miles;
        self.recompute();
    }

    pub fn change_center(&mut self, center: Position) {
        debug_assert!(center.is_valid(), "invalid map center {center:?}");
        self.map_center = center;
        self.recompute();
    }

    pub fn change_sport_filter(&mut self, sport_filter: SportFilter) {
        self.sport_filter = sport_filter;
        self.recompute();
    }

    /// Stores the search text.
    ///
    /// Returns the id of the location search to issue, or `None` for blank
    /// text. Blank text clears the results and drops a pending search.
    pub fn change_search_text(&mut self, text: &str) -> Option<u64> {
        self.search_text = text.to_string();
        if text.trim().is_empty() {
            self.search_results.clear();
            self.searches.invalidate();
            return None;
        }
        Some(self.searches.issue())
    }

    /// Applies the answer to location search `id`.
    ///
    /// `None` reports a failed lookup and keeps the previous results.
    /// Returns `false` if the answer is stale and was dropped.
    pub fn apply_search_results(&mut self, id: u64, places: Option<Vec<Place>>) -> bool {
        if !self.searches.complete(id) {
            debug!("Dropping stale location search response {}", id);
            return false;
        }
        match places {
            Some(places) => self.search_results = places,
            None => warn!("Location search {} failed, keeping previous results", id),
        }
        true
    }

    /// Returns the id of the current-location lookup to issue.
    pub fn request_current_location(&mut self) -> u64 {
        self.locates.issue()
    }

    /// Applies the answer to current-location lookup `id`.
    ///
    /// A resolved place is handled like [`ViewController::select_location`].
    /// `None` reports a failed lookup and leaves the state unchanged.
    /// Returns `false` if the answer is stale and was dropped.
    pub fn apply_current_location(&mut self, id: u64, place: Option<Place>) -> bool {
        if !self.locates.complete(id) {
            debug!("Dropping stale current location response {}", id);
            return false;
        }
        match place {
            Some(place) => self.select_location(&place),
            None => warn!("Current location lookup {} failed", id),
        }
        true
    }

    fn clear_selection(&mut self) {
        self.selected_court = None;
        self.selected_tournament = None;
    }

    fn recompute(&mut self) {
        self.visible = filter_catalog(&self.catalog, &self.criteria());
        debug!(
            "{} of {} entities visible",
            self.visible.len(),
            match self.mode {
                Mode::Play => self.catalog.courts().len(),
                Mode::Tournament => self.catalog.tournaments().len(),
            }
        );
        if let Some(court) = &self.selected_court
            && !contains(&self.visible, EntityKind::Court, &court.id)
        {
            info!("Selected court {} left the filtered set", court.name);
            self.selected_court = None;
        }
        if let Some(tournament) = &self.selected_tournament
            && !contains(&self.visible, EntityKind::Tournament, &tournament.id)
        {
            info!("Selected tournament {} left the filtered set", tournament.name);
            self.selected_tournament = None;
        }
    }
}

fn is_same(selected: Option<&String>, id: &str) -> bool {
    selected.is_some_and(|selected| selected == id)
}

fn contains(entities: &[GeoEntity], kind: EntityKind, id: &str) -> bool {
    entities.iter().any(|e| e.kind() == kind && e.id() == id)
}
