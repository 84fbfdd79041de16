// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::distance::{distance_between, latitude_arc_miles};
use common::{
    catalog::Catalog,
    criteria::{FilterCriteria, Mode},
    entity::{GeoEntity, Geolocated},
    position::Position,
};

/// Slack for the latitude pre-check so that rounding never rejects an
/// entity the exact haversine test would accept.
const PRECHECK_SLACK_MILES: f64 = 1e-6;

/// Returns `true` if `location` lies within `radius_miles` of `center`.
///
/// The boundary is inclusive: an entity exactly `radius_miles` away passes.
pub fn is_within_radius(center: &Position, location: &Position, radius_miles: f64) -> bool {
    if latitude_arc_miles(center, location) > radius_miles + PRECHECK_SLACK_MILES {
        return false;
    }
    distance_between(center, location) <= radius_miles
}

/// Returns references to the entities that match all filter criteria.
///
/// An entity is kept if both predicates hold:
/// - its great-circle distance to `criteria.center` is at most
///   `criteria.radius_miles`, and
/// - its sport passes `criteria.sport_filter` under the rule of
///   `criteria.mode` (see [`common::criteria::SportFilter::matches`]).
///
/// The result keeps the order of `entities`. No deduplication takes place,
/// ids are expected to be unique already.
///
/// # Parameters
/// - `entities`: The collection to filter.
/// - `criteria`: Mode, sport filter, center and radius of the search.
///
/// # Returns
/// The matching entities, possibly empty. An empty input or a radius that
/// contains nothing is not an error.
pub fn filter_entities<'a, T: Geolocated>(
    entities: &'a [T],
    criteria: &FilterCriteria,
) -> Vec<&'a T> {
    debug_assert!(
        criteria.radius_miles.is_finite() && criteria.radius_miles >= 0.0,
        "radius must be a finite, non-negative number of miles"
    );
    entities
        .iter()
        .filter(|entity| {
            criteria.sport_filter.matches(criteria.mode, entity.sport())
                && is_within_radius(&criteria.center, entity.location(), criteria.radius_miles)
        })
        .collect()
}

/// Filters the collection of the catalog that belongs to `criteria.mode`.
///
/// Tournaments are searched in tournament mode and courts in play mode. The
/// matches are returned as owned [`GeoEntity`]s in catalog order.
pub fn filter_catalog(catalog: &Catalog, criteria: &FilterCriteria) -> Vec<GeoEntity> {
    match criteria.mode {
        Mode::Tournament => filter_entities(catalog.tournaments(), criteria)
            .into_iter()
            .cloned()
            .map(GeoEntity::Tournament)
            .collect(),
        Mode::Play => filter_entities(catalog.courts(), criteria)
            .into_iter()
            .cloned()
            .map(GeoEntity::Court)
            .collect(),
    }
}
