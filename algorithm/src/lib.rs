// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! Geospatial algorithms of the court finder.
//!
//! Pure functions without any I/O: the great-circle distance between two
//! coordinates and the radius/sport filter built on top of it.

pub mod distance;
pub mod filter;

pub use distance::{distance_between, distance_miles};
pub use filter::{filter_catalog, filter_entities, is_within_radius};

#[cfg(test)]
mod tests;
