// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! Common Modul for the court finder
//!
//! Provides the common data types that are used across every modul: the
//! geo-tagged entities, the catalog holding them, the filter criteria and the
//! view snapshot published by the view state.

pub mod catalog;
pub mod criteria;
pub mod entity;
pub mod place;
pub mod position;
pub mod serde;
pub mod test_helper;
pub mod view;

#[cfg(test)]
mod tests;
