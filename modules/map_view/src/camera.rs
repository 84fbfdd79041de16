// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use common::{entity::Geolocated, position::Position, view::ViewSnapshot};
use std::time::Duration;

/// Target of a camera animation. `None` keeps the current value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraParams {
    pub zoom: f64,
    pub pitch: Option<f64>,
    pub bearing: Option<f64>,
    pub duration: Option<Duration>,
    pub curve: Option<f64>,
}

impl CameraParams {
    /// Close, tilted view on a selected entity.
    pub const SELECTED: CameraParams = CameraParams {
        zoom: 17.0,
        pitch: Some(60.0),
        bearing: Some(45.0),
        duration: Some(Duration::from_millis(2000)),
        curve: Some(1.5),
    };

    /// Top-down view after the selection was cleared.
    pub const RESET: CameraParams = CameraParams {
        zoom: 13.0,
        pitch: Some(0.0),
        bearing: Some(0.0),
        duration: Some(Duration::from_millis(1500)),
        curve: None,
    };

    /// Overview of a new search center.
    pub const RECENTER: CameraParams = CameraParams {
        zoom: 11.0,
        pitch: None,
        bearing: None,
        duration: None,
        curve: None,
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraMove {
    /// `None` animates in place.
    pub center: Option<Position>,
    pub params: CameraParams,
}

/// Plans the camera moves for the transition from `prev` to `next`.
///
/// Moves are meant to be executed in order. `prev` is `None` when the map
/// is shown for the first time.
pub fn plan_camera(prev: Option<&ViewSnapshot>, next: &ViewSnapshot) -> Vec<CameraMove> {
    let prev_selected = prev.and_then(|s| s.selected());
    let next_selected = next.selected();
    let mut moves = vec![];

    match (&prev_selected, &next_selected) {
        (_, Some(entity)) if prev_selected.as_ref().map(|e| e.key()) != Some(entity.key()) => {
            moves.push(CameraMove {
                center: Some(*entity.location()),
                params: CameraParams::SELECTED,
            });
        }
        (Some(_), None) => moves.push(CameraMove {
            center: None,
            params: CameraParams::RESET,
        }),
        _ => (),
    }

    let center_changed = prev.is_none_or(|prev| prev.map_center != next.map_center);
    if center_changed && next_selected.is_none() {
        moves.push(CameraMove {
            center: Some(next.map_center),
            params: CameraParams::RECENTER,
        });
    }
    moves
}
