// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::{ClickCallback, MapAdapter, camera::CameraParams};
use common::{
    entity::{GeoEntity, Geolocated},
    position::Position,
};
use tracing::{debug, info};

/// A map without a screen, it logs what a real map would draw.
#[derive(Debug, Default)]
pub struct TracingMapAdapter {
    markers: usize,
}

impl TracingMapAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MapAdapter for TracingMapAdapter {
    fn set_markers(&mut self, entities: &[GeoEntity]) {
        info!("Map shows {} markers, was {}", entities.len(), self.markers);
        for entity in entities {
            let location = entity.location();
            info!(
                "  {:?} marker {} at {:.4}, {:.4}",
                entity.kind(),
                entity.name(),
                location.latitude,
                location.longitude
            );
        }
        self.markers = entities.len();
    }

    // Nothing can be clicked without a screen.
    fn on_entity_click(&mut self, _callback: ClickCallback) {
        debug!("Ignoring click handler");
    }

    fn fly_to(&mut self, center: Option<&Position>, params: &CameraParams) {
        match center {
            Some(center) => info!(
                "Camera flies to {:.4}, {:.4} with zoom {}",
                center.latitude, center.longitude, params.zoom
            ),
            None => info!("Camera zooms to {} in place", params.zoom),
        }
    }
}
