// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! Map view modul of the court finder
//!
//! Renders the published view state on a map through a [`MapAdapter`] and
//! turns marker clicks into events.

use async_trait::async_trait;
use camera::{CameraParams, plan_camera};
use common::{
    entity::{EntityKey, GeoEntity},
    position::Position,
    view::{Screen, ViewSnapshot},
};
use module_core::{Event, EventKind, Module, ModuleCtx, ViewSnapshotPtr};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error};

pub mod camera;
pub mod tracing_adapter;

pub type ClickCallback = Box<dyn Fn(EntityKey) + Send + Sync>;

/// Interface to the map rendering layer.
///
/// The adapter owns the map widget. It only draws what it is told and
/// reports marker clicks through the registered callback.
pub trait MapAdapter {
    /// Replaces all markers with one marker per entity.
    fn set_markers(&mut self, entities: &[GeoEntity]);

    /// Registers the callback invoked with the key of a clicked marker.
    fn on_entity_click(&mut self, callback: ClickCallback);

    /// Animates the camera. A `center` of `None` keeps the current center.
    fn fly_to(&mut self, center: Option<&Position>, params: &CameraParams);
}

/// The `MapView` module keeps a [`MapAdapter`] in sync with the view state.
///
/// The map is only shown on the main screen. Markers are pushed whenever
/// the visible set changes, camera moves follow [`plan_camera`].
pub struct MapView<A> {
    ctx: ModuleCtx,
    adapter: A,
    shown: Option<ViewSnapshotPtr>,
}

impl<A: MapAdapter + Send> MapView<A> {
    pub fn new(ctx: ModuleCtx, mut adapter: A) -> Self {
        let sender = ctx.sender.clone();
        adapter.on_entity_click(Box::new(move |key| {
            debug!("Marker {:?} clicked", key);
            let _ = sender.send(Event {
                kind: EventKind::EntityClickedEvent(Arc::new(key)),
            });
        }));
        MapView {
            ctx,
            adapter,
            shown: None,
        }
    }

    fn render(&mut self, snapshot: ViewSnapshotPtr) {
        if snapshot.screen != Screen::Main {
            if self.shown.take().is_some() {
                debug!("Map hidden on screen {:?}", snapshot.screen);
                self.adapter.set_markers(&[]);
            }
            return;
        }
        let prev = self.shown.as_deref();
        if prev.is_none_or(|prev| !same_entities(prev, &snapshot)) {
            self.adapter.set_markers(&snapshot.visible);
        }
        for camera_move in plan_camera(prev, &snapshot) {
            self.adapter
                .fly_to(camera_move.center.as_ref(), &camera_move.params);
        }
        self.shown = Some(snapshot);
    }
}

fn same_entities(prev: &ViewSnapshot, next: &ViewSnapshot) -> bool {
    prev.visible.len() == next.visible.len()
        && prev
            .visible
            .iter()
            .zip(&next.visible)
            .all(|(a, b)| a.key() == b.key())
}

#[async_trait]
impl<A: MapAdapter + Send> Module for MapView<A> {
    async fn run(&mut self) -> Result<(), ()> {
        loop {
            match self.ctx.receiver.recv().await {
                Ok(event) => match event.kind {
                    EventKind::QuitEvent => break,
                    EventKind::ViewStateChangedEvent(snapshot) => self.render(snapshot),
                    _ => (),
                },
                Err(RecvError::Closed) => {
                    error!("Event bus closed, stopping map view");
                    return Err(());
                }
                Err(e) => error!("Failed to receive event in module MapView. Error: {e}"),
            }
        }
        Ok(())
    }
}
