// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! View state modul of the court finder
//!
//! Drives the [`ViewController`] from user and service events and publishes
//! a [`ViewSnapshot`](common::view::ViewSnapshot) after every transition.

pub mod config;
pub mod controller;
pub mod sequence;

use async_trait::async_trait;
use config::ViewConfig;
use controller::ViewController;
use module_core::{
    EventKind, Module, ModuleCtx, Request, ViewSnapshotPtr, addr,
};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info};

/// The `ViewState` module owns the single [`ViewController`] of the
/// application.
///
/// Every event is handled to completion before the next one is received, so
/// transitions and filter recomputations never interleave.
pub struct ViewState {
    ctx: ModuleCtx,
    controller: ViewController,
}

impl ViewState {
    pub fn new(ctx: ModuleCtx, config: ViewConfig) -> Self {
        ViewState {
            ctx,
            controller: ViewController::new(config),
        }
    }

    fn publish_snapshot(&self) {
        let snapshot = ViewSnapshotPtr::new(self.controller.snapshot());
        let _ = self
            .ctx
            .publish_event(EventKind::ViewStateChangedEvent(snapshot));
    }

    /// Applies `kind` to the controller.
    ///
    /// Returns `true` if the view state may have changed.
    fn handle_event(&mut self, kind: EventKind) -> bool {
        match kind {
            EventKind::LoadCatalogResponseEvent(response) => {
                if response.receiver_addr != addr::VIEW_STATE {
                    return false;
                }
                self.controller.set_catalog(response.data.clone());
            }
            EventKind::PathSelectedEvent(mode) => self.controller.select_path(mode),
            EventKind::LocationSelectedEvent(place) => self.controller.select_location(&place),
            EventKind::BackEvent => self.controller.back(),
            EventKind::ModeSwitchEvent => self.controller.switch_mode(),
            EventKind::EntityClickedEvent(key) => self.controller.click_entity(&key),
            EventKind::RadiusChangedEvent(radius) => self.controller.change_radius(radius),
            EventKind::CenterChangedEvent(center) => self.controller.change_center(center),
            EventKind::SportFilterChangedEvent(filter) => {
                self.controller.change_sport_filter(filter)
            }
            EventKind::SearchTextChangedEvent(text) => {
                if let Some(id) = self.controller.change_search_text(&text) {
                    debug!("Issuing location search {} for '{}'", id, text);
                    let _ = self
                        .ctx
                        .publish_event(EventKind::LocationSearchRequestEvent(Request::new(
                            id,
                            addr::VIEW_STATE,
                            text.to_string(),
                        )));
                }
            }
            EventKind::LocationSearchResponseEvent(response) => {
                if response.receiver_addr != addr::VIEW_STATE {
                    return false;
                }
                return self
                    .controller
                    .apply_search_results(response.id, response.data.clone());
            }
            EventKind::UseCurrentLocationEvent => {
                let id = self.controller.request_current_location();
                debug!("Issuing current location lookup {}", id);
                let _ = self
                    .ctx
                    .publish_event(EventKind::CurrentLocationRequestEvent(
                        Request::empty_request(id, addr::VIEW_STATE),
                    ));
            }
            EventKind::CurrentLocationResponseEvent(response) => {
                if response.receiver_addr != addr::VIEW_STATE {
                    return false;
                }
                return self
                    .controller
                    .apply_current_location(response.id, response.data.clone());
            }
            _ => return false,
        }
        true
    }
}

#[async_trait]
impl Module for ViewState {
    /// Runs the `ViewState` module's main event loop.
    ///
    /// Requests the catalog, publishes the initial snapshot and then handles
    /// events until a `QuitEvent` is received.
    async fn run(&mut self) -> Result<(), ()> {
        let _ = self
            .ctx
            .publish_event(EventKind::LoadCatalogRequestEvent(Request::empty_request(
                0,
                addr::VIEW_STATE,
            )));
        self.publish_snapshot();
        info!("View state started");
        loop {
            match self.ctx.receiver.recv().await {
                Ok(event) => {
                    if let EventKind::QuitEvent = event.kind {
                        break;
                    }
                    if self.handle_event(event.kind) {
                        self.publish_snapshot();
                    }
                }
                Err(RecvError::Closed) => {
                    error!("Event bus closed, stopping view state");
                    return Err(());
                }
                Err(e) => error!("Failed to receive event in module ViewState. Error: {e}"),
            }
        }
        Ok(())
    }
}
