// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! Catalog modul of the court finder
//!
//! Loads the courts and tournaments once and hands them out to every module
//! that requests them.

use async_trait::async_trait;
use common::catalog::Catalog;
use module_core::{EmptyRequestPtr, EventKind, Module, ModuleCtx};
use std::{
    io,
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info};

const COURTS_FILE: &str = "courts.json";
const TOURNAMENTS_FILE: &str = "tournaments.json";

/// Where the catalog is read from.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogSource {
    /// The dataset compiled into the binary.
    Builtin,
    /// A folder containing `courts.json` and `tournaments.json`.
    Directory(PathBuf),
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {source}")]
    Read { path: String, source: io::Error },

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Loads the catalog from `source`.
pub async fn load(source: &CatalogSource) -> Result<Catalog, CatalogError> {
    match source {
        CatalogSource::Builtin => Ok(Catalog::from_json(
            include_str!("../../../assets/catalog/courts.json"),
            include_str!("../../../assets/catalog/tournaments.json"),
        )?),
        CatalogSource::Directory(dir) => {
            let courts = read_file(dir, COURTS_FILE).await?;
            let tournaments = read_file(dir, TOURNAMENTS_FILE).await?;
            Ok(Catalog::from_json(&courts, &tournaments)?)
        }
    }
}

async fn read_file(dir: &Path, name: &str) -> Result<String, CatalogError> {
    let path = dir.join(name);
    tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| CatalogError::Read {
            path: path.to_string_lossy().to_string(),
            source,
        })
}

/// The `CatalogStore` answers catalog requests.
///
/// The catalog is loaded on the first request and shared afterwards. A
/// source that can't be loaded results in an empty catalog, the failure is
/// only logged.
pub struct CatalogStore {
    source: CatalogSource,
    catalog: Option<Arc<Catalog>>,
    ctx: ModuleCtx,
}

impl CatalogStore {
    pub fn new(source: CatalogSource, ctx: ModuleCtx) -> Self {
        info!("Using catalog source {:?}", source);
        CatalogStore {
            source,
            catalog: None,
            ctx,
        }
    }

    async fn catalog(&mut self) -> Arc<Catalog> {
        if let Some(catalog) = &self.catalog {
            return catalog.clone();
        }
        let catalog = match load(&self.source).await {
            Ok(catalog) => {
                info!(
                    "Loaded {} courts and {} tournaments",
                    catalog.courts().len(),
                    catalog.tournaments().len()
                );
                Arc::new(catalog)
            }
            Err(e) => {
                error!("Failed to load catalog from {:?}. Error: {}", self.source, e);
                Arc::new(Catalog::default())
            }
        };
        self.catalog = Some(catalog.clone());
        catalog
    }

    async fn handle_load_request(&mut self, req: &EmptyRequestPtr) {
        let catalog = self.catalog().await;
        debug!("Answering catalog request {} of {}", req.id, req.sender_addr);
        let _ = self
            .ctx
            .publish_event(EventKind::LoadCatalogResponseEvent(req.response(catalog)));
    }
}

#[async_trait]
impl Module for CatalogStore {
    async fn run(&mut self) -> Result<(), ()> {
        loop {
            match self.ctx.receiver.recv().await {
                Ok(event) => match event.kind {
                    EventKind::QuitEvent => break,
                    EventKind::LoadCatalogRequestEvent(req) => self.handle_load_request(&req).await,
                    _ => (),
                },
                Err(RecvError::Closed) => {
                    error!("Event bus closed, stopping catalog store");
                    return Err(());
                }
                Err(e) => error!("Failed to receive event in module CatalogStore. Error: {e}"),
            }
        }
        Ok(())
    }
}
