// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use catalog::{CatalogError, CatalogSource, CatalogStore, load};
use common::{
    catalog::Catalog,
    test_helper::catalog::{get_catalog, get_courts_as_json, get_tournaments_as_json},
};
use module_core::{
    EventBus, EventKind, EventKindType, Module, ModuleCtx, Request, payload_ref,
    test_helper::{stop_module, wait_for_event},
};
use std::{
    fs::{create_dir_all, remove_dir_all, write},
    path::PathBuf,
    time::Duration,
};
use tokio::task::JoinHandle;

fn setup_empty_test_folder(test_folder_name: &str) -> PathBuf {
    let path = PathBuf::from(format!("/tmp/court-finder/{test_folder_name}"));
    let _ = remove_dir_all(&path);
    create_dir_all(&path).unwrap_or_else(|e| {
        panic!(
            "Failed to create test folder {}. Error: {e}",
            path.to_string_lossy()
        )
    });
    path
}

fn setup_catalog_folder(test_folder_name: &str, courts: &str, tournaments: &str) -> PathBuf {
    let path = setup_empty_test_folder(test_folder_name);
    write(path.join("courts.json"), courts).unwrap();
    write(path.join("tournaments.json"), tournaments).unwrap();
    path
}

fn create_module(source: CatalogSource, ctx: ModuleCtx) -> JoinHandle<Result<(), ()>> {
    tokio::spawn(async move {
        let mut store = CatalogStore::new(source, ctx);
        store.run().await
    })
}

async fn request_catalog(event_bus: &EventBus, id: u64) -> (u64, u64, Catalog) {
    let mut rx = event_bus.subscribe();
    event_bus.publish(&EventKind::LoadCatalogRequestEvent(Request::empty_request(id, 22)).into());
    let event = wait_for_event(
        &mut rx,
        Duration::from_millis(100),
        EventKindType::LoadCatalogResponseEvent,
    )
    .await;
    let response = payload_ref!(event.kind, EventKind::LoadCatalogResponseEvent).unwrap();
    (response.id, response.receiver_addr, (*response.data).clone())
}

#[test_log::test(tokio::test)]
pub async fn load_builtin_catalog() {
    let catalog = load(&CatalogSource::Builtin).await.unwrap();
    assert_eq!(get_catalog(), catalog);
}

#[test_log::test(tokio::test)]
pub async fn load_catalog_from_directory() {
    let path = setup_catalog_folder(
        "load_catalog_from_directory",
        get_courts_as_json(),
        "[]",
    );
    let catalog = load(&CatalogSource::Directory(path)).await.unwrap();
    assert_eq!(5, catalog.courts().len());
    assert!(catalog.tournaments().is_empty());
}

#[test_log::test(tokio::test)]
pub async fn missing_file_is_a_read_error() {
    let path = setup_empty_test_folder("missing_file_is_a_read_error");
    write(path.join("courts.json"), get_courts_as_json()).unwrap();
    let result = load(&CatalogSource::Directory(path)).await;
    match result {
        Err(CatalogError::Read { path, .. }) => assert!(path.ends_with("tournaments.json")),
        other => panic!("Expected read error, got {other:?}"),
    }
}

#[test_log::test(tokio::test)]
pub async fn malformed_file_is_a_parse_error() {
    let path = setup_catalog_folder(
        "malformed_file_is_a_parse_error",
        "[{\"id\": 1}]",
        get_tournaments_as_json(),
    );
    let result = load(&CatalogSource::Directory(path)).await;
    assert!(matches!(result, Err(CatalogError::Parse(_))));
}

#[test_log::test(tokio::test)]
pub async fn answers_catalog_request() {
    let event_bus = EventBus::default();
    let mut store = create_module(CatalogSource::Builtin, event_bus.context());

    let (id, receiver_addr, catalog) = request_catalog(&event_bus, 10).await;
    assert_eq!(10, id);
    assert_eq!(22, receiver_addr);
    assert_eq!(get_catalog(), catalog);

    let (id, _, catalog) = request_catalog(&event_bus, 11).await;
    assert_eq!(11, id);
    assert_eq!(get_catalog(), catalog);

    stop_module(&event_bus, &mut store).await;
}

#[test_log::test(tokio::test)]
pub async fn unreadable_source_answers_with_empty_catalog() {
    let event_bus = EventBus::default();
    let path = setup_empty_test_folder("unreadable_source_answers_with_empty_catalog");
    let mut store = create_module(CatalogSource::Directory(path), event_bus.context());

    let (id, _, catalog) = request_catalog(&event_bus, 3).await;
    assert_eq!(3, id);
    assert!(catalog.is_empty());

    stop_module(&event_bus, &mut store).await;
}
