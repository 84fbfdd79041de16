// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use common::{
    criteria::{Mode, SportFilter},
    entity::{Court, EntityKey, EntityKind, GeoEntity},
    position::Position,
    test_helper::catalog::{get_courts, get_nyc},
    view::{Screen, ViewSnapshot},
};
use map_view::{ClickCallback, MapAdapter, MapView, camera::CameraParams};
use module_core::{
    EventBus, EventKind, EventKindType, Module, ModuleCtx, payload_ref,
    test_helper::{stop_module, wait_for_event},
};
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::task::JoinHandle;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Markers(Vec<String>),
    FlyTo(Option<Position>, CameraParams),
}

#[derive(Clone, Default)]
struct RecordingAdapter {
    calls: Arc<Mutex<Vec<Call>>>,
    on_click: Arc<Mutex<Option<ClickCallback>>>,
}

impl RecordingAdapter {
    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn click(&self, key: EntityKey) {
        let on_click = self.on_click.lock().unwrap();
        (on_click.as_ref().expect("No click handler registered"))(key);
    }

    async fn wait_for_calls(&self, count: usize) -> Vec<Call> {
        for _ in 0..20 {
            let calls = self.calls();
            if calls.len() >= count {
                return calls;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("Expected {count} map calls, got {:?}", self.calls());
    }
}

impl MapAdapter for RecordingAdapter {
    fn set_markers(&mut self, entities: &[GeoEntity]) {
        let ids = entities.iter().map(|e| e.id().to_string()).collect();
        self.calls.lock().unwrap().push(Call::Markers(ids));
    }

    fn on_entity_click(&mut self, callback: ClickCallback) {
        *self.on_click.lock().unwrap() = Some(callback);
    }

    fn fly_to(&mut self, center: Option<&Position>, params: &CameraParams) {
        self.calls
            .lock()
            .unwrap()
            .push(Call::FlyTo(center.copied(), *params));
    }
}

fn create_module(ctx: ModuleCtx, adapter: RecordingAdapter) -> JoinHandle<Result<(), ()>> {
    tokio::spawn(async move {
        let mut map_view = MapView::new(ctx, adapter);
        map_view.run().await
    })
}

fn get_snapshot(screen: Screen, visible: Vec<Court>, selected: Option<Court>) -> ViewSnapshot {
    ViewSnapshot {
        screen,
        mode: Mode::Play,
        search_location: "New York".to_string(),
        search_text: "New York".to_string(),
        map_center: get_nyc(),
        radius_miles: 10.0,
        sport_filter: SportFilter::All,
        selected_court: selected,
        selected_tournament: None,
        visible: visible.into_iter().map(GeoEntity::from).collect(),
        search_results: vec![],
        searching: false,
        locating: false,
    }
}

fn publish_snapshot(event_bus: &EventBus, snapshot: ViewSnapshot) {
    event_bus.publish(&EventKind::ViewStateChangedEvent(Arc::new(snapshot)).into());
}

fn ids(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

#[test_log::test(tokio::test)]
pub async fn shows_markers_and_centers_on_main_screen() {
    let event_bus = EventBus::default();
    let adapter = RecordingAdapter::default();
    let mut map_view = create_module(event_bus.context(), adapter.clone());

    publish_snapshot(&event_bus, get_snapshot(Screen::LocationPick, get_courts(), None));
    publish_snapshot(&event_bus, get_snapshot(Screen::Main, get_courts(), None));

    let calls = adapter.wait_for_calls(2).await;
    assert_eq!(
        vec![
            Call::Markers(ids(&["1", "2", "3", "4", "5"])),
            Call::FlyTo(Some(get_nyc()), CameraParams::RECENTER),
        ],
        calls
    );

    stop_module(&event_bus, &mut map_view).await;
}

#[test_log::test(tokio::test)]
pub async fn markers_follow_visible_set() {
    let event_bus = EventBus::default();
    let adapter = RecordingAdapter::default();
    let mut map_view = create_module(event_bus.context(), adapter.clone());
    let courts = get_courts();

    publish_snapshot(&event_bus, get_snapshot(Screen::Main, courts.clone(), None));
    publish_snapshot(&event_bus, get_snapshot(Screen::Main, courts.clone(), None));
    publish_snapshot(
        &event_bus,
        get_snapshot(Screen::Main, vec![courts[1].clone(), courts[4].clone()], None),
    );

    let calls = adapter.wait_for_calls(3).await;
    assert_eq!(Call::Markers(ids(&["2", "5"])), calls[2]);

    stop_module(&event_bus, &mut map_view).await;
}

#[test_log::test(tokio::test)]
pub async fn selection_moves_camera() {
    let event_bus = EventBus::default();
    let adapter = RecordingAdapter::default();
    let mut map_view = create_module(event_bus.context(), adapter.clone());
    let courts = get_courts();

    publish_snapshot(&event_bus, get_snapshot(Screen::Main, courts.clone(), None));
    publish_snapshot(
        &event_bus,
        get_snapshot(Screen::Main, courts.clone(), Some(courts[0].clone())),
    );
    publish_snapshot(&event_bus, get_snapshot(Screen::Main, courts.clone(), None));

    let calls = adapter.wait_for_calls(4).await;
    assert_eq!(
        Call::FlyTo(Some(courts[0].location), CameraParams::SELECTED),
        calls[2]
    );
    assert_eq!(Call::FlyTo(None, CameraParams::RESET), calls[3]);

    stop_module(&event_bus, &mut map_view).await;
}

#[test_log::test(tokio::test)]
pub async fn marker_click_publishes_entity_clicked() {
    let event_bus = EventBus::default();
    let adapter = RecordingAdapter::default();
    let mut map_view = create_module(event_bus.context(), adapter.clone());
    let mut rx = event_bus.subscribe();

    // The click handler is registered when the module is created.
    publish_snapshot(&event_bus, get_snapshot(Screen::Main, get_courts(), None));
    adapter.wait_for_calls(1).await;
    adapter.click(EntityKey::new(EntityKind::Court, "3"));

    let event = wait_for_event(
        &mut rx,
        Duration::from_millis(100),
        EventKindType::EntityClickedEvent,
    )
    .await;
    let key = payload_ref!(event.kind, EventKind::EntityClickedEvent).unwrap();
    assert_eq!(EntityKey::new(EntityKind::Court, "3"), **key);

    stop_module(&event_bus, &mut map_view).await;
}

#[test_log::test(tokio::test)]
pub async fn leaving_main_screen_clears_markers() {
    let event_bus = EventBus::default();
    let adapter = RecordingAdapter::default();
    let mut map_view = create_module(event_bus.context(), adapter.clone());

    publish_snapshot(&event_bus, get_snapshot(Screen::Main, get_courts(), None));
    publish_snapshot(&event_bus, get_snapshot(Screen::LocationPick, get_courts(), None));

    let calls = adapter.wait_for_calls(3).await;
    assert_eq!(Call::Markers(vec![]), calls[2]);

    stop_module(&event_bus, &mut map_view).await;
}
