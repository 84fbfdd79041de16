// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! Event bus and module infrastructure.
//!
//! Every module owns a [`ModuleCtx`] and runs its own event loop. Modules
//! never call each other, they only exchange [`Event`]s over the
//! [`EventBus`].

use common::{
    catalog::Catalog,
    criteria::{Mode, SportFilter},
    entity::EntityKey,
    place::Place,
    position::Position,
    view::ViewSnapshot,
};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use strum_macros::EnumDiscriminants;
use tokio::sync::broadcast::{self, error::SendError};

/// Bus addresses of the modules that send requests.
pub mod addr {
    pub const VIEW_STATE: u64 = 10;
}

/// A request envelope.
///
/// `id` identifies the request for its sender. Senders that only care about
/// their most recent request use a monotonically increasing `id`, which lets
/// them recognise and drop answers to superseded requests.
#[derive(Clone, Debug, PartialEq)]
pub struct Request<T> {
    pub id: u64,
    pub sender_addr: u64,
    pub data: T,
}

impl<T> Request<T> {
    pub fn new(id: u64, sender_addr: u64, data: T) -> Arc<Self> {
        Arc::new(Request {
            id,
            sender_addr,
            data,
        })
    }

    /// Creates the response to this request.
    pub fn response<R>(&self, data: R) -> Arc<Response<R>> {
        Response::new(self.id, self.sender_addr, data)
    }
}

impl Request<()> {
    /// Creates a request without payload.
    pub fn empty_request(id: u64, sender_addr: u64) -> Arc<Self> {
        Request::new(id, sender_addr, ())
    }
}

/// A response envelope, echoing the `id` of the answered request.
#[derive(Clone, Debug, PartialEq)]
pub struct Response<T> {
    pub id: u64,
    pub receiver_addr: u64,
    pub data: T,
}

impl<T> Response<T> {
    pub fn new(id: u64, receiver_addr: u64, data: T) -> Arc<Self> {
        Arc::new(Response {
            id,
            receiver_addr,
            data,
        })
    }
}

pub type EmptyRequestPtr = Arc<Request<()>>;
pub type LocationSearchRequestPtr = Arc<Request<String>>;
/// `None` reports a failed lookup, `Some(vec![])` a lookup without results.
pub type LocationSearchResponsePtr = Arc<Response<Option<Vec<Place>>>>;
/// `None` reports that the position could not be determined or resolved.
pub type CurrentLocationResponsePtr = Arc<Response<Option<Place>>>;
pub type CatalogResponsePtr = Arc<Response<Arc<Catalog>>>;
pub type PlacePtr = Arc<Place>;
pub type EntityKeyPtr = Arc<EntityKey>;
pub type ViewSnapshotPtr = Arc<ViewSnapshot>;

/// Represents a high-level event in the system.
///
/// Each `Event` wraps an [`EventKind`], which defines the actual type
/// and data carried by the event.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    /// The inner event type and associated data.
    pub kind: EventKind,
}

impl Event {
    pub fn event_type(&self) -> EventKindType {
        EventKindType::from(&self.kind)
    }
}

impl From<EventKind> for Event {
    fn from(kind: EventKind) -> Self {
        Event { kind }
    }
}

/// Enumerates the different kinds of events that can be emitted
/// and transmitted via the [`EventBus`].
///
/// [`EventKindType`] is the payload-free discriminant of every kind and is
/// what tests and response handlers match on.
#[derive(Clone, Debug, PartialEq, EnumDiscriminants)]
#[strum_discriminants(name(EventKindType), derive(Hash))]
pub enum EventKind {
    /// Indicates that a module shall terminate.
    QuitEvent,

    /// The user picked tournaments or play on the landing screen.
    PathSelectedEvent(Mode),

    /// The user picked a resolved location, from a search result or from
    /// the current location.
    LocationSelectedEvent(PlacePtr),

    /// The user navigated back one screen.
    BackEvent,

    /// The user toggled between tournament and play mode.
    ModeSwitchEvent,

    /// The user clicked a rendered entity (marker or list item).
    EntityClickedEvent(EntityKeyPtr),

    /// The user moved the radius slider. Radius in miles.
    RadiusChangedEvent(f64),

    /// The map center moved.
    CenterChangedEvent(Position),

    /// The user changed the sport filter.
    SportFilterChangedEvent(SportFilter),

    /// The text of the location search input changed.
    SearchTextChangedEvent(Arc<String>),

    /// The user asked to use the current device location.
    UseCurrentLocationEvent,

    /// Request to geocode the free-text payload.
    LocationSearchRequestEvent(LocationSearchRequestPtr),

    /// Geocoding results for a [`EventKind::LocationSearchRequestEvent`].
    LocationSearchResponseEvent(LocationSearchResponsePtr),

    /// Request to determine and reverse-geocode the device location.
    CurrentLocationRequestEvent(EmptyRequestPtr),

    /// Answer to a [`EventKind::CurrentLocationRequestEvent`].
    CurrentLocationResponseEvent(CurrentLocationResponsePtr),

    /// Request for the venue catalog.
    LoadCatalogRequestEvent(EmptyRequestPtr),

    /// The venue catalog.
    LoadCatalogResponseEvent(CatalogResponsePtr),

    /// The view state after a handled event.
    ViewStateChangedEvent(ViewSnapshotPtr),
}

/// Returns a reference to the payload of `$kind` if it is the variant
/// `$variant`, `None` otherwise.
///
/// ```
/// use module_core::{EventKind, payload_ref};
///
/// let kind = EventKind::RadiusChangedEvent(5.0);
/// assert_eq!(payload_ref!(kind, EventKind::RadiusChangedEvent), Some(&5.0));
/// assert_eq!(payload_ref!(kind, EventKind::CenterChangedEvent), None);
/// ```
#[macro_export]
macro_rules! payload_ref {
    ($kind:expr, $variant:path) => {
        match &$kind {
            $variant(payload) => Some(payload),
            _ => None,
        }
    };
}

static NEXT_BUS_ID: AtomicUsize = AtomicUsize::new(0);

/// A simple asynchronous event bus for publishing and subscribing to [`Event`]s.
///
/// The event bus uses a [`tokio::sync::broadcast::channel`] under the hood,
/// allowing multiple receivers to listen for the same stream of events.
///
/// Each published event is cloned and distributed to all active subscribers.
/// If no subscribers exist at the time of publication, the event is discarded silently.
pub struct EventBus {
    id: usize,
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new [`EventBus`] with a fixed buffer capacity of 100 messages.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(100);
        EventBus {
            id: NEXT_BUS_ID.fetch_add(1, Ordering::Relaxed),
            sender,
        }
    }

    /// Process wide unique id of this bus.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Subscribes to the event bus and returns a [`broadcast::Receiver`].
    ///
    /// The returned receiver will receive all future events published after the
    /// subscription is created.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    /// Publishes an [`Event`] to all active subscribers.
    ///
    /// If no subscribers exist, the event is discarded silently.
    pub fn publish(&self, event: &Event) {
        let _ = self.sender.send(event.clone());
    }

    /// Creates a [`ModuleCtx`] bound to this [`EventBus`].
    pub fn context(&self) -> ModuleCtx {
        ModuleCtx::new(self)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Defines the common interface for an asynchronous module
/// that can be executed and communicate via the [`EventBus`].
#[async_trait::async_trait]
pub trait Module {
    /// Runs the module asynchronously until a [`EventKind::QuitEvent`]
    /// is received.
    async fn run(&mut self) -> Result<(), ()>;
}

/// Provides a module-scoped context for interacting with the [`EventBus`].
///
/// Each `ModuleCtx` owns both a sender and a receiver. The receiver is
/// created together with the context, so a module does not miss events
/// published between its construction and the start of its event loop.
pub struct ModuleCtx {
    /// The broadcast sender used to publish events.
    pub sender: broadcast::Sender<Event>,

    /// The broadcast receiver used to listen for events.
    pub receiver: broadcast::Receiver<Event>,

    bus_id: usize,
}

impl ModuleCtx {
    /// Constructs a new [`ModuleCtx`] from the given [`EventBus`].
    pub fn new(event_bus: &EventBus) -> Self {
        ModuleCtx {
            sender: event_bus.sender.clone(),
            receiver: event_bus.subscribe(),
            bus_id: event_bus.id,
        }
    }

    pub fn bus_id(&self) -> usize {
        self.bus_id
    }

    /// Publishes an event of the given kind on the bus.
    pub fn publish_event(&self, kind: EventKind) -> Result<(), SendError<Event>> {
        self.sender.send(Event { kind }).map(|_| ())
    }
}

pub mod test_helper;
