// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::{Event, EventBus, EventKind, EventKindType, ModuleCtx};
use std::{
    collections::HashMap,
    io::ErrorKind,
    sync::{LazyLock, RwLock},
};
use tokio::time::{Instant, timeout};
use tracing::{debug, error};

/// Sends a quit signal to a running module and waits for it to stop gracefully.
///
/// This function publishes a [`QuitEvent`](EventKind::QuitEvent) through the given [`EventBus`],
/// signaling the target module to terminate. It then waits for the module's task
/// to complete within a fixed timeout.
///
/// # Panics
/// This function panics if:
/// - The module does not stop within 100 ms.
/// - The task returns an error (`Err(())`).
pub async fn stop_module(
    event_bus: &EventBus,
    handle: &mut tokio::task::JoinHandle<Result<(), ()>>,
) {
    event_bus.publish(&Event {
        kind: EventKind::QuitEvent,
    });
    timeout(std::time::Duration::from_millis(100), handle)
        .await
        .expect("Module doesn't handle quit event in timeout")
        .expect("Module task panicked")
        .expect("Module returned an error");
}

/// Waits for an [`Event`] of type `exp_event` on `rx`.
///
/// Events of other types are skipped. Returns the first matching event.
///
/// # Panics
///
/// This function panics if no matching event is received within `duration`.
pub async fn wait_for_event(
    rx: &mut tokio::sync::broadcast::Receiver<Event>,
    duration: std::time::Duration,
    exp_event: EventKindType,
) -> Event {
    wait_for_event_matching(rx, duration, exp_event, |_| true).await
}

/// Waits for an [`Event`] of type `exp_event` on `rx` that also satisfies
/// `predicate`.
///
/// # Panics
///
/// This function panics if no matching event is received within `duration`.
pub async fn wait_for_event_matching<P>(
    rx: &mut tokio::sync::broadcast::Receiver<Event>,
    duration: std::time::Duration,
    exp_event: EventKindType,
    predicate: P,
) -> Event
where
    P: Fn(&Event) -> bool,
{
    let deadline = Instant::now() + duration;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            break;
        }
        match timeout(remaining, rx.recv()).await {
            Ok(Ok(event)) if event.event_type() == exp_event && predicate(&event) => {
                return event;
            }
            Ok(Ok(_)) => continue,
            Ok(Err(e)) => debug!("wait_for_event receive error {}", e),
            Err(_) => break,
        }
    }
    panic!("Failed to receive event of type {:?}", exp_event);
}

/// Computes the answer to a request event, `None` to stay silent.
pub type Responder = Box<dyn Fn(&Event) -> Option<Event> + Send + Sync>;

static RESPONSE_HANDLERS_CACHE: LazyLock<RwLock<HashMap<(usize, EventKindType), ResponseHandler>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Registers a new automatic response handler for a given request event type.
///
/// When an incoming event whose discriminant matches `request_type` is received on `ctx`,
/// the predefined `response_event` is sent back through the same context.
///
/// Returns:
/// * `Ok(())` if the handler was successfully registered.
/// * `Err` with `ErrorKind::AlreadyExists` if a handler for `request_type` is already
///   present on the bus of `ctx`.
pub fn register_response_event(
    request_type: EventKindType,
    response_event: Event,
    ctx: ModuleCtx,
) -> Result<(), std::io::Error> {
    register_response_handler(
        request_type,
        Box::new(move |_| Some(response_event.clone())),
        ctx,
    )
}

/// Registers a handler that computes the response from the request event.
///
/// Useful when the response has to echo the request id. Same registration
/// rules as [`register_response_event`].
pub fn register_response_handler(
    request_type: EventKindType,
    responder: Responder,
    ctx: ModuleCtx,
) -> Result<(), std::io::Error> {
    let bus_id = ctx.bus_id();
    let mut cache = RESPONSE_HANDLERS_CACHE
        .write()
        .unwrap_or_else(|e| e.into_inner());
    if cache.contains_key(&(bus_id, request_type)) {
        error!(
            "Response handler for request type {:?} already exists",
            (bus_id, request_type)
        );
        return Err(std::io::Error::new(
            ErrorKind::AlreadyExists,
            format!(
                "Response handler for request type {:?} already exists",
                request_type
            ),
        ));
    }
    cache.insert(
        (bus_id, request_type),
        ResponseHandler::new(ctx, request_type, responder),
    );
    debug!(
        "Registered response handler for request type {:?}",
        request_type
    );
    Ok(())
}

/// Unregisters (removes) a previously registered automatic response handler.
///
/// If no handler exists for `request_type` on the bus, the function is a no-op.
pub fn unregister_response_event(bus_id: usize, request_type: &EventKindType) {
    let mut cache = RESPONSE_HANDLERS_CACHE
        .write()
        .unwrap_or_else(|e| e.into_inner());
    if cache.remove(&(bus_id, *request_type)).is_some() {
        debug!(
            "Unregistered response handler for request type {:?}",
            request_type
        );
    }
}

/// Answers request events in a background task until dropped.
#[derive(Debug)]
struct ResponseHandler {
    handle: tokio::task::JoinHandle<()>,
}

impl ResponseHandler {
    fn new(mut ctx: ModuleCtx, request_type: EventKindType, responder: Responder) -> Self {
        let handle = tokio::spawn(async move {
            loop {
                match ctx.receiver.recv().await {
                    Ok(event) => {
                        if event.event_type() != request_type {
                            continue;
                        }
                        debug!("ResponseHandler received request {:?}", event);
                        if let Some(response) = responder(&event) {
                            let _ = ctx.sender.send(response);
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                    Err(e) => debug!("ResponseHandler failed to receive request. Error: {}", e),
                }
            }
        });
        ResponseHandler { handle }
    }
}

impl Drop for ResponseHandler {
    /// Aborts the background task when the handler is dropped.
    fn drop(&mut self) {
        self.handle.abort();
        debug!("ResponseHandler dropped and background task aborted.");
    }
}
