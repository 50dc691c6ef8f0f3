/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! The two-operation capability surface views use to reach the
//! outside world.
//!
//! Views never own a bus. Each interaction borrows one for its
//! duration: [`LiveBus`] when a server event channel is wired in,
//! [`LocalBus`] when running without a backend. Both write input
//! values into the same [`InputStateStore`]; they differ only in
//! where emitted events go.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::connection::EventChannel;
use crate::store::InputStateStore;

/// What a view may ask of its environment.
pub trait EventBus {
    /// Deliver `event`, together with the full current input state,
    /// to the server. Must not block; delivery failure is absorbed.
    fn send_event(&mut self, event: &str);

    /// Record the full current value of input `id`, replacing any
    /// prior value. No other side effect.
    fn set_text_input_value(&mut self, id: &str, value: &str);
}

/// Outbound wire message: an event plus the input state snapshot
/// taken when it was emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventEnvelope {
    pub event: String,
    pub text_input_states: BTreeMap<String, String>,
}

impl EventEnvelope {
    /// Snapshot `store` into a new envelope for `event`.
    pub fn new(event: &str, store: &InputStateStore) -> Self {
        Self {
            event: event.to_string(),
            text_input_states: store.snapshot(),
        }
    }

    /// Encode as the single JSON object sent per event.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Bus backed by the live event channel.
pub struct LiveBus<'a> {
    store: &'a mut InputStateStore,
    channel: &'a EventChannel,
}

impl<'a> LiveBus<'a> {
    pub fn new(store: &'a mut InputStateStore, channel: &'a EventChannel) -> Self {
        Self { store, channel }
    }
}

impl EventBus for LiveBus<'_> {
    fn send_event(&mut self, event: &str) {
        let envelope = EventEnvelope::new(event, self.store);
        self.channel.send(&envelope);
    }

    fn set_text_input_value(&mut self, id: &str, value: &str) {
        self.store.set(id, value);
    }
}

/// Records events emitted while no backend is connected.
#[derive(Debug, Default)]
pub struct LocalObserver {
    sent: Vec<EventEnvelope>,
}

impl LocalObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything emitted so far, oldest first.
    pub fn sent(&self) -> &[EventEnvelope] {
        &self.sent
    }
}

/// Bus for the degraded, backend-less variant.
///
/// Events go to a [`LocalObserver`] instead of the network; there is
/// no connection status.
pub struct LocalBus<'a> {
    store: &'a mut InputStateStore,
    observer: &'a mut LocalObserver,
}

impl<'a> LocalBus<'a> {
    pub fn new(store: &'a mut InputStateStore, observer: &'a mut LocalObserver) -> Self {
        Self { store, observer }
    }
}

impl EventBus for LocalBus<'_> {
    fn send_event(&mut self, event: &str) {
        let envelope = EventEnvelope::new(event, self.store);
        tracing::info!(
            event = %envelope.event,
            inputs = envelope.text_input_states.len(),
            "event emitted without a backend"
        );
        self.observer.sent.push(envelope);
    }

    fn set_text_input_value(&mut self, id: &str, value: &str) {
        self.store.set(id, value);
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;
    use crate::connection::ChannelNotification;
    use crate::connection::Outbound;

    #[test]
    fn envelope_wire_format() {
        let mut store = InputStateStore::new();
        store.set("q", "hello");
        let json = EventEnvelope::new("search", &store).to_json().unwrap();
        assert_eq!(json, r#"{"event":"search","textInputStates":{"q":"hello"}}"#);
    }

    #[test]
    fn envelope_with_empty_store() {
        let json = EventEnvelope::new("ping", &InputStateStore::new())
            .to_json()
            .unwrap();
        assert_eq!(json, r#"{"event":"ping","textInputStates":{}}"#);
    }

    #[test]
    fn live_bus_snapshots_store_at_send_time() {
        let (mut channel, mut outbound) = EventChannel::test_pair("ws://test/ws");
        channel.apply(ChannelNotification::Opened);
        let mut store = InputStateStore::new();

        let mut bus = LiveBus::new(&mut store, &channel);
        bus.set_text_input_value("a", "1");
        bus.set_text_input_value("b", "2");
        bus.send_event("submit");

        match outbound.try_recv() {
            Ok(Outbound::Frame(frame)) => {
                let envelope: EventEnvelope = serde_json::from_str(&frame).unwrap();
                assert_eq!(envelope.event, "submit");
                assert_eq!(envelope.text_input_states.len(), 2);
                assert_eq!(envelope.text_input_states["a"], "1");
                assert_eq!(envelope.text_input_states["b"], "2");
            }
            other => panic!("expected a frame, got {:?}", other),
        }
        assert!(outbound.try_recv().is_err());
    }

    #[test]
    fn live_bus_still_records_inputs_while_disconnected() {
        let (channel, mut outbound) = EventChannel::test_pair("ws://test/ws");
        let mut store = InputStateStore::new();

        let mut bus = LiveBus::new(&mut store, &channel);
        bus.set_text_input_value("name", "Ada");
        bus.send_event("save");

        assert!(outbound.try_recv().is_err());
        assert_eq!(store.get("name"), Some("Ada"));
    }

    #[test]
    #[traced_test]
    fn local_bus_records_and_logs() {
        let mut store = InputStateStore::new();
        let mut observer = LocalObserver::new();

        let mut bus = LocalBus::new(&mut store, &mut observer);
        bus.set_text_input_value("q", "x");
        bus.send_event("search");
        bus.send_event("search");

        assert_eq!(observer.sent().len(), 2);
        assert_eq!(observer.sent()[0].text_input_states["q"], "x");
        assert!(logs_contain("event emitted without a backend"));
    }
}
