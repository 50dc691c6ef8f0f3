/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! One client session: the input state store, the backend events go
//! to, and the view currently mounted.
//!
//! All interaction with mounted views goes through [`Session`], which
//! lends each view a bus for exactly one call. Nothing else holds a
//! reference to the store.

use tokio::task::JoinHandle;

use crate::bus::EventBus;
use crate::bus::LiveBus;
use crate::bus::LocalBus;
use crate::bus::LocalObserver;
use crate::connection::ChannelNotification;
use crate::connection::ConnectionStatus;
use crate::connection::EventChannel;
use crate::interpret::TextEdit;
use crate::interpret::View;
use crate::interpret::render;
use crate::node::Node;
use crate::store::InputStateStore;

/// Where emitted events go.
pub enum Backend {
    /// A server event channel.
    Live(EventChannel),
    /// No server; events are recorded locally.
    Local(LocalObserver),
}

/// Bus selected by the session's backend.
enum SessionBus<'a> {
    Live(LiveBus<'a>),
    Local(LocalBus<'a>),
}

impl<'a> SessionBus<'a> {
    fn new(store: &'a mut InputStateStore, backend: &'a mut Backend) -> Self {
        match backend {
            Backend::Live(channel) => SessionBus::Live(LiveBus::new(store, channel)),
            Backend::Local(observer) => SessionBus::Local(LocalBus::new(store, observer)),
        }
    }
}

impl EventBus for SessionBus<'_> {
    fn send_event(&mut self, event: &str) {
        match self {
            SessionBus::Live(bus) => bus.send_event(event),
            SessionBus::Local(bus) => bus.send_event(event),
        }
    }

    fn set_text_input_value(&mut self, id: &str, value: &str) {
        match self {
            SessionBus::Live(bus) => bus.set_text_input_value(id, value),
            SessionBus::Local(bus) => bus.set_text_input_value(id, value),
        }
    }
}

pub struct Session {
    store: InputStateStore,
    backend: Backend,
    view: Option<View>,
}

impl Session {
    /// A session sending events over `channel`.
    pub fn live(channel: EventChannel) -> Self {
        Self::with_backend(Backend::Live(channel))
    }

    /// A session with no server behind it.
    pub fn local() -> Self {
        Self::with_backend(Backend::Local(LocalObserver::new()))
    }

    fn with_backend(backend: Backend) -> Self {
        Self {
            store: InputStateStore::new(),
            backend,
            view: None,
        }
    }

    pub fn store(&self) -> &InputStateStore {
        &self.store
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    /// The event channel, for live sessions.
    pub fn channel(&self) -> Option<&EventChannel> {
        match &self.backend {
            Backend::Live(channel) => Some(channel),
            Backend::Local(_) => None,
        }
    }

    /// The local observer, for sessions without a server.
    pub fn observer(&self) -> Option<&LocalObserver> {
        match &self.backend {
            Backend::Live(_) => None,
            Backend::Local(observer) => Some(observer),
        }
    }

    /// Connection status; local sessions have none.
    pub fn status(&self) -> Option<ConnectionStatus> {
        self.channel().map(EventChannel::status)
    }

    /// The mounted view, or `None` while the tree is loading.
    pub fn view(&self) -> Option<&View> {
        self.view.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.view.is_none()
    }

    /// Render `node` and mount the result, replacing any previous
    /// view. The store is left alone.
    pub fn mount(&mut self, node: &Node) {
        tracing::info!(
            nodes = node.count(),
            depth = node.depth(),
            "mounting ui tree"
        );
        self.view = Some(render(node));
    }

    /// Activate the button at `path`. Returns false if there is no
    /// button there.
    pub fn activate(&mut self, path: &[usize]) -> bool {
        let Some(View::Button(button)) = self.view.as_ref().and_then(|view| view.get(path)) else {
            return false;
        };
        let mut bus = SessionBus::new(&mut self.store, &mut self.backend);
        button.activate(&mut bus);
        true
    }

    /// Apply `edit` to the text input at `path`. Returns false if
    /// there is no text input there.
    pub fn edit(&mut self, path: &[usize], edit: TextEdit) -> bool {
        let Some(View::TextInput(input)) = self.view.as_mut().and_then(|view| view.get_mut(path))
        else {
            return false;
        };
        let mut bus = SessionBus::new(&mut self.store, &mut self.backend);
        edit.apply(input, &mut bus);
        true
    }

    /// Feed a channel lifecycle notification into the state machine.
    pub fn apply(&mut self, notification: ChannelNotification) {
        match &mut self.backend {
            Backend::Live(channel) => channel.apply(notification),
            Backend::Local(_) => {
                tracing::debug!(?notification, "ignoring channel notification without a backend")
            }
        }
    }

    /// Begin teardown. Returns the socket task to wait on, if any.
    pub fn close(&mut self) -> Option<JoinHandle<()>> {
        match &mut self.backend {
            Backend::Live(channel) => channel.close(),
            Backend::Local(_) => None,
        }
    }
}
