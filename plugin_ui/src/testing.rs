/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Test helpers shared by unit tests, the TUI tests and the
//! end-to-end suite. Hidden from the docs; not a stable API.

use crate::bus::EventBus;
use crate::node::ID_PROP;
use crate::node::LABEL_PROP;
use crate::node::Node;
use crate::node::ON_CLICK_EVENT_PROP;

/// A single call observed by [`RecordingBus`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusCall {
    SendEvent(String),
    SetTextInputValue(String, String),
}

/// An [`EventBus`] that remembers every call in order.
#[derive(Debug, Default)]
pub struct RecordingBus {
    pub calls: Vec<BusCall>,
}

impl EventBus for RecordingBus {
    fn send_event(&mut self, event: &str) {
        self.calls.push(BusCall::SendEvent(event.to_string()));
    }

    fn set_text_input_value(&mut self, id: &str, value: &str) {
        self.calls
            .push(BusCall::SetTextInputValue(id.to_string(), value.to_string()));
    }
}

/// `rows` container over `children`.
pub fn rows(children: impl IntoIterator<Item = Node>) -> Node {
    children
        .into_iter()
        .fold(Node::new("rows"), |node, child| node.with_child(child))
}

/// Button with a label and an optional event.
pub fn button(label: &str, on_click_event: Option<&str>) -> Node {
    let node = Node::new("button").with_prop(LABEL_PROP, label);
    match on_click_event {
        Some(event) => node.with_prop(ON_CLICK_EVENT_PROP, event),
        None => node,
    }
}

/// Text input keyed by `id`.
pub fn text_input(id: &str) -> Node {
    Node::new("text-input").with_prop(ID_PROP, id)
}

/// The search form used across suites: a `q` field and a button
/// emitting `search`.
pub fn search_form() -> Node {
    rows([text_input("q"), button("Search", Some("search"))])
}
