/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Client for server-described plugin UIs.
//!
//! A plugin server describes its UI as a JSON tree of [`Node`]s. The
//! client fetches the tree once ([`retrieval`]), interprets it into
//! interactive [`View`]s ([`interpret`]), and reports user activity
//! back: text input values accumulate in an [`InputStateStore`] and
//! button presses emit events over a WebSocket [`EventChannel`],
//! each carrying a snapshot of the store.
//!
//! [`Session`] ties these together and is what front ends drive.

pub mod bus;
pub mod config;
pub mod connection;
pub mod interpret;
pub mod node;
pub mod retrieval;
pub mod session;
pub mod store;
#[doc(hidden)]
pub mod testing;

pub use bus::EventBus;
pub use bus::EventEnvelope;
pub use config::Endpoints;
pub use connection::ChannelNotification;
pub use connection::ConnectionStatus;
pub use connection::EventChannel;
pub use interpret::TextEdit;
pub use interpret::View;
pub use interpret::render;
pub use node::Node;
pub use retrieval::RetrievalError;
pub use retrieval::fetch_tree;
pub use session::Session;
pub use store::InputStateStore;
