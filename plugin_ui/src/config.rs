/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Server addressing.
//!
//! Everything is derived from one HTTP base URL: the tree is fetched
//! from `{base}/plugins/{plugin}/ui` and the event channel lives at
//! the same host under `ws_path`, with the scheme mapped
//! `http` → `ws` and `https` → `wss`.

/// Server address used when none is configured.
pub const DEFAULT_ADDR: &str = "localhost:8000";
/// Plugin whose UI is shown by default.
pub const DEFAULT_PLUGIN: &str = "text-block-plugin";
/// Event channel path on the server.
pub const DEFAULT_WS_PATH: &str = "/ws";

/// Resolved URLs for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// `scheme://host[:port]` with no trailing slash.
    pub base_url: String,
    pub ui_url: String,
    pub ws_url: String,
}

impl Endpoints {
    pub fn new(base_url: &str, plugin: &str, ws_path: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let ui_url = format!("{}/plugins/{}/ui", base_url, plugin);
        let ws_base = if let Some(rest) = base_url.strip_prefix("https://") {
            format!("wss://{}", rest)
        } else if let Some(rest) = base_url.strip_prefix("http://") {
            format!("ws://{}", rest)
        } else {
            format!("ws://{}", base_url)
        };
        let ws_path = ws_path.trim_start_matches('/');
        let ws_url = format!("{}/{}", ws_base, ws_path);
        Self {
            base_url,
            ui_url,
            ws_url,
        }
    }
}
