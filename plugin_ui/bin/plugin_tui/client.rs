/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! `reqwest` client construction for the plugin TUI.
//!
//! `--addr` may be `host:port` (no scheme, plain HTTP) or an explicit
//! `http://...` / `https://...` URL. An explicit scheme is
//! authoritative; it also selects `ws` vs `wss` for the event
//! channel.

use anyhow::Context;

/// Split an address into an optional `http`/`https` scheme and the
/// remaining host part.
///
/// If `addr` starts with `https://` or `http://`, returns
/// `(Some(scheme), rest)`. Otherwise returns `(None, addr)`. The
/// returned `&str` values are slices of `addr`.
pub(crate) fn parse_addr(addr: &str) -> (Option<&str>, &str) {
    if let Some(host) = addr.strip_prefix("https://") {
        (Some("https"), host)
    } else if let Some(host) = addr.strip_prefix("http://") {
        (Some("http"), host)
    } else {
        (None, addr)
    }
}

/// Build the HTTP base URL and client for `addr`.
///
/// No request timeout is configured: a server that accepts the
/// connection and never answers leaves the UI loading.
pub(crate) fn build_client(addr: &str) -> anyhow::Result<(String, reqwest::Client)> {
    let (scheme, host) = parse_addr(addr);
    let scheme = scheme.unwrap_or("http");
    let base_url = format!("{}://{}", scheme, host.trim_end_matches('/'));
    let client = reqwest::Client::builder()
        .user_agent(concat!("plugin-tui/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("building http client")?;
    Ok((base_url, client))
}
