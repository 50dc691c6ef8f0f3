/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! One-shot retrieval of a plugin's UI tree.

use reqwest::StatusCode;

use crate::node::Node;

/// Why a UI tree could not be retrieved.
///
/// None of these are surfaced to the user beyond the log; the front
/// end stays in its loading state.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("request to {0} failed")]
    Request(String, #[source] reqwest::Error),

    #[error("{0} returned HTTP {1}")]
    Status(String, StatusCode),

    #[error("response from {0} is not a valid UI tree")]
    Parse(String, #[source] serde_json::Error),
}

/// Decode a UI tree from its JSON text.
pub fn parse_tree(body: &str) -> Result<Node, serde_json::Error> {
    serde_json::from_str(body)
}

/// `GET url` and decode the body as a [`Node`].
///
/// Issued once per session. There is no retry and no timeout beyond
/// what `client` was built with.
pub async fn fetch_tree(client: &reqwest::Client, url: &str) -> Result<Node, RetrievalError> {
    tracing::debug!(url, "fetching ui tree");
    let resp = client
        .get(url)
        .send()
        .await
        .map_err(|e| RetrievalError::Request(url.to_string(), e))?;
    let status = resp.status();
    if !status.is_success() {
        return Err(RetrievalError::Status(url.to_string(), status));
    }
    let body = resp
        .text()
        .await
        .map_err(|e| RetrievalError::Request(url.to_string(), e))?;
    let node = parse_tree(&body).map_err(|e| RetrievalError::Parse(url.to_string(), e))?;
    tracing::info!(url, nodes = node.count(), "ui tree retrieved");
    Ok(node)
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use super::*;

    #[test]
    fn parses_nested_tree() {
        let node = parse_tree(
            r#"{"name":"rows","props":{},"children":[
                {"name":"text-input","props":{"id":"q"},"children":[]},
                {"name":"button","props":{"label":"Search","onClickEvent":"search"},"children":[]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(node.count(), 3);
        assert_eq!(node.children[0].prop("id"), Some("q"));
    }

    #[test]
    fn mistyped_fields_do_not_fail_the_tree() {
        let node = parse_tree(
            r#"{"name":"rows","props":{},"children":[
                {"name":"text-input","props":{"id":"q"},"children":[]},
                {"name":"button","props":{"label":"Search","onClickEvent":"search","disabled":true},"children":[]},
                {"name":"rows","props":{},"children":null}
            ]}"#,
        )
        .unwrap();
        assert_eq!(node.count(), 4);
        assert_eq!(node.children[1].prop("disabled"), Some("true"));

        let view = crate::render(&node);
        assert_eq!(view.focusable_paths(), vec![vec![0], vec![1]]);
        match view.get(&[1]) {
            Some(crate::View::Button(button)) => {
                assert_eq!(button.label, "Search");
                assert_eq!(button.on_click_event.as_deref(), Some("search"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn rejects_non_object() {
        assert!(parse_tree("[]").is_err());
        assert!(parse_tree("not json").is_err());
    }

    #[test]
    fn error_messages_name_the_url() {
        let err = RetrievalError::Status("http://h/ui".to_string(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "http://h/ui returned HTTP 404 Not Found");

        let parse = parse_tree("{").unwrap_err();
        let err = RetrievalError::Parse("http://h/ui".to_string(), parse);
        assert_eq!(err.to_string(), "response from http://h/ui is not a valid UI tree");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[tokio::test]
    async fn unreachable_server_is_a_request_error() {
        // Bind then drop to get a port nothing listens on.
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let url = format!("http://127.0.0.1:{}/plugins/p/ui", port);
        let err = fetch_tree(&reqwest::Client::new(), &url)
            .await
            .unwrap_err();
        assert!(matches!(err, RetrievalError::Request(ref u, _) if *u == url));
    }
}
