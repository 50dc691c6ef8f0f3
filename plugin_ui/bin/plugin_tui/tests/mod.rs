/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Integration tests that exercise multiple modules together (App +
//! session + focus + render). Per-module unit tests live in each
//! module's own `#[cfg(test)] mod tests` block.

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;
use plugin_ui::Node;
use plugin_ui::RetrievalError;
use plugin_ui::testing::button;
use plugin_ui::testing::rows;
use plugin_ui::testing::search_form;
use plugin_ui::testing::text_input;
use ratatui::backend::TestBackend;
use reqwest::StatusCode;
use tracing_test::traced_test;

use super::*;

fn offline_app() -> App {
    let endpoints = Endpoints::new("http://localhost:8000", "text-block-plugin", "/ws");
    App::new(
        endpoints,
        "text-block-plugin".to_string(),
        Session::local(),
        ThemeName::Nord,
    )
}

fn mounted(node: Node) -> App {
    let mut app = offline_app();
    app.on_retrieved(Ok(node));
    app
}

fn press(app: &mut App, code: KeyCode) -> KeyResult {
    app.on_key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn type_str(app: &mut App, text: &str) {
    for ch in text.chars() {
        press(app, KeyCode::Char(ch));
    }
}

// Draw one frame into an off-screen buffer and return it as text.
fn draw(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(80, 16)).unwrap();
    terminal.draw(|frame| ui(frame, app)).unwrap();
    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

// Before retrieval completes the body shows the loading placeholder.
#[test]
fn loading_placeholder_before_retrieval() {
    let app = offline_app();
    let screen = draw(&app);
    assert!(screen.contains("Loading..."));
    assert!(screen.contains("http://localhost:8000/plugins/text-block-plugin/ui"));
    assert!(screen.contains("offline"));
}

// A failed retrieval is logged and the placeholder stays.
#[test]
#[traced_test]
fn retrieval_failure_keeps_loading() {
    let mut app = offline_app();
    app.on_retrieved(Err(RetrievalError::Status(
        app.endpoints.ui_url.clone(),
        StatusCode::INTERNAL_SERVER_ERROR,
    )));
    assert!(app.session.is_loading());
    assert!(draw(&app).contains("Loading..."));
    assert!(logs_contain("ui tree retrieval failed"));
}

// Mounting draws every element and focuses the first control.
#[test]
fn mounted_tree_renders_all_elements() {
    let app = mounted(rows([
        text_input("q"),
        Node::new("slider"),
        button("Search", Some("search")),
    ]));
    assert_eq!(app.focus.current(), Some(&[0][..]));
    let screen = draw(&app);
    assert!(screen.contains("[ Search ]"));
    assert!(screen.contains("Unknown element"));
    assert!(screen.contains("text-input q"));
    assert!(!screen.contains("Loading..."));
    assert!(!screen.contains("no controls"));
}

// Typing then pressing the button emits one event with the typed value.
#[test]
fn type_then_press_emits_envelope() {
    let mut app = mounted(search_form());
    type_str(&mut app, "hello");
    assert_eq!(press(&mut app, KeyCode::Tab), KeyResult::FocusChanged);
    assert_eq!(press(&mut app, KeyCode::Enter), KeyResult::Activated);

    let sent = app.session.observer().unwrap().sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].event, "search");
    assert_eq!(sent[0].text_input_states["q"], "hello");
}

// Printable keys, including q and space, edit the focused input.
#[test]
fn printable_keys_edit_instead_of_quitting() {
    let mut app = mounted(search_form());
    type_str(&mut app, "q x");
    assert!(!app.should_quit);
    assert_eq!(press(&mut app, KeyCode::Backspace), KeyResult::Edited);
    assert_eq!(app.session.store().get("q"), Some("q "));
    assert!(draw(&app).contains("> q "));
}

// Esc and Ctrl-C quit.
#[test]
fn escape_and_ctrl_c_quit() {
    let mut app = mounted(search_form());
    assert_eq!(press(&mut app, KeyCode::Esc), KeyResult::Quit);
    assert!(app.should_quit);

    let mut app = offline_app();
    let result = app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert_eq!(result, KeyResult::Quit);
    assert!(app.should_quit);
}

// Focus wraps in both directions.
#[test]
fn focus_wraps_around() {
    let mut app = mounted(search_form());
    press(&mut app, KeyCode::BackTab);
    assert_eq!(app.focus.current(), Some(&[1][..]));
    press(&mut app, KeyCode::Down);
    assert_eq!(app.focus.current(), Some(&[0][..]));
}

// A button without an event does nothing observable.
#[test]
fn button_without_event_sends_nothing() {
    let mut app = mounted(rows([button("Inert", None)]));
    assert_eq!(press(&mut app, KeyCode::Char(' ')), KeyResult::Activated);
    assert!(app.session.observer().unwrap().sent().is_empty());
}

// Keys do nothing before a tree is mounted.
#[test]
fn keys_before_mount_are_noops() {
    let mut app = offline_app();
    assert_eq!(press(&mut app, KeyCode::Tab), KeyResult::None);
    assert_eq!(press(&mut app, KeyCode::Char('a')), KeyResult::None);
    assert_eq!(press(&mut app, KeyCode::Enter), KeyResult::None);
}

// A tree with no controls says so in the header.
#[test]
fn tree_without_controls() {
    let app = mounted(rows([Node::new("image")]));
    assert_eq!(app.focus.len(), 0);
    assert!(draw(&app).contains("no controls"));
}

// A terminal that fails to restore still shuts the event channel down,
// and the restore failure is what the process reports.
#[tokio::test]
async fn restore_failure_still_shuts_down() {
    // Bind then drop to get a port nothing listens on.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let (channel, _notifications) = EventChannel::connect(&format!("ws://127.0.0.1:{}/ws", port));
    let mut session = Session::live(channel);

    let err = teardown(
        &mut session,
        Duration::from_secs(5),
        Err(io::Error::other("restore failed")),
        Ok(()),
    )
    .await
    .unwrap_err();
    assert_eq!(err.to_string(), "restore failed");
    // The socket task was already taken and awaited.
    assert!(session.close().is_none());
}

// The UI loop's error takes precedence over a restore error.
#[tokio::test]
async fn loop_error_wins_over_restore_error() {
    let mut session = Session::local();
    let err = teardown(
        &mut session,
        Duration::from_millis(10),
        Err(io::Error::other("restore failed")),
        Err(io::Error::other("draw failed")),
    )
    .await
    .unwrap_err();
    assert_eq!(err.to_string(), "draw failed");
}
