/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Interactive terminal client for server-described plugin UIs.
//!
//! Fetches a plugin's UI tree once from `GET
//! {addr}/plugins/{plugin}/ui`, draws it, and lets the user fill in
//! text inputs and press buttons. Button presses are sent over the
//! server's WebSocket event channel together with every text input
//! value entered so far.
//!
//! Invariants:
//! - **Single thread**: the UI loop, the tree retrieval and the
//!   socket task all run on one current-thread runtime. Input edits
//!   are applied in the order keys arrive, so an event always carries
//!   every edit made before it.
//! - **Loading is terminal on failure**: if retrieval fails the
//!   loading placeholder stays up; the failure is only logged.
//! - **No reconnect**: once the event channel closes, button presses
//!   are dropped for the rest of the session.
//! - **Bounded exit**: on quit the channel is closed and the process
//!   waits at most `--shutdown-grace-ms` for the socket task.
//!
//! ```bash
//! # Terminal 1: run a plugin server on :8000
//! # Terminal 2:
//! cargo run --bin plugin_tui -- --addr 127.0.0.1:8000 --log-file /tmp/plugin_tui.log
//! ```

mod actions;
mod app;
mod client;
mod focus;
mod logging;
mod render;
mod theme;

use std::io;
use std::io::IsTerminal;
use std::time::Duration;

pub(crate) use actions::*;
pub(crate) use app::*;
use clap::Parser;
pub(crate) use client::*;
use crossterm::ExecutableCommand;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
pub(crate) use focus::*;
use plugin_ui::Endpoints;
use plugin_ui::EventChannel;
use plugin_ui::Session;
use plugin_ui::fetch_tree;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
// Re-exports so #[cfg(test)] mod tests can use `use super::*`.
#[allow(unused_imports)]
pub(crate) use render::*;
pub(crate) use theme::*;

// Terminal setup / teardown

/// Put the terminal into "TUI mode".
///
/// Enables raw mode, switches to the alternate screen, and clears it,
/// returning a `ratatui::Terminal` backed by crossterm.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    Ok(terminal)
}

/// Restore the terminal back to normal "shell mode".
///
/// Disables raw mode, leaves the alternate screen, and re-enables the
/// cursor.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Close the session's event channel and wait up to `grace` for the
/// socket task to finish.
async fn shutdown(session: &mut Session, grace: Duration) {
    let Some(task) = session.close() else {
        return;
    };
    match tokio::time::timeout(grace, task).await {
        Ok(Ok(())) => tracing::debug!("event channel task finished"),
        Ok(Err(e)) => tracing::warn!(error = %e, "event channel task failed"),
        Err(_) => tracing::warn!(
            grace_ms = grace.as_millis() as u64,
            "event channel did not close in time"
        ),
    }
}

/// Shut the session down, then report the first failure: the UI
/// loop's own error wins over a failed terminal restore.
///
/// Shutdown always runs, so a terminal that could not be restored
/// still closes the event channel.
async fn teardown(
    session: &mut Session,
    grace: Duration,
    restored: io::Result<()>,
    result: io::Result<()>,
) -> anyhow::Result<()> {
    shutdown(session, grace).await;
    result?;
    restored?;
    Ok(())
}

// Main loop

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if !io::stdout().is_terminal() {
        eprintln!("This TUI requires a real terminal.");
        return Ok(());
    }

    logging::init(args.log_file.as_deref())?;

    let (base_url, client) = build_client(&args.addr)?;
    let endpoints = Endpoints::new(&base_url, &args.plugin, &args.ws_path);
    tracing::info!(
        ui_url = %endpoints.ui_url,
        ws_url = %endpoints.ws_url,
        offline = args.offline,
        "starting plugin tui"
    );

    let (session, notifications) = if args.offline {
        (Session::local(), None)
    } else {
        let (channel, notifications) = EventChannel::connect(&endpoints.ws_url);
        (Session::live(channel), Some(notifications))
    };
    let mut app = App::new(endpoints.clone(), args.plugin.clone(), session, args.theme);
    let retrieval = fetch_tree(&client, &endpoints.ui_url);

    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, &mut app, retrieval, notifications).await;
    let restored = restore_terminal(&mut terminal);

    teardown(
        &mut app.session,
        Duration::from_millis(args.shutdown_grace_ms),
        restored,
        result,
    )
    .await
}

#[cfg(test)]
mod tests;
