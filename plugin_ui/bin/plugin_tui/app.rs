/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use std::future::Future;
use std::io;

use crossterm::event::Event;
use crossterm::event::EventStream;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;
use futures::StreamExt;
use plugin_ui::ChannelNotification;
use plugin_ui::Endpoints;
use plugin_ui::Node;
use plugin_ui::RetrievalError;
use plugin_ui::Session;
use plugin_ui::TextEdit;
use plugin_ui::View;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::Focus;
use crate::KeyResult;
use crate::Theme;
use crate::ThemeName;
use crate::render::ui;

// Application state

/// Runtime state for the plugin TUI.
pub(crate) struct App {
    /// Where the tree came from and where events go.
    pub(crate) endpoints: Endpoints,
    /// Plugin name, shown in the header.
    pub(crate) plugin: String,
    /// Store, backend and mounted view.
    pub(crate) session: Session,
    /// Keyboard focus over the mounted view's controls.
    pub(crate) focus: Focus,
    /// Set when the user requests exit (`Esc` / `Ctrl-C`).
    pub(crate) should_quit: bool,

    /// Visual presentation (colors + labels).
    pub(crate) theme: Theme,
    /// Active theme name (for display in header).
    pub(crate) theme_name: ThemeName,
}

impl App {
    pub(crate) fn new(
        endpoints: Endpoints,
        plugin: String,
        session: Session,
        theme_name: ThemeName,
    ) -> Self {
        Self {
            endpoints,
            plugin,
            session,
            focus: Focus::new(),
            should_quit: false,
            theme: Theme::new(theme_name),
            theme_name,
        }
    }

    pub(crate) fn is_offline(&self) -> bool {
        self.session.channel().is_none()
    }

    /// Mount a retrieved tree. Failures are logged and leave the
    /// loading placeholder in place for the rest of the session.
    pub(crate) fn on_retrieved(&mut self, result: Result<Node, RetrievalError>) {
        match result {
            Ok(node) => {
                self.session.mount(&node);
                if let Some(view) = self.session.view() {
                    self.focus.reset(view);
                }
            }
            Err(e) => {
                tracing::warn!(url = %self.endpoints.ui_url, error = ?e, "ui tree retrieval failed");
            }
        }
    }

    /// Path of the focused control and whether it is a button (as
    /// opposed to a text input).
    fn focused(&self) -> Option<(Vec<usize>, bool)> {
        let path = self.focus.current()?;
        let is_button = matches!(self.session.view()?.get(path)?, View::Button(_));
        Some((path.to_vec(), is_button))
    }

    /// Handle a single keypress.
    ///
    /// Navigation keys move focus between controls; everything else
    /// is routed to the focused control.
    pub(crate) fn on_key(&mut self, key: KeyEvent) -> KeyResult {
        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
                return KeyResult::Quit;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return KeyResult::Quit;
            }
            KeyCode::Tab | KeyCode::Down => {
                return moved(self.focus.next());
            }
            KeyCode::BackTab | KeyCode::Up => {
                return moved(self.focus.prev());
            }
            KeyCode::Home => return moved(self.focus.first()),
            KeyCode::End => return moved(self.focus.last()),
            _ => {}
        }

        let Some((path, is_button)) = self.focused() else {
            return KeyResult::None;
        };
        match (is_button, key.code) {
            (true, KeyCode::Enter | KeyCode::Char(' ')) => {
                self.session.activate(&path);
                KeyResult::Activated
            }
            (false, KeyCode::Backspace) => {
                self.session.edit(&path, TextEdit::Backspace);
                KeyResult::Edited
            }
            (false, KeyCode::Char(ch))
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.session.edit(&path, TextEdit::Insert(ch));
                KeyResult::Edited
            }
            _ => KeyResult::None,
        }
    }
}

fn moved(changed: bool) -> KeyResult {
    if changed {
        KeyResult::FocusChanged
    } else {
        KeyResult::None
    }
}

/// Next lifecycle notification, or pending forever once the channel
/// is gone (or there never was one).
async fn next_notification(
    notifications: &mut Option<UnboundedReceiver<ChannelNotification>>,
) -> Option<ChannelNotification> {
    match notifications {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

/// Drive the main event loop for the plugin TUI.
///
/// Draws every iteration and waits on whichever comes first: a
/// terminal event, the tree retrieval completing, or a channel
/// lifecycle notification. Everything runs on the calling task.
pub(crate) async fn run_app<F>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    retrieval: F,
    mut notifications: Option<UnboundedReceiver<ChannelNotification>>,
) -> io::Result<()>
where
    F: Future<Output = Result<Node, RetrievalError>>,
{
    let mut events = EventStream::new();
    tokio::pin!(retrieval);
    let mut retrieval_done = false;

    loop {
        terminal.draw(|frame| ui(frame, app))?;

        tokio::select! {
            result = &mut retrieval, if !retrieval_done => {
                retrieval_done = true;
                app.on_retrieved(result);
            }
            notification = next_notification(&mut notifications) => {
                match notification {
                    Some(notification) => app.session.apply(notification),
                    None => notifications = None,
                }
            }
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) => {
                        let result = app.on_key(key);
                        tracing::trace!(?result, code = ?key.code, "key handled");
                    }
                    Some(Ok(Event::Resize(_, _))) => {}
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e),
                    None => app.should_quit = true,
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
