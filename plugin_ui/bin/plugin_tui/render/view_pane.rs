/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use plugin_ui::View;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::List;
use ratatui::widgets::ListItem;
use ratatui::widgets::ListState;
use ratatui::widgets::Paragraph;

use crate::App;

/// Render the mounted view (body pane).
///
/// `rows` containers draw nothing themselves; they only indent their
/// children. Every other view is one line. Until a tree is mounted
/// the pane shows the loading placeholder.
pub(crate) fn render_view(frame: &mut ratatui::Frame<'_>, area: Rect, app: &App) {
    let scheme = &app.theme.scheme;
    let labels = &app.theme.labels;
    let block = Block::default()
        .title(app.plugin.as_str())
        .borders(Borders::ALL)
        .border_style(if app.focus.current().is_some() {
            scheme.border_focused
        } else {
            scheme.border
        });

    let Some(view) = app.session.view() else {
        let loading = Paragraph::new(Span::styled(labels.loading, scheme.loading)).block(block);
        frame.render_widget(loading, area);
        return;
    };

    let mut selected = None;
    let items: Vec<ListItem> = view
        .flatten()
        .into_iter()
        .filter(|row| !matches!(row.view, View::Rows(_)))
        .enumerate()
        .map(|(idx, row)| {
            let focused = app.focus.is_focused(&row.path);
            if focused {
                selected = Some(idx);
            }
            let marker = if focused { labels.focus_caret } else { "  " };
            let indent = "  ".repeat(row.depth.saturating_sub(1));
            let (text, style) = match row.view {
                View::Button(button) => {
                    let style = if button.on_click_event.is_some() {
                        scheme.button
                    } else {
                        scheme.button_disabled
                    };
                    (format!("[ {} ]", button.label), style)
                }
                View::TextInput(input) => {
                    let cursor = if focused { labels.input_cursor } else { "" };
                    (
                        format!("{}{}{}", labels.input_prompt, input.value(), cursor),
                        scheme.input,
                    )
                }
                View::Unknown { .. } => (labels.unknown_element.to_string(), scheme.unknown),
                View::Rows(_) => (String::new(), Style::default()),
            };
            let style = if focused {
                style.patch(scheme.focused)
            } else {
                style
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{}{}", marker, indent), style),
                Span::styled(text, style),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default());
    let mut list_state = ListState::default().with_selected(selected);
    frame.render_stateful_widget(list, area, &mut list_state);
}
