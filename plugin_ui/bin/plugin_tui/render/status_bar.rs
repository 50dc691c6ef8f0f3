/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use plugin_ui::View;
use plugin_ui::node::ElementKind;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;

use crate::App;
use crate::theme::ColorScheme;
use crate::theme::Labels;
use crate::theme::ThemeName;

/// Render the top status/header bar.
///
/// Line 1 identifies what is being shown, line 2 the focused control.
pub(crate) fn render_header(frame: &mut ratatui::Frame<'_>, area: Rect, app: &App) {
    let l = &app.theme.labels;
    let scheme = &app.theme.scheme;

    // Line 1: app name • ui url • plugin [• offline] [• theme]
    let mut line1_spans = vec![
        Span::styled(l.app_name, scheme.app_name),
        Span::styled(l.separator, scheme.stat_label),
        Span::styled(&app.endpoints.ui_url, scheme.stat_url),
        Span::styled(l.separator, scheme.stat_label),
        Span::styled(&app.plugin, scheme.stat_label),
    ];
    if app.is_offline() {
        line1_spans.extend(vec![
            Span::styled(l.separator, scheme.stat_label),
            Span::styled(l.offline, scheme.stat_offline),
        ]);
    }
    // Skip the default theme to reduce noise.
    if app.theme_name != ThemeName::Nord {
        line1_spans.extend(vec![
            Span::styled(l.separator, scheme.stat_label),
            Span::styled(format!("theme:{}", app.theme_name), scheme.stat_label),
        ]);
    }

    // Line 2: focused control, once there is a view.
    let mut line2_spans = vec![];
    let focused = app
        .focus
        .current()
        .and_then(|path| app.session.view()?.get(path));
    match focused {
        Some(View::Button(button)) => line2_spans.extend(vec![
            Span::styled(l.focus_caret, scheme.focused),
            Span::styled(ElementKind::Button.name(), scheme.button),
            Span::styled(" ", Style::default()),
            Span::styled(&button.label, scheme.focused),
        ]),
        Some(View::TextInput(input)) => line2_spans.extend(vec![
            Span::styled(l.focus_caret, scheme.focused),
            Span::styled(ElementKind::TextInput.name(), scheme.input),
            Span::styled(" ", Style::default()),
            Span::styled(input.id.as_deref().unwrap_or_default(), scheme.focused),
        ]),
        _ if app.session.view().is_some() && app.focus.len() == 0 => {
            line2_spans.push(Span::styled(l.nothing_focusable, scheme.stat_url));
        }
        _ => {}
    }

    let header = Paragraph::new(vec![Line::from(line1_spans), Line::from(line2_spans)]).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(scheme.border),
    );

    frame.render_widget(header, area);
}

/// Render the bottom help bar showing the keyboard shortcuts.
pub(crate) fn render_footer(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    scheme: &ColorScheme,
    labels: &Labels,
) {
    let footer = Paragraph::new(labels.footer_help_text)
        .style(scheme.footer_help)
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, area);
}
