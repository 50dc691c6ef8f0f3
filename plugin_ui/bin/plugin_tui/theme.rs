/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use clap::Parser;
use clap::ValueEnum;
use plugin_ui::config::DEFAULT_ADDR;
use plugin_ui::config::DEFAULT_PLUGIN;
use plugin_ui::config::DEFAULT_WS_PATH;
use plugin_ui::interpret::UNKNOWN_ELEMENT_TEXT;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;

/// Selectable color theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum ThemeName {
    /// Nord, an arctic north-bluish palette.
    #[default]
    Nord,
    /// doom-nord-light, for light terminal backgrounds.
    DoomNordLight,
}

impl std::fmt::Display for ThemeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeName::Nord => write!(f, "nord"),
            ThemeName::DoomNordLight => write!(f, "doom-nord-light"),
        }
    }
}

/// Command-line arguments for the plugin TUI.
///
/// Every option can also come from the environment.
#[derive(Debug, Parser)]
#[command(name = "plugin-tui", about = "Terminal client for server-described plugin UIs")]
pub(crate) struct Args {
    /// Plugin server address (e.g., 127.0.0.1:8000 or https://host)
    #[arg(long, short, env = "PLUGIN_UI_ADDR", default_value = DEFAULT_ADDR)]
    pub(crate) addr: String,

    /// Plugin whose UI to show
    #[arg(long, short, env = "PLUGIN_UI_PLUGIN", default_value = DEFAULT_PLUGIN)]
    pub(crate) plugin: String,

    /// Event channel path on the server
    #[arg(long, env = "PLUGIN_UI_WS_PATH", default_value = DEFAULT_WS_PATH)]
    pub(crate) ws_path: String,

    /// Do not open an event channel; button events are only logged
    #[arg(long)]
    pub(crate) offline: bool,

    /// Color theme
    #[arg(long, default_value_t = ThemeName::Nord, value_enum)]
    pub(crate) theme: ThemeName,

    /// Write logs to this file (filtered by RUST_LOG); logging is off
    /// without it
    #[arg(long, env = "PLUGIN_UI_LOG_FILE")]
    pub(crate) log_file: Option<String>,

    /// How long to wait for the event channel to close on exit
    #[arg(long, default_value_t = 1000)]
    pub(crate) shutdown_grace_ms: u64,
}

/// All user-visible text in the TUI.
pub(crate) struct Labels {
    pub(crate) app_name: &'static str,
    pub(crate) separator: &'static str,
    pub(crate) focus_caret: &'static str,
    pub(crate) input_prompt: &'static str,
    pub(crate) input_cursor: &'static str,
    pub(crate) loading: &'static str,
    pub(crate) unknown_element: &'static str,
    pub(crate) offline: &'static str,
    pub(crate) nothing_focusable: &'static str,
    pub(crate) footer_help_text: &'static str,
}

impl Labels {
    pub(crate) fn en() -> Self {
        Self {
            app_name: "plugin-ui",
            separator: " • ",
            focus_caret: "▸ ",
            input_prompt: "> ",
            input_cursor: "▏",
            loading: "Loading...",
            unknown_element: UNKNOWN_ELEMENT_TEXT,
            offline: "offline",
            nothing_focusable: "no controls",
            footer_help_text: "Esc: quit | Tab/↓: next | Shift-Tab/↑: previous | Enter/Space: press | type to edit",
        }
    }
}

/// Color scheme for the TUI.
///
/// Each field is a semantic role; themes assign concrete colors.
pub(crate) struct ColorScheme {
    // UI chrome
    pub(crate) app_name: Style,
    pub(crate) border: Style,
    pub(crate) border_focused: Style,
    pub(crate) footer_help: Style,

    // Header stats
    pub(crate) stat_url: Style,
    pub(crate) stat_label: Style,
    pub(crate) stat_offline: Style,

    // Elements
    pub(crate) button: Style,
    pub(crate) button_disabled: Style,
    pub(crate) input: Style,
    pub(crate) unknown: Style,
    pub(crate) focused: Style,
    pub(crate) loading: Style,
}

impl ColorScheme {
    /// Nord color scheme (https://www.nordtheme.com/).
    pub(crate) fn nord() -> Self {
        // Polar Night
        let polar3 = Color::Rgb(76, 86, 106); // #4C566A
        // Snow Storm
        let snow0 = Color::Rgb(216, 222, 233); // #D8DEE9
        let snow2 = Color::Rgb(236, 239, 244); // #ECEFF4
        // Frost
        let frost_cyan = Color::Rgb(136, 192, 208); // #88C0D0
        let frost_blue = Color::Rgb(129, 161, 193); // #81A1C1
        // Aurora
        let aurora_orange = Color::Rgb(208, 135, 112); // #D08770
        let aurora_yellow = Color::Rgb(235, 203, 139); // #EBCB8B
        let aurora_green = Color::Rgb(163, 190, 140); // #A3BE8C
        let aurora_purple = Color::Rgb(180, 142, 173); // #B48EAD

        Self {
            app_name: Style::default().fg(frost_cyan).add_modifier(Modifier::BOLD),
            border: Style::default().fg(polar3),
            border_focused: Style::default().fg(frost_cyan),
            footer_help: Style::default().fg(polar3),

            stat_url: Style::default().fg(polar3),
            stat_label: Style::default().fg(snow0),
            stat_offline: Style::default().fg(aurora_orange),

            button: Style::default().fg(aurora_green),
            button_disabled: Style::default().fg(polar3),
            input: Style::default().fg(snow2),
            unknown: Style::default()
                .fg(polar3)
                .add_modifier(Modifier::ITALIC),
            focused: Style::default()
                .fg(aurora_purple)
                .add_modifier(Modifier::BOLD),
            loading: Style::default().fg(aurora_yellow).add_modifier(Modifier::ITALIC),
        }
        .with_input_accent(frost_blue)
    }

    /// doom-nord-light color scheme.
    ///
    /// Desaturated Nord accents adapted for light backgrounds.
    /// Source: doom-nord-light-theme.el
    pub(crate) fn doom_nord_light() -> Self {
        let base7 = Color::Rgb(96, 114, 140); // #60728C
        let fg = Color::Rgb(59, 66, 82); // #3B4252
        let fg_alt = Color::Rgb(46, 52, 64); // #2E3440
        let orange = Color::Rgb(172, 68, 38); // #AC4426
        let green = Color::Rgb(79, 137, 76); // #4F894C
        let yellow = Color::Rgb(154, 117, 0); // #9A7500
        let blue = Color::Rgb(59, 110, 168); // #3B6EA8
        let teal = Color::Rgb(41, 131, 141); // #29838D
        let cyan = Color::Rgb(57, 142, 172); // #398EAC
        let violet = Color::Rgb(132, 40, 121); // #842879

        Self {
            app_name: Style::default().fg(teal).add_modifier(Modifier::BOLD),
            border: Style::default().fg(base7),
            border_focused: Style::default().fg(cyan),
            footer_help: Style::default().fg(base7),

            stat_url: Style::default().fg(base7),
            stat_label: Style::default().fg(fg),
            stat_offline: Style::default().fg(orange),

            button: Style::default().fg(green),
            button_disabled: Style::default().fg(base7),
            input: Style::default().fg(fg_alt),
            unknown: Style::default().fg(base7).add_modifier(Modifier::ITALIC),
            focused: Style::default().fg(violet).add_modifier(Modifier::BOLD),
            loading: Style::default().fg(yellow).add_modifier(Modifier::ITALIC),
        }
        .with_input_accent(blue)
    }

    /// Underline text inputs in `accent` so empty fields stay visible.
    fn with_input_accent(mut self, accent: Color) -> Self {
        self.input = self
            .input
            .underline_color(accent)
            .add_modifier(Modifier::UNDERLINED);
        self
    }
}

/// Colors plus text.
pub(crate) struct Theme {
    pub(crate) scheme: ColorScheme,
    pub(crate) labels: Labels,
}

impl Theme {
    pub(crate) fn new(theme_name: ThemeName) -> Self {
        let scheme = match theme_name {
            ThemeName::Nord => ColorScheme::nord(),
            ThemeName::DoomNordLight => ColorScheme::doom_nord_light(),
        };
        Self {
            scheme,
            labels: Labels::en(),
        }
    }
}
