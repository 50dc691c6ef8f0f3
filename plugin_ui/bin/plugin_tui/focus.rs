/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use plugin_ui::View;
use plugin_ui::interpret::ViewPath;

/// Navigation cursor over a bounded list.
///
/// Invariant: `pos < len` (or `pos == 0` when `len == 0`).
/// Movement methods return `true` when the position changes.
#[derive(Debug, Clone)]
pub(crate) struct Cursor {
    pos: usize,
    len: usize,
}

impl Cursor {
    pub(crate) fn new(len: usize) -> Self {
        Self { pos: 0, len }
    }

    /// Advance, wrapping from the last entry to the first.
    pub(crate) fn next(&mut self) -> bool {
        if self.len < 2 {
            return false;
        }
        self.pos = (self.pos + 1) % self.len;
        true
    }

    /// Step back, wrapping from the first entry to the last.
    pub(crate) fn prev(&mut self) -> bool {
        if self.len < 2 {
            return false;
        }
        self.pos = self.pos.checked_sub(1).unwrap_or(self.len - 1);
        true
    }

    /// Jump to start. Returns true if position changed.
    pub(crate) fn home(&mut self) -> bool {
        if self.pos != 0 {
            self.pos = 0;
            true
        } else {
            false
        }
    }

    /// Jump to end. Returns true if position changed.
    pub(crate) fn end(&mut self) -> bool {
        let new_pos = self.len.saturating_sub(1);
        if self.pos != new_pos {
            self.pos = new_pos;
            true
        } else {
            false
        }
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }
}

/// Keyboard focus over the interactive elements of a mounted view.
///
/// The focus order is document order. Nothing is focused until a view
/// with at least one button or text input is mounted.
#[derive(Debug, Clone)]
pub(crate) struct Focus {
    paths: Vec<ViewPath>,
    cursor: Cursor,
}

impl Focus {
    pub(crate) fn new() -> Self {
        Self {
            paths: Vec::new(),
            cursor: Cursor::new(0),
        }
    }

    /// Rebuild the focus order for `view`, focusing its first control.
    pub(crate) fn reset(&mut self, view: &View) {
        self.paths = view.focusable_paths();
        self.cursor = Cursor::new(self.paths.len());
    }

    /// Path of the focused element, if any.
    pub(crate) fn current(&self) -> Option<&[usize]> {
        self.paths.get(self.cursor.pos()).map(Vec::as_slice)
    }

    pub(crate) fn is_focused(&self, path: &[usize]) -> bool {
        self.current() == Some(path)
    }

    pub(crate) fn next(&mut self) -> bool {
        self.cursor.next()
    }

    pub(crate) fn prev(&mut self) -> bool {
        self.cursor.prev()
    }

    pub(crate) fn first(&mut self) -> bool {
        self.cursor.home()
    }

    pub(crate) fn last(&mut self) -> bool {
        self.cursor.end()
    }

    /// Number of focusable elements.
    pub(crate) fn len(&self) -> usize {
        self.cursor.len()
    }
}
