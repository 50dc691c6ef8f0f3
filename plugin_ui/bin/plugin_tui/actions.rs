/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

/// Result of handling a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyResult {
    /// Nothing changed.
    None,
    /// Focus moved to another control.
    FocusChanged,
    /// The focused button was pressed.
    Activated,
    /// The focused text input was edited.
    Edited,
    /// The user asked to exit.
    Quit,
}
