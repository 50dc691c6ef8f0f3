/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Node tree to view tree.
//!
//! [`render`] is a pure structural recursion over the node tree: it
//! never fails and never touches a bus. The resulting [`View`] holds
//! the actions each element performs; they run later, when the front
//! end activates a button or edits a field and lends the view an
//! [`EventBus`] for the duration of that one interaction.
//!
//! Views are addressed by [`ViewPath`], the child indices from the
//! root. [`View::flatten`] projects the tree into pre-order rows for
//! drawing, and [`View::focusable_paths`] lists the interactive
//! leaves in document order.

use crate::bus::EventBus;
use crate::node::ElementVisitor;
use crate::node::Node;

/// Text shown in place of elements the client does not understand.
pub const UNKNOWN_ELEMENT_TEXT: &str = "Unknown element";

/// Child-index path from the root view. The root itself is `[]`.
pub type ViewPath = Vec<usize>;

/// A rendered element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Vertical container; children in document order.
    Rows(Vec<View>),
    Button(ButtonView),
    TextInput(TextInputView),
    /// Placeholder for an unrecognised node name.
    Unknown { name: String },
}

/// A clickable control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonView {
    pub label: String,
    /// Event emitted on activation; `None` makes activation a no-op.
    pub on_click_event: Option<String>,
}

impl ButtonView {
    /// Press the button. Emits at most one event.
    pub fn activate(&self, bus: &mut dyn EventBus) {
        if let Some(event) = &self.on_click_event {
            bus.send_event(event);
        }
    }
}

/// A single-line editable field.
///
/// Always starts empty; nothing is read back from the input state
/// store. Every change reports the field's full new value, never a
/// diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInputView {
    /// Store key; without one, edits stay local to the field.
    pub id: Option<String>,
    value: String,
}

impl TextInputView {
    pub fn new(id: Option<String>) -> Self {
        Self {
            id,
            value: String::new(),
        }
    }

    /// Current contents of the field.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the contents and report the new value.
    pub fn change(&mut self, value: impl Into<String>, bus: &mut dyn EventBus) {
        self.value = value.into();
        if let Some(id) = &self.id {
            bus.set_text_input_value(id, &self.value);
        }
    }

    /// Append a character at the end of the field.
    pub fn insert(&mut self, ch: char, bus: &mut dyn EventBus) {
        let mut value = self.value.clone();
        value.push(ch);
        self.change(value, bus);
    }

    /// Delete the last character. Editing an empty field is not a
    /// change and reports nothing.
    pub fn backspace(&mut self, bus: &mut dyn EventBus) {
        let mut value = self.value.clone();
        if value.pop().is_some() {
            self.change(value, bus);
        }
    }
}

/// An edit applied to a focused text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextEdit {
    Insert(char),
    Backspace,
    Replace(String),
}

impl TextEdit {
    /// Apply this edit to `input`, reporting through `bus`.
    pub fn apply(self, input: &mut TextInputView, bus: &mut dyn EventBus) {
        match self {
            TextEdit::Insert(ch) => input.insert(ch, bus),
            TextEdit::Backspace => input.backspace(bus),
            TextEdit::Replace(value) => input.change(value, bus),
        }
    }
}

struct Renderer;

impl<'a> ElementVisitor<'a> for Renderer {
    type Output = View;

    fn visit_rows(&mut self, children: &'a [Node]) -> View {
        View::Rows(children.iter().map(render).collect())
    }

    fn visit_button(&mut self, label: &'a str, on_click_event: Option<&'a str>) -> View {
        View::Button(ButtonView {
            label: label.to_string(),
            on_click_event: on_click_event.map(str::to_string),
        })
    }

    fn visit_text_input(&mut self, id: Option<&'a str>) -> View {
        View::TextInput(TextInputView::new(id.map(str::to_string)))
    }

    fn visit_unknown(&mut self, name: &'a str) -> View {
        tracing::debug!(name, "rendering placeholder for unknown element");
        View::Unknown {
            name: name.to_string(),
        }
    }
}

/// Interpret `node` and its subtree. Total over all inputs.
///
/// Recursion is one stack frame per tree level with no limit of its
/// own.
pub fn render(node: &Node) -> View {
    node.element().accept(&mut Renderer)
}

/// One pre-order row of a flattened view tree.
#[derive(Debug, Clone)]
pub struct ViewRow<'a> {
    pub view: &'a View,
    /// Nesting level; the root is 0.
    pub depth: usize,
    pub path: ViewPath,
}

impl View {
    /// Direct children (empty for leaves).
    pub fn children(&self) -> &[View] {
        match self {
            View::Rows(children) => children,
            _ => &[],
        }
    }

    /// Whether the view can take keyboard focus.
    pub fn is_focusable(&self) -> bool {
        matches!(self, View::Button(_) | View::TextInput(_))
    }

    pub fn get(&self, path: &[usize]) -> Option<&View> {
        match path.split_first() {
            None => Some(self),
            Some((&index, rest)) => self.children().get(index)?.get(rest),
        }
    }

    pub fn get_mut(&mut self, path: &[usize]) -> Option<&mut View> {
        match path.split_first() {
            None => Some(self),
            Some((&index, rest)) => match self {
                View::Rows(children) => children.get_mut(index)?.get_mut(rest),
                _ => None,
            },
        }
    }

    /// Pre-order projection of the whole tree, root included.
    pub fn flatten(&self) -> Vec<ViewRow<'_>> {
        let mut rows = Vec::new();
        let mut path = Vec::new();
        self.flatten_into(0, &mut path, &mut rows);
        rows
    }

    fn flatten_into<'a>(&'a self, depth: usize, path: &mut ViewPath, rows: &mut Vec<ViewRow<'a>>) {
        rows.push(ViewRow {
            view: self,
            depth,
            path: path.clone(),
        });
        for (index, child) in self.children().iter().enumerate() {
            path.push(index);
            child.flatten_into(depth + 1, path, rows);
            path.pop();
        }
    }

    /// Paths of all buttons and text inputs, in document order.
    pub fn focusable_paths(&self) -> Vec<ViewPath> {
        self.flatten()
            .into_iter()
            .filter(|row| row.view.is_focusable())
            .map(|row| row.path)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::BusCall;
    use crate::testing::RecordingBus;
    use crate::testing::button;
    use crate::testing::text_input;

    // Deterministic mix of every node kind, nested `depth` levels.
    fn mixed_tree(depth: usize) -> Node {
        let mut node = Node::new("rows")
            .with_child(button("b", Some("e")))
            .with_child(Node::new("text-input"))
            .with_child(Node::new("mystery").with_child(button("hidden", Some("x"))))
            .with_child(Node::new(""));
        if depth > 0 {
            node = node.with_child(mixed_tree(depth - 1));
        }
        node
    }

    #[test]
    fn rows_preserve_child_order() {
        let tree = Node::new("rows")
            .with_child(button("c1", None))
            .with_child(button("c2", None))
            .with_child(button("c3", None));
        let View::Rows(children) = render(&tree) else {
            panic!("expected rows");
        };
        let labels: Vec<_> = children
            .iter()
            .map(|child| match child {
                View::Button(b) => b.label.as_str(),
                other => panic!("unexpected {:?}", other),
            })
            .collect();
        assert_eq!(labels, vec!["c1", "c2", "c3"]);
    }

    #[test]
    fn empty_rows_render_empty_container() {
        assert_eq!(render(&Node::new("rows")), View::Rows(vec![]));
    }

    #[test]
    fn render_is_total() {
        let view = render(&mixed_tree(8));
        // Unknown nodes are leaves: their children are never rendered.
        let placeholders = view
            .flatten()
            .iter()
            .filter(|row| matches!(row.view, View::Unknown { .. }))
            .count();
        assert_eq!(placeholders, 18);
        assert_eq!(view.focusable_paths().len(), 18);
    }

    #[test]
    fn unknown_element_keeps_its_name() {
        assert_eq!(
            render(&Node::new("slider")),
            View::Unknown {
                name: "slider".to_string()
            }
        );
    }

    #[test]
    fn button_activation_sends_exactly_once() {
        let View::Button(view) = render(&button("Go", Some("X"))) else {
            panic!("expected button");
        };
        let mut bus = RecordingBus::default();
        view.activate(&mut bus);
        assert_eq!(bus.calls, vec![BusCall::SendEvent("X".to_string())]);
    }

    #[test]
    fn button_without_event_is_a_noop() {
        let View::Button(view) = render(&button("Go", None)) else {
            panic!("expected button");
        };
        let mut bus = RecordingBus::default();
        view.activate(&mut bus);
        assert!(bus.calls.is_empty());
        assert_eq!(view.label, "Go");
    }

    #[test]
    fn text_input_reports_full_value() {
        let View::TextInput(mut view) = render(&text_input("name")) else {
            panic!("expected text input");
        };
        assert_eq!(view.value(), "");
        let mut bus = RecordingBus::default();
        view.insert('A', &mut bus);
        view.insert('d', &mut bus);
        view.insert('a', &mut bus);
        view.backspace(&mut bus);
        assert_eq!(
            bus.calls,
            vec![
                BusCall::SetTextInputValue("name".to_string(), "A".to_string()),
                BusCall::SetTextInputValue("name".to_string(), "Ad".to_string()),
                BusCall::SetTextInputValue("name".to_string(), "Ada".to_string()),
                BusCall::SetTextInputValue("name".to_string(), "Ad".to_string()),
            ]
        );
        assert_eq!(view.value(), "Ad");
    }

    #[test]
    fn backspace_on_empty_field_reports_nothing() {
        let mut view = TextInputView::new(Some("q".to_string()));
        let mut bus = RecordingBus::default();
        view.backspace(&mut bus);
        assert!(bus.calls.is_empty());
    }

    #[test]
    fn text_input_without_id_stays_local() {
        let View::TextInput(mut view) = render(&Node::new("text-input")) else {
            panic!("expected text input");
        };
        let mut bus = RecordingBus::default();
        TextEdit::Replace("typed".to_string()).apply(&mut view, &mut bus);
        assert!(bus.calls.is_empty());
        assert_eq!(view.value(), "typed");
    }

    #[test]
    fn flatten_is_pre_order_with_paths() {
        let tree = Node::new("rows")
            .with_child(text_input("a"))
            .with_child(Node::new("rows").with_child(button("b", Some("go"))));
        let view = render(&tree);
        let rows = view.flatten();
        let summary: Vec<_> = rows.iter().map(|r| (r.depth, r.path.clone())).collect();
        assert_eq!(
            summary,
            vec![
                (0, vec![]),
                (1, vec![0]),
                (1, vec![1]),
                (2, vec![1, 0]),
            ]
        );
        assert_eq!(view.focusable_paths(), vec![vec![0], vec![1, 0]]);
    }

    #[test]
    fn get_mut_addresses_nested_views() {
        let tree = Node::new("rows").with_child(Node::new("rows").with_child(text_input("deep")));
        let mut view = render(&tree);
        let mut bus = RecordingBus::default();
        match view.get_mut(&[0, 0]) {
            Some(View::TextInput(input)) => input.insert('x', &mut bus),
            other => panic!("unexpected {:?}", other),
        }
        assert!(view.get(&[0, 1]).is_none());
        assert!(view.get(&[0, 0, 0]).is_none());
        assert_eq!(
            bus.calls,
            vec![BusCall::SetTextInputValue(
                "deep".to_string(),
                "x".to_string()
            )]
        );
    }
}
