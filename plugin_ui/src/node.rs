/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Server-described UI nodes and the element registry.
//!
//! A [`Node`] is the wire shape the plugin server returns: a name, a
//! bag of string props, and ordered children. The name is only
//! meaningful once it has been classified into an [`Element`], the
//! closed set of things the client knows how to draw. Classification
//! is total: any name outside [`ElementKind::ALL`] becomes
//! [`Element::Unknown`].
//!
//! Consumers walk elements through [`ElementVisitor`]. Adding a node
//! type means adding an `ElementKind` and an `Element` variant, after
//! which every visitor fails to compile until it handles the new
//! case.

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

/// Prop holding a button's visible text.
pub const LABEL_PROP: &str = "label";
/// Prop naming the application event a button emits when pressed.
pub const ON_CLICK_EVENT_PROP: &str = "onClickEvent";
/// Prop identifying a text input in the input state store.
pub const ID_PROP: &str = "id";

/// One UI element as sent by the server.
///
/// Only the outermost value must be a JSON object. Below that,
/// deserialization never fails; every field degrades on its own:
///
/// - `name` that is missing or not a string becomes `""`, which
///   classifies as an unknown element.
/// - `props` that is missing or not an object becomes empty. Inside
///   it, strings are kept, numbers and booleans are stringified
///   (`true` becomes `"true"`), and `null`, arrays and objects are
///   dropped as if absent.
/// - `children` that is missing or not an array becomes empty. A child
///   that is not an object becomes an unnamed (unknown) node.
///
/// Nesting depth is bounded only by the document. `serde_json`'s
/// default recursion limit (128 levels of JSON nesting, two per
/// node) caps what can be deserialized; everything downstream
/// recurses once per level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Node {
    /// Selects how the node is interpreted.
    pub name: String,
    /// Opaque key/value pairs whose meaning depends on `name`.
    pub props: HashMap<String, String>,
    /// Ordered child nodes. Only containers look at these.
    pub children: Vec<Node>,
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let fields = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Node::from_fields(fields))
    }
}

/// Prop value as the client sees it, or `None` if it cannot be used.
fn prop_value(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

impl Node {
    fn from_fields(mut fields: Map<String, Value>) -> Self {
        let name = match fields.remove("name") {
            Some(Value::String(name)) => name,
            _ => String::new(),
        };
        let props = match fields.remove("props") {
            Some(Value::Object(props)) => props
                .into_iter()
                .filter_map(|(key, value)| Some((key, prop_value(value)?)))
                .collect(),
            _ => HashMap::new(),
        };
        let children = match fields.remove("children") {
            Some(Value::Array(children)) => children.into_iter().map(Node::from_value).collect(),
            _ => Vec::new(),
        };
        Self {
            name,
            props,
            children,
        }
    }

    fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => Node::from_fields(fields),
            _ => Node::default(),
        }
    }
}

impl Node {
    /// Build a node with no props or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            props: HashMap::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style prop setter.
    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// Builder-style child appender.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Look up a prop by key.
    pub fn prop(&self, key: &str) -> Option<&str> {
        self.props.get(key).map(String::as_str)
    }

    /// Classify this node into the element it describes.
    ///
    /// Missing props degrade per field: no `label` is an empty label,
    /// and an absent or empty `onClickEvent` / `id` disables the
    /// associated action.
    pub fn element(&self) -> Element<'_> {
        match ElementKind::from_name(&self.name) {
            Some(ElementKind::Rows) => Element::Rows {
                children: &self.children,
            },
            Some(ElementKind::Button) => Element::Button {
                label: self.prop(LABEL_PROP).unwrap_or_default(),
                on_click_event: self.prop(ON_CLICK_EVENT_PROP).filter(|e| !e.is_empty()),
            },
            Some(ElementKind::TextInput) => Element::TextInput {
                id: self.prop(ID_PROP).filter(|id| !id.is_empty()),
            },
            None => Element::Unknown { name: &self.name },
        }
    }

    /// Fold over the subtree in post-order, children before parent.
    pub fn fold<B, F>(&self, f: &F) -> B
    where
        F: Fn(&Node, Vec<B>) -> B,
    {
        let child_results: Vec<B> = self.children.iter().map(|child| child.fold(f)).collect();
        f(self, child_results)
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        self.fold(&|_, children: Vec<usize>| 1 + children.into_iter().sum::<usize>())
    }

    /// Number of levels in this subtree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        self.fold(&|_, children: Vec<usize>| 1 + children.into_iter().max().unwrap_or(0))
    }
}

/// The registry of node names the client understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Vertical container, `"rows"`.
    Rows,
    /// Clickable control, `"button"`.
    Button,
    /// Single-line editable field, `"text-input"`.
    TextInput,
}

impl ElementKind {
    /// Every registered kind.
    pub const ALL: [ElementKind; 3] = [
        ElementKind::Rows,
        ElementKind::Button,
        ElementKind::TextInput,
    ];

    /// The wire name for this kind.
    pub fn name(self) -> &'static str {
        match self {
            ElementKind::Rows => "rows",
            ElementKind::Button => "button",
            ElementKind::TextInput => "text-input",
        }
    }

    /// Resolve a wire name. Matching is exact and case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified node, borrowing from the [`Node`] it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element<'a> {
    /// Lays out `children` top to bottom.
    Rows { children: &'a [Node] },
    /// Emits `on_click_event` (if any) when activated.
    Button {
        label: &'a str,
        on_click_event: Option<&'a str>,
    },
    /// Records edits under `id` (if any).
    TextInput { id: Option<&'a str> },
    /// Anything else; rendered as a fixed placeholder.
    Unknown { name: &'a str },
}

impl<'a> Element<'a> {
    /// The registered kind, or `None` for unknown elements.
    pub fn kind(&self) -> Option<ElementKind> {
        match self {
            Element::Rows { .. } => Some(ElementKind::Rows),
            Element::Button { .. } => Some(ElementKind::Button),
            Element::TextInput { .. } => Some(ElementKind::TextInput),
            Element::Unknown { .. } => None,
        }
    }

    /// Dispatch to the visitor method for this variant.
    pub fn accept<V>(self, visitor: &mut V) -> V::Output
    where
        V: ElementVisitor<'a> + ?Sized,
    {
        match self {
            Element::Rows { children } => visitor.visit_rows(children),
            Element::Button {
                label,
                on_click_event,
            } => visitor.visit_button(label, on_click_event),
            Element::TextInput { id } => visitor.visit_text_input(id),
            Element::Unknown { name } => visitor.visit_unknown(name),
        }
    }
}

/// One method per [`Element`] variant.
pub trait ElementVisitor<'a> {
    type Output;

    fn visit_rows(&mut self, children: &'a [Node]) -> Self::Output;

    fn visit_button(&mut self, label: &'a str, on_click_event: Option<&'a str>) -> Self::Output;

    fn visit_text_input(&mut self, id: Option<&'a str>) -> Self::Output;

    fn visit_unknown(&mut self, name: &'a str) -> Self::Output;
}
