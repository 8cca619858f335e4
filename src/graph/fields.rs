//! Field fallback chains for raw graph objects.
//!
//! Every normalized field is read from an ordered list of source keys; the
//! first key holding a usable value wins. Keeping the chains in one table
//! makes them easy to check without building whole documents.

use serde_json::{Map, Value};

use crate::domain::LinkRefKind;

/// Group assigned when a node has neither `namespace` nor `group`.
pub const DEFAULT_GROUP: &str = "unknown";

/// Link type assigned when a link has no `type`.
pub const DEFAULT_LINK_TYPE: &str = "is_a";

/// A normalized field fed by a fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    NodeId,
    NodeLabel,
    NodeGroup,
    LinkType,
}

impl Field {
    /// Source keys tried in order.
    ///
    /// Only index-referenced documents may take a node id from `name`: in
    /// id-referenced documents the links already spell out the `id` values.
    pub fn fallback_keys(self, kind: LinkRefKind) -> &'static [&'static str] {
        match (self, kind) {
            (Field::NodeId, LinkRefKind::ById) => &["id"],
            (Field::NodeId, LinkRefKind::ByIndex) => &["id", "name"],
            (Field::NodeLabel, _) => &["label", "name"],
            (Field::NodeGroup, _) => &["namespace", "group"],
            (Field::LinkType, _) => &["type"],
        }
    }
}

/// First usable value among `keys`, as text.
///
/// Non-empty strings and numbers count as present; `null`, `""`, booleans,
/// arrays and objects do not.
pub fn first_present(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| obj.get(*k).and_then(scalar_text))
}

/// Text of a scalar JSON value (string or number).
pub fn scalar_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
