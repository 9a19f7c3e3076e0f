//! Hierarchy data model for Treeforge.
//! A parsed layout is an ordered mapping from entry name to node, where
//! each node is either a container of further entries or a terminal file.
//! The same shape has a JSON form: containers are nested objects and
//! files are null values, which is also accepted directly as input.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Ordered top-level mapping of entry name to node.
///
/// Children keep first-insertion order, which reflects input line order.
/// Order matters for display only, not for materialization semantics.
pub type Structure = IndexMap<String, HierarchyNode>;

/// One entry in a parsed hierarchy.
///
/// The container/file distinction is decided once, at parse or decode
/// time, and is never re-inferred downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HierarchyNode {
    /// A folder holding ordered child entries
    Container(Structure),
    /// A terminal file entry, always materialized empty
    Leaf,
}

impl HierarchyNode {
    /// Returns a reference to the children if this node is a container.
    pub fn children(&self) -> Option<&Structure> {
        match self {
            HierarchyNode::Container(children) => Some(children),
            HierarchyNode::Leaf => None,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, HierarchyNode::Container(_))
    }
}

impl Serialize for HierarchyNode {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            HierarchyNode::Container(children) => {
                let mut map = serializer.serialize_map(Some(children.len()))?;
                for (name, node) in children {
                    map.serialize_entry(name, node)?;
                }
                map.end()
            }
            HierarchyNode::Leaf => serializer.serialize_none(),
        }
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = HierarchyNode;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a nested object for a folder or null for a file")
    }

    fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(HierarchyNode::Leaf)
    }

    fn visit_none<E>(self) -> std::result::Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(HierarchyNode::Leaf)
    }

    fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut children = Structure::new();
        while let Some((name, node)) = access.next_entry::<String, HierarchyNode>()? {
            children.insert(name, node);
        }
        Ok(HierarchyNode::Container(children))
    }
}

impl<'de> Deserialize<'de> for HierarchyNode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(NodeVisitor)
    }
}

/// Decodes a structure from a JSON object literal.
///
/// This is the alternate input path that bypasses the tree-text parser:
/// containers are nested objects, files are null values. Anything else
/// fails to decode and the caller falls back to the parser.
pub fn decode_structure(text: &str) -> std::result::Result<Structure, serde_json::Error> {
    serde_json::from_str(text)
}

/// Decodes a structure from an already-parsed JSON value.
pub fn structure_from_value(
    value: &serde_json::Value,
) -> std::result::Result<Structure, serde_json::Error> {
    serde_json::from_value(value.clone())
}

/// Serializes a structure as pretty-printed JSON for display.
pub fn to_pretty_json(structure: &Structure) -> Result<String> {
    serde_json::to_string_pretty(structure)
        .map_err(|e| Error::ParseError(format!("Failed to serialize structure: {}", e)))
}

/// Drops entries with empty names from the top level of a structure.
///
/// The tree-text parser never produces empty names, but a JSON object
/// literal may carry an empty key.
pub fn prune_empty_keys(structure: Structure) -> Structure {
    structure.into_iter().filter(|(name, _)| !name.is_empty()).collect()
}
