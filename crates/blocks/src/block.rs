use serde::Serialize;
use serde_json::{Map, Value};

use crate::access;

/// One node of a page's content tree.
///
/// `id` is unique within its page only. `block_type` selects a renderer and
/// is treated opaquely; `data` is the renderer-specific bag of fields.
/// Reading goes through [`Block::from_value`], which tolerates malformed
/// nodes; writing uses the derived `Serialize`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Block {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: String,
    pub data: Map<String, Value>,
    pub children: Vec<Block>,
}

impl Block {
    /// A childless block.
    pub fn leaf(id: impl Into<String>, block_type: impl Into<String>, data: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            block_type: block_type.into(),
            data,
            children: Vec::new(),
        }
    }

    /// Read a block from stored JSON. Returns `None` for non-object nodes;
    /// malformed fields inside an object degrade to their empty value.
    pub fn from_value(value: &Value) -> Option<Self> {
        let node = value.as_object()?;
        Some(Self {
            id: access::str_or(node.get("id"), "").to_string(),
            block_type: access::str_or(node.get("type"), "").to_string(),
            data: access::map_or_empty(node.get("data")),
            children: Self::list_from_values(access::list_or_empty(node.get("children"))),
        })
    }

    /// Read a sibling list, skipping nodes that are not objects.
    pub fn list_from_values(values: &[Value]) -> Vec<Self> {
        values.iter().filter_map(Self::from_value).collect()
    }

    /// `{id, type, data, children}`, with `children` always present.
    pub fn to_value(&self) -> Value {
        // Only string keys and JSON values inside, so this cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    pub fn list_to_value(blocks: &[Block]) -> Value {
        Value::Array(blocks.iter().map(Block::to_value).collect())
    }

    /// Visit this block and all descendants in depth-first pre-order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Block)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}
