use serde::{Deserialize, Serialize};
use std::fmt;

/// MetaFlag bit marking a field whose value is aligned after reading
pub const ALIGN_FLAG: u32 = 0x4000;

/// FieldNode - one typed, named field in a class's field tree
///
/// Sibling order is layout order and is significant. The tree is built by the
/// parser, rebuilt (never mutated) by the canonicalizer, and read-only after.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldNode {
    /// Type token, e.g. `int`, `unsigned int`, `vector`, `PPtr<Object>`
    pub type_name: String,

    /// Field name; may contain spaces
    pub name: String,

    /// Serialized size in bytes, negative for variable-size fields
    pub byte_size: i32,

    /// Slot index within the flattened tree
    pub index: i32,

    /// Whether the dump flagged this node as an array
    pub is_array: bool,

    /// Raw meta flags; see [`ALIGN_FLAG`]
    pub meta_flag: u32,

    /// Child fields in layout order
    pub children: Vec<FieldNode>,
}

impl FieldNode {
    /// Create a leaf field with zeroed layout metadata
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
            byte_size: 0,
            index: 0,
            is_array: false,
            meta_flag: 0,
            children: Vec::new(),
        }
    }

    /// Builder-style helper to attach children
    pub fn with_children(mut self, children: Vec<FieldNode>) -> Self {
        self.children = children;
        self
    }

    /// Builder-style helper to set the meta flag
    pub fn with_meta_flag(mut self, meta_flag: u32) -> Self {
        self.meta_flag = meta_flag;
        self
    }

    /// Whether the alignment bit is set in the meta flag
    pub fn is_align(&self) -> bool {
        self.meta_flag & ALIGN_FLAG != 0
    }

    /// Number of nodes in this subtree, self included
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(FieldNode::node_count).sum::<usize>()
    }

    /// Look up a direct child by name
    pub fn child(&self, name: &str) -> Option<&FieldNode> {
        self.children.iter().find(|c| c.name == name)
    }
}

impl fmt::Display for FieldNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.type_name, self.name)
    }
}
