//! Canonicalization: rewrite raw field trees into a simplified generic form
//!
//! The rewrite is pure and post-order: children are canonicalized first, then
//! the node itself is matched against the rename table, the container idioms,
//! and the always-pruned value types. Idiom shapes are checked exactly; a
//! mismatch is a hard error rather than a silent pass-through.

mod idioms;

use crate::errors::Result;
use crate::model::{FieldNode, Snapshot, TypeDescriptor};

/// Fixed-width integer tokens and their short aliases
const RENAMES: &[(&str, &str)] = &[
    ("SInt8", "sbyte"),
    ("UInt8", "byte"),
    ("SInt16", "short"),
    ("UInt16", "ushort"),
    ("SInt64", "long"),
    ("UInt64", "ulong"),
];

/// Small value types whose declared children are never shown
const VALUE_TYPES: &[&str] = &[
    "Vector2f",
    "Vector3f",
    "Vector4f",
    "Rectf",
    "Quaternionf",
    "Matrix4x4f",
    "GUID",
    "Hash128",
    "BitField",
];

/// Object reference types; their children are never shown
const POINTER_PREFIX: &str = "PPtr<";

const PRIMITIVES: &[&str] = &[
    "bool",
    "char",
    "sbyte",
    "byte",
    "short",
    "ushort",
    "int",
    "unsigned int",
    "SInt32",
    "UInt32",
    "long",
    "ulong",
    "float",
    "double",
    "string",
];

/// Canonical alias for a raw type token
pub fn rename_type(type_name: &str) -> &str {
    RENAMES
        .iter()
        .find(|(raw, _)| *raw == type_name)
        .map(|(_, alias)| *alias)
        .unwrap_or(type_name)
}

/// Whether a canonical type is a fixed primitive or small value type
pub fn is_primitive(type_name: &str) -> bool {
    PRIMITIVES.contains(&type_name) || VALUE_TYPES.contains(&type_name)
}

/// A single object reference, not a container of them (`PPtr<T>[]`)
fn is_pointer(type_name: &str) -> bool {
    type_name.starts_with(POINTER_PREFIX) && type_name.ends_with('>')
}

fn is_always_pruned(type_name: &str) -> bool {
    VALUE_TYPES.contains(&type_name) || is_pointer(type_name)
}

/// Canonicalize one field tree
///
/// # Errors
///
/// Returns [`DumpError::UnrecognizedIdiom`](crate::errors::DumpError::UnrecognizedIdiom)
/// if a container idiom does not have its exact expected shape.
pub fn canonicalize_field(node: &FieldNode) -> Result<FieldNode> {
    let children = node
        .children
        .iter()
        .map(canonicalize_field)
        .collect::<Result<Vec<_>>>()?;

    let type_name = rename_type(&node.type_name);
    let (type_name, children) = if is_always_pruned(type_name) {
        tracing::trace!(field = %node.name, type_name, "pruned value type");
        (type_name.to_string(), Vec::new())
    } else {
        idioms::rewrite(type_name, &node.name, children)?
    };

    Ok(FieldNode {
        type_name,
        name: node.name.clone(),
        byte_size: node.byte_size,
        index: node.index,
        is_array: node.is_array,
        meta_flag: node.meta_flag,
        children,
    })
}

/// Canonicalize a descriptor's field tree, if it has one
///
/// # Errors
///
/// As [`canonicalize_field`].
pub fn canonicalize_descriptor(descriptor: &TypeDescriptor) -> Result<TypeDescriptor> {
    let root = descriptor.root.as_ref().map(canonicalize_field).transpose()?;
    Ok(TypeDescriptor {
        root,
        ..descriptor.clone()
    })
}

/// Canonicalize every descriptor of a snapshot
///
/// # Errors
///
/// Fails on the first descriptor whose tree contains an unrecognized idiom.
pub fn canonicalize_snapshot(snapshot: &Snapshot) -> Result<Snapshot> {
    snapshot.map_descriptors(|descriptor| {
        canonicalize_descriptor(descriptor).inspect_err(|e| {
            tracing::debug!(
                class_id = descriptor.class_id,
                class_name = %descriptor.class_name,
                error = %e,
                "canonicalization failed"
            );
        })
    })
}
