//! Canonicalization over fixture snapshots and generated raw trees.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{array_of, canonical, leaf, node, LEFT_DUMP, RIGHT_DUMP};
use proptest::prelude::*;
use ttdiff_core::canonical::{is_primitive, rename_type};
use ttdiff_core::errors::{DumpError, ExErrorKind};
use ttdiff_core::{canonicalize_field, canonicalize_snapshot, parse_snapshot_str, FieldNode};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn named(mut field: FieldNode, name: &str) -> FieldNode {
    field.name = name.to_string();
    field
}

fn vector_of(name: &str, element: FieldNode) -> FieldNode {
    node("vector", name, vec![array_of(named(element, "data"))])
}

fn types(nodes: &[FieldNode]) -> Vec<&str> {
    nodes.iter().map(|n| n.type_name.as_str()).collect()
}

// ---------------------------------------------------------------------------
// Fixture shapes
// ---------------------------------------------------------------------------

#[test]
fn test_game_object_canonical_shape() {
    let snapshot = canonical(LEFT_DUMP);
    let root = snapshot.find(1).unwrap().root.as_ref().unwrap();

    assert_eq!(
        types(&root.children),
        [
            "Pair<int,PPtr<Component>>[]",
            "unsigned int",
            "string",
            "ushort",
            "bool"
        ]
    );
    assert_eq!(root.node_count(), 9);

    let data = &root.children[0].children[0];
    assert_eq!(data.name, "data");
    assert_eq!(types(&data.children), ["int", "PPtr<Component>"]);
    assert!(data.children[1].children.is_empty());

    // the string idiom collapses to a leaf
    assert!(root.children[2].children.is_empty());
}

#[test]
fn test_value_types_and_pointers_are_leaves() {
    let snapshot = canonical(LEFT_DUMP);
    let root = snapshot.find(4).unwrap().root.as_ref().unwrap();

    assert_eq!(
        types(&root.children),
        ["PPtr<GameObject>", "Quaternionf", "Vector3f", "PPtr<Transform>[]"]
    );
    assert!(root.children[..3].iter().all(|c| c.children.is_empty()));
    assert_eq!(root.node_count(), 6);
}

#[test]
fn test_metadata_survives_rewrite() {
    let snapshot = canonical(LEFT_DUMP);
    let camera = snapshot.find(20).unwrap().root.as_ref().unwrap();
    let enabled = camera.child("m_Enabled").unwrap();
    assert_eq!(enabled.type_name, "byte");
    assert!(enabled.is_align());
    assert_eq!(enabled.index, 1);
}

#[test]
fn test_descriptors_without_trees_pass_through() {
    let raw = parse_snapshot_str(LEFT_DUMP).unwrap();
    let snapshot = canonicalize_snapshot(&raw).unwrap();
    assert_eq!(snapshot.descriptors().len(), raw.descriptors().len());
    assert_eq!(snapshot.find(2), raw.find(2));
    assert_eq!(snapshot.find(1000), raw.find(1000));
    assert_eq!(snapshot.version, raw.version);
}

#[test]
fn test_fixture_canonicalization_is_idempotent() {
    for text in [LEFT_DUMP, RIGHT_DUMP] {
        let once = canonical(text);
        let twice = canonicalize_snapshot(&once).unwrap();
        assert_eq!(once, twice);
    }
}

// ---------------------------------------------------------------------------
// Idioms
// ---------------------------------------------------------------------------

#[test]
fn test_vector_of_primitive_has_no_children() {
    let field = canonicalize_field(&vector_of("m_Values", leaf("int", "data"))).unwrap();
    assert_eq!(field.type_name, "int[]");
    assert!(field.children.is_empty());
}

#[test]
fn test_vector_of_struct_keeps_element() {
    let element = node("Keyframe", "data", vec![leaf("float", "time")]);
    let field = canonicalize_field(&vector_of("m_Curve", element)).unwrap();
    assert_eq!(field.type_name, "Keyframe[]");
    assert_eq!(field.children.len(), 1);
    assert_eq!(field.children[0].children[0].name, "time");
}

#[test]
fn test_nested_vectors() {
    let inner = vector_of("data", leaf("SInt16", "data"));
    let field = canonicalize_field(&vector_of("m_Grid", inner)).unwrap();
    assert_eq!(field.type_name, "short[][]");
    assert_eq!(field.children.len(), 1);
    assert!(field.children[0].children.is_empty());
}

fn pointer(name: &str) -> FieldNode {
    node(
        "PPtr<Transform>",
        name,
        vec![leaf("int", "m_FileID"), leaf("SInt64", "m_PathID")],
    )
}

#[test]
fn test_vector_of_pointers_is_stable() {
    let raw = vector_of("m_Children", pointer("data"));
    let once = canonicalize_field(&raw).unwrap();
    assert_eq!(once.type_name, "PPtr<Transform>[]");
    assert_eq!(types(&once.children), vec!["PPtr<Transform>"]);
    assert!(once.children[0].children.is_empty());

    let twice = canonicalize_field(&once).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_nested_vector_of_pointers_is_stable() {
    let inner = vector_of("data", pointer("data"));
    let raw = node(
        "pair",
        "data",
        vec![leaf("int", "first"), vector_of("second", inner)],
    );
    let once = canonicalize_field(&raw).unwrap();
    assert_eq!(once.type_name, "Pair<int,PPtr<Transform>[][]>");
    assert_eq!(once.children[1].type_name, "PPtr<Transform>[][]");
    assert_eq!(once.children[1].node_count(), 3);

    let twice = canonicalize_field(&once).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_map_with_string_key() {
    let key = node("string", "first", vec![array_of(leaf("char", "data"))]);
    let value = node("Entry", "second", vec![leaf("int", "x")]);
    let pair = node("pair", "data", vec![key, value]);
    let map = node("map", "m_Lookup", vec![array_of(pair)]);

    let field = canonicalize_field(&map).unwrap();
    assert_eq!(field.type_name, "Map<string,Entry>");
    assert_eq!(field.children.len(), 1);
    assert_eq!(field.children[0].name, "second");
}

#[test]
fn test_typeless_data() {
    let raw = node(
        "TypelessData",
        "image data",
        vec![leaf("int", "size"), leaf("UInt8", "data")],
    );
    let field = canonicalize_field(&raw).unwrap();
    assert_eq!(field.type_name, "byte[]");
    assert!(field.children.is_empty());
}

#[test]
fn test_malformed_idiom_is_grammar_violation() {
    let raw = node(
        "vector",
        "m_Broken",
        vec![node("Array", "Array", vec![leaf("int", "size")])],
    );
    let err = canonicalize_field(&raw).unwrap_err();
    assert!(matches!(err, DumpError::UnrecognizedIdiom { ref field, .. } if field == "m_Broken"));
    assert_eq!(err.kind(), ExErrorKind::GrammarViolation);
}

#[test]
fn test_malformed_idiom_deep_in_tree_fails_snapshot() {
    let text = common::DumpBuilder::new("5.6.0", "Release")
        .class(1, "A", &[])
        .field(0, "A Base")
        .field(1, "S m_Outer")
        .field(2, "pair m_Pair")
        .field(3, "int first")
        .build();
    let raw = parse_snapshot_str(&text).unwrap();
    assert!(matches!(
        canonicalize_snapshot(&raw),
        Err(DumpError::UnrecognizedIdiom { ref idiom, .. }) if idiom == "pair"
    ));
}

#[test]
fn test_renames_and_primitives() {
    assert_eq!(rename_type("UInt8"), "byte");
    assert!(is_primitive("byte"));
    assert!(is_primitive("Vector3f"));
    assert!(!is_primitive("UInt8"));
    assert!(!is_primitive("PPtr<Object>"));
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn raw_tree() -> impl Strategy<Value = FieldNode> {
    let leaf_type = prop::sample::select(vec![
        "int",
        "SInt8",
        "UInt16",
        "UInt64",
        "float",
        "bool",
        "Custom",
        "Vector3f",
        "PPtr<Object>",
    ]);
    let leaves = leaf_type.prop_map(|t| leaf(t, "data"));
    leaves.prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(|children| {
                let children = children
                    .into_iter()
                    .enumerate()
                    .map(|(i, c)| named(c, &format!("f{}", i)))
                    .collect();
                node("Struct", "data", children)
            }),
            inner.clone().prop_map(|e| vector_of("data", e)),
            (inner.clone(), inner).prop_map(|(a, b)| {
                node("pair", "data", vec![named(a, "first"), named(b, "second")])
            }),
        ]
    })
}

fn assert_no_raw_idioms(field: &FieldNode) {
    assert!(!matches!(field.type_name.as_str(), "vector" | "pair" | "Array"));
    assert!(!field.type_name.starts_with("SInt") && !field.type_name.starts_with("UInt"));
    field.children.iter().for_each(assert_no_raw_idioms);
}

proptest! {
    #[test]
    fn prop_canonicalize_is_idempotent(tree in raw_tree()) {
        let once = canonicalize_field(&tree).unwrap();
        let twice = canonicalize_field(&once).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_canonical_tree_has_no_raw_idioms(tree in raw_tree()) {
        let field = canonicalize_field(&tree).unwrap();
        assert_no_raw_idioms(&field);
        prop_assert!(field.node_count() <= tree.node_count());
    }
}
