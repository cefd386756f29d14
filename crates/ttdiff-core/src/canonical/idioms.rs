use super::is_primitive;
use crate::errors::{DumpError, Result};
use crate::model::FieldNode;

const ARRAY: &str = "Array";
const SIZE: &str = "size";
const DATA: &str = "data";
const FIRST: &str = "first";
const SECOND: &str = "second";

fn mismatch(idiom: &str, field: &str, reason: impl Into<String>) -> DumpError {
    DumpError::UnrecognizedIdiom {
        idiom: idiom.to_string(),
        field: field.to_string(),
        reason: reason.into(),
    }
}

fn expect_child(idiom: &str, field: &str, child: &FieldNode, type_name: &str, name: &str) -> Result<()> {
    if child.type_name != type_name || child.name != name {
        return Err(mismatch(
            idiom,
            field,
            format!("expected '{} {}' but found '{}'", type_name, name, child),
        ));
    }
    Ok(())
}

/// Unwrap `Array Array { int size; <T> data }` and return the data child
fn array_data(idiom: &str, field: &str, children: Vec<FieldNode>) -> Result<FieldNode> {
    let [array]: [FieldNode; 1] = children
        .try_into()
        .map_err(|c: Vec<FieldNode>| mismatch(idiom, field, format!("expected 1 child, found {}", c.len())))?;
    expect_child(idiom, field, &array, ARRAY, ARRAY)?;

    let [size, data]: [FieldNode; 2] = array.children.try_into().map_err(|c: Vec<FieldNode>| {
        mismatch(idiom, field, format!("expected 2 array children, found {}", c.len()))
    })?;
    expect_child(idiom, field, &size, "int", SIZE)?;
    if data.name != DATA {
        return Err(mismatch(
            idiom,
            field,
            format!("expected array element named '{}' but found '{}'", DATA, data),
        ));
    }
    Ok(data)
}

fn prune_primitive(data: FieldNode) -> Vec<FieldNode> {
    if is_primitive(&data.type_name) {
        Vec::new()
    } else {
        vec![data]
    }
}

/// Split a canonical `Pair<K,V>` node into its `first` and `second` children
fn pair_halves(idiom: &str, field: &str, pair: FieldNode) -> Result<(FieldNode, FieldNode)> {
    let [first, second]: [FieldNode; 2] = pair.children.try_into().map_err(|c: Vec<FieldNode>| {
        mismatch(idiom, field, format!("expected 2 pair children, found {}", c.len()))
    })?;
    if first.name != FIRST || second.name != SECOND {
        return Err(mismatch(
            idiom,
            field,
            format!("expected '{}'/'{}' but found '{}'/'{}'", FIRST, SECOND, first.name, second.name),
        ));
    }
    Ok((first, second))
}

/// Rewrite a node whose children are already canonical
///
/// Returns the canonical type name and child list.
pub(super) fn rewrite(
    type_name: &str,
    field: &str,
    children: Vec<FieldNode>,
) -> Result<(String, Vec<FieldNode>)> {
    match type_name {
        "vector" => {
            let data = array_data("vector", field, children)?;
            Ok((format!("{}[]", data.type_name), prune_primitive(data)))
        }
        "set" => {
            let data = array_data("set", field, children)?;
            Ok((format!("Set<{}>", data.type_name), prune_primitive(data)))
        }
        "map" => {
            let data = array_data("map", field, children)?;
            if !data.type_name.starts_with("Pair<") {
                return Err(mismatch(
                    "map",
                    field,
                    format!("expected a pair element but found '{}'", data),
                ));
            }
            let (first, second) = pair_halves("map", field, data)?;
            Ok((
                format!("Map<{},{}>", first.type_name, second.type_name),
                vec![second],
            ))
        }
        // already canonical strings carry no children
        "string" if children.is_empty() => Ok((type_name.to_string(), children)),
        "string" => {
            let data = array_data("string", field, children)?;
            if data.type_name != "char" {
                return Err(mismatch(
                    "string",
                    field,
                    format!("expected 'char data' but found '{}'", data),
                ));
            }
            Ok((type_name.to_string(), Vec::new()))
        }
        "pair" => {
            let pair = FieldNode::new(type_name, field).with_children(children);
            let (first, second) = pair_halves("pair", field, pair)?;
            Ok((
                format!("Pair<{},{}>", first.type_name, second.type_name),
                vec![first, second],
            ))
        }
        "TypelessData" => {
            let [size, data]: [FieldNode; 2] = children.try_into().map_err(|c: Vec<FieldNode>| {
                mismatch("TypelessData", field, format!("expected 2 children, found {}", c.len()))
            })?;
            expect_child("TypelessData", field, &size, "int", SIZE)?;
            expect_child("TypelessData", field, &data, "byte", DATA)?;
            Ok(("byte[]".to_string(), Vec::new()))
        }
        _ => Ok((type_name.to_string(), children)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn array_of(element: FieldNode) -> Vec<FieldNode> {
        vec![FieldNode::new("Array", "Array")
            .with_children(vec![FieldNode::new("int", "size"), element])]
    }

    #[test]
    fn test_vector_requires_single_array_child() {
        let err = rewrite("vector", "m_List", vec![]).unwrap_err();
        assert!(matches!(err, DumpError::UnrecognizedIdiom { ref idiom, .. } if idiom == "vector"));
    }

    #[test]
    fn test_vector_requires_int_size() {
        let children = vec![FieldNode::new("Array", "Array").with_children(vec![
            FieldNode::new("uint", "size"),
            FieldNode::new("int", "data"),
        ])];
        assert!(rewrite("vector", "m_List", children).is_err());
    }

    #[test]
    fn test_set_of_primitive_pruned() {
        let (type_name, children) =
            rewrite("set", "m_Ids", array_of(FieldNode::new("int", "data"))).unwrap();
        assert_eq!(type_name, "Set<int>");
        assert!(children.is_empty());
    }

    #[test]
    fn test_map_keeps_value_child() {
        let pair = FieldNode::new("Pair<string,Entry>", "data").with_children(vec![
            FieldNode::new("string", "first"),
            FieldNode::new("Entry", "second").with_children(vec![FieldNode::new("int", "x")]),
        ]);
        let (type_name, children) = rewrite("map", "m_Map", array_of(pair)).unwrap();
        assert_eq!(type_name, "Map<string,Entry>");
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].name, "second");
        assert_eq!(children[0].children.len(), 1);
    }

    #[test]
    fn test_map_requires_pair_element() {
        let err = rewrite("map", "m_Map", array_of(FieldNode::new("int", "data"))).unwrap_err();
        assert!(matches!(err, DumpError::UnrecognizedIdiom { .. }));
    }

    #[test]
    fn test_pair_requires_first_and_second() {
        let children = vec![FieldNode::new("int", "key"), FieldNode::new("int", "value")];
        assert!(rewrite("pair", "data", children).is_err());
    }

    #[test]
    fn test_typeless_data() {
        let children = vec![FieldNode::new("int", "size"), FieldNode::new("byte", "data")];
        let (type_name, children) = rewrite("TypelessData", "m_Blob", children).unwrap();
        assert_eq!(type_name, "byte[]");
        assert!(children.is_empty());
    }

    #[test]
    fn test_string_with_wrong_element_rejected() {
        let err = rewrite("string", "m_Name", array_of(FieldNode::new("int", "data"))).unwrap_err();
        assert!(matches!(err, DumpError::UnrecognizedIdiom { ref idiom, .. } if idiom == "string"));
    }

    #[test]
    fn test_unknown_type_passes_through() {
        let children = vec![FieldNode::new("int", "a")];
        let (type_name, out) = rewrite("Custom", "m_C", children.clone()).unwrap();
        assert_eq!(type_name, "Custom");
        assert_eq!(out, children);
    }
}
