//! Re-emit parsed data in the dump grammar.

use std::fmt::Write as _;

use crate::model::{FieldNode, Snapshot, TypeDescriptor};

/// Render one descriptor as dump text: header line(s) then tab-indented rows
///
/// A raw (non-canonical) descriptor round-trips through the parser.
pub fn render_type_tree(descriptor: &TypeDescriptor) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "// classID{{{}}}: {}",
        descriptor.class_id, descriptor.class_name
    );
    for base in &descriptor.inheritance {
        let _ = write!(out, " <- {}", base);
    }
    out.push('\n');

    if !descriptor.is_valid {
        let _ = writeln!(out, "// Can't produce {}", descriptor.class_name);
        return out;
    }
    if descriptor.is_abstract {
        let _ = writeln!(out, "// {} is abstract", descriptor.class_name);
        if descriptor.root.is_none() {
            for base in &descriptor.inheritance {
                let _ = writeln!(out, "// {} is abstract", base);
            }
        }
    }
    if let Some(root) = &descriptor.root {
        write_field(&mut out, root, 0);
    }
    out
}

fn write_field(out: &mut String, node: &FieldNode, depth: usize) {
    for _ in 0..depth {
        out.push('\t');
    }
    let _ = writeln!(
        out,
        "{} {} // ByteSize{{{:x}}}, Index{{{:x}}}, IsArray{{{}}}, MetaFlag{{{:x}}}",
        node.type_name,
        node.name,
        node.byte_size as u32,
        node.index as u32,
        u8::from(node.is_array),
        node.meta_flag
    );
    for child in &node.children {
        write_field(out, child, depth + 1);
    }
}

/// Render every class as a C-style enum, ordered by class id
///
/// Values are aligned on a 4-column tab grid.
pub fn render_class_enum(snapshot: &Snapshot) -> String {
    let mut descriptors: Vec<&TypeDescriptor> = snapshot.descriptors().iter().collect();
    descriptors.sort_by_key(|d| d.class_id);

    let longest = descriptors
        .iter()
        .map(|d| d.class_name.chars().count())
        .max()
        .unwrap_or(0);
    let column = (longest + 4) & !3;

    let mut out = String::from("enum ClassIDType\n{\n");
    for desc in descriptors {
        let padding = column - desc.class_name.chars().count();
        let tabs = (padding + 3) / 4;
        let _ = writeln!(
            out,
            "\t{}{}= {},",
            desc.class_name,
            "\t".repeat(tabs),
            desc.class_id
        );
    }
    out.push_str("}\n");
    out
}
