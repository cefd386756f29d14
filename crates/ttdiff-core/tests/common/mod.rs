use ttdiff_core::{canonicalize_snapshot, parse_snapshot_str, FieldNode, Snapshot};

/// Dump of 2017.1.0f3: GameObject, abstract Component, Camera, Transform and
/// an invalid class 1000
#[allow(dead_code)]
pub const LEFT_DUMP: &str = include_str!("../fixtures/left_2017.txt");

/// Dump of 2018.1.0f2 (CRLF line endings): GameObject gains a field, Camera
/// is gone, Light is new, class 1000 becomes valid
#[allow(dead_code)]
pub const RIGHT_DUMP: &str = include_str!("../fixtures/right_2018.txt");

/// Parse and canonicalize a fixture
#[allow(dead_code)]
pub fn canonical(text: &str) -> Snapshot {
    let raw = parse_snapshot_str(text).expect("fixture should parse");
    canonicalize_snapshot(&raw).expect("fixture should canonicalize")
}

/// Leaf field with zeroed metadata
#[allow(dead_code)]
pub fn leaf(type_name: &str, name: &str) -> FieldNode {
    FieldNode::new(type_name, name)
}

/// Field with children
#[allow(dead_code)]
pub fn node(type_name: &str, name: &str, children: Vec<FieldNode>) -> FieldNode {
    FieldNode::new(type_name, name).with_children(children)
}

/// Raw `Array Array { int size; <element> }` wrapper
#[allow(dead_code)]
pub fn array_of(element: FieldNode) -> FieldNode {
    node("Array", "Array", vec![leaf("int", "size"), element])
}

/// Incrementally assemble dump text for parser scenarios
///
/// Tracks class counts so `build()` can emit a matching summary.
#[allow(dead_code)]
pub struct DumpBuilder {
    lines: Vec<String>,
    total: usize,
    valid: usize,
}

#[allow(dead_code)]
impl DumpBuilder {
    pub fn new(version: &str, kind: &str) -> Self {
        Self {
            lines: vec![format!("version: {} ({})", version, kind), String::new()],
            total: 0,
            valid: 0,
        }
    }

    /// Header line `// classID{id}: Name <- Base...`
    pub fn class(mut self, class_id: i32, name: &str, bases: &[&str]) -> Self {
        let mut line = format!("// classID{{{}}}: {}", class_id, name);
        for base in bases {
            line.push_str(" <- ");
            line.push_str(base);
        }
        self.lines.push(line);
        self.total += 1;
        self.valid += 1;
        self
    }

    pub fn invalid(mut self, name: &str) -> Self {
        self.lines.push(format!("// Can't produce {}", name));
        self.valid -= 1;
        self
    }

    pub fn abstract_mark(mut self, name: &str) -> Self {
        self.lines.push(format!("// {} is abstract", name));
        self
    }

    /// Field row with zeroed metadata
    pub fn field(self, depth: usize, decl: &str) -> Self {
        self.field_with(depth, decl, 4, 0)
    }

    pub fn field_with(mut self, depth: usize, decl: &str, byte_size: i32, meta_flag: u32) -> Self {
        let index = self.lines.len();
        self.lines.push(format!(
            "{}{} // ByteSize{{{:x}}}, Index{{{:x}}}, IsArray{{0}}, MetaFlag{{{:x}}}",
            "\t".repeat(depth),
            decl,
            byte_size as u32,
            index,
            meta_flag
        ));
        self
    }

    pub fn line(mut self, text: &str) -> Self {
        self.lines.push(text.to_string());
        self
    }

    pub fn blank(self) -> Self {
        self.line("")
    }

    /// Finish with a summary matching the classes added
    pub fn build(self) -> String {
        let (valid, total) = (self.valid, self.total);
        self.build_with_summary(valid, total)
    }

    pub fn build_with_summary(mut self, written: usize, total: usize) -> String {
        self.lines.push("// ========".to_string());
        self.lines.push(format!(
            "// Successfully finished. Written {} of {}.",
            written, total
        ));
        self.lines.push(String::new());
        self.lines.join("\n")
    }
}
