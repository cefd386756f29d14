use serde::{Deserialize, Serialize};
use std::fmt;

use super::field::FieldNode;

/// TypeDescriptor - one class entry of a snapshot
///
/// Invalid descriptors (the dumper could not produce a tree) and fully
/// abstract descriptors carry no field tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Class identifier, unique within a snapshot
    pub class_id: i32,

    pub class_name: String,

    /// Ancestor names, nearest first: index 0 is the direct base
    pub inheritance: Vec<String>,

    pub is_valid: bool,

    /// Set when at least the class itself is marked abstract
    pub is_abstract: bool,

    /// Field tree rooted at the class itself
    pub root: Option<FieldNode>,
}

impl TypeDescriptor {
    /// Create a valid, concrete descriptor with the given field tree
    pub fn new(class_id: i32, class_name: impl Into<String>, root: Option<FieldNode>) -> Self {
        Self {
            class_id,
            class_name: class_name.into(),
            inheritance: Vec::new(),
            is_valid: true,
            is_abstract: false,
            root,
        }
    }

    /// Create a descriptor the dumper could not produce
    pub fn invalid(class_id: i32, class_name: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            ..Self::new(class_id, class_name, None)
        }
    }

    /// Builder-style helper to set the inheritance chain
    pub fn with_inheritance(mut self, inheritance: Vec<String>) -> Self {
        self.inheritance = inheritance;
        self
    }

    /// Direct base class name, or empty when the class has no base
    pub fn base_name(&self) -> &str {
        self.inheritance.first().map(String::as_str).unwrap_or("")
    }

    /// Whether this descriptor has a field tree to compare
    pub fn has_tree(&self) -> bool {
        self.is_valid && !self.is_abstract && self.root.is_some()
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_abstract {
            write!(f, "abstract ")?;
        }
        write!(f, "{}({})", self.class_name, self.class_id)?;
        if let Some(base) = self.inheritance.first() {
            write!(f, " : {}", base)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_name() {
        let root = TypeDescriptor::new(0, "Object", None);
        let derived = TypeDescriptor::new(1, "GameObject", None)
            .with_inheritance(vec!["EditorExtension".into(), "Object".into()]);
        assert_eq!(root.base_name(), "");
        assert_eq!(derived.base_name(), "EditorExtension");
    }

    #[test]
    fn test_display() {
        let mut desc = TypeDescriptor::new(2, "Component", None)
            .with_inheritance(vec!["EditorExtension".into(), "Object".into()]);
        assert_eq!(desc.to_string(), "Component(2) : EditorExtension");
        desc.is_abstract = true;
        assert_eq!(desc.to_string(), "abstract Component(2) : EditorExtension");
    }

    #[test]
    fn test_invalid_has_no_tree() {
        let desc = TypeDescriptor::invalid(7, "Broken");
        assert!(!desc.is_valid);
        assert!(!desc.has_tree());
    }
}
