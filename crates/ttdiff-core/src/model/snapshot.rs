use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::descriptor::TypeDescriptor;
use super::version::Version;
use crate::errors::{DumpError, Result};

/// Snapshot - one parsed dump: version, kind label, and ordered descriptors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: Version,

    /// Free-form label from the header, e.g. `Release` or `Editor`
    pub kind: String,

    descriptors: Vec<TypeDescriptor>,
}

impl Snapshot {
    /// Build a snapshot, enforcing class id uniqueness
    ///
    /// # Errors
    ///
    /// Returns [`DumpError::DuplicateClassId`] if two descriptors share an id.
    pub fn new(
        version: Version,
        kind: impl Into<String>,
        descriptors: Vec<TypeDescriptor>,
    ) -> Result<Self> {
        let mut seen = HashSet::with_capacity(descriptors.len());
        for desc in &descriptors {
            if !seen.insert(desc.class_id) {
                return Err(DumpError::DuplicateClassId {
                    class_id: desc.class_id,
                });
            }
        }
        Ok(Self {
            version,
            kind: kind.into(),
            descriptors,
        })
    }

    /// Descriptors in dump order
    pub fn descriptors(&self) -> &[TypeDescriptor] {
        &self.descriptors
    }

    /// Number of descriptors the dumper produced a tree for
    pub fn valid_count(&self) -> usize {
        self.descriptors.iter().filter(|d| d.is_valid).count()
    }

    /// Look up a descriptor by class id
    pub fn find(&self, class_id: i32) -> Option<&TypeDescriptor> {
        self.descriptors.iter().find(|d| d.class_id == class_id)
    }

    /// Rebuild with a transformed descriptor list; ids are unchanged so
    /// uniqueness still holds
    pub(crate) fn map_descriptors<F>(&self, f: F) -> Result<Self>
    where
        F: FnMut(&TypeDescriptor) -> Result<TypeDescriptor>,
    {
        let descriptors = self.descriptors.iter().map(f).collect::<Result<Vec<_>>>()?;
        Ok(Self {
            version: self.version,
            kind: self.kind.clone(),
            descriptors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_class_id_rejected() {
        let result = Snapshot::new(
            Version::new(5, 0, 0),
            "Release",
            vec![
                TypeDescriptor::new(1, "GameObject", None),
                TypeDescriptor::new(1, "Transform", None),
            ],
        );
        assert_eq!(
            result.unwrap_err(),
            DumpError::DuplicateClassId { class_id: 1 }
        );
    }

    #[test]
    fn test_valid_count_and_find() {
        let snapshot = Snapshot::new(
            Version::new(5, 0, 0),
            "Release",
            vec![
                TypeDescriptor::new(1, "GameObject", None),
                TypeDescriptor::invalid(2, "Component"),
            ],
        )
        .unwrap();
        assert_eq!(snapshot.valid_count(), 1);
        assert_eq!(snapshot.find(2).map(|d| d.class_name.as_str()), Some("Component"));
        assert!(snapshot.find(3).is_none());
    }
}
