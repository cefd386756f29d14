//! Snapshot parser for the textual type-tree dump
//!
//! ```text
//! version: 2019.3.0f1 (Release)
//!
//! // classID{1}: GameObject <- EditorExtension <- Object
//! GameObject Base // ByteSize{ffffffff}, Index{0}, IsArray{0}, MetaFlag{8000}
//! 	vector m_Component // ByteSize{ffffffff}, Index{1}, IsArray{0}, MetaFlag{8041}
//! ...
//! // ====================
//! // Successfully finished. Written 1 of 1.
//! ```
//!
//! Parsing is all-or-nothing: the first structural mismatch aborts the load.

use std::io::Read;

use super::lexer::{DumpLexer, COMMENT, INHERITANCE_ARROW};
use crate::errors::{DumpError, Result};
use crate::model::{FieldNode, Snapshot, TypeDescriptor, Version};

const SUMMARY_MARKER: &str = "==";
const INVALID_MARKER: &str = "Can't";

/// Parse a dump held in memory
///
/// # Errors
///
/// Returns the first grammar, stream or consistency error encountered.
pub fn parse_snapshot_str(text: &str) -> Result<Snapshot> {
    let mut parser = SnapshotParser {
        lexer: DumpLexer::new(text),
    };
    let snapshot = parser.parse()?;
    tracing::debug!(
        version = %snapshot.version,
        kind = %snapshot.kind,
        descriptor_count = snapshot.descriptors().len(),
        "parsed snapshot"
    );
    Ok(snapshot)
}

/// Parse a dump from raw bytes, which must be UTF-8
///
/// # Errors
///
/// Returns [`DumpError::InvalidEncoding`] for non-UTF-8 input, otherwise as
/// [`parse_snapshot_str`].
pub fn parse_snapshot_bytes(bytes: &[u8]) -> Result<Snapshot> {
    let text = std::str::from_utf8(bytes).map_err(|e| DumpError::InvalidEncoding {
        message: e.to_string(),
    })?;
    parse_snapshot_str(text.strip_prefix('\u{feff}').unwrap_or(text))
}

/// Read a whole stream and parse it
///
/// # Errors
///
/// Returns [`DumpError::Io`] if reading fails, otherwise as
/// [`parse_snapshot_bytes`].
pub fn parse_snapshot_reader<R: Read>(mut reader: R) -> Result<Snapshot> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    parse_snapshot_bytes(&bytes)
}

struct SnapshotParser<'a> {
    lexer: DumpLexer<'a>,
}

impl SnapshotParser<'_> {
    fn parse(&mut self) -> Result<Snapshot> {
        let version = self.read_version()?;
        let kind = self.read_kind()?;

        let mut descriptors = Vec::new();
        loop {
            if !self.lexer.find_content() {
                return Err(DumpError::UnexpectedEof {
                    context: "looking for the trailing summary".to_string(),
                    position: self.lexer.position(),
                });
            }
            if self.peek_summary()? {
                self.read_summary(&descriptors)?;
                break;
            }
            let descriptor = self.read_descriptor()?;
            tracing::trace!(
                class_id = descriptor.class_id,
                class_name = %descriptor.class_name,
                "parsed descriptor"
            );
            descriptors.push(descriptor);
        }

        Snapshot::new(version, kind, descriptors)
    }

    // ===== Header =====

    fn read_version(&mut self) -> Result<Version> {
        self.lexer.find_validate_word("version")?;
        self.lexer.validate_word(":")?;
        let major = self.lexer.find_read_line_word()?;
        self.lexer.validate_word(".")?;
        let minor = self.lexer.read_word()?;
        self.lexer.validate_word(".")?;
        let build_type = self.lexer.read_word()?;
        Version::from_parts(&major, &minor, &build_type)
    }

    fn read_kind(&mut self) -> Result<String> {
        self.lexer.find_validate_line_word("(")?;
        let mut words = vec![self.lexer.find_read_line_word()?];
        while self.lexer.find_peek_line_word()? != ")" {
            words.push(self.lexer.find_read_line_word()?);
        }
        self.lexer.find_validate_line_word(")")?;
        self.lexer.find_validate_eol()?;
        Ok(words.join(" "))
    }

    // ===== Lookahead helpers =====

    /// Peek a `// <word>` line and return `<word>`, or `None` if the cursor
    /// is not on a comment with content
    fn peek_comment_word(&mut self) -> Result<Option<String>> {
        self.lexer.peeking(|lx| {
            if lx.is_eof() || lx.read_word()? != COMMENT {
                return Ok(None);
            }
            if !lx.find_line_content() {
                return Ok(None);
            }
            lx.read_word().map(Some)
        })
    }

    fn peek_summary(&mut self) -> Result<bool> {
        Ok(self
            .peek_comment_word()?
            .is_some_and(|w| w.starts_with(SUMMARY_MARKER)))
    }

    // ===== Summary =====

    fn read_summary(&mut self, descriptors: &[TypeDescriptor]) -> Result<()> {
        self.lexer.validate_word(COMMENT)?;
        self.lexer.find_read_line_word()?;
        self.lexer.find_validate_eol()?;
        self.lexer.find_next_line();

        self.lexer.find_validate_word(COMMENT)?;
        self.lexer.find_validate_line_word("Successfully")?;
        self.lexer.find_validate_line_word("finished")?;
        self.lexer.find_validate_line_word(".")?;
        self.lexer.find_validate_line_word("Written")?;
        let written = self.lexer.find_read_line_int()?;
        self.lexer.find_validate_line_word("of")?;
        let total = self.lexer.find_read_line_int()?;
        if self.lexer.find_line_content() {
            self.lexer.validate_word(".")?;
        }
        self.lexer.find_validate_eol()?;

        let declared_total = usize::try_from(total).unwrap_or(usize::MAX);
        if descriptors.len() != declared_total {
            return Err(DumpError::SummaryMismatch {
                what: "Class".to_string(),
                declared: declared_total,
                actual: descriptors.len(),
            });
        }
        let valid = descriptors.iter().filter(|d| d.is_valid).count();
        let declared_valid = usize::try_from(written).unwrap_or(usize::MAX);
        if valid != declared_valid {
            return Err(DumpError::SummaryMismatch {
                what: "Valid class".to_string(),
                declared: declared_valid,
                actual: valid,
            });
        }
        Ok(())
    }

    // ===== Descriptor =====

    fn read_descriptor(&mut self) -> Result<TypeDescriptor> {
        let (class_id, class_name, inheritance) = self.read_descriptor_header()?;
        let mut descriptor =
            TypeDescriptor::new(class_id, class_name, None).with_inheritance(inheritance);

        if self.read_invalid_marker(&descriptor.class_name)? {
            descriptor.is_valid = false;
            return Ok(descriptor);
        }

        let abstract_levels = self.read_abstract_marks(&descriptor)?;
        descriptor.is_abstract = abstract_levels > 0;
        if abstract_levels < descriptor.inheritance.len() + 1 {
            descriptor.root = Some(self.read_field(0)?);
        }
        Ok(descriptor)
    }

    fn read_descriptor_header(&mut self) -> Result<(i32, String, Vec<String>)> {
        self.lexer.validate_word(COMMENT)?;
        let class_id = self.lexer.read_int_parameter("classID")?;
        self.lexer.validate_word(":")?;
        let class_name = self.lexer.find_read_line_word()?;

        let mut inheritance = Vec::new();
        while self.lexer.find_line_content() {
            self.lexer.validate_word(INHERITANCE_ARROW)?;
            inheritance.push(self.lexer.find_read_line_word()?);
        }
        self.lexer.find_next_line();

        // continuation lines: `// <- Base`
        while self.peek_comment_word()?.as_deref() == Some(INHERITANCE_ARROW) {
            self.lexer.validate_word(COMMENT)?;
            self.lexer.find_validate_line_word(INHERITANCE_ARROW)?;
            inheritance.push(self.lexer.find_read_line_word()?);
            self.lexer.find_validate_eol()?;
            self.lexer.find_next_line();
        }

        Ok((class_id, class_name, inheritance))
    }

    fn read_invalid_marker(&mut self, class_name: &str) -> Result<bool> {
        if self.peek_comment_word()?.as_deref() != Some(INVALID_MARKER) {
            return Ok(false);
        }
        self.lexer.validate_word(COMMENT)?;
        self.lexer.find_validate_line_word(INVALID_MARKER)?;
        self.lexer.find_validate_line_word("produce")?;
        self.lexer.find_validate_line_word(class_name)?;
        self.lexer.find_validate_eol()?;
        self.lexer.find_next_line();
        Ok(true)
    }

    /// Consume `// <Name> is abstract` lines for the class and then each
    /// ancestor in turn; returns how many were read
    fn read_abstract_marks(&mut self, descriptor: &TypeDescriptor) -> Result<usize> {
        let chain_len = descriptor.inheritance.len() + 1;
        let mut level = 0;
        while level < chain_len && !self.lexer.is_eof() && self.lexer.peek_word()? == COMMENT {
            let name = match level {
                0 => descriptor.class_name.as_str(),
                n => descriptor.inheritance[n - 1].as_str(),
            };
            self.lexer.validate_word(COMMENT)?;
            self.lexer.find_validate_line_word(name)?;
            self.lexer.find_validate_line_word("is")?;
            self.lexer.find_validate_line_word("abstract")?;
            self.lexer.find_validate_eol()?;
            self.lexer.find_next_line();
            level += 1;
        }
        Ok(level)
    }

    // ===== Field tree =====

    fn read_field(&mut self, depth: usize) -> Result<FieldNode> {
        let type_name = self.read_field_type()?;
        let name = self.read_field_name()?;

        self.lexer.find_validate_line_word(COMMENT)?;
        let byte_size = self.lexer.read_hex_parameter("ByteSize")? as i32;
        self.lexer.find_validate_line_word(",")?;
        let index = self.lexer.read_hex_parameter("Index")? as i32;
        self.lexer.find_validate_line_word(",")?;
        let is_array = self.lexer.read_bool_parameter("IsArray")?;
        self.lexer.find_validate_line_word(",")?;
        let meta_flag = self.lexer.read_hex_parameter("MetaFlag")?;
        self.lexer.find_validate_eol()?;
        self.lexer.find_next_line();

        let mut children = Vec::new();
        while self.lexer.peek_indent() == depth + 1 {
            children.push(self.read_field(depth + 1)?);
        }

        Ok(FieldNode {
            type_name,
            name,
            byte_size,
            index,
            is_array,
            meta_flag,
            children,
        })
    }

    fn read_field_type(&mut self) -> Result<String> {
        let type_name = self.lexer.find_read_line_word()?;
        if type_name == "unsigned" {
            let sub_type = self.lexer.find_read_line_word()?;
            return Ok(format!("{} {}", type_name, sub_type));
        }
        Ok(type_name)
    }

    fn read_field_name(&mut self) -> Result<String> {
        let mut name = self.lexer.find_read_line_word()?;
        while self.lexer.find_peek_line_word()? != COMMENT {
            name.push(' ');
            name.push_str(&self.lexer.find_read_line_word()?);
        }
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_empty_dump() {
        let text = "version: 5.6.0f3 (Release)\n// ====\n// Successfully finished. Written 0 of 0.\n";
        let snapshot = parse_snapshot_str(text).unwrap();
        assert_eq!(snapshot.version.to_string(), "5.6.0f3");
        assert_eq!(snapshot.kind, "Release");
        assert!(snapshot.descriptors().is_empty());
    }

    #[test]
    fn test_multi_word_kind() {
        let text = "version: 5.6.0 (Editor Dev)\n// ==\n// Successfully finished. Written 0 of 0\n";
        let snapshot = parse_snapshot_str(text).unwrap();
        assert_eq!(snapshot.kind, "Editor Dev");
    }

    #[test]
    fn test_missing_summary_is_stream_exhausted() {
        let text = "version: 5.6.0f3 (Release)\n";
        assert!(matches!(
            parse_snapshot_str(text),
            Err(DumpError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_non_utf8_rejected() {
        assert!(matches!(
            parse_snapshot_bytes(&[0xff, 0xfe, 0x00]),
            Err(DumpError::InvalidEncoding { .. })
        ));
    }
}
