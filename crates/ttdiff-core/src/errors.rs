use thiserror::Error;
use ttdiff_core_types::SourcePosition;

/// Result type alias using DumpError
pub type Result<T> = std::result::Result<T, DumpError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure in ttdiff is fatal for the operation in progress. The kind
/// tells the caller which of the three fatal families it belongs to (or the
/// ambient I/O / internal families) and maps to a stable error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// A mandatory read ran past the end of the input
    StreamExhausted,
    /// A token did not match the expected literal, keyword, or structural shape
    GrammarViolation,
    /// Parsed counts or identity keys disagree with what was expected
    ConsistencyViolation,

    // Input decoding
    InvalidInput,

    // Integration/IO
    Io,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::StreamExhausted => "ERR_STREAM_EXHAUSTED",
            ExErrorKind::GrammarViolation => "ERR_GRAMMAR_VIOLATION",
            ExErrorKind::ConsistencyViolation => "ERR_CONSISTENCY_VIOLATION",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification plus whatever context the failing layer could
/// provide: operation name, class id, and source position.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    class_id: Option<i32>,
    position: Option<SourcePosition>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            class_id: None,
            position: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add class id context
    pub fn with_class_id(mut self, class_id: i32) -> Self {
        self.class_id = Some(class_id);
        self
    }

    /// Add source position context
    pub fn with_position(mut self, position: SourcePosition) -> Self {
        self.position = Some(position);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the class id context, if any
    pub fn class_id(&self) -> Option<i32> {
        self.class_id
    }

    /// Get the source position, if any
    pub fn position(&self) -> Option<SourcePosition> {
        self.position
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(class_id) = self.class_id {
            write!(f, " (class_id: {})", class_id)?;
        }
        if let Some(position) = self.position {
            write!(f, " ({})", position)?;
        }
        if let Some(source) = &self.source {
            write!(f, " caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for dump parsing, canonicalization, and diffing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DumpError {
    // ===== Stream Errors =====
    /// A mandatory word or character lies past the end of the input
    #[error("Unexpected end of stream while {context} at {position}")]
    UnexpectedEof {
        context: String,
        position: SourcePosition,
    },

    // ===== Grammar Errors =====
    /// A word did not match the expected literal
    #[error("Expected word '{expected}' doesn't match '{actual}' at {position}: {line}")]
    UnexpectedWord {
        expected: String,
        actual: String,
        position: SourcePosition,
        line: String,
    },

    /// Content was found where the line was expected to end
    #[error("End of line is expected while {context} but '{actual}' was found at {position}: {line}")]
    UnexpectedContent {
        context: String,
        actual: String,
        position: SourcePosition,
        line: String,
    },

    /// The line ended where a word was required
    #[error("Can't find line content while {context} at {position}: {line}")]
    MissingContent {
        context: String,
        position: SourcePosition,
        line: String,
    },

    /// A numeric token could not be parsed
    #[error("Can't parse base-{radix} integer value '{value}' at {position}")]
    InvalidNumber {
        value: String,
        radix: u32,
        position: SourcePosition,
    },

    /// The header version string is malformed
    #[error("Invalid version '{value}': {reason}")]
    InvalidVersion { value: String, reason: String },

    /// A container idiom did not have its exact expected shape
    #[error("Unrecognized {idiom} idiom at '{field}': {reason}")]
    UnrecognizedIdiom {
        idiom: String,
        field: String,
        reason: String,
    },

    /// The input bytes are not valid UTF-8
    #[error("Dump is not valid UTF-8: {message}")]
    InvalidEncoding { message: String },

    // ===== Consistency Errors =====
    /// The trailing summary disagrees with what was parsed
    #[error("{what} count mismatch. Read {actual} expected {declared}")]
    SummaryMismatch {
        what: String,
        declared: usize,
        actual: usize,
    },

    /// Two descriptors in one snapshot share a class id
    #[error("Duplicate class id {class_id}")]
    DuplicateClassId { class_id: i32 },

    /// The differ was asked to pair descriptors with different class ids
    #[error("Left class ID {left} doesn't match right {right}")]
    ClassIdMismatch { left: i32, right: i32 },

    /// The differ was asked to pair fields with different names
    #[error("Left field name '{left}' doesn't match right '{right}'")]
    FieldNameMismatch { left: String, right: String },

    /// Strict ordering requires the left snapshot to be older than the right
    #[error("Left version {left} should be less than right {right}")]
    VersionOrder { left: String, right: String },

    // ===== Internal Errors =====
    /// Lookahead nesting exceeded its bound (unbalanced peeking)
    #[error("Peek depth {depth} exceeds the lookahead bound")]
    PeekDepthExceeded { depth: usize },

    // ===== Integration Errors =====
    /// Reading the input stream failed
    #[error("IO error: {message}")]
    Io { message: String },
}

impl DumpError {
    /// Classify this error into the canonical taxonomy
    pub fn kind(&self) -> ExErrorKind {
        match self {
            DumpError::UnexpectedEof { .. } => ExErrorKind::StreamExhausted,
            DumpError::UnexpectedWord { .. }
            | DumpError::UnexpectedContent { .. }
            | DumpError::MissingContent { .. }
            | DumpError::InvalidNumber { .. }
            | DumpError::InvalidVersion { .. }
            | DumpError::UnrecognizedIdiom { .. } => ExErrorKind::GrammarViolation,
            DumpError::InvalidEncoding { .. } => ExErrorKind::InvalidInput,
            DumpError::SummaryMismatch { .. }
            | DumpError::DuplicateClassId { .. }
            | DumpError::ClassIdMismatch { .. }
            | DumpError::FieldNameMismatch { .. }
            | DumpError::VersionOrder { .. } => ExErrorKind::ConsistencyViolation,
            DumpError::PeekDepthExceeded { .. } => ExErrorKind::Internal,
            DumpError::Io { .. } => ExErrorKind::Io,
        }
    }

    /// Source position of the failure, when it happened inside the input text
    pub fn position(&self) -> Option<SourcePosition> {
        match self {
            DumpError::UnexpectedEof { position, .. }
            | DumpError::UnexpectedWord { position, .. }
            | DumpError::UnexpectedContent { position, .. }
            | DumpError::MissingContent { position, .. }
            | DumpError::InvalidNumber { position, .. } => Some(*position),
            _ => None,
        }
    }
}

/// Conversion from DumpError to ExError
impl From<DumpError> for ExError {
    fn from(err: DumpError) -> Self {
        let mut ex = ExError::new(err.kind()).with_message(err.to_string());
        if let Some(position) = err.position() {
            ex = ex.with_position(position);
        }
        match err {
            DumpError::DuplicateClassId { class_id } => ex.with_class_id(class_id),
            DumpError::ClassIdMismatch { left, .. } => ex.with_class_id(left),
            _ => ex,
        }
    }
}

/// Conversion from std::io::Error to DumpError
impl From<std::io::Error> for DumpError {
    fn from(err: std::io::Error) -> Self {
        DumpError::Io {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes() {
        let cases = [
            (ExErrorKind::StreamExhausted, "ERR_STREAM_EXHAUSTED"),
            (ExErrorKind::GrammarViolation, "ERR_GRAMMAR_VIOLATION"),
            (ExErrorKind::ConsistencyViolation, "ERR_CONSISTENCY_VIOLATION"),
            (ExErrorKind::InvalidInput, "ERR_INVALID_INPUT"),
            (ExErrorKind::Io, "ERR_IO"),
            (ExErrorKind::Internal, "ERR_INTERNAL"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_summary_mismatch_is_consistency_violation() {
        let err = DumpError::SummaryMismatch {
            what: "Class".to_string(),
            declared: 1,
            actual: 2,
        };
        assert_eq!(err.kind(), ExErrorKind::ConsistencyViolation);
        assert_eq!(err.to_string(), "Class count mismatch. Read 2 expected 1");
    }

    #[test]
    fn test_position_carried_into_ex_error() {
        let err = DumpError::UnexpectedEof {
            context: "reading a word".to_string(),
            position: SourcePosition::new(4, 2),
        };
        let ex: ExError = err.into();
        assert_eq!(ex.kind(), ExErrorKind::StreamExhausted);
        assert_eq!(ex.position(), Some(SourcePosition::new(4, 2)));
    }

    #[test]
    fn test_ex_error_display_includes_context() {
        let err = ExError::new(ExErrorKind::GrammarViolation)
            .with_op("parse_snapshot")
            .with_message("bad token")
            .with_class_id(114)
            .with_position(SourcePosition::new(10, 5));
        assert_eq!(
            err.to_string(),
            "[ERR_GRAMMAR_VIOLATION] in operation 'parse_snapshot': bad token (class_id: 114) (line 10, column 5)"
        );
    }

    #[test]
    fn test_ex_error_source_chain() {
        let inner = ExError::new(ExErrorKind::Io).with_message("disk gone");
        let outer = ExError::new(ExErrorKind::Internal).with_source(inner);
        assert_eq!(outer.source_error().map(|e| e.kind()), Some(ExErrorKind::Io));
        assert!(std::error::Error::source(&outer).is_some());
    }
}
