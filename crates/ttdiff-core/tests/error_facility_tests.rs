use ttdiff_core::errors::{DumpError, ExError, ExErrorKind};
use ttdiff_core_types::SourcePosition;

#[test]
fn test_stream_exhausted_carries_position() {
    let err = DumpError::UnexpectedEof {
        context: "reading a word".to_string(),
        position: SourcePosition::new(12, 9),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::StreamExhausted);
    assert_eq!(ex_err.code(), "ERR_STREAM_EXHAUSTED");
    assert_eq!(ex_err.position(), Some(SourcePosition::new(12, 9)));
    assert!(ex_err.message().contains("line 12, column 9"));
}

#[test]
fn test_grammar_violation_distinct_from_stream_exhausted() {
    let err = DumpError::UnexpectedWord {
        expected: "version".to_string(),
        actual: "revision".to_string(),
        position: SourcePosition::START,
        line: "revision: 5.6.0 (Release)".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::GrammarViolation);
    assert_ne!(ex_err.kind(), ExErrorKind::StreamExhausted);
    assert!(ex_err.message().contains("'version'"));
    assert!(ex_err.message().contains("revision: 5.6.0 (Release)"));
}

#[test]
fn test_unrecognized_idiom_is_grammar_violation() {
    let err = DumpError::UnrecognizedIdiom {
        idiom: "map".to_string(),
        field: "m_Lookup".to_string(),
        reason: "expected a pair element but found 'int data'".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.code(), "ERR_GRAMMAR_VIOLATION");
    assert_eq!(ex_err.position(), None);
    assert!(ex_err.message().contains("m_Lookup"));
}

#[test]
fn test_duplicate_class_id_conversion() {
    let ex_err: ExError = DumpError::DuplicateClassId { class_id: 114 }.into();

    assert_eq!(ex_err.kind(), ExErrorKind::ConsistencyViolation);
    assert_eq!(ex_err.class_id(), Some(114));
}

#[test]
fn test_class_id_mismatch_conversion() {
    let ex_err: ExError = DumpError::ClassIdMismatch { left: 1, right: 2 }.into();

    assert_eq!(ex_err.kind(), ExErrorKind::ConsistencyViolation);
    assert_eq!(ex_err.class_id(), Some(1));
    assert_eq!(
        ex_err.to_string(),
        "[ERR_CONSISTENCY_VIOLATION]: Left class ID 1 doesn't match right 2 (class_id: 1)"
    );
}

#[test]
fn test_io_error_conversion() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
    let err: DumpError = io.into();

    assert_eq!(err.kind(), ExErrorKind::Io);
    assert_eq!(ExError::from(err).code(), "ERR_IO");
}

#[test]
fn test_peek_depth_is_internal() {
    let err = DumpError::PeekDepthExceeded { depth: 4 };
    assert_eq!(err.kind(), ExErrorKind::Internal);
    assert_eq!(err.position(), None);
}

#[test]
fn test_error_kind_code_mapping() {
    let kinds = vec![
        (ExErrorKind::StreamExhausted, "ERR_STREAM_EXHAUSTED"),
        (ExErrorKind::GrammarViolation, "ERR_GRAMMAR_VIOLATION"),
        (ExErrorKind::ConsistencyViolation, "ERR_CONSISTENCY_VIOLATION"),
        (ExErrorKind::InvalidInput, "ERR_INVALID_INPUT"),
        (ExErrorKind::Io, "ERR_IO"),
        (ExErrorKind::Internal, "ERR_INTERNAL"),
    ];

    let mut seen = std::collections::HashSet::new();
    for (kind, expected_code) in kinds {
        assert_eq!(kind.code(), expected_code);
        assert!(seen.insert(expected_code), "duplicate code {}", expected_code);
    }
}
