//! Unit tests for CompileError and ErrorKind

use core_types::{CompileError, ErrorKind, SourcePosition};

#[cfg(test)]
mod error_kind_tests {
    use super::*;

    #[test]
    fn test_error_kind_display() {
        assert_eq!(ErrorKind::LexicalError.to_string(), "lexical error");
        assert_eq!(ErrorKind::ParseError.to_string(), "parse error");
        assert_eq!(
            ErrorKind::NameResolutionError.to_string(),
            "name resolution error"
        );
        assert_eq!(
            ErrorKind::UnsupportedConstructError.to_string(),
            "unsupported construct"
        );
    }

    #[test]
    fn test_error_kind_equality() {
        assert_eq!(ErrorKind::ParseError, ErrorKind::ParseError);
        assert_ne!(ErrorKind::ParseError, ErrorKind::LexicalError);
    }

    #[test]
    fn test_error_kind_debug() {
        let debug_str = format!("{:?}", ErrorKind::NameResolutionError);
        assert!(debug_str.contains("NameResolutionError"));
    }
}

#[cfg(test)]
mod compile_error_tests {
    use super::*;

    #[test]
    fn test_compile_error_minimal() {
        let error = CompileError::new(ErrorKind::ParseError, "out of tokens", None);

        assert_eq!(error.kind, ErrorKind::ParseError);
        assert_eq!(error.message, "out of tokens");
        assert!(error.found.is_none());
        assert!(error.expected.is_none());
        assert!(error.source_position.is_none());
        assert_eq!(error.to_string(), "parse error: out of tokens");
    }

    #[test]
    fn test_compile_error_with_detail() {
        let error = CompileError::new(
            ErrorKind::ParseError,
            "expected ';' but found '}'",
            Some(SourcePosition::new(4, 12, 77)),
        )
        .with_expected("';'")
        .with_found("'}'");

        assert_eq!(error.expected.as_deref(), Some("';'"));
        assert_eq!(error.found.as_deref(), Some("'}'"));
        assert_eq!(
            error.to_string(),
            "parse error: expected ';' but found '}' at line 4, column 12"
        );
    }

    #[test]
    fn test_compile_error_is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        let error = CompileError::new(ErrorKind::LexicalError, "bad input", None);
        assert_error(&error);
    }

    #[test]
    fn test_compile_error_clone_eq() {
        let error = CompileError::new(ErrorKind::NameResolutionError, "unknown name 'q'", None)
            .with_found("q");
        assert_eq!(error.clone(), error);
    }
}
