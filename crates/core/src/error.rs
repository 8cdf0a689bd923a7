//! Error types for the unified search engine
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use crate::search_types::SourceType;
use thiserror::Error;

/// Result type alias for search operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the unified search engine
///
/// Only invalid input and malformed source data produce errors. A query
/// that matches nothing is NOT an error: it returns an empty result page
/// with zero-valued facets.
#[derive(Debug, Error)]
pub enum Error {
    /// Query text is empty or whitespace-only
    #[error("Query must not be empty")]
    EmptyQuery,

    /// Pagination bounds are invalid
    ///
    /// Defaults are only substituted for omitted fields, never for
    /// invalid ones; a zero limit masks caller bugs and is rejected.
    #[error("Invalid pagination: {0}")]
    InvalidPagination(String),

    /// Filter state is invalid (e.g., no source types enabled)
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// A source dataset contains a record the matcher cannot interpret
    ///
    /// The orchestrator isolates this to the offending source: the other
    /// sources still contribute results and the failure is surfaced as a
    /// non-fatal warning.
    // The field must not be named `source`: thiserror wires a field of
    // that name into `std::error::Error::source()`, which requires an
    // error type, and `SourceType` is not one.
    #[error("Malformed {source_type} source data: {reason}")]
    MalformedSource {
        /// Source whose data is malformed
        source_type: SourceType,
        /// What the matcher found
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_empty_query() {
        let err = Error::EmptyQuery;
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_error_display_invalid_pagination() {
        let err = Error::InvalidPagination("limit must be greater than zero".to_string());
        let msg = err.to_string();
        assert!(msg.contains("Invalid pagination"));
        assert!(msg.contains("limit must be greater than zero"));
    }

    #[test]
    fn test_error_display_invalid_filter() {
        let err = Error::InvalidFilter("at least one source type must be enabled".to_string());
        let msg = err.to_string();
        assert!(msg.contains("Invalid filter"));
        assert!(msg.contains("source type"));
    }

    #[test]
    fn test_error_display_malformed_source() {
        let err = Error::MalformedSource {
            source_type: SourceType::Kg,
            reason: "entity with empty id".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("kg"));
        assert!(msg.contains("entity with empty id"));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<i32> {
            Ok(42)
        }

        fn returns_error() -> Result<i32> {
            Err(Error::EmptyQuery)
        }

        assert_eq!(returns_result().unwrap(), 42);
        assert!(returns_error().is_err());
    }

    #[test]
    fn test_malformed_source_has_no_error_chain() {
        use std::error::Error as StdError;

        // `source_type` is a plain discriminant, not a wrapped cause.
        let err = Error::MalformedSource {
            source_type: SourceType::Idp,
            reason: "x".to_string(),
        };
        assert!(err.source().is_none());
    }

    #[test]
    fn test_error_pattern_matching() {
        let err = Error::MalformedSource {
            source_type: SourceType::Rag,
            reason: "bad".to_string(),
        };

        match err {
            Error::MalformedSource {
                source_type,
                reason,
            } => {
                assert_eq!(source_type, SourceType::Rag);
                assert_eq!(reason, "bad");
            }
            _ => panic!("Wrong error variant"),
        }
    }
}
