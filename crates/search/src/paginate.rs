//! Pagination
//!
//! Slices the ranked+filtered list to the `[offset, offset + limit)`
//! window. Bounds are unsigned, so negative values are unrepresentable;
//! a zero limit is rejected rather than silently defaulted, since that
//! would mask caller bugs.

use unisearch_core::{Error, Result, UnifiedResult};

/// Take one page of results
///
/// An offset beyond the list length yields an empty page, not an error.
///
/// # Errors
///
/// Returns [`Error::InvalidPagination`] when `limit` is zero.
pub fn paginate(
    results: Vec<UnifiedResult>,
    offset: usize,
    limit: usize,
) -> Result<Vec<UnifiedResult>> {
    if limit == 0 {
        return Err(Error::InvalidPagination(
            "limit must be greater than zero".to_string(),
        ));
    }
    Ok(results.into_iter().skip(offset).take(limit).collect())
}

// ============================================================================
// Tests
// ============================================================================
