//! Shared bulk-identifier policy for every list operation.
//!
//! # Invariants
//! - Zero raw ids selects everything; it is never a parse failure.
//! - Any malformed id fails the whole request before the store is touched.
//! - An exact selection returns every requested record or nothing: the first
//!   missing id aborts the request.

use crate::model::ValidationError;

/// Which records a list request targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdSelection {
    /// No ids supplied: return every record.
    All,
    /// Exactly these ids, in request order.
    Exact(Vec<i64>),
}

impl IdSelection {
    /// Parses raw transport tokens (for example repeated `ids[]` query values).
    pub fn parse<S: AsRef<str>>(raw: &[S]) -> Result<Self, ValidationError> {
        if raw.is_empty() {
            return Ok(Self::All);
        }

        raw.iter()
            .map(|token| parse_id(token.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map(Self::Exact)
    }

    /// Builds a selection from already-typed ids; an empty set selects all.
    pub fn from_ids(ids: impl IntoIterator<Item = i64>) -> Self {
        let ids: Vec<i64> = ids.into_iter().collect();
        if ids.is_empty() {
            Self::All
        } else {
            Self::Exact(ids)
        }
    }
}

/// Parses one identifier token as a non-negative base-10 integer.
pub fn parse_id(raw: &str) -> Result<i64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(ValidationError::InvalidId(raw.to_string()));
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidId(raw.to_string()))
}

/// Resolves a selection with the given single-record and full-scan lookups.
pub fn resolve<T, E>(
    selection: &IdSelection,
    mut get_one: impl FnMut(i64) -> Result<T, E>,
    get_all: impl FnOnce() -> Result<Vec<T>, E>,
) -> Result<Vec<T>, E> {
    match selection {
        IdSelection::All => get_all(),
        IdSelection::Exact(ids) => ids.iter().map(|id| get_one(*id)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_id, resolve, IdSelection};
    use crate::model::ValidationError;
    use std::cell::Cell;

    #[test]
    fn empty_input_selects_all() {
        let raw: [&str; 0] = [];
        assert_eq!(IdSelection::parse(&raw).unwrap(), IdSelection::All);
        assert_eq!(IdSelection::from_ids(Vec::new()), IdSelection::All);
    }

    #[test]
    fn parse_keeps_request_order_and_duplicates() {
        let selection = IdSelection::parse(&["3", " 1 ", "3"]).unwrap();
        assert_eq!(selection, IdSelection::Exact(vec![3, 1, 3]));
    }

    #[test]
    fn one_bad_token_fails_the_whole_selection() {
        let err = IdSelection::parse(&["1", "two", "3"]).unwrap_err();
        assert_eq!(err, ValidationError::InvalidId("two".to_string()));
    }

    #[test]
    fn negative_signed_and_blank_tokens_are_rejected() {
        for token in ["-1", "+4", "", "  ", "1.5", "99999999999999999999"] {
            assert!(parse_id(token).is_err(), "token `{token}` should be rejected");
        }
        assert_eq!(parse_id("0").unwrap(), 0);
    }

    #[test]
    fn exact_selection_stops_at_first_missing_id() {
        let calls = Cell::new(0);
        let selection = IdSelection::Exact(vec![1, 404, 2]);

        let result: Result<Vec<i64>, String> = resolve(
            &selection,
            |id| {
                calls.set(calls.get() + 1);
                if id == 404 {
                    Err(format!("missing {id}"))
                } else {
                    Ok(id)
                }
            },
            || panic!("full scan must not run for an exact selection"),
        );

        assert_eq!(result.unwrap_err(), "missing 404");
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn all_selection_uses_full_scan_only() {
        let result: Result<Vec<i64>, String> = resolve(
            &IdSelection::All,
            |_| panic!("single lookups must not run for an all selection"),
            || Ok(vec![1, 2, 3]),
        );
        assert_eq!(result.unwrap(), vec![1, 2, 3]);
    }
}
