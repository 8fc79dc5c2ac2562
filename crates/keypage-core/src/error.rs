use crate::{
    cursor::{CursorDecodeError, CursorEncodeError},
    plan::PagePlanError,
    sort::{KeysetProjectionError, SortSpecError},
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error as ThisError;

///
/// Error
///
/// Crate-level error wrapping every component failure unchanged, with a
/// stable classification so HTTP callers can pick a status family.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] CursorDecodeError),

    #[error(transparent)]
    Encode(#[from] CursorEncodeError),

    #[error(transparent)]
    Plan(#[from] PagePlanError),

    #[error(transparent)]
    Sort(#[from] SortSpecError),

    #[error(transparent)]
    Projection(#[from] KeysetProjectionError),
}

impl Error {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Decode(_)
            | Self::Plan(_)
            | Self::Encode(CursorEncodeError::TupleTooLarge { .. }) => ErrorClass::InvalidInput,
            Self::Encode(CursorEncodeError::UnsupportedValueType { .. }) => ErrorClass::Unsupported,
            Self::Sort(_) | Self::Projection(_) => ErrorClass::Internal,
        }
    }
}

///
/// ErrorClass
///
/// `InvalidInput` is the caller's fault (4xx family); `Unsupported` and
/// `Internal` are server-side registry, schema, or configuration faults
/// (5xx family).
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum ErrorClass {
    InvalidInput,
    Unsupported,
    Internal,
}

impl ErrorClass {
    #[must_use]
    pub const fn is_client_error(self) -> bool {
        matches!(self, Self::InvalidInput)
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvalidInput => "invalid_input",
            Self::Unsupported => "unsupported",
            Self::Internal => "internal",
        };

        write!(f, "{label}")
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::{Error, ErrorClass};
    use crate::{
        cursor::{CursorDecodeError, CursorEncodeError},
        plan::{CursorParam, PagePlanError},
        sort::SortSpecError,
    };

    #[test]
    fn decode_and_plan_failures_are_client_errors() {
        let decode: Error = CursorDecodeError::TrailingBytes { remaining: 1 }.into();
        let plan: Error = PagePlanError::InvalidCursor {
            param: CursorParam::After,
            source: CursorDecodeError::NegativeLength { length: -1 },
        }
        .into();
        let conflict: Error = PagePlanError::ConflictingCursor.into();

        for err in [decode, plan, conflict] {
            assert!(err.class().is_client_error(), "{err} should be a client error");
        }
    }

    #[test]
    fn unsupported_value_type_is_a_server_error() {
        let err: Error = CursorEncodeError::UnsupportedValueType {
            kind: "Text",
            position: 0,
        }
        .into();

        assert_eq!(err.class(), ErrorClass::Unsupported);
        assert!(!err.class().is_client_error());
    }

    #[test]
    fn oversized_tuple_is_a_client_error() {
        let err: Error = CursorEncodeError::TupleTooLarge {
            length: 128,
            max: 127,
        }
        .into();

        assert_eq!(err.class(), ErrorClass::InvalidInput);
    }

    #[test]
    fn sort_configuration_faults_are_internal() {
        let err: Error = SortSpecError::Empty.into();

        assert_eq!(err.class(), ErrorClass::Internal);
        assert_eq!(err.class().to_string(), "internal");
    }

    #[test]
    fn wrapped_errors_keep_their_message() {
        let err: Error = PagePlanError::InvalidCursor {
            param: CursorParam::Before,
            source: CursorDecodeError::ArityMismatch {
                expected: 2,
                found: 1,
            },
        }
        .into();

        assert_eq!(
            err.to_string(),
            "invalid 'before' cursor: cursor keyset arity mismatch: expected 2, found 1"
        );
    }
}
