use crate::{cursor::CursorDecodeError, plan::CursorParam};
use thiserror::Error as ThisError;

///
/// PagePlanError
///
/// Page request validation failures. All are client-input errors.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PagePlanError {
    #[error("before and after cursors are mutually exclusive")]
    ConflictingCursor,

    #[error("page size must be greater than zero")]
    ZeroPageSize,

    #[error("invalid '{param}' cursor: {source}")]
    InvalidCursor {
        param: CursorParam,
        source: CursorDecodeError,
    },
}

impl PagePlanError {
    /// Codec failure behind an invalid cursor, if any.
    #[must_use]
    pub const fn decode_error(&self) -> Option<&CursorDecodeError> {
        match self {
            Self::InvalidCursor { source, .. } => Some(source),
            Self::ConflictingCursor | Self::ZeroPageSize => None,
        }
    }
}
