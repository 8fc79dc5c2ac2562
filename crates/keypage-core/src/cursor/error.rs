use thiserror::Error as ThisError;

///
/// CursorDecodeError
///
/// Failures turning an untrusted cursor token back into a keyset tuple.
/// Every variant is a client-input error.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CursorDecodeError {
    #[error("malformed cursor token: {reason}")]
    MalformedToken { reason: String },

    #[error("cursor keyset length is negative: {length}")]
    NegativeLength { length: i8 },

    #[error("unknown cursor value type tag {tag} at keyset position {position}")]
    UnknownTypeTag { tag: u8, position: usize },

    #[error("cursor token truncated at keyset position {position}")]
    TruncatedInput { position: usize },

    #[error("cursor token has {remaining} trailing bytes")]
    TrailingBytes { remaining: usize },

    #[error("cursor keyset arity mismatch: expected {expected}, found {found}")]
    ArityMismatch { expected: usize, found: usize },
}

impl CursorDecodeError {
    pub(crate) fn malformed_token(reason: impl Into<String>) -> Self {
        Self::MalformedToken {
            reason: reason.into(),
        }
    }

    // Stable short label for metrics.
    pub(crate) const fn label(&self) -> &'static str {
        match self {
            Self::MalformedToken { .. } => "malformed_token",
            Self::NegativeLength { .. } => "negative_length",
            Self::UnknownTypeTag { .. } => "unknown_type_tag",
            Self::TruncatedInput { .. } => "truncated_input",
            Self::TrailingBytes { .. } => "trailing_bytes",
            Self::ArityMismatch { .. } => "arity_mismatch",
        }
    }
}

///
/// CursorEncodeError
///
/// Failures turning a keyset tuple into a cursor token.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CursorEncodeError {
    /// Client-visible: the tuple cannot fit the one-byte length prefix.
    #[error("keyset length {length} exceeds maximum {max}")]
    TupleTooLarge { length: usize, max: usize },

    /// Server-side: the data layer projected a type the registry does not carry.
    #[error("no cursor value type registered for {kind} value at keyset position {position}")]
    UnsupportedValueType { kind: &'static str, position: usize },
}
