use crate::{
    cursor::{
        CursorDecodeError, CursorEncodeError,
        codec::{self, MAX_KEYSET_BYTES},
    },
    value::KeysetTuple,
};
use base64::{
    Engine, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Longest token the codec can ever emit; anything longer is rejected
/// before base64 decoding.
pub const MAX_CURSOR_TOKEN_LEN: usize = MAX_KEYSET_BYTES.div_ceil(3) * 4;

// URL-safe alphabet. Tokens are emitted padded. Decoding accepts a token that
// is either canonically padded or carries no padding at all; a partial `=`
// run is malformed.
const PADDED_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_padding_mode(DecodePaddingMode::RequireCanonical),
);

const UNPADDED_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone),
);

///
/// CursorToken
///
/// Opaque, URL-safe page boundary token.
/// Produced when rendering a response, consumed when parsing the next request.
///

#[derive(Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CursorToken(String);

impl CursorToken {
    /// Encode a keyset tuple into a token.
    pub fn encode(tuple: &KeysetTuple) -> Result<Self, CursorEncodeError> {
        encode_cursor(tuple)
    }

    /// Decode this token, optionally enforcing the active sort arity.
    pub fn decode(&self, expected_arity: Option<usize>) -> Result<KeysetTuple, CursorDecodeError> {
        decode_cursor(&self.0, expected_arity)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for CursorToken {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for CursorToken {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl AsRef<str> for CursorToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Encode a keyset tuple as a base64url cursor token.
pub fn encode_cursor(tuple: &KeysetTuple) -> Result<CursorToken, CursorEncodeError> {
    let bytes = codec::encode_keyset(tuple.values())?;

    Ok(CursorToken(PADDED_ENGINE.encode(bytes)))
}

/// Decode a base64url cursor token into a keyset tuple.
///
/// When `expected_arity` is given, a token whose tuple width differs is
/// rejected; this stops a token minted under another sort spec from being
/// replayed against the current one.
pub fn decode_cursor(
    token: &str,
    expected_arity: Option<usize>,
) -> Result<KeysetTuple, CursorDecodeError> {
    if token.is_empty() {
        return Err(CursorDecodeError::malformed_token("cursor token is empty"));
    }

    if token.len() > MAX_CURSOR_TOKEN_LEN {
        return Err(CursorDecodeError::malformed_token(format!(
            "cursor token exceeds max length: {} chars (max {MAX_CURSOR_TOKEN_LEN})",
            token.len()
        )));
    }

    let bytes = decode_base64(token)?;
    let tuple = codec::decode_keyset(&bytes)?;

    if let Some(expected) = expected_arity
        && expected != tuple.len()
    {
        return Err(CursorDecodeError::ArityMismatch {
            expected,
            found: tuple.len(),
        });
    }

    Ok(tuple)
}

// Pick the engine by the token's own padding so each form is checked strictly.
fn decode_base64(token: &str) -> Result<Vec<u8>, CursorDecodeError> {
    let engine = if token.ends_with('=') {
        &PADDED_ENGINE
    } else {
        &UNPADDED_ENGINE
    };

    engine
        .decode(token)
        .map_err(|err| CursorDecodeError::malformed_token(err.to_string()))
}

#[cfg(test)]
pub(crate) fn encode_raw_for_test(bytes: &[u8]) -> String {
    PADDED_ENGINE.encode(bytes)
}

#[cfg(test)]
pub(crate) fn decode_raw_for_test(token: &str) -> Vec<u8> {
    decode_base64(token).expect("test token should be valid base64url")
}
