//! Binary keyset layout: `[length: u8][(tag: u8, payload) × length]`.
//!
//! Values are written in natural tuple order; position *i* on the decoded side
//! is sort column *i*. There is no version byte, so layout changes are breaking.

use crate::{
    MAX_KEYSET_LEN,
    cursor::{CursorDecodeError, CursorEncodeError},
    value::{KeysetTuple, ScalarTag, Value},
};

/// Largest encoded keyset: full-width tuple of the widest registry entry.
pub(crate) const MAX_KEYSET_BYTES: usize = 1 + MAX_KEYSET_LEN * (1 + max_payload_width());

const fn max_payload_width() -> usize {
    let mut max = 0;
    let mut idx = 0;
    while idx < ScalarTag::ALL.len() {
        let width = ScalarTag::ALL[idx].width();
        if width > max {
            max = width;
        }
        idx += 1;
    }

    max
}

/// Encode keyset values into the binary cursor layout.
pub(crate) fn encode_keyset(values: &[Value]) -> Result<Vec<u8>, CursorEncodeError> {
    let length = u8::try_from(values.len())
        .ok()
        .filter(|len| usize::from(*len) <= MAX_KEYSET_LEN)
        .ok_or(CursorEncodeError::TupleTooLarge {
            length: values.len(),
            max: MAX_KEYSET_LEN,
        })?;

    let mut out = Vec::with_capacity(1 + values.len() * (1 + max_payload_width()));
    out.push(length);

    for (position, value) in values.iter().enumerate() {
        let tag =
            ScalarTag::for_value(value).ok_or(CursorEncodeError::UnsupportedValueType {
                kind: value.kind(),
                position,
            })?;

        out.push(tag.tag());
        let written = tag.write_payload(value, &mut out);
        debug_assert!(written, "registry lookup and payload writer disagree");
    }

    Ok(out)
}

/// Decode the binary cursor layout, consuming `bytes` exactly.
pub(crate) fn decode_keyset(bytes: &[u8]) -> Result<KeysetTuple, CursorDecodeError> {
    let Some((&raw_length, mut input)) = bytes.split_first() else {
        return Err(CursorDecodeError::TruncatedInput { position: 0 });
    };

    // The top bit of the length byte is reserved; a set bit means corruption.
    let length = i8::from_be_bytes([raw_length]);
    if length < 0 {
        return Err(CursorDecodeError::NegativeLength { length });
    }

    let length = usize::from(raw_length);
    let mut values = Vec::with_capacity(length);

    for position in 0..length {
        let Some((&raw_tag, rest)) = input.split_first() else {
            return Err(CursorDecodeError::TruncatedInput { position });
        };
        let tag = ScalarTag::from_tag(raw_tag).ok_or(CursorDecodeError::UnknownTypeTag {
            tag: raw_tag,
            position,
        })?;
        input = rest;

        let value = tag
            .read_payload(&mut input)
            .ok_or(CursorDecodeError::TruncatedInput { position })?;
        values.push(value);
    }

    if !input.is_empty() {
        return Err(CursorDecodeError::TrailingBytes {
            remaining: input.len(),
        });
    }

    Ok(KeysetTuple::new(values))
}
