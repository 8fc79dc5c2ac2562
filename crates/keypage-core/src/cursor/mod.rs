//! Module: cursor
//! Responsibility: opaque cursor token format (binary keyset layout + base64url).
//! Does not own: sort semantics, paging decisions, or link rendering.
//! Boundary: `encode_cursor`/`decode_cursor` are the only way a keyset crosses
//! the process boundary.

mod codec;
mod error;
mod token;


pub use error::{CursorDecodeError, CursorEncodeError};
pub use token::{CursorToken, MAX_CURSOR_TOKEN_LEN, decode_cursor, encode_cursor};
