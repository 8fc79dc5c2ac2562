//! Core runtime for keypage: the scalar value registry, the opaque cursor
//! codec, the keyset page planner, link building, and observability.
//!
//! Everything here is synchronous and free of I/O. Query execution belongs to
//! the caller, which hands sort specifications and raw `before`/`after`
//! strings in and receives decoded keysets, paging hints, and links back.
#![warn(unreachable_pub)]

#[macro_use]
pub(crate) mod scalar_registry;

pub mod cursor;
pub mod error;
pub mod link;
pub mod obs;
pub mod plan;
pub mod sort;
pub mod value;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{Error, ErrorClass};

///
/// CONSTANTS
///

/// Maximum number of values a keyset tuple may carry.
///
/// The length travels as a single signed byte on the wire, so the top bit is
/// reserved as a corruption signal.
pub const MAX_KEYSET_LEN: usize = i8::MAX as usize;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, sinks, or codec helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        cursor::CursorToken,
        link::{PageLinks, PageWindow},
        plan::{PageAnchor, PagePlan},
        sort::{OrderDirection, SortSpec},
        value::{KeysetTuple, Value},
    };
}
