//! ## Crate layout
//! - `core`: value registry, cursor codec, page planner, link builder, and
//!   observability.
//! - `config`: per-endpoint paging configuration read from TOML.
//! - `cursor`: request resolution (`resolve_cursor`) and response shaping.
//! - `response`: the `CursorLinkedResponse` body.
//!
//! The `prelude` module mirrors what an endpoint handler needs.

pub use keypage_config as config;
pub use keypage_core as core;

pub mod cursor;
pub mod error;
pub mod response;

pub use cursor::{Cursor, resolve_cursor};
pub use error::{Error, ErrorOrigin};
pub use response::CursorLinkedResponse;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        config::{CursorConfig, OrderConfig},
        core::{ErrorClass, prelude::*, sort::KeysetRow},
        cursor::{Cursor, resolve_cursor},
        error::Error,
        response::CursorLinkedResponse,
    };
}
