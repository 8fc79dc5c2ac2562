//! Module: plan
//! Responsibility: turn raw `before`/`after` strings plus a page size into
//! query-layer paging hints and decoded keyset bounds.
//! Does not own: token bytes (see `cursor`) or link rendering (see `link`).

mod error;

#[cfg(test)]
mod tests;

pub use error::PagePlanError;

use crate::{
    cursor::decode_cursor,
    obs::sink::{MetricsEvent, record},
    sort::SortSpec,
    value::KeysetTuple,
};
use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// CursorParam
///
/// The two mutually exclusive query parameters carrying cursor tokens.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub enum CursorParam {
    #[display("before")]
    Before,
    #[display("after")]
    After,
}

impl CursorParam {
    /// Query parameter name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
        }
    }
}

///
/// PageKind
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum PageKind {
    First,
    Forward,
    Backward,
}

///
/// PageAnchor
///
/// Where the requested page sits relative to a decoded boundary.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PageAnchor {
    /// No cursor: the first page in natural sort order.
    First,
    /// Rows strictly after this keyset, fetched in sort order.
    After(KeysetTuple),
    /// Rows strictly before this keyset, fetched in reversed sort order.
    Before(KeysetTuple),
}

impl PageAnchor {
    #[must_use]
    pub const fn kind(&self) -> PageKind {
        match self {
            Self::First => PageKind::First,
            Self::After(_) => PageKind::Forward,
            Self::Before(_) => PageKind::Backward,
        }
    }
}

///
/// PagePlan
///
/// Request-scoped paging hints for the query layer.
///
/// `offset`, `window_offset`, and `reversed_fetch` are advisory: they are the
/// shape one keyset-over-offset query strategy needs and carry no meaning for
/// clients.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PagePlan {
    sort: SortSpec,
    limit: u32,
    offset: u64,
    window_offset: u64,
    anchor: PageAnchor,
}

impl PagePlan {
    #[must_use]
    pub const fn sort(&self) -> &SortSpec {
        &self.sort
    }

    /// Rows to fetch.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Zero for first and forward pages, twice the page size for backward pages.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// Zero on the first page, one page size on any page reached by cursor.
    #[must_use]
    pub const fn window_offset(&self) -> u64 {
        self.window_offset
    }

    #[must_use]
    pub const fn anchor(&self) -> &PageAnchor {
        &self.anchor
    }

    #[must_use]
    pub const fn kind(&self) -> PageKind {
        self.anchor.kind()
    }

    #[must_use]
    pub const fn is_first_page(&self) -> bool {
        matches!(self.anchor, PageAnchor::First)
    }

    /// Upper scan bound decoded from `before`.
    #[must_use]
    pub const fn lowest(&self) -> Option<&KeysetTuple> {
        match &self.anchor {
            PageAnchor::Before(tuple) => Some(tuple),
            _ => None,
        }
    }

    /// Lower scan bound decoded from `after`.
    #[must_use]
    pub const fn highest(&self) -> Option<&KeysetTuple> {
        match &self.anchor {
            PageAnchor::After(tuple) => Some(tuple),
            _ => None,
        }
    }

    /// True when the query runs in reversed order and the caller must flip
    /// the fetched rows back into display order.
    #[must_use]
    pub const fn reversed_fetch(&self) -> bool {
        matches!(self.anchor, PageAnchor::Before(_))
    }

    /// Order the query layer should scan in.
    #[must_use]
    pub fn query_sort(&self) -> SortSpec {
        if self.reversed_fetch() {
            self.sort.reversed()
        } else {
            self.sort.clone()
        }
    }

    /// Reorder fetched rows into display order (no-op unless `reversed_fetch`).
    pub fn restore_display_order<T>(&self, rows: &mut [T]) {
        if self.reversed_fetch() {
            rows.reverse();
        }
    }
}

/// Plan one page request.
///
/// At most one of `before`/`after` may be present. Tokens are decoded with
/// the sort spec's arity so a token minted for another spec is rejected.
pub fn plan(
    sort: &SortSpec,
    before: Option<&str>,
    after: Option<&str>,
    page_size: u32,
) -> Result<PagePlan, PagePlanError> {
    if before.is_some() && after.is_some() {
        return Err(PagePlanError::ConflictingCursor);
    }
    if page_size == 0 {
        return Err(PagePlanError::ZeroPageSize);
    }

    let page = u64::from(page_size);
    let (anchor, offset, window_offset) = match (before, after) {
        (Some(token), _) => {
            let tuple = decode_param(sort, CursorParam::Before, token)?;
            (PageAnchor::Before(tuple), page * 2, page)
        }
        (None, Some(token)) => {
            let tuple = decode_param(sort, CursorParam::After, token)?;
            (PageAnchor::After(tuple), 0, page)
        }
        (None, None) => (PageAnchor::First, 0, 0),
    };

    record(MetricsEvent::PagePlanned {
        kind: anchor.kind(),
    });

    Ok(PagePlan {
        sort: sort.clone(),
        limit: page_size,
        offset,
        window_offset,
        anchor,
    })
}

// Decode one cursor parameter against the active sort arity.
fn decode_param(
    sort: &SortSpec,
    param: CursorParam,
    token: &str,
) -> Result<KeysetTuple, PagePlanError> {
    match decode_cursor(token, Some(sort.len())) {
        Ok(tuple) => {
            record(MetricsEvent::CursorDecoded { param });
            Ok(tuple)
        }
        Err(source) => {
            record(MetricsEvent::CursorRejected {
                param,
                reason: source.label(),
            });
            Err(PagePlanError::InvalidCursor { param, source })
        }
    }
}
