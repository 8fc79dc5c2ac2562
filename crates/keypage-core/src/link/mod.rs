//! Module: link
//! Responsibility: decide whether previous/next links exist for a fetched page
//! and re-encode its boundary keysets into those links.
//! Does not own: response bodies or query execution.


use crate::{
    cursor::{CursorEncodeError, CursorToken, encode_cursor},
    obs::sink::{MetricsEvent, record},
    plan::{CursorParam, PagePlan},
    value::KeysetTuple,
};
use url::Url;

///
/// PageWindow
///
/// What link building needs to know about one fetched page.
/// `lowest`/`highest` are the keysets of the first and last row in display order.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PageWindow {
    pub requested: u32,
    pub returned: usize,
    pub reached_by_cursor: bool,
    pub lowest: Option<KeysetTuple>,
    pub highest: Option<KeysetTuple>,
}

impl PageWindow {
    /// Describe the page fetched for `plan`.
    #[must_use]
    pub const fn from_plan(
        plan: &PagePlan,
        returned: usize,
        lowest: Option<KeysetTuple>,
        highest: Option<KeysetTuple>,
    ) -> Self {
        Self {
            requested: plan.limit(),
            returned,
            reached_by_cursor: !plan.is_first_page(),
            lowest,
            highest,
        }
    }

    /// A previous page exists only off the first page, with rows and a boundary.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.reached_by_cursor && self.lowest.is_some() && self.returned > 0
    }

    /// A short page signals end of data.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.highest.is_some()
            && u64::try_from(self.returned).unwrap_or(u64::MAX) >= u64::from(self.requested)
    }
}

///
/// PageLinks
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PageLinks {
    pub previous: Option<Url>,
    pub next: Option<Url>,
}

/// Build previous/next links for one page from the current request URL.
///
/// Both links drop every existing `before`/`after` pair, keep all other query
/// pairs in order, and append the freshly encoded cursor.
pub fn build_links(base_url: &Url, window: &PageWindow) -> Result<PageLinks, CursorEncodeError> {
    let previous = match &window.lowest {
        Some(lowest) if window.has_previous() => {
            Some(link_for(base_url, CursorParam::Before, lowest)?)
        }
        _ => None,
    };

    let next = match &window.highest {
        Some(highest) if window.has_next() => {
            Some(link_for(base_url, CursorParam::After, highest)?)
        }
        _ => None,
    };

    record(MetricsEvent::LinksBuilt {
        previous: previous.is_some(),
        next: next.is_some(),
    });

    Ok(PageLinks { previous, next })
}

// Encode one boundary and attach it to a copy of the base URL.
fn link_for(
    base_url: &Url,
    param: CursorParam,
    tuple: &KeysetTuple,
) -> Result<Url, CursorEncodeError> {
    let token = encode_cursor(tuple)?;
    record(MetricsEvent::CursorEncoded { param });

    Ok(replace_cursor_param(base_url, param, &token))
}

fn replace_cursor_param(base_url: &Url, param: CursorParam, token: &CursorToken) -> Url {
    let retained: Vec<(String, String)> = base_url
        .query_pairs()
        .filter(|(key, _)| key != CursorParam::Before.name() && key != CursorParam::After.name())
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut url = base_url.clone();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(&retained)
        .append_pair(param.name(), token.as_str());

    url
}
