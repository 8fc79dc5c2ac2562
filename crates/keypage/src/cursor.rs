//! Module: cursor
//! Responsibility: resolve one request URL plus endpoint config into a page
//! plan, then shape the fetched rows into a linked response.
//! Does not own: query execution; callers run the plan against their store.

use crate::{error::Error, response::CursorLinkedResponse};
use keypage_config::CursorConfig;
use keypage_core::{
    link::{PageLinks, PageWindow, build_links},
    plan::{CursorParam, PagePlan, plan},
    sort::{KeysetRow, SortSpec},
    value::KeysetTuple,
};
use url::Url;

///
/// Cursor
///
/// Resolved paging request. Wraps the plan the query layer executes and
/// carries what link building needs afterwards.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Cursor {
    plan: PagePlan,
}

impl Cursor {
    #[must_use]
    pub const fn plan(&self) -> &PagePlan {
        &self.plan
    }

    #[must_use]
    pub const fn sort(&self) -> &SortSpec {
        self.plan.sort()
    }

    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.plan.limit()
    }

    /// Links for a page whose boundary keysets the caller already projected.
    pub fn links(
        &self,
        url: &Url,
        rows_returned: usize,
        lowest: Option<KeysetTuple>,
        highest: Option<KeysetTuple>,
    ) -> Result<PageLinks, Error> {
        let window = PageWindow::from_plan(&self.plan, rows_returned, lowest, highest);

        Ok(build_links(url, &window)?)
    }

    /// Build the response body from rows in the order the query returned them.
    ///
    /// Backward pages are flipped into display order first; the boundary
    /// keysets are projected from the first and last row.
    pub fn respond<T: KeysetRow>(
        &self,
        url: &Url,
        mut rows: Vec<T>,
    ) -> Result<CursorLinkedResponse<T>, Error> {
        self.plan.restore_display_order(&mut rows);

        let lowest = rows.first().map(|row| self.sort().project(row)).transpose()?;
        let highest = rows.last().map(|row| self.sort().project(row)).transpose()?;
        let links = self.links(url, rows.len(), lowest, highest)?;

        Ok(CursorLinkedResponse::new(links, rows))
    }
}

/// Resolve the paging request carried by `url` under `config`.
///
/// Only the first `before` and first `after` values are considered. The config
/// is validated first, so an endpoint misconfiguration surfaces as an internal
/// error rather than being blamed on the request.
pub fn resolve_cursor(url: &Url, config: &CursorConfig) -> Result<Cursor, Error> {
    config.validate()?;
    let sort = config.sort_spec()?;
    let before = first_query_value(url, CursorParam::Before);
    let after = first_query_value(url, CursorParam::After);

    let plan = plan(&sort, before.as_deref(), after.as_deref(), config.page_size())?;

    Ok(Cursor { plan })
}

fn first_query_value(url: &Url, param: CursorParam) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == param.name())
        .map(|(_, value)| value.into_owned())
}

///
/// TESTS
///
