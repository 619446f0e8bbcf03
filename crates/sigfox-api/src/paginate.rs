// Cursor-driven pagination over list endpoints.
//
// Pages are fetched one at a time through a caller-supplied fetch function,
// classified, decoded, and merged in server order.

use std::collections::HashSet;
use std::future::Future;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::classify::{RequestKind, classify};
use crate::decode::decode;
use crate::error::Error;
use crate::models::Page;
use crate::transport::RawResponse;

/// Upper bound on pages fetched in a single traversal.
pub const MAX_PAGES: usize = 1000;

/// How far a list operation walks the `paging.next` chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageMode {
    /// Return the first page and its cursor.
    #[default]
    FirstPage,
    /// Follow cursors until the last page and merge everything.
    All,
}

/// Fetch `start` and, in [`PageMode::All`], every following page.
///
/// A failure on the first page is returned as-is. On later pages a 403 is
/// still fatal, but any other non-2xx status ends the traversal and the pages
/// collected so far are returned, with the cursor of the last good page left
/// in `paging.next`. Transport and decode errors are always fatal.
pub async fn paginate<T, F, Fut>(start: Url, mode: PageMode, mut fetch: F) -> Result<Page<T>, Error>
where
    T: DeserializeOwned,
    F: FnMut(Url) -> Fut,
    Fut: Future<Output = Result<RawResponse, Error>>,
{
    let resp = fetch(start.clone()).await?;
    classify(resp.status, &resp.body, RequestKind::Read)?;
    let mut acc: Page<T> = decode(&resp.body)?;

    if mode == PageMode::FirstPage {
        return Ok(acc);
    }

    let mut current = start;
    let mut visited = HashSet::from([current.to_string()]);
    let mut fetched = 1;

    while let Some(next) = acc.paging.next.as_deref() {
        let next_url = current.join(next)?;

        if !visited.insert(next_url.to_string()) {
            warn!(url = %next_url, "pagination cursor repeats, stopping traversal");
            break;
        }
        if fetched >= MAX_PAGES {
            warn!(pages = fetched, "pagination page limit reached, stopping traversal");
            break;
        }

        debug!(page = fetched + 1, url = %next_url, "fetching next page");
        let resp = fetch(next_url.clone()).await?;
        match classify(resp.status, &resp.body, RequestKind::Read) {
            Ok(()) => {}
            Err(err @ Error::Auth { .. }) => return Err(err),
            Err(err) => {
                warn!(
                    page = fetched + 1,
                    items = acc.data.len(),
                    error = %err,
                    "page fetch failed, returning partial result"
                );
                break;
            }
        }

        let page: Page<T> = decode(&resp.body)?;
        acc.merge(page);
        current = next_url;
        fetched += 1;
    }

    Ok(acc)
}
