//! Link-following pagination
//!
//! PingOne collections are cursor-paginated: each page carries the URL of
//! the next one in `_links.next.href`. There is no total count up front, so
//! pages are fetched strictly one after another.

use std::future::Future;

use log::debug;

use crate::error::Result;

/// One page of a link-paginated collection.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkedPage<T> {
    /// Items embedded in this page
    pub items: Vec<T>,

    /// URL of the next page; `None` on the last page
    pub next: Option<String>,
}

impl<T> LinkedPage<T> {
    /// A page with no successor
    pub fn last(items: Vec<T>) -> Self {
        Self { items, next: None }
    }

    /// A page followed by `next`
    pub fn with_next(items: Vec<T>, next: impl Into<String>) -> Self {
        Self {
            items,
            next: Some(next.into()),
        }
    }
}

/// Fetch every page starting at `first_url`, following `next` links until a
/// page has none, and concatenate their items in page order.
///
/// The first failing page aborts the walk and its error is returned; items
/// gathered so far are discarded. No page limit or cycle detection is
/// applied: a server that keeps returning `next` keeps being followed.
pub async fn collect_linked_pages<T, F, Fut>(first_url: String, mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<LinkedPage<T>>>,
{
    let mut all_items = Vec::new();
    let mut url = Some(first_url);
    let mut page_number = 0usize;

    while let Some(current) = url.take() {
        page_number += 1;
        debug!("Fetching page {}: {}", page_number, current);

        let page = fetch_page(current).await?;
        debug!("Page {} returned {} items", page_number, page.items.len());

        all_items.extend(page.items);
        url = page.next;
    }

    debug!(
        "Fetched {} total items across {} pages",
        all_items.len(),
        page_number
    );
    Ok(all_items)
}
