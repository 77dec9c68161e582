//! Remote collection state with a synchronously derived search/pagination
//! view.

use std::sync::Arc;

use shared::error::RemoteError;
use tracing::{debug, warn};

use crate::remote::CollectionSource;

/// Decides whether a row matches a search term. Called only for non-empty
/// terms.
pub type SearchPredicate<R> = Box<dyn Fn(&R, &str) -> bool + Send + Sync>;

/// Default search policy: case-insensitive substring match across the given
/// field extractors.
pub fn search_fields<R: 'static>(
    extract: Vec<Box<dyn Fn(&R) -> String + Send + Sync>>,
) -> SearchPredicate<R> {
    Box::new(move |row, term| {
        let needle = term.to_lowercase();
        extract
            .iter()
            .any(|field| field(row).to_lowercase().contains(&needle))
    })
}

/// Wraps one remote "fetch all" source and derives the visible table slice
/// from it. `all` is the source of truth (the last successful fetch);
/// `filtered` and the current page are recomputed synchronously whenever the
/// inputs change, so no observable state ever disagrees with them.
pub struct CollectionQuery<R> {
    source: Arc<dyn CollectionSource<R>>,
    matches: SearchPredicate<R>,
    all: Vec<R>,
    /// Indices into `all`, in fetch order. Rebuilt on every fetch or term
    /// change, never carried across fetches.
    filtered: Vec<usize>,
    search_term: String,
    current_page: usize,
    page_size: usize,
    is_loading: bool,
    error: Option<RemoteError>,
}

impl<R> CollectionQuery<R> {
    pub fn new(
        source: Arc<dyn CollectionSource<R>>,
        page_size: usize,
        matches: SearchPredicate<R>,
    ) -> Self {
        Self {
            source,
            matches,
            all: Vec::new(),
            filtered: Vec::new(),
            search_term: String::new(),
            current_page: 1,
            page_size: page_size.max(1),
            is_loading: false,
            error: None,
        }
    }

    /// Fetches the collection. On failure the previous `all` is kept
    /// (stale-but-available) and the error becomes page-level state; there is
    /// no automatic retry.
    pub async fn load(&mut self) {
        self.is_loading = true;
        match self.source.fetch_all().await {
            Ok(rows) => {
                debug!(rows = rows.len(), "collection fetched");
                self.all = rows;
                self.error = None;
            }
            Err(err) => {
                warn!(error = %err, "collection fetch failed");
                self.error = Some(err);
            }
        }
        self.is_loading = false;
        self.recompute_view();
    }

    /// Re-fetches with the same source. Invoked by the mutation layer after
    /// every acknowledged write.
    pub async fn refresh(&mut self) {
        self.load().await;
    }

    /// Updates the search term. Any change snaps back to page 1 so the view
    /// cannot land on a page that no longer exists.
    pub fn set_search_term(&mut self, term: &str) {
        if term == self.search_term {
            return;
        }
        self.search_term = term.to_string();
        self.current_page = 1;
        self.recompute_view();
    }

    /// Moves to page `page`, clamped into `[1, total_pages]`. Never refetches.
    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.total_pages());
    }

    pub fn all(&self) -> &[R] {
        &self.all
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// The visible slice: rows of the current page of the filtered view.
    pub fn page(&self) -> Vec<&R> {
        let start = (self.current_page - 1) * self.page_size;
        self.filtered
            .iter()
            .skip(start)
            .take(self.page_size)
            .map(|&index| &self.all[index])
            .collect()
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        self.filtered.len().div_ceil(self.page_size).max(1)
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&RemoteError> {
        self.error.as_ref()
    }

    fn recompute_view(&mut self) {
        self.filtered = if self.search_term.is_empty() {
            (0..self.all.len()).collect()
        } else {
            self.all
                .iter()
                .enumerate()
                .filter(|(_, row)| (self.matches)(row, &self.search_term))
                .map(|(index, _)| index)
                .collect()
        };
        self.current_page = self.current_page.clamp(1, self.total_pages());
    }
}

#[cfg(test)]
#[path = "tests/collection_tests.rs"]
mod tests;
