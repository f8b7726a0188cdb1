//! Search results: fetching the candidates, then filtering and paging them
//! on the client.

pub mod fetch;
pub mod filter;
pub mod pagination;

pub use fetch::{FetchStart, ResultFetcher, SearchFailure, SearchQuery, SearchState, SearchTicket};
pub use filter::{apply_filters, FilterConstraints, TimePreset, TimeRange};
pub use pagination::{paginate, PagedView};

use crate::model::RecipeCandidate;
use log::debug;
use std::sync::Arc;

/// Recipes per page unless configured otherwise
pub const PAGE_SIZE: usize = 20;

/// Derived view over the fetched candidates.
///
/// The filtered list is recomputed whenever the source or the constraints
/// change, and the page goes back to 1 when that happens.
#[derive(Debug)]
pub struct ResultsView {
    source: Arc<[RecipeCandidate]>,
    constraints: FilterConstraints,
    filtered: Vec<RecipeCandidate>,
    page: usize,
    page_size: usize,
}

impl Default for ResultsView {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl ResultsView {
    pub fn new(page_size: usize) -> Self {
        ResultsView {
            source: Arc::from(Vec::new()),
            constraints: FilterConstraints::default(),
            filtered: Vec::new(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn constraints(&self) -> &FilterConstraints {
        &self.constraints
    }

    pub fn filtered(&self) -> &[RecipeCandidate] {
        &self.filtered
    }

    pub fn source_len(&self) -> usize {
        self.source.len()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    fn recompute(&mut self) {
        self.filtered = apply_filters(&self.source, &self.constraints);
        self.page = 1;
        debug!(
            "Filtered {} of {} candidates",
            self.filtered.len(),
            self.source.len()
        );
    }

    /// Replace the candidate list (a new search came back)
    pub fn set_source(&mut self, source: Arc<[RecipeCandidate]>) {
        if Arc::ptr_eq(&self.source, &source) {
            return;
        }
        self.source = source;
        self.recompute();
    }

    pub fn set_constraints(&mut self, constraints: FilterConstraints) {
        if self.constraints == constraints {
            return;
        }
        self.constraints = constraints;
        self.recompute();
    }

    /// Edit the constraints in place; recomputes only if something changed
    pub fn update_constraints(&mut self, edit: impl FnOnce(&mut FilterConstraints)) {
        let mut constraints = self.constraints.clone();
        edit(&mut constraints);
        self.set_constraints(constraints);
    }

    /// Move to `page`, clamped into range. Does not touch the filters.
    pub fn set_page(&mut self, page: usize) {
        self.page = pagination::clamp_page(page, self.filtered.len(), self.page_size);
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page + 1);
    }

    pub fn previous_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    pub fn view(&self) -> PagedView {
        paginate(&self.filtered, self.page, self.page_size)
    }
}
