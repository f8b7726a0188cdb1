use crate::api::RecipeSearch;
use crate::config::FinderConfig;
use crate::error::ApiError;
use crate::generation::Resolution;
use crate::model::{RecipeCandidate, SearchResponse};
use crate::results::{
    FetchStart, FilterConstraints, PagedView, ResultFetcher, ResultsView, SearchQuery,
    SearchState, SearchTicket, TimePreset,
};
use log::info;
use std::sync::Arc;

/// What the results page should show
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsScreen {
    /// No ingredients: leave the results page for the home page
    Redirect,
    Loading,
    /// Blocking error with a retry action
    Error { message: String, can_retry: bool },
    /// Search or filters left nothing to show
    Empty { back_to_home: bool },
    Page(PagedView),
}

/// One trip through search results: submit, fetch, then filter and page.
pub struct DiscoverySession {
    search: Arc<dyn RecipeSearch>,
    fetcher: ResultFetcher,
    view: ResultsView,
}

impl DiscoverySession {
    pub fn new(search: Arc<dyn RecipeSearch>, config: &FinderConfig) -> Self {
        DiscoverySession {
            search,
            fetcher: ResultFetcher::new(),
            view: ResultsView::new(config.page_size),
        }
    }

    pub fn fetcher(&self) -> &ResultFetcher {
        &self.fetcher
    }

    pub fn view(&self) -> &ResultsView {
        &self.view
    }

    /// Start a search without waiting for it; pair with [`DiscoverySession::finish`].
    ///
    /// An empty ingredient list is rejected here so it can be shown inline.
    pub fn start(&mut self, ingredients: &[String]) -> Result<FetchStart, ApiError> {
        let query = SearchQuery::new(ingredients, self.view.constraints().clone());
        query.validate()?;
        Ok(self.fetcher.begin(query))
    }

    /// Hand a search response to the session
    pub fn finish(
        &mut self,
        ticket: &SearchTicket,
        result: Result<SearchResponse, ApiError>,
    ) -> Resolution {
        let resolution = self.fetcher.complete(ticket, result);
        self.sync_view();
        resolution
    }

    /// Submit the working ingredient set and wait for the results
    pub async fn submit(&mut self, ingredients: &[String]) -> Result<(), ApiError> {
        if let FetchStart::Issued(ticket) = self.start(ingredients)? {
            let result = self.search.search_recipes(&ticket.ingredients).await;
            self.finish(&ticket, result);
        }
        Ok(())
    }

    /// Re-run the last search from the error screen
    pub async fn retry(&mut self) {
        info!("Retrying last search");
        self.fetcher.fetch_retry(self.search.as_ref()).await;
        self.sync_view();
    }

    /// Navigated back to the results with a possibly cleared selection
    pub async fn reopen(&mut self, ingredients: &[String]) {
        let query = SearchQuery::new(ingredients, self.view.constraints().clone());
        self.fetcher.fetch(self.search.as_ref(), query).await;
        self.sync_view();
    }

    fn sync_view(&mut self) {
        if let SearchState::Loaded(recipes) = self.fetcher.state() {
            self.view.set_source(Arc::clone(recipes));
        }
    }

    pub fn set_filters(&mut self, constraints: FilterConstraints) {
        self.view.set_constraints(constraints);
    }

    /// Select a quick time filter, or clear it with `None`
    pub fn set_time_preset(&mut self, preset: Option<TimePreset>) {
        self.view.update_constraints(|c| c.time_range = preset.map(|p| p.range()));
    }

    pub fn toggle_dietary_tag(&mut self, tag: &str) {
        self.view.update_constraints(|c| {
            if !c.remove_tag(tag) {
                c.insert_tag(tag);
            }
        });
    }

    pub fn clear_filters(&mut self) {
        self.view.set_constraints(FilterConstraints::default());
    }

    pub fn set_page(&mut self, page: usize) {
        self.view.set_page(page);
    }

    /// Candidates as fetched, before filtering
    pub fn candidates(&self) -> Option<&[RecipeCandidate]> {
        match self.fetcher.state() {
            SearchState::Loaded(recipes) => Some(&**recipes),
            _ => None,
        }
    }

    pub fn screen(&self) -> ResultsScreen {
        match self.fetcher.state() {
            SearchState::Idle => ResultsScreen::Redirect,
            SearchState::Loading { .. } => ResultsScreen::Loading,
            SearchState::Error(failure) => ResultsScreen::Error {
                message: failure.message.clone(),
                can_retry: self.fetcher.last_query().is_some(),
            },
            SearchState::Loaded(_) => {
                let page = self.view.view();
                if page.is_empty() {
                    ResultsScreen::Empty { back_to_home: true }
                } else {
                    ResultsScreen::Page(page)
                }
            }
        }
    }
}
