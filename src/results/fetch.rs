use crate::api::RecipeSearch;
use crate::error::{ApiError, ErrorKind};
use crate::generation::{Generation, Resolution};
use crate::model::{RecipeCandidate, SearchResponse};
use crate::results::FilterConstraints;
use log::{debug, info, warn};
use std::sync::Arc;

/// Ingredients plus filters, submitted together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub ingredients: Vec<String>,
    pub constraints: FilterConstraints,
}

impl SearchQuery {
    pub fn new(ingredients: &[String], constraints: FilterConstraints) -> Self {
        SearchQuery {
            ingredients: ingredients.to_vec(),
            constraints,
        }
    }

    /// Reject queries that must never reach the server
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.ingredients.is_empty() {
            return Err(ApiError::Validation(
                "Please add at least one ingredient".to_string(),
            ));
        }
        Ok(())
    }
}

/// A search that was sent; only the latest one may change state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub generation: u64,
    pub ingredients: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStart {
    Issued(SearchTicket),
    /// Nothing to search for; the caller should leave the results view
    Redirect,
}

/// A failed search, ready to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFailure {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&ApiError> for SearchFailure {
    fn from(err: &ApiError) -> Self {
        SearchFailure {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchState {
    Idle,
    Loading { generation: u64 },
    Error(SearchFailure),
    Loaded(Arc<[RecipeCandidate]>),
}

/// Owns the fetched candidate list and the request lifecycle around it.
#[derive(Debug)]
pub struct ResultFetcher {
    state: SearchState,
    generation: Generation,
    last_query: Option<SearchQuery>,
}

impl Default for ResultFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultFetcher {
    pub fn new() -> Self {
        ResultFetcher {
            state: SearchState::Idle,
            generation: Generation::default(),
            last_query: None,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn last_query(&self) -> Option<&SearchQuery> {
        self.last_query.as_ref()
    }

    /// Start a search. Supersedes whatever was loading before.
    pub fn begin(&mut self, query: SearchQuery) -> FetchStart {
        if query.ingredients.is_empty() {
            debug!("Empty ingredient list, no search issued");
            self.state = SearchState::Idle;
            self.last_query = None;
            return FetchStart::Redirect;
        }

        let ticket = SearchTicket {
            generation: self.generation.advance(),
            ingredients: query.ingredients.clone(),
        };
        info!(
            "Search #{} issued for {:?}",
            ticket.generation, ticket.ingredients
        );
        self.state = SearchState::Loading {
            generation: ticket.generation,
        };
        self.last_query = Some(query);
        FetchStart::Issued(ticket)
    }

    /// Re-issue the last query, e.g. from the error view
    pub fn retry(&mut self) -> FetchStart {
        match self.last_query.clone() {
            Some(query) => self.begin(query),
            None => FetchStart::Redirect,
        }
    }

    /// Apply a response if it answers the latest search.
    pub fn complete(
        &mut self,
        ticket: &SearchTicket,
        result: Result<SearchResponse, ApiError>,
    ) -> Resolution {
        if !self.generation.is_current(ticket.generation) {
            debug!(
                "Discarding stale search #{} (latest is #{})",
                ticket.generation,
                self.generation.current()
            );
            return Resolution::Discarded;
        }

        self.state = match result {
            Ok(response) => {
                debug!(
                    "Search #{} returned {} of {} recipes",
                    ticket.generation,
                    response.recipes.len(),
                    response.total
                );
                SearchState::Loaded(response.recipes.into())
            }
            Err(e) => {
                warn!(
                    "Search #{} failed ({:?}): {}",
                    ticket.generation,
                    e.kind(),
                    e
                );
                SearchState::Error(SearchFailure::from(&e))
            }
        };
        Resolution::Applied
    }

    /// Run a search to completion against `api`.
    pub async fn fetch(&mut self, api: &dyn RecipeSearch, query: SearchQuery) -> &SearchState {
        if let FetchStart::Issued(ticket) = self.begin(query) {
            let result = api.search_recipes(&ticket.ingredients).await;
            self.complete(&ticket, result);
        }
        &self.state
    }

    /// [`ResultFetcher::retry`] run to completion
    pub async fn fetch_retry(&mut self, api: &dyn RecipeSearch) -> &SearchState {
        if let FetchStart::Issued(ticket) = self.retry() {
            let result = api.search_recipes(&ticket.ingredients).await;
            self.complete(&ticket, result);
        }
        &self.state
    }
}
