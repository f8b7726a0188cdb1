//! Ingredient selection: the autocomplete dropdown state machine and the
//! working set it feeds.

pub mod autocomplete;
mod working_set;

pub use autocomplete::{AutocompleteDriver, AutocompleteEvent};
pub use working_set::{normalize, WorkingIngredientSet};

use crate::error::ApiError;
use crate::generation::Generation;
pub use crate::generation::Resolution;
use crate::model::Ingredient;
use log::{debug, warn};

/// Shortest input, in characters, that triggers a lookup
pub const MIN_QUERY_LEN: usize = 2;

/// Dropdown state. Only one of these holds at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorState {
    /// Input empty or too short
    Idle,
    /// A lookup for `query` is in flight
    Querying { generation: u64, query: String },
    /// Dropdown open with suggestions
    Suggesting { suggestions: Vec<Ingredient> },
    /// Lookup returned nothing; the dropdown offers "press Enter to add anyway"
    NoMatches { query: String },
    /// Dropdown dismissed by a selection or an outside click
    Closed,
}

/// Identifies one issued lookup. Results are only applied for the latest ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    pub generation: u64,
    pub query: String,
}

#[derive(Debug)]
pub struct IngredientSelector {
    text: String,
    state: SelectorState,
    working_set: WorkingIngredientSet,
    min_query_len: usize,
    generation: Generation,
}

impl Default for IngredientSelector {
    fn default() -> Self {
        Self::new(MIN_QUERY_LEN)
    }
}

impl IngredientSelector {
    pub fn new(min_query_len: usize) -> Self {
        IngredientSelector {
            text: String::new(),
            state: SelectorState::Idle,
            working_set: WorkingIngredientSet::new(),
            min_query_len,
            generation: Generation::default(),
        }
    }

    pub fn state(&self) -> &SelectorState {
        &self.state
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn working_set(&self) -> &WorkingIngredientSet {
        &self.working_set
    }

    /// Suggestions currently shown, empty unless the dropdown is suggesting
    pub fn suggestions(&self) -> &[Ingredient] {
        match &self.state {
            SelectorState::Suggesting { suggestions } => suggestions,
            _ => &[],
        }
    }

    pub fn is_dropdown_open(&self) -> bool {
        matches!(
            self.state,
            SelectorState::Suggesting { .. } | SelectorState::NoMatches { .. }
        )
    }

    fn long_enough(&self, query: &str) -> bool {
        query.trim().chars().count() >= self.min_query_len
    }

    /// Record the raw input text.
    ///
    /// Returns whether the text is long enough to be debounced into a lookup.
    /// Shorter input closes the dropdown and clears suggestions.
    pub fn input(&mut self, text: &str) -> bool {
        self.text = text.to_string();
        if self.long_enough(text) {
            true
        } else {
            self.state = SelectorState::Idle;
            false
        }
    }

    /// Debounced text arrived; start a lookup if it is long enough.
    pub fn settle(&mut self, text: &str) -> Option<LookupTicket> {
        if !self.long_enough(text) {
            return None;
        }
        let ticket = LookupTicket {
            generation: self.generation.advance(),
            query: text.trim().to_string(),
        };
        debug!("Lookup #{} issued for {:?}", ticket.generation, ticket.query);
        self.state = SelectorState::Querying {
            generation: ticket.generation,
            query: ticket.query.clone(),
        };
        Some(ticket)
    }

    /// Apply a lookup result if it belongs to the lookup currently in flight.
    pub fn resolve(
        &mut self,
        ticket: &LookupTicket,
        result: Result<Vec<Ingredient>, ApiError>,
    ) -> Resolution {
        match &self.state {
            SelectorState::Querying { generation, .. } if *generation == ticket.generation => {}
            _ => {
                debug!(
                    "Discarding stale lookup #{} for {:?}",
                    ticket.generation, ticket.query
                );
                return Resolution::Discarded;
            }
        }

        self.state = match result {
            Ok(suggestions) if suggestions.is_empty() => SelectorState::NoMatches {
                query: ticket.query.clone(),
            },
            Ok(suggestions) => SelectorState::Suggesting { suggestions },
            Err(e) => {
                // Lookup failures never block typing
                warn!("Ingredient lookup for {:?} failed: {}", ticket.query, e);
                SelectorState::Idle
            }
        };
        Resolution::Applied
    }

    /// Pick the suggestion at `index`; returns its normalized name, even if it was already present.
    pub fn choose(&mut self, index: usize) -> Option<String> {
        let ingredient = self.suggestions().get(index)?.clone();
        self.choose_ingredient(&ingredient);
        Some(normalize(&ingredient.name))
    }

    /// Add a suggestion by its canonical name and close the dropdown.
    pub fn choose_ingredient(&mut self, ingredient: &Ingredient) -> bool {
        let added = self.working_set.add(&ingredient.name);
        self.text.clear();
        self.state = SelectorState::Closed;
        added
    }

    /// Enter pressed: add the typed text as-is, bypassing suggestions.
    ///
    /// Ignored while a lookup is in flight or when the input is blank.
    pub fn submit_text(&mut self) -> bool {
        if matches!(self.state, SelectorState::Querying { .. }) {
            return false;
        }
        let typed = self.text.trim().to_lowercase();
        if typed.is_empty() {
            return false;
        }
        let added = self.working_set.add(&typed);
        self.text.clear();
        self.state = SelectorState::Closed;
        added
    }

    /// Click outside the component. A lookup still in flight is abandoned.
    pub fn dismiss(&mut self) {
        if self.is_dropdown_open() || matches!(self.state, SelectorState::Querying { .. }) {
            self.state = SelectorState::Closed;
        }
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.working_set.remove(name)
    }

    /// Add a name directly, e.g. when restoring a previous search.
    pub fn add(&mut self, name: &str) -> bool {
        self.working_set.add(name)
    }
}
