use crate::api::IngredientLookup;
use crate::config::FinderConfig;
use crate::debounce::Debouncer;
use crate::error::ApiError;
use crate::model::Ingredient;
use crate::selector::{IngredientSelector, LookupTicket, Resolution};
use log::debug;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};

type LookupOutcome = (LookupTicket, Result<Vec<Ingredient>, ApiError>);

/// Something the driver did while waiting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutocompleteEvent {
    /// The input settled and a lookup was started
    LookupIssued(LookupTicket),
    /// A lookup result updated the dropdown
    Resolved(LookupTicket),
    /// A lookup result arrived too late and was dropped
    Discarded(LookupTicket),
}

/// Wires typed input through the debouncer into the ingredient lookup.
///
/// Lookups run on spawned tasks and report back over a channel tagged with
/// their ticket; the selector decides whether a result is still current.
pub struct AutocompleteDriver {
    selector: IngredientSelector,
    debouncer: Debouncer<String>,
    lookup: Arc<dyn IngredientLookup>,
    limit: usize,
    in_flight: usize,
    results_tx: mpsc::UnboundedSender<LookupOutcome>,
    results_rx: mpsc::UnboundedReceiver<LookupOutcome>,
}

impl AutocompleteDriver {
    pub fn new(lookup: Arc<dyn IngredientLookup>, config: &FinderConfig) -> Self {
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        AutocompleteDriver {
            selector: IngredientSelector::new(config.min_query_len),
            debouncer: Debouncer::new(String::new(), config.debounce_window()),
            lookup,
            limit: config.autocomplete_limit,
            in_flight: 0,
            results_tx,
            results_rx,
        }
    }

    pub fn selector(&self) -> &IngredientSelector {
        &self.selector
    }

    /// Number of lookups whose results have not come back yet
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// A keystroke changed the input to `text`
    pub fn type_text(&mut self, text: &str) {
        let query = text.trim().to_string();
        if self.selector.input(text) {
            self.debouncer.push(query, Instant::now());
        } else {
            self.debouncer.reset(query);
        }
    }

    /// Wait for the next debounce expiry or lookup result.
    ///
    /// Returns `None` when nothing is pending and no lookup is in flight.
    pub async fn next_event(&mut self) -> Option<AutocompleteEvent> {
        loop {
            let deadline = self.debouncer.deadline();
            if deadline.is_none() && self.in_flight == 0 {
                return None;
            }

            tokio::select! {
                outcome = self.results_rx.recv(), if self.in_flight > 0 => {
                    let (ticket, result) = outcome?;
                    self.in_flight -= 1;
                    return Some(match self.selector.resolve(&ticket, result) {
                        Resolution::Applied => AutocompleteEvent::Resolved(ticket),
                        Resolution::Discarded => AutocompleteEvent::Discarded(ticket),
                    });
                }
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    let Some(query) = self.debouncer.poll(Instant::now()) else {
                        continue;
                    };
                    if let Some(ticket) = self.selector.settle(&query) {
                        self.spawn_lookup(ticket.clone());
                        return Some(AutocompleteEvent::LookupIssued(ticket));
                    }
                }
            }
        }
    }

    /// Drive events until nothing is pending
    pub async fn run_until_idle(&mut self) -> Vec<AutocompleteEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.next_event().await {
            events.push(event);
        }
        events
    }

    fn spawn_lookup(&mut self, ticket: LookupTicket) {
        let lookup = Arc::clone(&self.lookup);
        let tx = self.results_tx.clone();
        let limit = self.limit;
        self.in_flight += 1;
        tokio::spawn(async move {
            let result = lookup.autocomplete(&ticket.query, limit).await;
            // The driver may be gone already; its results no longer matter
            let _ = tx.send((ticket, result));
        });
    }

    /// Pick the suggestion at `index`
    pub fn choose(&mut self, index: usize) -> Option<String> {
        let added = self.selector.choose(index);
        if added.is_some() {
            self.debouncer.reset(String::new());
        }
        added
    }

    /// Enter pressed
    pub fn submit_text(&mut self) -> bool {
        let added = self.selector.submit_text();
        if self.selector.text().is_empty() {
            self.debouncer.reset(String::new());
        }
        added
    }

    /// Outside click; also drops any input still waiting out the window
    pub fn dismiss(&mut self) {
        if self.debouncer.is_pending() {
            debug!("Dropping pending autocomplete input");
        }
        self.debouncer.cancel();
        self.selector.dismiss();
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.selector.remove(name)
    }

    /// Names selected so far, in insertion order
    pub fn ingredients(&self) -> &[String] {
        self.selector.working_set().names()
    }
}
