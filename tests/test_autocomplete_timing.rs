use async_trait::async_trait;
use recipe_finder::selector::{AutocompleteEvent, SelectorState};
use recipe_finder::{ApiError, AutocompleteDriver, FinderConfig, Ingredient, IngredientLookup};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::{advance, Instant};

/// Lookup that answers after a per-query delay and remembers what it was asked
#[derive(Default)]
struct FakeLookup {
    calls: Mutex<Vec<String>>,
    delays: HashMap<String, Duration>,
    empty: Vec<String>,
    fail: bool,
}

impl FakeLookup {
    fn with_delays(delays: &[(&str, u64)]) -> Self {
        FakeLookup {
            delays: delays
                .iter()
                .map(|(q, ms)| (q.to_string(), Duration::from_millis(*ms)))
                .collect(),
            ..Default::default()
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl IngredientLookup for FakeLookup {
    async fn autocomplete(&self, query: &str, _limit: usize) -> Result<Vec<Ingredient>, ApiError> {
        self.calls.lock().unwrap().push(query.to_string());
        let delay = self
            .delays
            .get(query)
            .copied()
            .unwrap_or(Duration::from_millis(20));
        tokio::time::sleep(delay).await;

        if self.fail {
            return Err(ApiError::Network("connection reset".to_string()));
        }
        if self.empty.iter().any(|q| q == query) {
            return Ok(Vec::new());
        }
        Ok(vec![Ingredient {
            id: 1,
            name: format!("{}-match", query.to_lowercase()),
            category: "test".to_string(),
            synonyms: Vec::new(),
        }])
    }
}

fn driver(lookup: &Arc<FakeLookup>) -> AutocompleteDriver {
    AutocompleteDriver::new(lookup.clone(), &FinderConfig::default())
}

#[tokio::test(start_paused = true)]
async fn test_fast_typing_issues_one_lookup_for_final_text() {
    let lookup = Arc::new(FakeLookup::default());
    let mut driver = driver(&lookup);

    driver.type_text("c");
    advance(Duration::from_millis(100)).await;
    driver.type_text("ch");
    advance(Duration::from_millis(100)).await;
    driver.type_text("chi");
    let settled_from = Instant::now();

    let event = driver.next_event().await.unwrap();
    match event {
        AutocompleteEvent::LookupIssued(ticket) => assert_eq!(ticket.query, "chi"),
        other => panic!("expected a lookup, got {:?}", other),
    }
    assert_eq!(Instant::now() - settled_from, Duration::from_millis(300));

    let event = driver.next_event().await.unwrap();
    assert!(matches!(event, AutocompleteEvent::Resolved(_)));
    assert_eq!(lookup.calls(), vec!["chi"]);
    assert_eq!(driver.selector().suggestions()[0].name, "chi-match");

    assert_eq!(driver.next_event().await, None);
}

#[tokio::test(start_paused = true)]
async fn test_single_character_never_looks_up() {
    let lookup = Arc::new(FakeLookup::default());
    let mut driver = driver(&lookup);

    driver.type_text("c");
    assert_eq!(driver.next_event().await, None);

    // Long enough for a moment, then shortened before the window elapsed
    driver.type_text("ch");
    advance(Duration::from_millis(100)).await;
    driver.type_text("c");
    assert_eq!(driver.next_event().await, None);

    assert!(lookup.calls().is_empty());
    assert_eq!(driver.selector().state(), &SelectorState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_slow_stale_response_is_discarded() {
    let lookup = Arc::new(FakeLookup::with_delays(&[("ch", 500), ("chi", 50)]));
    let mut driver = driver(&lookup);

    driver.type_text("ch");
    let first = match driver.next_event().await {
        Some(AutocompleteEvent::LookupIssued(ticket)) => ticket,
        other => panic!("expected a lookup, got {:?}", other),
    };

    driver.type_text("chi");
    let second = match driver.next_event().await {
        Some(AutocompleteEvent::LookupIssued(ticket)) => ticket,
        other => panic!("expected a lookup, got {:?}", other),
    };
    assert!(second.generation > first.generation);

    let events = driver.run_until_idle().await;
    assert_eq!(
        events,
        vec![
            AutocompleteEvent::Resolved(second),
            AutocompleteEvent::Discarded(first),
        ]
    );
    assert_eq!(driver.selector().suggestions().len(), 1);
    assert_eq!(driver.selector().suggestions()[0].name, "chi-match");
    assert_eq!(driver.in_flight(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_failed_lookup_degrades_to_no_suggestions() {
    let lookup = Arc::new(FakeLookup {
        fail: true,
        ..Default::default()
    });
    let mut driver = driver(&lookup);

    driver.type_text("saffron");
    driver.run_until_idle().await;

    assert_eq!(driver.selector().state(), &SelectorState::Idle);
    assert!(!driver.selector().is_dropdown_open());

    // Enter still adds the typed text
    assert!(driver.submit_text());
    assert_eq!(driver.ingredients(), ["saffron"]);
}

#[tokio::test(start_paused = true)]
async fn test_no_matches_then_enter_adds_anyway() {
    let lookup = Arc::new(FakeLookup {
        empty: vec!["Yuzu".to_string()],
        ..Default::default()
    });
    let mut driver = driver(&lookup);

    driver.type_text("Yuzu");
    driver.run_until_idle().await;
    assert_eq!(
        driver.selector().state(),
        &SelectorState::NoMatches {
            query: "Yuzu".to_string()
        }
    );

    assert!(driver.submit_text());
    assert_eq!(driver.ingredients(), ["yuzu"]);
    assert_eq!(driver.selector().state(), &SelectorState::Closed);
}

#[tokio::test(start_paused = true)]
async fn test_choosing_resets_input_for_next_lookup() {
    let lookup = Arc::new(FakeLookup::default());
    let mut driver = driver(&lookup);

    driver.type_text("rice");
    driver.run_until_idle().await;
    assert_eq!(driver.choose(0), Some("rice-match".to_string()));
    assert_eq!(driver.selector().text(), "");

    // Same text again after a selection must look up again
    driver.type_text("rice");
    driver.run_until_idle().await;
    assert_eq!(lookup.calls(), vec!["rice", "rice"]);

    // Duplicate selection is silently ignored
    assert_eq!(driver.choose(0), Some("rice-match".to_string()));
    assert_eq!(driver.ingredients(), ["rice-match"]);
}

#[tokio::test(start_paused = true)]
async fn test_dismiss_cancels_pending_input() {
    let lookup = Arc::new(FakeLookup::default());
    let mut driver = driver(&lookup);

    driver.type_text("basil");
    advance(Duration::from_millis(100)).await;
    driver.dismiss();

    assert_eq!(driver.next_event().await, None);
    assert!(lookup.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_dismiss_while_lookup_in_flight_keeps_dropdown_closed() {
    let lookup = Arc::new(FakeLookup::with_delays(&[("basil", 200)]));
    let mut driver = driver(&lookup);

    driver.type_text("basil");
    let ticket = match driver.next_event().await {
        Some(AutocompleteEvent::LookupIssued(ticket)) => ticket,
        other => panic!("expected a lookup, got {:?}", other),
    };
    assert_eq!(driver.in_flight(), 1);

    driver.dismiss();
    let events = driver.run_until_idle().await;
    assert_eq!(events, vec![AutocompleteEvent::Discarded(ticket)]);
    assert_eq!(driver.selector().state(), &SelectorState::Closed);
    assert!(!driver.selector().is_dropdown_open());

    // Enter still adds what was typed
    assert!(driver.submit_text());
    assert_eq!(driver.ingredients(), ["basil"]);
}

#[tokio::test(start_paused = true)]
async fn test_remove_missing_ingredient_is_noop() {
    let lookup = Arc::new(FakeLookup::default());
    let mut driver = driver(&lookup);

    driver.type_text("egg");
    driver.run_until_idle().await;
    driver.choose(0);

    assert!(!driver.remove("flour"));
    assert_eq!(driver.ingredients(), ["egg-match"]);
    assert!(driver.remove("EGG-match"));
    assert!(driver.ingredients().is_empty());
}
