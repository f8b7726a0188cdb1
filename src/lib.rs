pub mod api;
pub mod config;
pub mod debounce;
pub mod error;
pub mod generation;
pub mod model;
pub mod profile;
pub mod results;
pub mod selector;
pub mod session;
pub mod storage;
pub mod toast;

pub use api::{HttpApiClient, IngredientLookup, ProfileApi, RecipeSearch};
pub use config::FinderConfig;
pub use error::{ApiError, ErrorKind, FinderError};
pub use model::{Ingredient, RecipeCandidate};
pub use results::{FilterConstraints, PagedView, TimePreset, TimeRange};
pub use selector::{AutocompleteDriver, IngredientSelector, WorkingIngredientSet};
pub use session::{DiscoverySession, ResultsScreen};

use log::debug;
use std::sync::Arc;

/// Search once and return the requested page of filtered results.
///
/// Blank and duplicate names are dropped the same way the ingredient
/// selector drops them.
pub async fn find_recipes(
    config: &FinderConfig,
    ingredients: &[String],
    constraints: FilterConstraints,
    page: usize,
) -> Result<ResultsScreen, FinderError> {
    let mut working_set = WorkingIngredientSet::new();
    for name in ingredients {
        working_set.add(name);
    }
    debug!("Searching with {:?}", working_set.names());

    let client = Arc::new(HttpApiClient::new(config)?);
    let mut session = DiscoverySession::new(client, config);
    session.set_filters(constraints);
    session.submit(working_set.names()).await?;
    session.set_page(page);
    Ok(session.screen())
}
