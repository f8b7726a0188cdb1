mod http;

pub use http::HttpApiClient;

use crate::error::ApiError;
use crate::model::{
    FavoriteRecipe, Ingredient, RatingSummary, RecipeCandidate, SearchResponse, ShoppingListItem,
};
use async_trait::async_trait;

/// Ingredient lookup service backing the autocomplete dropdown
#[async_trait]
pub trait IngredientLookup: Send + Sync {
    /// Ranked suggestions for a partial ingredient name
    async fn autocomplete(&self, query: &str, limit: usize) -> Result<Vec<Ingredient>, ApiError>;
}

/// Recipe search service
#[async_trait]
pub trait RecipeSearch: Send + Sync {
    /// Fetch candidates for a list of ingredient names.
    ///
    /// No filters are sent; results are filtered locally.
    async fn search_recipes(&self, ingredients: &[String]) -> Result<SearchResponse, ApiError>;

    /// Most viewed / best rated recipes, shown before any search
    async fn popular_recipes(&self, limit: usize) -> Result<Vec<RecipeCandidate>, ApiError>;

    /// Full details for a single recipe
    async fn recipe(&self, recipe_id: u64) -> Result<RecipeCandidate, ApiError>;
}

/// Per-user profile mutations
#[async_trait]
pub trait ProfileApi: Send + Sync {
    async fn favorites(&self) -> Result<Vec<FavoriteRecipe>, ApiError>;

    async fn add_favorite(&self, recipe_id: u64) -> Result<(), ApiError>;

    async fn remove_favorite(&self, recipe_id: u64) -> Result<(), ApiError>;

    async fn shopping_list(&self) -> Result<Vec<ShoppingListItem>, ApiError>;

    async fn add_to_shopping_list(&self, ingredients: &[String]) -> Result<(), ApiError>;

    async fn remove_from_shopping_list(&self, item_id: u64) -> Result<(), ApiError>;

    /// Submit or update the caller's 1-5 star rating
    async fn rate_recipe(&self, recipe_id: u64, rating: u8) -> Result<RatingSummary, ApiError>;
}
