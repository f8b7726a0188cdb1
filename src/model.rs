use serde::{Deserialize, Serialize};

/// An ingredient suggestion returned by the autocomplete endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: u64,
    pub name: String,
    /// Free-form classification, e.g. "protein" or "dairy"
    pub category: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
}

/// A recipe returned by the search endpoint, before client-side filtering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeCandidate {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub cooking_time_minutes: u32,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub serving_size: u32,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub dietary_tags: Vec<String>,
    /// Share of the recipe's required ingredients the user has, 0-100
    #[serde(default)]
    pub match_percentage: Option<f32>,
    #[serde(default)]
    pub average_rating: Option<f32>,
    #[serde(default)]
    pub total_ratings: u32,
    #[serde(default)]
    pub user_rating: Option<u8>,
}

impl RecipeCandidate {
    /// Case-insensitive tag membership
    pub fn has_tag(&self, tag: &str) -> bool {
        self.dietary_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SearchRequest<'a> {
    pub ingredients: &'a [String],
    /// Always empty: filtering happens on the client after the fetch
    pub filters: serde_json::Map<String, serde_json::Value>,
    pub page: usize,
    pub page_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub recipes: Vec<RecipeCandidate>,
    pub total: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AutocompleteResponse {
    pub suggestions: Vec<Ingredient>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RecipeListResponse {
    pub recipes: Vec<RecipeCandidate>,
}

/// A recipe in the user's favorites
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FavoriteRecipe {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub cooking_time_minutes: u32,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub average_rating: Option<f32>,
    #[serde(default)]
    pub total_ratings: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct FavoritesResponse {
    pub recipes: Vec<FavoriteRecipe>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShoppingListItem {
    pub id: u64,
    pub ingredient_name: String,
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub is_purchased: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ShoppingListResponse {
    pub items: Vec<ShoppingListItem>,
}

/// Aggregate rating for a recipe, plus the caller's own rating if any
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RatingSummary {
    #[serde(default)]
    pub average_rating: Option<f32>,
    #[serde(default)]
    pub total_ratings: u32,
    #[serde(default)]
    pub user_rating: Option<u8>,
}
