use crate::api::{IngredientLookup, ProfileApi, RecipeSearch};
use crate::config::FinderConfig;
use crate::error::{ApiError, FinderError};
use crate::model::{
    AutocompleteResponse, FavoriteRecipe, FavoritesResponse, Ingredient, RatingSummary,
    RecipeCandidate, RecipeListResponse, SearchRequest, SearchResponse, ShoppingListItem,
    ShoppingListResponse,
};
use crate::results::PAGE_SIZE;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

/// JSON-over-HTTP client for the recipe API
pub struct HttpApiClient {
    client: Client,
    base_url: String,
}

impl HttpApiClient {
    /// Create a client from configuration
    pub fn new(config: &FinderConfig) -> Result<Self, FinderError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &config.api_token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent("Mozilla/5.0 (compatible; RecipeFinder/0.3)")
            .default_headers(headers)
            .build()?;

        Ok(HttpApiClient {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        HttpApiClient {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(ApiError::from)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v["detail"].as_str().map(str::to_string));
        warn!("Request failed with status {}: {}", status, body);
        Err(ApiError::from_status(status.as_u16(), detail))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        let status = response.status().as_u16();
        response.json::<T>().await.map_err(|e| ApiError::Server {
            status,
            detail: format!("Malformed response from server: {}", e),
        })
    }
}

#[async_trait]
impl IngredientLookup for HttpApiClient {
    async fn autocomplete(&self, query: &str, limit: usize) -> Result<Vec<Ingredient>, ApiError> {
        debug!("Autocomplete lookup for {:?}", query);
        let request = self
            .client
            .get(self.url("/api/ingredients/autocomplete"))
            .query(&[("q", query.to_string()), ("limit", limit.to_string())]);

        let body: AutocompleteResponse = self.send_json(request).await?;
        Ok(body.suggestions)
    }
}

#[async_trait]
impl RecipeSearch for HttpApiClient {
    async fn search_recipes(&self, ingredients: &[String]) -> Result<SearchResponse, ApiError> {
        let payload = SearchRequest {
            ingredients,
            filters: serde_json::Map::new(),
            page: 1,
            // The server caps page_size at 100; fetch a full batch and page locally
            page_size: PAGE_SIZE * 5,
        };
        debug!("Searching recipes for {:?}", ingredients);
        let request = self
            .client
            .post(self.url("/api/recipes/search"))
            .json(&payload);

        self.send_json(request).await
    }

    async fn popular_recipes(&self, limit: usize) -> Result<Vec<RecipeCandidate>, ApiError> {
        let request = self
            .client
            .get(self.url("/api/recipes/popular"))
            .query(&[("limit", limit.to_string())]);

        let body: RecipeListResponse = self.send_json(request).await?;
        Ok(body.recipes)
    }

    async fn recipe(&self, recipe_id: u64) -> Result<RecipeCandidate, ApiError> {
        let request = self
            .client
            .get(self.url(&format!("/api/recipes/{}", recipe_id)));
        self.send_json(request).await
    }
}

#[async_trait]
impl ProfileApi for HttpApiClient {
    async fn favorites(&self) -> Result<Vec<FavoriteRecipe>, ApiError> {
        let request = self.client.get(self.url("/api/users/favorites"));
        let body: FavoritesResponse = self.send_json(request).await?;
        Ok(body.recipes)
    }

    async fn add_favorite(&self, recipe_id: u64) -> Result<(), ApiError> {
        let request = self
            .client
            .post(self.url(&format!("/api/users/favorites/{}", recipe_id)));
        self.send(request).await.map(|_| ())
    }

    async fn remove_favorite(&self, recipe_id: u64) -> Result<(), ApiError> {
        let request = self
            .client
            .delete(self.url(&format!("/api/users/favorites/{}", recipe_id)));
        self.send(request).await.map(|_| ())
    }

    async fn shopping_list(&self) -> Result<Vec<ShoppingListItem>, ApiError> {
        let request = self.client.get(self.url("/api/users/shopping-list"));
        let body: ShoppingListResponse = self.send_json(request).await?;
        Ok(body.items)
    }

    async fn add_to_shopping_list(&self, ingredients: &[String]) -> Result<(), ApiError> {
        let request = self
            .client
            .post(self.url("/api/users/shopping-list"))
            .json(&json!({ "ingredients": ingredients }));
        self.send(request).await.map(|_| ())
    }

    async fn remove_from_shopping_list(&self, item_id: u64) -> Result<(), ApiError> {
        let request = self
            .client
            .delete(self.url(&format!("/api/users/shopping-list/{}", item_id)));
        self.send(request).await.map(|_| ())
    }

    async fn rate_recipe(&self, recipe_id: u64, rating: u8) -> Result<RatingSummary, ApiError> {
        let request = self
            .client
            .post(self.url(&format!("/api/recipes/{}/ratings", recipe_id)))
            .json(&json!({ "rating": rating }));
        self.send_json(request).await
    }
}
