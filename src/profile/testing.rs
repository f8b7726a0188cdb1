use crate::api::ProfileApi;
use crate::error::ApiError;
use crate::model::{FavoriteRecipe, RatingSummary, ShoppingListItem};
use async_trait::async_trait;
use std::sync::Mutex;

/// In-memory profile backend that records calls and can be told to fail
#[derive(Default)]
pub struct FakeProfileApi {
    failure: Option<ApiError>,
    fail_reads: bool,
    calls: Mutex<Vec<String>>,
    favorites: Mutex<Vec<u64>>,
    items: Mutex<Vec<ShoppingListItem>>,
}

impl FakeProfileApi {
    pub fn failing(err: ApiError) -> Self {
        FakeProfileApi {
            failure: Some(err),
            ..Default::default()
        }
    }

    /// Writes succeed but listing the shopping list fails
    pub fn failing_reads() -> Self {
        FakeProfileApi {
            fail_reads: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn set_favorites(&self, ids: &[u64]) {
        *self.favorites.lock().unwrap() = ids.to_vec();
    }

    fn record(&self, call: String) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ProfileApi for FakeProfileApi {
    async fn favorites(&self) -> Result<Vec<FavoriteRecipe>, ApiError> {
        self.record("favorites".to_string())?;
        Ok(self
            .favorites
            .lock()
            .unwrap()
            .iter()
            .map(|id| FavoriteRecipe {
                id: *id,
                name: format!("Recipe {}", id),
                description: None,
                cooking_time_minutes: 30,
                image_url: None,
                average_rating: None,
                total_ratings: 0,
            })
            .collect())
    }

    async fn add_favorite(&self, recipe_id: u64) -> Result<(), ApiError> {
        self.record(format!("add_favorite {}", recipe_id))
    }

    async fn remove_favorite(&self, recipe_id: u64) -> Result<(), ApiError> {
        self.record(format!("remove_favorite {}", recipe_id))
    }

    async fn shopping_list(&self) -> Result<Vec<ShoppingListItem>, ApiError> {
        self.record("shopping_list".to_string())?;
        if self.fail_reads {
            return Err(ApiError::Network("connection reset".to_string()));
        }
        Ok(self.items.lock().unwrap().clone())
    }

    async fn add_to_shopping_list(&self, ingredients: &[String]) -> Result<(), ApiError> {
        self.record(format!("add_to_shopping_list {}", ingredients.join(",")))?;
        let mut items = self.items.lock().unwrap();
        for name in ingredients {
            let id = items.len() as u64 + 100;
            items.push(ShoppingListItem {
                id,
                ingredient_name: name.clone(),
                quantity: None,
                unit: None,
                is_purchased: false,
            });
        }
        Ok(())
    }

    async fn remove_from_shopping_list(&self, item_id: u64) -> Result<(), ApiError> {
        self.record(format!("remove_from_shopping_list {}", item_id))?;
        self.items.lock().unwrap().retain(|i| i.id != item_id);
        Ok(())
    }

    async fn rate_recipe(&self, recipe_id: u64, rating: u8) -> Result<RatingSummary, ApiError> {
        self.record(format!("rate_recipe {} {}", recipe_id, rating))?;
        Ok(RatingSummary {
            average_rating: Some(rating as f32),
            total_ratings: 1,
            user_rating: Some(rating),
        })
    }
}
