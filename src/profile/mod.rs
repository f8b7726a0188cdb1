//! Per-user state: favorites, shopping list and ratings.
//!
//! Mutations apply locally first and are rolled back if the server rejects
//! them. Outcomes are reported through the toast queue.

mod favorites;
mod ratings;
mod shopping_list;
#[cfg(test)]
pub(crate) mod testing;

pub use favorites::Favorites;
pub use ratings::Ratings;
pub use shopping_list::ShoppingList;

use crate::api::ProfileApi;
use crate::config::FinderConfig;
use crate::error::ApiError;
use crate::model::RecipeCandidate;
use crate::toast::ToastQueue;
use log::info;
use std::sync::Arc;

pub struct Profile {
    api: Arc<dyn ProfileApi>,
    pub favorites: Favorites,
    pub shopping_list: ShoppingList,
    pub ratings: Ratings,
    pub toasts: ToastQueue,
}

impl Profile {
    pub fn new(api: Arc<dyn ProfileApi>, config: &FinderConfig) -> Self {
        Profile {
            api,
            favorites: Favorites::new(),
            shopping_list: ShoppingList::new(),
            ratings: Ratings::new(),
            toasts: ToastQueue::new(config.toast_duration()),
        }
    }

    /// Fetch favorites and the shopping list
    pub async fn load(&mut self) -> Result<(), ApiError> {
        let favorites = self.favorites.load(self.api.as_ref()).await?;
        let items = self.shopping_list.load(self.api.as_ref()).await?;
        info!("Profile loaded: {} favorites, {} list items", favorites, items);
        Ok(())
    }

    pub async fn toggle_favorite(&mut self, recipe_id: u64) -> bool {
        self.favorites
            .toggle(self.api.as_ref(), recipe_id, &mut self.toasts)
            .await
    }

    pub async fn add_to_shopping_list(&mut self, names: &[String]) -> usize {
        self.shopping_list
            .add_ingredients(self.api.as_ref(), names, &mut self.toasts)
            .await
    }

    pub async fn remove_from_shopping_list(&mut self, item_id: u64) -> bool {
        self.shopping_list
            .remove(self.api.as_ref(), item_id, &mut self.toasts)
            .await
    }

    /// Pick up rating aggregates from freshly loaded search results
    pub fn seed_ratings(&mut self, recipes: &[RecipeCandidate]) {
        for recipe in recipes {
            self.ratings.seed(recipe);
        }
    }

    pub async fn rate(&mut self, recipe_id: u64, stars: u8) -> Result<(), ApiError> {
        self.ratings
            .rate(self.api.as_ref(), recipe_id, stars, &mut self.toasts)
            .await
            .map(|_| ())
    }
}
