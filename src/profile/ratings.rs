use crate::api::ProfileApi;
use crate::error::ApiError;
use crate::model::{RatingSummary, RecipeCandidate};
use crate::toast::ToastQueue;
use log::warn;
use std::collections::HashMap;

/// Rating aggregates per recipe, as last seen by this client
#[derive(Debug, Default)]
pub struct Ratings {
    summaries: HashMap<u64, RatingSummary>,
}

impl Ratings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember the aggregate that came with a search result
    pub fn seed(&mut self, recipe: &RecipeCandidate) {
        self.summaries.insert(
            recipe.id,
            RatingSummary {
                average_rating: recipe.average_rating,
                total_ratings: recipe.total_ratings,
                user_rating: recipe.user_rating,
            },
        );
    }

    pub fn summary(&self, recipe_id: u64) -> Option<&RatingSummary> {
        self.summaries.get(&recipe_id)
    }

    /// Rate a recipe 1-5 stars.
    ///
    /// The user's stars show immediately; the server's aggregate replaces
    /// them on success, the previous summary comes back on failure.
    pub async fn rate(
        &mut self,
        api: &dyn ProfileApi,
        recipe_id: u64,
        stars: u8,
        toasts: &mut ToastQueue,
    ) -> Result<RatingSummary, ApiError> {
        if !(1..=5).contains(&stars) {
            return Err(ApiError::Validation(
                "Rating must be between 1 and 5".to_string(),
            ));
        }

        let previous = self.summaries.get(&recipe_id).cloned();
        self.summaries.entry(recipe_id).or_default().user_rating = Some(stars);

        match api.rate_recipe(recipe_id, stars).await {
            Ok(summary) => {
                self.summaries.insert(recipe_id, summary.clone());
                toasts.success("Thanks for rating!");
                Ok(summary)
            }
            Err(e) => {
                warn!("Rating recipe {} failed: {}", recipe_id, e);
                match previous {
                    Some(summary) => self.summaries.insert(recipe_id, summary),
                    None => self.summaries.remove(&recipe_id),
                };
                toasts.error(e.to_string());
                Err(e)
            }
        }
    }
}
