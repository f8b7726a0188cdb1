use crate::api::ProfileApi;
use crate::error::ApiError;
use crate::toast::ToastQueue;
use log::{debug, warn};
use std::collections::BTreeSet;

/// Ids of the user's favorite recipes
#[derive(Debug, Default)]
pub struct Favorites {
    ids: BTreeSet<u64>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&mut self, api: &dyn ProfileApi) -> Result<usize, ApiError> {
        let recipes = api.favorites().await?;
        self.ids = recipes.iter().map(|r| r.id).collect();
        debug!("Loaded {} favorites", self.ids.len());
        Ok(self.ids.len())
    }

    pub fn is_favorite(&self, recipe_id: u64) -> bool {
        self.ids.contains(&recipe_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Flip the favorite flag, optimistically.
    ///
    /// Returns the resulting state; on failure the flag is restored and an
    /// error toast is queued.
    pub async fn toggle(
        &mut self,
        api: &dyn ProfileApi,
        recipe_id: u64,
        toasts: &mut ToastQueue,
    ) -> bool {
        let was_favorite = self.is_favorite(recipe_id);
        if was_favorite {
            self.ids.remove(&recipe_id);
        } else {
            self.ids.insert(recipe_id);
        }

        let result = if was_favorite {
            api.remove_favorite(recipe_id).await
        } else {
            api.add_favorite(recipe_id).await
        };

        match result {
            Ok(()) => {
                toasts.success(if was_favorite {
                    "Removed from favorites"
                } else {
                    "Added to favorites"
                });
            }
            Err(e) => {
                warn!("Favorite toggle for recipe {} failed: {}", recipe_id, e);
                if was_favorite {
                    self.ids.insert(recipe_id);
                } else {
                    self.ids.remove(&recipe_id);
                }
                toasts.error(e.to_string());
            }
        }
        self.is_favorite(recipe_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::testing::FakeProfileApi;
    use crate::toast::ToastKind;
    use std::time::Duration;

    #[tokio::test]
    async fn test_toggle_on_and_off() {
        let api = FakeProfileApi::default();
        let mut toasts = ToastQueue::new(Duration::from_secs(4));
        let mut favorites = Favorites::new();

        assert!(favorites.toggle(&api, 3, &mut toasts).await);
        assert!(!favorites.toggle(&api, 3, &mut toasts).await);
        assert_eq!(api.calls(), vec!["add_favorite 3", "remove_favorite 3"]);
        assert_eq!(toasts.visible().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_toggle_reverts() {
        let api = FakeProfileApi::failing(ApiError::from_status(
            404,
            Some("Recipe with id 3 not found".into()),
        ));
        let mut toasts = ToastQueue::new(Duration::from_secs(4));
        let mut favorites = Favorites::new();

        assert!(!favorites.toggle(&api, 3, &mut toasts).await);
        assert!(favorites.is_empty());
        let toast = &toasts.visible()[0];
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.message, "Recipe with id 3 not found");
    }

    #[tokio::test]
    async fn test_load_replaces_ids() {
        let api = FakeProfileApi::default();
        api.set_favorites(&[1, 2]);
        let mut favorites = Favorites::new();
        assert_eq!(favorites.load(&api).await.unwrap(), 2);
        assert!(favorites.is_favorite(2));
    }
}
