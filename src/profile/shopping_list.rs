use crate::api::ProfileApi;
use crate::error::ApiError;
use crate::model::ShoppingListItem;
use crate::selector::normalize;
use crate::toast::{ToastKind, ToastQueue};
use log::warn;
use tokio::time::Instant;

/// Id given to items added locally before the server has assigned one
const PENDING_ID: u64 = 0;

#[derive(Debug, Default)]
pub struct ShoppingList {
    items: Vec<ShoppingListItem>,
}

impl ShoppingList {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&mut self, api: &dyn ProfileApi) -> Result<usize, ApiError> {
        self.items = api.shopping_list().await?;
        Ok(self.items.len())
    }

    pub fn items(&self) -> &[ShoppingListItem] {
        &self.items
    }

    /// Whether the item was added locally and has no server id yet
    pub fn is_pending(item: &ShoppingListItem) -> bool {
        item.id == PENDING_ID
    }

    pub fn contains(&self, name: &str) -> bool {
        let name = normalize(name);
        self.items
            .iter()
            .any(|item| normalize(&item.ingredient_name) == name)
    }

    /// Add ingredient names not already on the list.
    ///
    /// Returns how many were added. Items show up immediately; if the server
    /// rejects them they are taken off again.
    pub async fn add_ingredients(
        &mut self,
        api: &dyn ProfileApi,
        names: &[String],
        toasts: &mut ToastQueue,
    ) -> usize {
        let mut new_names: Vec<String> = Vec::new();
        for name in names {
            let name = normalize(name);
            if !name.is_empty() && !self.contains(&name) && !new_names.contains(&name) {
                new_names.push(name);
            }
        }
        if new_names.is_empty() {
            toasts.push(
                ToastKind::Info,
                "Already on your shopping list",
                Instant::now(),
            );
            return 0;
        }

        let before = self.items.len();
        self.items
            .extend(new_names.iter().map(|name| ShoppingListItem {
                id: PENDING_ID,
                ingredient_name: name.clone(),
                quantity: None,
                unit: None,
                is_purchased: false,
            }));

        if let Err(e) = api.add_to_shopping_list(&new_names).await {
            warn!("Adding {:?} to shopping list failed: {}", new_names, e);
            self.items.truncate(before);
            toasts.error(e.to_string());
            return 0;
        }

        // Pick up server-assigned ids. On failure the local entries stay
        // pending and cannot be removed until a later load succeeds.
        if let Err(e) = self.load(api).await {
            warn!("Could not refresh shopping list: {}", e);
        }
        toasts.success(format!("Added {} item(s) to shopping list", new_names.len()));
        new_names.len()
    }

    /// Remove an item, restoring it in place if the server refuses
    pub async fn remove(
        &mut self,
        api: &dyn ProfileApi,
        item_id: u64,
        toasts: &mut ToastQueue,
    ) -> bool {
        if item_id == PENDING_ID {
            toasts.push(
                ToastKind::Info,
                "Still saving this item, try again in a moment",
                Instant::now(),
            );
            return false;
        }
        let Some(index) = self.items.iter().position(|i| i.id == item_id) else {
            return false;
        };
        let item = self.items.remove(index);

        match api.remove_from_shopping_list(item_id).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Removing shopping list item {} failed: {}", item_id, e);
                self.items.insert(index, item);
                toasts.error(e.to_string());
                false
            }
        }
    }
}
