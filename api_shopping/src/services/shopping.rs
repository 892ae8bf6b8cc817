use std::sync::Arc;

use async_trait::async_trait;
use common::error::{AppError, Res};
use db::{dtos::shopping::ShoppingItemCreateRequest, models::shopping::ShoppingListItem};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::shopping::AddItemRequest;

#[async_trait]
pub trait ShoppingRepository: Send + Sync {
    async fn recipe_exists(&self, recipe_id: i32) -> Res<bool>;
    async fn list(&self, user_id: Uuid) -> Res<Vec<ShoppingListItem>>;
    async fn insert(&self, data: ShoppingItemCreateRequest) -> Res<ShoppingListItem>;
    async fn set_completed(
        &self,
        user_id: Uuid,
        item_id: i64,
        completed: bool,
    ) -> Res<Option<ShoppingListItem>>;
    async fn delete(&self, user_id: Uuid, item_id: i64) -> Res<u64>;
    async fn clear_completed(&self, user_id: Uuid) -> Res<u64>;
}

pub struct PgShoppingList {
    pool: Arc<PgPool>,
}

impl PgShoppingList {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShoppingRepository for PgShoppingList {
    async fn recipe_exists(&self, recipe_id: i32) -> Res<bool> {
        Ok(db::recipe::get_recipe_by_id(self.pool.as_ref(), recipe_id)
            .await?
            .is_some())
    }

    async fn list(&self, user_id: Uuid) -> Res<Vec<ShoppingListItem>> {
        db::shopping::get_shopping_list(self.pool.as_ref(), user_id).await
    }

    async fn insert(&self, data: ShoppingItemCreateRequest) -> Res<ShoppingListItem> {
        db::shopping::insert_shopping_item(self.pool.as_ref(), data).await
    }

    async fn set_completed(
        &self,
        user_id: Uuid,
        item_id: i64,
        completed: bool,
    ) -> Res<Option<ShoppingListItem>> {
        db::shopping::set_item_completed(self.pool.as_ref(), user_id, item_id, completed).await
    }

    async fn delete(&self, user_id: Uuid, item_id: i64) -> Res<u64> {
        db::shopping::delete_shopping_item(self.pool.as_ref(), user_id, item_id).await
    }

    async fn clear_completed(&self, user_id: Uuid) -> Res<u64> {
        db::shopping::clear_completed_items(self.pool.as_ref(), user_id).await
    }
}

fn item_not_found(item_id: i64) -> AppError {
    AppError::NotFound(format!("Shopping item {} not found", item_id))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub async fn list_items<R: ShoppingRepository>(
    repo: &R,
    user_id: Uuid,
) -> Res<Vec<ShoppingListItem>> {
    repo.list(user_id).await
}

pub async fn add_item<R: ShoppingRepository>(
    repo: &R,
    user_id: Uuid,
    req: AddItemRequest,
) -> Res<ShoppingListItem> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Item name is required".to_string()));
    }
    if let Some(recipe_id) = req.recipe_id {
        if !repo.recipe_exists(recipe_id).await? {
            return Err(AppError::NotFound(format!("Recipe {} not found", recipe_id)));
        }
    }

    repo.insert(ShoppingItemCreateRequest {
        user_id,
        name: name.to_string(),
        quantity: non_blank(req.quantity),
        category: non_blank(req.category),
        recipe_id: req.recipe_id,
    })
    .await
}

/// Items of other users are reported as missing.
pub async fn toggle_item<R: ShoppingRepository>(
    repo: &R,
    user_id: Uuid,
    item_id: i64,
    completed: bool,
) -> Res<ShoppingListItem> {
    repo.set_completed(user_id, item_id, completed)
        .await?
        .ok_or_else(|| item_not_found(item_id))
}

pub async fn delete_item<R: ShoppingRepository>(repo: &R, user_id: Uuid, item_id: i64) -> Res<()> {
    match repo.delete(user_id, item_id).await? {
        0 => Err(item_not_found(item_id)),
        _ => Ok(()),
    }
}

/// Returns how many items were removed.
pub async fn clear_completed<R: ShoppingRepository>(repo: &R, user_id: Uuid) -> Res<u64> {
    let removed = repo.clear_completed(user_id).await?;
    log::debug!("Cleared {} completed items for {}", removed, user_id);
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::Utc;

    use super::*;

    #[derive(Default)]
    struct InMemoryList {
        items: Mutex<Vec<ShoppingListItem>>,
        recipes: Vec<i32>,
    }

    #[async_trait]
    impl ShoppingRepository for InMemoryList {
        async fn recipe_exists(&self, recipe_id: i32) -> Res<bool> {
            Ok(self.recipes.contains(&recipe_id))
        }

        async fn list(&self, user_id: Uuid) -> Res<Vec<ShoppingListItem>> {
            let items = self.items.lock().unwrap();
            Ok(items
                .iter()
                .rev()
                .filter(|item| item.user_id == user_id)
                .cloned()
                .collect())
        }

        async fn insert(&self, data: ShoppingItemCreateRequest) -> Res<ShoppingListItem> {
            let mut items = self.items.lock().unwrap();
            let now = Utc::now();
            let item = ShoppingListItem {
                id: items.len() as i64 + 1,
                user_id: data.user_id,
                name: data.name,
                quantity: data.quantity,
                category: data.category,
                completed: false,
                recipe_id: data.recipe_id,
                created_at: now,
                updated_at: now,
            };
            items.push(item.clone());
            Ok(item)
        }

        async fn set_completed(
            &self,
            user_id: Uuid,
            item_id: i64,
            completed: bool,
        ) -> Res<Option<ShoppingListItem>> {
            let mut items = self.items.lock().unwrap();
            Ok(items
                .iter_mut()
                .find(|item| item.id == item_id && item.user_id == user_id)
                .map(|item| {
                    item.completed = completed;
                    item.clone()
                }))
        }

        async fn delete(&self, user_id: Uuid, item_id: i64) -> Res<u64> {
            let mut items = self.items.lock().unwrap();
            let before = items.len();
            items.retain(|item| !(item.id == item_id && item.user_id == user_id));
            Ok((before - items.len()) as u64)
        }

        async fn clear_completed(&self, user_id: Uuid) -> Res<u64> {
            let mut items = self.items.lock().unwrap();
            let before = items.len();
            items.retain(|item| !(item.completed && item.user_id == user_id));
            Ok((before - items.len()) as u64)
        }
    }

    fn add(name: &str) -> AddItemRequest {
        AddItemRequest {
            name: name.to_string(),
            quantity: Some(" 2 ".to_string()),
            category: Some("".to_string()),
            recipe_id: None,
        }
    }

    #[tokio::test]
    async fn clear_completed_keeps_open_items() {
        let repo = InMemoryList::default();
        let user_id = Uuid::new_v4();

        let milk = add_item(&repo, user_id, add("Milk")).await.unwrap();
        let eggs = add_item(&repo, user_id, add("Eggs")).await.unwrap();
        add_item(&repo, user_id, add("Bread")).await.unwrap();
        toggle_item(&repo, user_id, milk.id, true).await.unwrap();
        toggle_item(&repo, user_id, eggs.id, true).await.unwrap();

        assert_eq!(clear_completed(&repo, user_id).await.unwrap(), 2);

        let left = list_items(&repo, user_id).await.unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].name, "Bread");
        assert!(!left[0].completed);
    }

    #[tokio::test]
    async fn add_trims_fields_and_rejects_blank_names() {
        let repo = InMemoryList::default();
        let user_id = Uuid::new_v4();

        let item = add_item(&repo, user_id, add("  Flour ")).await.unwrap();
        assert_eq!(item.name, "Flour");
        assert_eq!(item.quantity.as_deref(), Some("2"));
        assert_eq!(item.category, None);

        let err = add_item(&repo, user_id, add("   ")).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn other_users_items_are_not_found() {
        let repo = InMemoryList::default();
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let item = add_item(&repo, owner, add("Butter")).await.unwrap();

        let err = toggle_item(&repo, stranger, item.id, true).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = delete_item(&repo, stranger, item.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        assert_eq!(list_items(&repo, owner).await.unwrap().len(), 1);
        delete_item(&repo, owner, item.id).await.unwrap();
        assert!(list_items(&repo, owner).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_recipe_is_not_found() {
        let repo = InMemoryList {
            recipes: vec![3],
            ..Default::default()
        };
        let user_id = Uuid::new_v4();
        let from_recipe = |recipe_id| AddItemRequest {
            recipe_id: Some(recipe_id),
            ..add("Basil")
        };

        let err = add_item(&repo, user_id, from_recipe(42)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(message) if message == "Recipe 42 not found"));
        assert!(list_items(&repo, user_id).await.unwrap().is_empty());

        let item = add_item(&repo, user_id, from_recipe(3)).await.unwrap();
        assert_eq!(item.recipe_id, Some(3));
    }
}
