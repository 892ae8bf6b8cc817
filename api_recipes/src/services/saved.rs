use std::sync::Arc;

use async_trait::async_trait;
use common::error::{AppError, Res};
use db::models::recipe::SavedRecipeEntry;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{dtos::recipe::SavedRecipeResponse, services::recipe::to_response};

#[async_trait]
pub trait SavedRecipeRepository: Send + Sync {
    async fn recipe_exists(&self, recipe_id: i32) -> Res<bool>;
    async fn list(&self, user_id: Uuid) -> Res<Vec<SavedRecipeEntry>>;
    async fn is_saved(&self, user_id: Uuid, recipe_id: i32) -> Res<bool>;
    async fn save(&self, user_id: Uuid, recipe_id: i32) -> Res<()>;
    async fn unsave(&self, user_id: Uuid, recipe_id: i32) -> Res<()>;
}

pub struct PgSavedRecipes {
    pool: Arc<PgPool>,
}

impl PgSavedRecipes {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SavedRecipeRepository for PgSavedRecipes {
    async fn recipe_exists(&self, recipe_id: i32) -> Res<bool> {
        Ok(db::recipe::get_recipe_by_id(self.pool.as_ref(), recipe_id)
            .await?
            .is_some())
    }

    async fn list(&self, user_id: Uuid) -> Res<Vec<SavedRecipeEntry>> {
        db::saved::get_saved_recipes(self.pool.as_ref(), user_id).await
    }

    async fn is_saved(&self, user_id: Uuid, recipe_id: i32) -> Res<bool> {
        db::saved::is_recipe_saved(self.pool.as_ref(), user_id, recipe_id).await
    }

    async fn save(&self, user_id: Uuid, recipe_id: i32) -> Res<()> {
        db::saved::save_recipe(self.pool.as_ref(), user_id, recipe_id).await
    }

    async fn unsave(&self, user_id: Uuid, recipe_id: i32) -> Res<()> {
        db::saved::unsave_recipe(self.pool.as_ref(), user_id, recipe_id).await
    }
}

/// Newest first, each with its recipe embedded.
pub async fn list_saved<R: SavedRecipeRepository>(
    repo: &R,
    user_id: Uuid,
) -> Res<Vec<SavedRecipeResponse>> {
    repo.list(user_id)
        .await?
        .into_iter()
        .map(|entry| {
            Ok(SavedRecipeResponse {
                id: entry.saved_id,
                saved_at: entry.saved_at,
                recipe: to_response(entry.recipe)?,
            })
        })
        .collect()
}

/// Idempotent. Unknown recipes are a 404.
pub async fn save_recipe<R: SavedRecipeRepository>(
    repo: &R,
    user_id: Uuid,
    recipe_id: i32,
) -> Res<()> {
    if !repo.recipe_exists(recipe_id).await? {
        return Err(AppError::NotFound(format!("Recipe {} not found", recipe_id)));
    }
    repo.save(user_id, recipe_id).await
}

pub async fn unsave_recipe<R: SavedRecipeRepository>(
    repo: &R,
    user_id: Uuid,
    recipe_id: i32,
) -> Res<()> {
    repo.unsave(user_id, recipe_id).await
}

pub async fn is_saved<R: SavedRecipeRepository>(
    repo: &R,
    user_id: Uuid,
    recipe_id: i32,
) -> Res<bool> {
    repo.is_saved(user_id, recipe_id).await
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::Utc;

    use super::*;
    use crate::services::recipe::tests::recipe;

    #[derive(Default)]
    struct InMemorySaved {
        recipes: Vec<i32>,
        rows: Mutex<Vec<(Uuid, i32)>>,
    }

    impl InMemorySaved {
        fn with_recipes(recipes: &[i32]) -> Self {
            Self {
                recipes: recipes.to_vec(),
                rows: Mutex::default(),
            }
        }
    }

    #[async_trait]
    impl SavedRecipeRepository for InMemorySaved {
        async fn recipe_exists(&self, recipe_id: i32) -> Res<bool> {
            Ok(self.recipes.contains(&recipe_id))
        }

        async fn list(&self, user_id: Uuid) -> Res<Vec<SavedRecipeEntry>> {
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .iter()
                .rev()
                .enumerate()
                .filter(|(_, (owner, _))| *owner == user_id)
                .map(|(i, (_, recipe_id))| SavedRecipeEntry {
                    saved_id: i as i64,
                    saved_at: Utc::now(),
                    recipe: recipe(*recipe_id),
                })
                .collect())
        }

        async fn is_saved(&self, user_id: Uuid, recipe_id: i32) -> Res<bool> {
            Ok(self.rows.lock().unwrap().contains(&(user_id, recipe_id)))
        }

        async fn save(&self, user_id: Uuid, recipe_id: i32) -> Res<()> {
            let mut rows = self.rows.lock().unwrap();
            if !rows.contains(&(user_id, recipe_id)) {
                rows.push((user_id, recipe_id));
            }
            Ok(())
        }

        async fn unsave(&self, user_id: Uuid, recipe_id: i32) -> Res<()> {
            self.rows
                .lock()
                .unwrap()
                .retain(|row| *row != (user_id, recipe_id));
            Ok(())
        }
    }

    #[tokio::test]
    async fn save_then_unsave_leaves_recipe_unsaved() {
        let repo = InMemorySaved::with_recipes(&[1, 2]);
        let user_id = Uuid::new_v4();

        save_recipe(&repo, user_id, 1).await.unwrap();
        assert!(is_saved(&repo, user_id, 1).await.unwrap());

        unsave_recipe(&repo, user_id, 1).await.unwrap();
        assert!(!is_saved(&repo, user_id, 1).await.unwrap());
    }

    #[tokio::test]
    async fn saving_twice_keeps_one_entry() {
        let repo = InMemorySaved::with_recipes(&[1]);
        let user_id = Uuid::new_v4();

        save_recipe(&repo, user_id, 1).await.unwrap();
        save_recipe(&repo, user_id, 1).await.unwrap();

        assert_eq!(list_saved(&repo, user_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn saving_unknown_recipe_is_not_found() {
        let repo = InMemorySaved::with_recipes(&[1]);

        let err = save_recipe(&repo, Uuid::new_v4(), 99).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn saved_lists_are_per_user() {
        let repo = InMemorySaved::with_recipes(&[1, 2]);
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        save_recipe(&repo, alice, 1).await.unwrap();
        save_recipe(&repo, bob, 2).await.unwrap();

        let saved = list_saved(&repo, alice).await.unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].recipe.id, 1);
        assert!(!is_saved(&repo, alice, 2).await.unwrap());
    }
}
