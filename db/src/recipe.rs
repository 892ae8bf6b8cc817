use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};

use crate::models::recipe::Recipe;

pub async fn get_all_recipes<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
) -> Res<Vec<Recipe>> {
    sqlx::query_as::<_, Recipe>("SELECT * FROM recipes ORDER BY rating DESC, id ASC")
        .fetch_all(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_recipe_by_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    recipe_id: i32,
) -> Res<Option<Recipe>> {
    sqlx::query_as::<_, Recipe>("SELECT * FROM recipes WHERE id = $1")
        .bind(recipe_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

/// Case-insensitive substring match over name, description and tags.
pub async fn search_recipes<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    query: &str,
) -> Res<Vec<Recipe>> {
    let pattern = format!("%{}%", escape_like(query));
    sqlx::query_as::<_, Recipe>(
        r#"
        SELECT * FROM recipes
        WHERE name ILIKE $1
           OR description ILIKE $1
           OR tags ILIKE $1
        ORDER BY rating DESC, id ASC
        "#,
    )
    .bind(pattern)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn get_recipes_by_category<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    category: &str,
) -> Res<Vec<Recipe>> {
    sqlx::query_as::<_, Recipe>(
        "SELECT * FROM recipes WHERE LOWER(category) = LOWER($1) ORDER BY rating DESC, id ASC",
    )
    .bind(category)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn increment_view_count<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    recipe_id: i32,
) -> Res<()> {
    sqlx::query("UPDATE recipes SET view_count = view_count + 1 WHERE id = $1")
        .bind(recipe_id)
        .execute(executor)
        .await?;
    Ok(())
}

/// Escapes LIKE wildcards so user input is matched literally.
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("pasta"), "pasta");
    }
}
