use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub name: String,
    pub quantity: Option<String>,
    pub category: Option<String>,
    pub recipe_id: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct ToggleItemRequest {
    pub id: i64,
    pub completed: bool,
}
