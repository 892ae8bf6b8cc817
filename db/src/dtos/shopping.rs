use uuid::Uuid;

#[derive(Debug)]
pub struct ShoppingItemCreateRequest {
    pub user_id: Uuid,
    pub name: String,
    pub quantity: Option<String>,
    pub category: Option<String>,
    pub recipe_id: Option<i32>,
}
