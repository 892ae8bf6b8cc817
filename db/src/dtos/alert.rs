use uuid::Uuid;

#[derive(Debug)]
pub struct PriceAlertCreateRequest {
    pub user_id: Uuid,
    pub product_name: String,
    pub target_price: i32,
}
