pub struct RecipeCreateRequest {
    pub name: &'static str,
    pub description: &'static str,
    pub image_url: &'static str,
    pub youtube_video_id: &'static str,
    pub prep_time: i32,
    pub cook_time: i32,
    pub servings: i32,
    pub difficulty: &'static str,
    pub category: &'static str,
    pub cuisine: &'static str,
    pub rating: i32,
    /// JSON text
    pub ingredients: String,
    /// JSON text
    pub instructions: String,
    /// JSON text
    pub nutrition_info: String,
    /// JSON text
    pub tags: String,
}

pub struct ProductCreateRequest {
    pub name: &'static str,
    pub supermarket: &'static str,
    pub price: i32,
    pub unit: &'static str,
    pub category: &'static str,
    pub country: &'static str,
}
