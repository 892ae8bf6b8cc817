use std::env;

use db::dtos::seed::{ProductCreateRequest, RecipeCreateRequest};
use serde_json::json;

const COUNTRY: &str = "NZ";
static SUPERMARKETS: [&str; 3] = ["Countdown", "New World", "Pak'nSave"];

/// Name, unit, category and the price in cents at each of `SUPERMARKETS`.
static PRODUCTS: [(&str, &str, &str, [i32; 3]); 7] = [
    ("Fresh Bananas", "kg", "Fruit", [365, 420, 345]),
    ("Broccoli Crown", "ea", "Vegetables", [230, 250, 199]),
    ("Cherry Tomatoes 250g", "pack", "Vegetables", [450, 499, 399]),
    ("Fresh Salmon Fillet", "kg", "Seafood", [2999, 3299, 2799]),
    ("Rigatoni Pasta 500g", "pack", "Pantry", [299, 329, 279]),
    ("Fresh Mozzarella", "pack", "Dairy", [599, 649, 549]),
    ("Olive Oil 500ml", "bottle", "Pantry", [899, 949, 799]),
];

fn recipes() -> Vec<RecipeCreateRequest> {
    vec![
        RecipeCreateRequest {
            name: "Gourmet Seafood Bouillabaisse",
            description: "A luxurious French seafood stew with lobster, mussels, and fresh fish in a saffron-infused broth. Perfect for special occasions.",
            image_url: "/images/recipes/9Yix6caOtI98.jpg",
            youtube_video_id: "JBHyxEAh4Ek",
            prep_time: 30,
            cook_time: 45,
            servings: 4,
            difficulty: "hard",
            category: "Seafood",
            cuisine: "French",
            rating: 48,
            ingredients: json!([
                "500g mixed seafood (lobster, mussels, fish)",
                "2 onions, diced",
                "4 garlic cloves, minced",
                "1 fennel bulb, sliced",
                "400g tomatoes, chopped",
                "1L fish stock",
                "Pinch of saffron",
                "Fresh herbs (thyme, parsley)",
                "Olive oil",
                "Salt and pepper"
            ])
            .to_string(),
            instructions: json!([
                "Sauté onions, garlic, and fennel in olive oil until soft",
                "Add tomatoes and cook for 5 minutes",
                "Pour in fish stock and add saffron, bring to boil",
                "Add firm fish first, simmer for 5 minutes",
                "Add shellfish and cook until opened",
                "Season with salt, pepper, and fresh herbs",
                "Serve hot with crusty bread"
            ])
            .to_string(),
            nutrition_info: json!({ "calories": 380, "protein": 42, "carbs": 18, "fat": 15 })
                .to_string(),
            tags: json!(["seafood", "french", "gourmet", "special-occasion"]).to_string(),
        },
        RecipeCreateRequest {
            name: "Artisan Flatbread with Roasted Vegetables",
            description: "Homemade flatbread topped with colorful roasted vegetables and herbs. A healthy and delicious meal.",
            image_url: "/images/recipes/WfIEBhshj7xO.jpg",
            youtube_video_id: "W7RzPCQBjBY",
            prep_time: 20,
            cook_time: 25,
            servings: 4,
            difficulty: "medium",
            category: "Vegetarian",
            cuisine: "Mediterranean",
            rating: 46,
            ingredients: json!([
                "2 cups flour",
                "1 tsp yeast",
                "1 cup warm water",
                "2 tbsp olive oil",
                "Mixed vegetables (tomatoes, zucchini, peppers)",
                "Fresh herbs",
                "Salt"
            ])
            .to_string(),
            instructions: json!([
                "Mix flour, yeast, water, and salt to form dough",
                "Knead for 10 minutes, let rise for 1 hour",
                "Roll out dough into flatbreads",
                "Roast vegetables with olive oil and herbs",
                "Top flatbreads with vegetables",
                "Bake at 220°C for 12-15 minutes",
                "Garnish with fresh herbs"
            ])
            .to_string(),
            nutrition_info: json!({ "calories": 320, "protein": 10, "carbs": 52, "fat": 8 })
                .to_string(),
            tags: json!(["vegetarian", "healthy", "mediterranean", "bread"]).to_string(),
        },
        RecipeCreateRequest {
            name: "Rustic Pasta Rigatoni",
            description: "Hearty pasta with a rich tomato sauce, fresh basil, and parmesan. Comfort food at its finest.",
            image_url: "/images/recipes/aCUiDue4nv2L.jpg",
            youtube_video_id: "UhEpCbAXDWM",
            prep_time: 10,
            cook_time: 20,
            servings: 4,
            difficulty: "easy",
            category: "Pasta",
            cuisine: "Italian",
            rating: 47,
            ingredients: json!([
                "400g rigatoni pasta",
                "800g canned tomatoes",
                "4 garlic cloves",
                "Fresh basil",
                "Parmesan cheese",
                "Olive oil",
                "Salt and pepper",
                "Chili flakes (optional)"
            ])
            .to_string(),
            instructions: json!([
                "Cook pasta according to package directions",
                "Sauté garlic in olive oil until fragrant",
                "Add tomatoes and simmer for 15 minutes",
                "Season with salt, pepper, and chili flakes",
                "Toss cooked pasta with sauce",
                "Top with fresh basil and parmesan",
                "Serve immediately"
            ])
            .to_string(),
            nutrition_info: json!({ "calories": 420, "protein": 14, "carbs": 68, "fat": 10 })
                .to_string(),
            tags: json!(["pasta", "italian", "comfort-food", "quick"]).to_string(),
        },
        RecipeCreateRequest {
            name: "Gnocchi in Tomato Cream Sauce",
            description: "Pillowy soft gnocchi in a rich tomato cream sauce with fresh basil. A restaurant favorite you can make at home.",
            image_url: "/images/recipes/NJ6oUiU8DBXU.jpg",
            youtube_video_id: "1XEfqIvDqYo",
            prep_time: 15,
            cook_time: 20,
            servings: 4,
            difficulty: "medium",
            category: "Pasta",
            cuisine: "Italian",
            rating: 49,
            ingredients: json!([
                "800g fresh gnocchi",
                "400g canned tomatoes",
                "200ml heavy cream",
                "3 garlic cloves",
                "Fresh basil",
                "Mozzarella cheese",
                "Parmesan cheese",
                "Olive oil",
                "Salt and pepper"
            ])
            .to_string(),
            instructions: json!([
                "Cook gnocchi according to package directions",
                "Sauté garlic in olive oil",
                "Add tomatoes and simmer for 10 minutes",
                "Stir in cream and season",
                "Add cooked gnocchi to sauce",
                "Top with mozzarella and parmesan",
                "Broil until cheese is melted and golden",
                "Garnish with fresh basil"
            ])
            .to_string(),
            nutrition_info: json!({ "calories": 520, "protein": 18, "carbs": 62, "fat": 22 })
                .to_string(),
            tags: json!(["pasta", "italian", "comfort-food", "cheese"]).to_string(),
        },
        RecipeCreateRequest {
            name: "Pan-Seared Salmon with Vegetables",
            description: "Perfectly cooked salmon fillet with colorful roasted vegetables. Healthy and delicious.",
            image_url: "/images/recipes/ihvShCSQ1356.jpg",
            youtube_video_id: "zBqzcBaHXmY",
            prep_time: 15,
            cook_time: 20,
            servings: 2,
            difficulty: "medium",
            category: "Seafood",
            cuisine: "Contemporary",
            rating: 46,
            ingredients: json!([
                "2 salmon fillets",
                "Mixed vegetables (carrots, broccoli, peppers)",
                "Lemon",
                "Olive oil",
                "Garlic",
                "Fresh herbs",
                "Salt and pepper"
            ])
            .to_string(),
            instructions: json!([
                "Season salmon with salt, pepper, and lemon juice",
                "Chop vegetables into bite-sized pieces",
                "Roast vegetables at 200°C for 15 minutes",
                "Heat oil in pan over medium-high heat",
                "Sear salmon skin-side down for 4 minutes",
                "Flip and cook for another 3-4 minutes",
                "Serve with roasted vegetables and lemon wedges"
            ])
            .to_string(),
            nutrition_info: json!({ "calories": 380, "protein": 34, "carbs": 18, "fat": 20 })
                .to_string(),
            tags: json!(["seafood", "healthy", "protein", "omega-3"]).to_string(),
        },
        RecipeCreateRequest {
            name: "Classic Margherita Pizza",
            description: "Traditional Italian pizza with fresh mozzarella, basil, and tomato sauce. Simple perfection.",
            image_url: "/images/recipes/Obr8ir8R3DzS.jpg",
            youtube_video_id: "1-SJGQ2HLp8",
            prep_time: 90,
            cook_time: 15,
            servings: 4,
            difficulty: "medium",
            category: "Pizza",
            cuisine: "Italian",
            rating: 48,
            ingredients: json!([
                "Pizza dough",
                "Tomato sauce",
                "Fresh mozzarella",
                "Fresh basil",
                "Olive oil",
                "Salt"
            ])
            .to_string(),
            instructions: json!([
                "Preheat oven to 250°C",
                "Roll out pizza dough",
                "Spread tomato sauce evenly",
                "Add torn mozzarella pieces",
                "Drizzle with olive oil",
                "Bake for 12-15 minutes",
                "Top with fresh basil leaves"
            ])
            .to_string(),
            nutrition_info: json!({ "calories": 280, "protein": 12, "carbs": 35, "fat": 10 })
                .to_string(),
            tags: json!(["pizza", "italian", "classic", "vegetarian"]).to_string(),
        },
    ]
}

fn products() -> Vec<ProductCreateRequest> {
    SUPERMARKETS
        .iter()
        .enumerate()
        .flat_map(|(store, supermarket)| {
            PRODUCTS
                .iter()
                .map(move |(name, unit, category, prices)| ProductCreateRequest {
                    name: *name,
                    supermarket: *supermarket,
                    price: prices[store],
                    unit: *unit,
                    category: *category,
                    country: COUNTRY,
                })
        })
        .collect()
}

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    logger::setup()?;

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let require_ssl = env::var("ENVIRONMENT").is_ok_and(|environment| environment == "production");
    let pool = db::setup(&database_url, require_ssl).await?;
    let pg_pool = pool.as_ref();

    if db::seed::count_recipes(pg_pool).await? > 0 {
        log::info!("Recipes already present, skipping");
    } else {
        let recipes = recipes();
        let count = recipes.len();
        let mut tx = pg_pool.begin().await?;
        for recipe in recipes {
            db::seed::insert_recipe(&mut *tx, recipe).await?;
        }
        tx.commit().await?;
        log::info!("Added {} recipes", count);
    }

    if db::seed::count_products(pg_pool).await? > 0 {
        log::info!("Supermarket products already present, skipping");
    } else {
        let products = products();
        let count = products.len();
        let mut tx = pg_pool.begin().await?;
        for product in products {
            db::seed::insert_product(&mut *tx, product).await?;
        }
        tx.commit().await?;
        log::info!("Added {} supermarket products", count);
    }

    log::info!("Seeding complete");
    Ok(())
}
