use actix_web::web;

pub mod routes {
    pub mod recipe;
    pub mod saved;
}

pub mod services {
    pub mod recipe;
    pub mod saved;
}

pub mod dtos {
    pub mod recipe;
}

/// Public catalog routes.
pub fn mount_recipes() -> actix_web::Scope {
    // literal segments go before `/{id}`
    web::scope("/recipes")
        .service(routes::recipe::get_recipes)
        .service(routes::recipe::get_search)
        .service(routes::recipe::get_by_category)
        .service(routes::recipe::get_recipe)
}

/// Saved recipes of the caller. Mount behind the auth middleware.
pub fn mount_saved() -> actix_web::Scope {
    web::scope("/saved")
        .service(routes::saved::get_saved)
        .service(routes::saved::post_save)
        .service(routes::saved::post_unsave)
        .service(routes::saved::get_is_saved)
}
