use actix_web::web;

pub mod routes {
    pub mod shopping;
}

pub mod services {
    pub mod shopping;
}

pub mod dtos {
    pub mod shopping;
}

/// Shopping list of the caller. Mount behind the auth middleware.
pub fn mount_shopping() -> actix_web::Scope {
    web::scope("/shopping")
        .service(routes::shopping::get_list)
        .service(routes::shopping::post_add)
        .service(routes::shopping::post_toggle)
        .service(routes::shopping::post_clear_completed)
        .service(routes::shopping::delete_item)
}
