use actix_web::web;

pub mod routes {
    pub mod market;
}

pub mod services {
    pub mod market;
}

pub mod dtos {
    pub mod market;
}

/// Public supermarket price routes.
pub fn mount_supermarket() -> actix_web::Scope {
    web::scope("/supermarket")
        .service(routes::market::get_search)
        .service(routes::market::get_compare)
        .service(routes::market::get_by_supermarket)
}
