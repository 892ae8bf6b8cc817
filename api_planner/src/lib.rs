use actix_web::web;

pub mod routes {
    pub mod alert;
    pub mod meal;
}

pub mod services {
    pub mod alert;
    pub mod meal;
}

pub mod dtos {
    pub mod planner;
}

/// Price alerts of the caller. Mount behind the auth middleware.
pub fn mount_alerts() -> actix_web::Scope {
    web::scope("/alerts")
        .service(routes::alert::get_alerts)
        .service(routes::alert::post_alert)
}

/// Meal plan of the caller. Mount behind the auth middleware.
pub fn mount_meals() -> actix_web::Scope {
    web::scope("/meals")
        .service(routes::meal::get_meals)
        .service(routes::meal::post_meal)
}
