use actix_web::web::{self};

pub mod routes {
    pub mod pay;
    pub mod sub;
}

pub mod services {
    pub mod billing;
    pub mod pay;
    pub mod sub;
}

pub mod dtos {
    pub mod sub;
}

/// Public plan catalog.
pub fn mount_plans() -> actix_web::Scope {
    web::scope("/sub").service(routes::sub::get_plans)
}

/// Subscription of the caller. Mount behind the auth middleware.
pub fn mount_subs() -> actix_web::Scope {
    web::scope("/sub")
        .service(routes::sub::get_current)
        .service(routes::sub::post_checkout)
        .service(routes::sub::post_portal)
        .service(routes::sub::get_can_access)
        .service(routes::sub::get_ai_usage)
        .service(routes::sub::get_transactions)
}

pub fn mount_webhook() -> actix_web::Scope {
    web::scope("/pay").service(routes::pay::post_webhook)
}
