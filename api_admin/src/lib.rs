use actix_web::web;

pub mod routes {
    pub mod admin;
}

pub mod services {
    pub mod admin;
}

pub mod dtos {
    pub mod admin;
}

/// Read-only reports for admins. Mount behind the auth middleware.
pub fn mount_admin() -> actix_web::Scope {
    web::scope("/admin")
        .service(routes::admin::get_users)
        .service(routes::admin::get_revenue)
}
