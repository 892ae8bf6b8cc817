use actix_web::web;

pub mod routes {
    pub mod chat;
}

pub mod services {
    pub mod chat;
    pub mod llm;
}

pub mod dtos {
    pub mod chat;
}

/// AI cooking assistant. Mount behind the auth middleware.
pub fn mount_chat() -> actix_web::Scope {
    web::scope("/chat")
        .service(routes::chat::get_history)
        .service(routes::chat::post_send)
}
