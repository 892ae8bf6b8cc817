use actix_web::{HttpResponse, Responder};
use serde::Serialize;

use super::error::Res;

pub struct Success;
impl Success {
    pub fn created<T: Serialize>(body: T) -> Res<impl Responder> {
        Result::Ok(HttpResponse::Created().json(body))
    }
    pub fn ok<T: Serialize>(body: T) -> Res<impl Responder> {
        Result::Ok(HttpResponse::Ok().json(body))
    }
}

/// Body returned by mutations that have nothing else to report.
#[derive(Debug, Serialize)]
pub struct Done {
    pub success: bool,
}

impl Done {
    pub fn new() -> Self {
        Done { success: true }
    }
}

impl Default for Done {
    fn default() -> Self {
        Self::new()
    }
}
