use std::{future::Future, pin::Pin, sync::Arc};

use actix_session::SessionExt;
use actix_web::{
    Error, HttpMessage,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures::future::{Ready, ok};

use common::{
    error::Res,
    jwt::{self, JwtClaims, SESSION_TOKEN_KEY},
};

/// Resolves the caller's token and stores the validation result as `Res<JwtClaims>`
/// in the request extensions. Requests without a token pass through untouched.
pub struct ExtractionMiddleware {
    jwt_secret: Arc<String>,
}

impl ExtractionMiddleware {
    pub fn new(jwt_secret: String) -> Self {
        Self {
            jwt_secret: Arc::new(jwt_secret),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ExtractionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Transform = ExtractionMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(ExtractionMiddlewareService {
            service: Arc::new(service),
            jwt_secret: self.jwt_secret.clone(),
        })
    }
}

pub struct ExtractionMiddlewareService<S> {
    service: Arc<S>,
    jwt_secret: Arc<String>,
}

impl<S, B> Service<ServiceRequest> for ExtractionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // bearer header wins over the session cookie
        let token = bearer_token(&req).or_else(|| session_token(&req));
        let secret = self.jwt_secret.clone();
        let srv = Arc::clone(&self.service);

        Box::pin(async move {
            if let Some(token) = token {
                let claims_res = jwt::validate_jwt(&token, &secret);
                req.extensions_mut().insert::<Res<JwtClaims>>(claims_res);
            }
            srv.call(req).await.map(|res| res.map_into_boxed_body())
        })
    }
}

fn bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_owned())
        .filter(|token| !token.is_empty())
}

fn session_token(req: &ServiceRequest) -> Option<String> {
    match req.get_session().get::<String>(SESSION_TOKEN_KEY) {
        Ok(token) => token,
        Err(e) => {
            log::warn!("Unreadable session cookie: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{App, HttpRequest, HttpResponse, test, web};
    use common::{
        env_config::JwtConfig,
        jwt::{ClaimsSpec, generate_jwt, optional_claims},
    };
    use uuid::Uuid;

    use super::*;

    const SECRET: &str = "extractor-test-secret-with-enough-bytes";

    async fn whoami(req: HttpRequest) -> HttpResponse {
        match optional_claims(&req) {
            Some(claims) => HttpResponse::Ok().body(claims.user_id.to_string()),
            None => HttpResponse::Ok().body("anonymous"),
        }
    }

    #[actix_web::test]
    async fn bearer_token_claims_reach_the_handler() {
        let user_id = Uuid::new_v4();
        let token = generate_jwt(
            ClaimsSpec {
                user_id,
                role: "user".to_string(),
            },
            &JwtConfig {
                secret: SECRET.to_string(),
                expiration_hours: 1,
            },
        )
        .unwrap();

        let app = test::init_service(
            App::new()
                .wrap(ExtractionMiddleware::new(SECRET.to_string()))
                .route("/", web::get().to(whoami)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, user_id.to_string());
    }

    #[actix_web::test]
    async fn request_without_token_is_anonymous() {
        let app = test::init_service(
            App::new()
                .wrap(ExtractionMiddleware::new(SECRET.to_string()))
                .route("/", web::get().to(whoami)),
        )
        .await;

        let body =
            test::call_and_read_body(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(body, "anonymous");
    }
}
