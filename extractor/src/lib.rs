use middleware::extractor::ExtractionMiddleware;

pub mod middleware {
    pub mod extractor;
}

pub fn middleware(jwt_secret: String) -> ExtractionMiddleware {
    ExtractionMiddleware::new(jwt_secret)
}
