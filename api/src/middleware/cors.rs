//! CORS middleware configuration for cross-origin requests.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use bo_shared::config::CorsConfig;

/// Creates a CORS middleware instance from configuration.
///
/// An empty origin list or a `*` entry allows any origin (without
/// credentials). Otherwise only the listed origins are accepted.
pub fn create_cors(config: &CorsConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(config.max_age);

    if config.allows_any_origin() {
        tracing::info!("Configuring CORS to allow any origin");
        return cors.allow_any_origin();
    }

    config
        .allowed_origins
        .iter()
        .map(|origin| origin.trim())
        .filter(|origin| !origin.is_empty())
        .fold(cors, |cors, origin| {
            tracing::info!(origin, "Adding allowed origin");
            cors.allowed_origin(origin)
        })
}
