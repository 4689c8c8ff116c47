use std::sync::Arc;

use actix_cors::Cors;
use actix_web::http::Method;

use crate::cors::origins::OriginAllowList;

pub const PREFLIGHT_MAX_AGE_SECS: usize = 3600;

pub const ALLOWED_METHODS: [Method; 6] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
    Method::OPTIONS,
];

/// CORS middleware answering preflights and tagging responses for origins on
/// the allow-list. Requests from other origins are rejected with 400.
pub fn build_cors(allow_list: Arc<OriginAllowList>) -> Cors {
    Cors::default()
        .allowed_origin_fn(move |origin, req_head| {
            let Ok(origin) = origin.to_str() else {
                tracing::warn!("Rejected non-ASCII Origin header on {} {}", req_head.method, req_head.uri);
                return false;
            };

            match allow_list.check(origin) {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!("{} ({} {})", e, req_head.method, req_head.uri);
                    false
                }
            }
        })
        .allowed_methods(ALLOWED_METHODS)
        .allow_any_header()
        .expose_any_header()
        .max_age(PREFLIGHT_MAX_AGE_SECS)
}
