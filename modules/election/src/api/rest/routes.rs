use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// Mount the election routes on `router`. Every path answers unknown verbs
/// with the empty 404 instead of axum's 405.
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    router
        .route(
            "/api/candidates",
            get(handlers::list_candidates).fallback(handlers::method_not_routed),
        )
        .route(
            "/api/candidate",
            post(handlers::create_candidate).fallback(handlers::method_not_routed),
        )
        .route(
            "/api/candidate/{id}",
            get(handlers::get_candidate)
                .put(handlers::update_candidate_party)
                .delete(handlers::delete_candidate)
                .fallback(handlers::method_not_routed),
        )
        .route(
            "/api/parties",
            get(handlers::list_parties).fallback(handlers::method_not_routed),
        )
        .route(
            "/api/party/{id}",
            get(handlers::get_party)
                .delete(handlers::delete_party)
                .fallback(handlers::method_not_routed),
        )
        .layer(Extension(service))
}
