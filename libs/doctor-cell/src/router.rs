use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers;
use crate::services::ProviderDirectory;

pub fn doctor_routes(directory: Arc<ProviderDirectory>) -> Router {
    Router::new()
        .route("/", get(handlers::list_providers))
        .route("/{name}", get(handlers::get_provider))
        .with_state(directory)
}
