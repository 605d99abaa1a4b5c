use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use shared_models::error::AppError;

use crate::models::ProviderResponse;
use crate::services::ProviderDirectory;

pub async fn list_providers(
    State(directory): State<Arc<ProviderDirectory>>,
) -> Result<Json<Value>, AppError> {
    let providers: Vec<ProviderResponse> = directory
        .providers()
        .iter()
        .map(ProviderResponse::from)
        .collect();

    Ok(Json(json!({
        "providers": providers,
        "total": providers.len()
    })))
}

pub async fn get_provider(
    State(directory): State<Arc<ProviderDirectory>>,
    Path(name): Path<String>,
) -> Result<Json<ProviderResponse>, AppError> {
    let provider = directory
        .get(&name)
        .ok_or_else(|| AppError::NotFound(format!("Provider {} not found", name)))?;

    Ok(Json(ProviderResponse::from(provider)))
}
