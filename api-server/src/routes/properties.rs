//! Property API endpoints

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use dorm_core::property::{Property, PropertyConfig};

use super::{map_store_error, ApiError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePropertyRequest {
    pub name: String,
    pub total_floors: u32,
    #[serde(default)]
    pub config: Option<PropertyConfig>,
}

/// GET /api/properties - List all properties
async fn list_properties(State(state): State<AppState>) -> Result<Json<Vec<Property>>, ApiError> {
    let properties = state
        .properties()
        .list()
        .await
        .map_err(|e| map_store_error(e, "load properties"))?;
    Ok(Json(properties))
}

/// GET /api/properties/{id} - Get a single property
async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Property>, ApiError> {
    let property = state
        .properties()
        .require(&id)
        .await
        .map_err(|e| map_store_error(e, "load property"))?;
    Ok(Json(property))
}

/// PUT /api/properties/{id} - Create or replace a property
///
/// Omitting `config` keeps the stored configuration.
async fn save_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<SavePropertyRequest>,
) -> Result<Json<Property>, ApiError> {
    let existing = state
        .properties()
        .get(&id)
        .await
        .map_err(|e| map_store_error(e, "load property"))?;

    let property = match existing {
        Some(mut property) => {
            property.name = req.name;
            property.total_floors = req.total_floors;
            if let Some(config) = req.config {
                property.config = config;
            }
            property
        }
        None => Property::new(id, req.name, req.total_floors)
            .with_config(req.config.unwrap_or_default()),
    };

    let saved = state
        .properties()
        .save(property)
        .await
        .map_err(|e| map_store_error(e, "save property"))?;
    Ok(Json(saved))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/properties", get(list_properties))
        .route("/api/properties/{id}", get(get_property).put(save_property))
}
