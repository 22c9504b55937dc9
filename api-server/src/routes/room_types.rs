//! Room type API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use dorm_core::room_type::{default_room_type, RoomType};

use super::{error_response, map_store_error, ApiError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomTypeRequest {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub base_price: f64,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomTypeRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub base_price: Option<f64>,
    #[serde(default)]
    pub is_default: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomTypeListResponse {
    pub room_types: Vec<RoomType>,
    pub default_room_type_id: Option<String>,
}

async fn ensure_property(state: &AppState, property_id: &str) -> Result<(), ApiError> {
    state
        .properties()
        .require(property_id)
        .await
        .map(|_| ())
        .map_err(|e| map_store_error(e, "load property"))
}

/// GET /api/properties/{id}/room-types
async fn list_room_types(
    State(state): State<AppState>,
    Path(property_id): Path<String>,
) -> Result<Json<RoomTypeListResponse>, ApiError> {
    ensure_property(&state, &property_id).await?;
    let room_types = state
        .room_types()
        .list(&property_id)
        .await
        .map_err(|e| map_store_error(e, "load room types"))?;

    let default_room_type_id = default_room_type(&room_types).map(|t| t.id.clone());
    Ok(Json(RoomTypeListResponse {
        room_types,
        default_room_type_id,
    }))
}

/// POST /api/properties/{id}/room-types
async fn create_room_type(
    State(state): State<AppState>,
    Path(property_id): Path<String>,
    Json(req): Json<CreateRoomTypeRequest>,
) -> Result<(StatusCode, Json<RoomType>), ApiError> {
    ensure_property(&state, &property_id).await?;

    let mut room_type = RoomType::new(req.id.unwrap_or_default(), req.name, req.base_price);
    room_type.is_default = req.is_default;

    let created = state
        .room_types()
        .create(&property_id, room_type)
        .await
        .map_err(|e| map_store_error(e, "save room type"))?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PATCH /api/properties/{id}/room-types/{type_id}
async fn update_room_type(
    State(state): State<AppState>,
    Path((property_id, type_id)): Path<(String, String)>,
    Json(req): Json<UpdateRoomTypeRequest>,
) -> Result<Json<RoomType>, ApiError> {
    let mut room_type = state
        .room_types()
        .get(&property_id, &type_id)
        .await
        .map_err(|e| map_store_error(e, "load room type"))?
        .ok_or_else(|| {
            error_response(
                StatusCode::NOT_FOUND,
                format!("Room type {} not found", type_id),
            )
        })?;

    if let Some(name) = req.name {
        room_type.name = name;
    }
    if let Some(base_price) = req.base_price {
        room_type.base_price = base_price;
    }
    if let Some(is_default) = req.is_default {
        room_type.is_default = is_default;
    }

    let updated = state
        .room_types()
        .update(&property_id, room_type)
        .await
        .map_err(|e| map_store_error(e, "save room type"))?;
    Ok(Json(updated))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/properties/{id}/room-types",
            get(list_room_types).post(create_room_type),
        )
        .route(
            "/api/properties/{id}/room-types/{type_id}",
            patch(update_room_type),
        )
}
