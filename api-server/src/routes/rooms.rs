//! Room API endpoints
//!
//! Listing, editing, and batch creation from a range expression.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use serde::Serialize;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use dorm_core::property::FeeItem;
use dorm_core::room::{Progress, ProvisionReport, ProvisionRequest, Room, RoomUpdate};
use dorm_core::room_type::{default_room_type, RoomType};

use super::{error_response, map_store_error, ApiError};
use crate::state::AppState;

/// Values the add-room form starts from
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionFormResponse {
    pub total_floors: u32,
    pub room_types: Vec<RoomType>,
    pub default_room_type_id: Option<String>,
    pub initial_meter_reading: f64,
    pub additional_fees: Vec<FeeItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResponse {
    pub message: String,
    pub failed_count: usize,
    pub first_created: Option<Room>,
    #[serde(flatten)]
    pub report: ProvisionReport,
}

impl From<ProvisionReport> for BatchResponse {
    fn from(report: ProvisionReport) -> Self {
        let message = if report.cancelled {
            format!(
                "Cancelled after creating {} of {} rooms",
                report.created.len(),
                report.total
            )
        } else if report.is_success() {
            format!("Created {} rooms", report.created.len())
        } else {
            format!("Failed to create {} rooms", report.failed_count())
        };

        Self {
            message,
            failed_count: report.failed_count(),
            first_created: report.first_created().cloned(),
            report,
        }
    }
}

/// GET /api/properties/{id}/rooms
async fn list_rooms(
    State(state): State<AppState>,
    Path(property_id): Path<String>,
) -> Result<Json<Vec<Room>>, ApiError> {
    state
        .properties()
        .require(&property_id)
        .await
        .map_err(|e| map_store_error(e, "load property"))?;
    let rooms = state
        .rooms()
        .list(&property_id)
        .await
        .map_err(|e| map_store_error(e, "load rooms"))?;
    Ok(Json(rooms))
}

/// GET /api/properties/{id}/rooms/form
async fn provision_form(
    State(state): State<AppState>,
    Path(property_id): Path<String>,
) -> Result<Json<ProvisionFormResponse>, ApiError> {
    let property = state
        .properties()
        .require(&property_id)
        .await
        .map_err(|e| map_store_error(e, "load property"))?;
    let room_types = state
        .room_types()
        .list(&property_id)
        .await
        .map_err(|e| map_store_error(e, "load room types"))?;

    Ok(Json(ProvisionFormResponse {
        total_floors: property.total_floors,
        default_room_type_id: default_room_type(&room_types).map(|t| t.id.clone()),
        room_types,
        initial_meter_reading: property.config.initial_meter_reading,
        additional_fees: property.config.additional_fees,
    }))
}

/// POST /api/properties/{id}/rooms/batch
///
/// 201 when every room was created, 207 when some failed or the client
/// went away mid-batch. Rooms already written are never removed.
async fn provision_rooms(
    State(state): State<AppState>,
    Path(property_id): Path<String>,
    Json(req): Json<ProvisionRequest>,
) -> Result<(StatusCode, Json<BatchResponse>), ApiError> {
    let provisioner = state.provisioner().clone();
    let plan = provisioner
        .prepare(&property_id, &req)
        .await
        .map_err(|e| map_store_error(e, "prepare rooms"))?;

    // Dropping this handler (client disconnect) cancels the remaining creates
    let cancel = CancellationToken::new();
    let cancel_on_drop = cancel.clone().drop_guard();

    let (progress_tx, mut progress_rx) = watch::channel(Progress::default());
    let log_property_id = property_id.clone();
    tokio::spawn(async move {
        while progress_rx.changed().await.is_ok() {
            let progress = *progress_rx.borrow_and_update();
            tracing::debug!(
                property_id = %log_property_id,
                current = progress.current,
                total = progress.total,
                "Provisioning progress"
            );
        }
    });

    let run = tokio::spawn(async move { provisioner.run(&plan, &progress_tx, &cancel).await });
    let report = run.await.map_err(|e| {
        tracing::error!(property_id = %property_id, error = %e, "Provisioning task failed");
        error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create rooms")
    })?;
    cancel_on_drop.disarm();

    let status = if report.is_success() {
        StatusCode::CREATED
    } else {
        StatusCode::MULTI_STATUS
    };
    Ok((status, Json(BatchResponse::from(report))))
}

/// PATCH /api/properties/{id}/rooms/{room_id}
async fn update_room(
    State(state): State<AppState>,
    Path((property_id, room_id)): Path<(String, String)>,
    Json(update): Json<RoomUpdate>,
) -> Result<Json<Room>, ApiError> {
    let property = state
        .properties()
        .require(&property_id)
        .await
        .map_err(|e| map_store_error(e, "load property"))?;
    let room = state
        .rooms()
        .update(&property, &room_id, &update)
        .await
        .map_err(|e| map_store_error(e, "update room"))?;
    Ok(Json(room))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/properties/{id}/rooms", get(list_rooms))
        .route("/api/properties/{id}/rooms/form", get(provision_form))
        .route("/api/properties/{id}/rooms/batch", post(provision_rooms))
        .route("/api/properties/{id}/rooms/{room_id}", patch(update_room))
}
