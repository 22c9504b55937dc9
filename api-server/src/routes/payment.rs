//! PromptPay settings endpoints

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use dorm_core::payment::PaymentProfile;

use super::{map_store_error, ApiError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePaymentRequest {
    pub account_name: String,
    pub account_number: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub qr_code_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QrQuery {
    #[serde(default)]
    pub amount: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct QrResponse {
    pub payload: String,
}

/// GET /api/properties/{id}/payment - `null` until configured
async fn get_payment(
    State(state): State<AppState>,
    Path(property_id): Path<String>,
) -> Result<Json<Option<PaymentProfile>>, ApiError> {
    let profile = state
        .payments()
        .load(&property_id)
        .await
        .map_err(|e| map_store_error(e, "load PromptPay settings"))?;
    Ok(Json(profile))
}

/// PUT /api/properties/{id}/payment
async fn save_payment(
    State(state): State<AppState>,
    Path(property_id): Path<String>,
    Json(req): Json<SavePaymentRequest>,
) -> Result<Json<PaymentProfile>, ApiError> {
    state
        .properties()
        .require(&property_id)
        .await
        .map_err(|e| map_store_error(e, "load property"))?;

    let profile = PaymentProfile {
        qr_code_url: req.qr_code_url,
        ..PaymentProfile::new(property_id)
            .with_account_name(req.account_name.trim())
            .with_account_number(req.account_number.trim())
            .with_active(req.is_active)
    };

    let saved = state
        .payments()
        .save(profile)
        .await
        .map_err(|e| map_store_error(e, "save PromptPay settings"))?;
    Ok(Json(saved))
}

/// GET /api/properties/{id}/payment/qr?amount=
async fn get_qr_payload(
    State(state): State<AppState>,
    Path(property_id): Path<String>,
    Query(query): Query<QrQuery>,
) -> Result<Json<QrResponse>, ApiError> {
    let payload = state
        .payments()
        .qr_payload(&property_id, query.amount)
        .await
        .map_err(|e| map_store_error(e, "build PromptPay QR"))?;
    Ok(Json(QrResponse { payload }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/properties/{id}/payment",
            get(get_payment).put(save_payment),
        )
        .route("/api/properties/{id}/payment/qr", get(get_qr_payload))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use dorm_core::property::Property;
    use dorm_core::store::MemoryDocumentStore;

    use crate::state::AppState;

    async fn build_state() -> AppState {
        let state =
            AppState::with_store(Arc::new(MemoryDocumentStore::new()), Duration::from_secs(5));
        state
            .properties()
            .save(Property::new("d1", "Sunrise", 3))
            .await
            .unwrap();
        state
    }

    fn put(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("PUT")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn unconfigured_payment_is_null() {
        let app = super::router().with_state(build_state().await);
        let response = app.oneshot(get("/api/properties/d1/payment")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await, Value::Null);
    }

    #[tokio::test]
    async fn save_then_build_qr() {
        let app = super::router().with_state(build_state().await);

        let response = app
            .clone()
            .oneshot(put(
                "/api/properties/d1/payment",
                json!({"accountName": "Somchai", "accountNumber": "0812345678", "isActive": true}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["propertyId"], "d1");
        assert_eq!(body["isActive"], true);

        let response = app
            .clone()
            .oneshot(get("/api/properties/d1/payment/qr"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(
            body["payload"],
            "00020101021129371008123456785802TH53037646304B5DB"
        );

        let response = app
            .oneshot(get("/api/properties/d1/payment/qr?amount=100"))
            .await
            .unwrap();
        let body = read_json(response).await;
        assert_eq!(
            body["payload"],
            "00020101021129371008123456785802TH5303764540310063046994"
        );
    }

    #[tokio::test]
    async fn invalid_account_number_is_bad_request() {
        let app = super::router().with_state(build_state().await);
        let response = app
            .oneshot(put(
                "/api/properties/d1/payment",
                json!({"accountName": "Somchai", "accountNumber": "12345"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn qr_without_settings_is_not_found() {
        let app = super::router().with_state(build_state().await);
        let response = app
            .oneshot(get("/api/properties/d1/payment/qr"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_property_cannot_save() {
        let app = super::router().with_state(build_state().await);
        let response = app
            .oneshot(put(
                "/api/properties/nope/payment",
                json!({"accountName": "Somchai", "accountNumber": "0812345678"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
