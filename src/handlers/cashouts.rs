use crate::{
    errors::ServiceError,
    models::cashout_request::{self, CashoutStatus, PaymentMethod},
    ApiResponse, ApiResult, AppState,
};
use axum::{
    extract::{Path, State},
    response::Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitCashoutRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Coupon code is required"))]
    pub coupon_code: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Cashout number is required"))]
    pub cashout_number: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Payment method is required"))]
    pub payment_method: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ApproveCashoutRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Transaction ID is required"))]
    pub trx_id: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Admin mobile number is required"))]
    pub admin_mobile: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CashoutRequestView {
    pub id: i64,
    pub coupon_code: String,
    pub amount: Decimal,
    pub cashout_number: String,
    pub payment_method: PaymentMethod,
    pub status: CashoutStatus,
    pub trx_id: Option<String>,
    pub admin_mobile: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<cashout_request::Model> for CashoutRequestView {
    fn from(model: cashout_request::Model) -> Self {
        Self {
            id: model.id,
            coupon_code: model.coupon_code,
            amount: model.amount,
            cashout_number: model.cashout_number,
            payment_method: model.payment_method,
            status: model.status,
            trx_id: model.trx_id,
            admin_mobile: model.admin_mobile,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Submits a cashout request against an active coupon.
pub async fn submit_cashout(
    State(state): State<AppState>,
    Json(payload): Json<SubmitCashoutRequest>,
) -> ApiResult<Value> {
    payload.validate()?;

    let payment_method: PaymentMethod = payload
        .payment_method
        .parse()
        .map_err(|_| ServiceError::ValidationError("Invalid payment method".to_string()))?;

    let request_id = state
        .cashout_service()
        .submit(payload.coupon_code, payload.cashout_number, payment_method)
        .await?;

    Ok(Json(ApiResponse::success(json!({
        "requestId": request_id
    }))))
}

/// Lists the requests submitted for one destination account, newest-first.
pub async fn cashout_history(
    State(state): State<AppState>,
    Path(cashout_number): Path<String>,
) -> ApiResult<Vec<CashoutRequestView>> {
    let records = state.cashout_service().history(&cashout_number).await?;

    Ok(Json(ApiResponse::success(
        records.into_iter().map(CashoutRequestView::from).collect(),
    )))
}

/// Administrative view of every cashout request, newest-first.
pub async fn list_cashouts(State(state): State<AppState>) -> ApiResult<Vec<CashoutRequestView>> {
    let records = state.cashout_service().list_all().await?;

    Ok(Json(ApiResponse::success(
        records.into_iter().map(CashoutRequestView::from).collect(),
    )))
}

/// Sets a request's status without recording transaction details.
pub async fn update_cashout_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateStatusRequest>,
) -> ApiResult<CashoutRequestView> {
    payload.validate()?;

    let status: CashoutStatus = payload
        .status
        .parse()
        .map_err(|_| ServiceError::InvalidStatus(format!("Invalid status: {}", payload.status)))?;

    let updated = state.cashout_service().set_status(id, status).await?;
    Ok(Json(ApiResponse::success(CashoutRequestView::from(updated))))
}

/// Approves a request, recording the transaction id and the admin's mobile
/// number together with the status change.
pub async fn approve_cashout(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ApproveCashoutRequest>,
) -> ApiResult<CashoutRequestView> {
    payload.validate()?;

    let updated = state
        .cashout_service()
        .approve(id, payload.trx_id, payload.admin_mobile)
        .await?;

    Ok(Json(ApiResponse::success(CashoutRequestView::from(updated))))
}
