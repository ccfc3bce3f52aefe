use crate::{ApiResponse, ApiResult, AppState};
use axum::{extract::State, response::Json};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckCouponRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Coupon code is required"))]
    pub coupon_code: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponView {
    pub code: String,
    pub amount: Decimal,
}

/// Answers whether a code is a valid, currently-active coupon and what
/// amount it carries.
pub async fn check_coupon(
    State(state): State<AppState>,
    Json(payload): Json<CheckCouponRequest>,
) -> ApiResult<CouponView> {
    payload.validate()?;

    let coupon = state
        .coupon_service()
        .lookup_active(&payload.coupon_code)
        .await?;

    Ok(Json(ApiResponse::success(CouponView {
        code: coupon.code,
        amount: coupon.amount,
    })))
}
