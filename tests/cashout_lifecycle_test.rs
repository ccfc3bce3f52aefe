use assert_matches::assert_matches;
use cashout_api::{
    errors::ServiceError,
    models::{
        cashout_request::{self, CashoutStatus, PaymentMethod},
        coupon,
    },
    services::{cashouts::CashoutService, coupons::CouponService},
};
use rust_decimal_macros::dec;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, Set,
};
use std::sync::Arc;

mod common;

async fn services() -> (Arc<cashout_api::db::DbPool>, CashoutService) {
    let pool = common::setup_db().await;
    let coupons = Arc::new(CouponService::new(pool.clone()));
    let cashouts = CashoutService::new(pool.clone(), coupons);
    (pool, cashouts)
}

#[tokio::test]
async fn submit_creates_pending_request_with_amount_snapshot() {
    let (pool, cashouts) = services().await;

    let id = cashouts
        .submit(
            "RM100".to_string(),
            "01712345678".to_string(),
            PaymentMethod::Bkash,
        )
        .await
        .expect("Submit should succeed");

    let stored = cashout_request::Entity::find_by_id(id)
        .one(pool.as_ref())
        .await
        .expect("Fetch should succeed")
        .expect("Row should exist");

    assert_eq!(stored.coupon_code, "RM100");
    assert_eq!(stored.amount, dec!(100.00));
    assert_eq!(stored.cashout_number, "01712345678");
    assert_eq!(stored.payment_method, PaymentMethod::Bkash);
    assert_eq!(stored.status, CashoutStatus::Pending);
    assert_eq!(stored.trx_id, None);
    assert_eq!(stored.admin_mobile, None);
    assert_eq!(stored.created_at, stored.updated_at);
}

#[tokio::test]
async fn amount_snapshot_survives_later_coupon_changes() {
    let (pool, cashouts) = services().await;

    let id = cashouts
        .submit(
            "RM200".to_string(),
            "01712345678".to_string(),
            PaymentMethod::Rocket,
        )
        .await
        .expect("Submit should succeed");

    // Out-of-scope provisioning path changes the coupon afterwards
    let stored_coupon = coupon::Entity::find()
        .filter(coupon::Column::Code.eq("RM200"))
        .one(pool.as_ref())
        .await
        .expect("Fetch should succeed")
        .expect("Coupon should exist");
    let mut active = stored_coupon.into_active_model();
    active.amount = Set(dec!(999.00));
    active.update(pool.as_ref()).await.expect("Update should succeed");

    let stored = cashout_request::Entity::find_by_id(id)
        .one(pool.as_ref())
        .await
        .expect("Fetch should succeed")
        .expect("Row should exist");
    assert_eq!(stored.amount, dec!(200.00));
}

#[tokio::test]
async fn submit_with_unknown_coupon_creates_no_row() {
    let (pool, cashouts) = services().await;

    let err = cashouts
        .submit(
            "RM999".to_string(),
            "01712345678".to_string(),
            PaymentMethod::Bkash,
        )
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::NotFound(_));

    let count = cashout_request::Entity::find()
        .count(pool.as_ref())
        .await
        .expect("Count should succeed");
    assert_eq!(count, 0);
}

#[tokio::test]
async fn history_filters_by_number_and_orders_newest_first() {
    let (_pool, cashouts) = services().await;

    let first = cashouts
        .submit(
            "RM100".to_string(),
            "01712345678".to_string(),
            PaymentMethod::Bkash,
        )
        .await
        .unwrap();
    let other = cashouts
        .submit(
            "RM200".to_string(),
            "01800000000".to_string(),
            PaymentMethod::Nogod,
        )
        .await
        .unwrap();
    let second = cashouts
        .submit(
            "RM500".to_string(),
            "01712345678".to_string(),
            PaymentMethod::Rocket,
        )
        .await
        .unwrap();

    let history = cashouts.history("01712345678").await.unwrap();
    let ids: Vec<i64> = history.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![second, first]);
    assert!(history.iter().all(|r| r.cashout_number == "01712345678"));

    let history = cashouts.history("01800000000").await.unwrap();
    let ids: Vec<i64> = history.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![other]);

    // Unknown number yields an empty list, not an error
    let history = cashouts.history("01999999999").await.unwrap();
    assert!(history.is_empty());
}

#[tokio::test]
async fn list_all_returns_every_request_newest_first() {
    let (_pool, cashouts) = services().await;

    let first = cashouts
        .submit(
            "RM100".to_string(),
            "01712345678".to_string(),
            PaymentMethod::Bkash,
        )
        .await
        .unwrap();
    let second = cashouts
        .submit(
            "RM200".to_string(),
            "01800000000".to_string(),
            PaymentMethod::Nogod,
        )
        .await
        .unwrap();

    let all = cashouts.list_all().await.unwrap();
    let ids: Vec<i64> = all.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![second, first]);
}

#[tokio::test]
async fn set_status_updates_status_only() {
    let (_pool, cashouts) = services().await;

    let id = cashouts
        .submit(
            "RM100".to_string(),
            "01712345678".to_string(),
            PaymentMethod::Bkash,
        )
        .await
        .unwrap();

    let updated = cashouts
        .set_status(id, CashoutStatus::Canceled)
        .await
        .expect("Set status should succeed");

    assert_eq!(updated.status, CashoutStatus::Canceled);
    assert_eq!(updated.trx_id, None);
    assert_eq!(updated.admin_mobile, None);
    assert!(updated.updated_at >= updated.created_at);
}

#[tokio::test]
async fn set_status_to_approved_leaves_transaction_record_unset() {
    // Narrow status operation deliberately does not write trx_id/admin_mobile,
    // mirroring the original service
    let (_pool, cashouts) = services().await;

    let id = cashouts
        .submit(
            "RM100".to_string(),
            "01712345678".to_string(),
            PaymentMethod::Bkash,
        )
        .await
        .unwrap();

    let updated = cashouts
        .set_status(id, CashoutStatus::Approved)
        .await
        .expect("Set status should succeed");

    assert_eq!(updated.status, CashoutStatus::Approved);
    assert_eq!(updated.trx_id, None);
    assert_eq!(updated.admin_mobile, None);
}

#[tokio::test]
async fn set_status_of_missing_request_is_not_found() {
    let (_pool, cashouts) = services().await;

    let err = cashouts
        .set_status(4242, CashoutStatus::Canceled)
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::NotFound(_));
}

#[tokio::test]
async fn approve_sets_status_and_transaction_record_together() {
    let (_pool, cashouts) = services().await;

    let id = cashouts
        .submit(
            "RM100".to_string(),
            "01712345678".to_string(),
            PaymentMethod::Bkash,
        )
        .await
        .unwrap();

    let updated = cashouts
        .approve(id, "TX1".to_string(), "01800000000".to_string())
        .await
        .expect("Approve should succeed");

    assert_eq!(updated.status, CashoutStatus::Approved);
    assert_eq!(updated.trx_id.as_deref(), Some("TX1"));
    assert_eq!(updated.admin_mobile.as_deref(), Some("01800000000"));
}

#[tokio::test]
async fn approve_again_overwrites_transaction_details() {
    let (_pool, cashouts) = services().await;

    let id = cashouts
        .submit(
            "RM100".to_string(),
            "01712345678".to_string(),
            PaymentMethod::Bkash,
        )
        .await
        .unwrap();

    cashouts
        .approve(id, "TX1".to_string(), "01800000000".to_string())
        .await
        .unwrap();
    let updated = cashouts
        .approve(id, "TX2".to_string(), "01811111111".to_string())
        .await
        .expect("Re-approval is unguarded and overwrites");

    assert_eq!(updated.status, CashoutStatus::Approved);
    assert_eq!(updated.trx_id.as_deref(), Some("TX2"));
    assert_eq!(updated.admin_mobile.as_deref(), Some("01811111111"));
}

#[tokio::test]
async fn approve_after_cancel_is_not_guarded() {
    let (_pool, cashouts) = services().await;

    let id = cashouts
        .submit(
            "RM100".to_string(),
            "01712345678".to_string(),
            PaymentMethod::Bkash,
        )
        .await
        .unwrap();

    cashouts.set_status(id, CashoutStatus::Canceled).await.unwrap();
    let updated = cashouts
        .approve(id, "TX1".to_string(), "01800000000".to_string())
        .await
        .expect("Approve does not check current status");

    assert_eq!(updated.status, CashoutStatus::Approved);
}

#[tokio::test]
async fn approve_of_missing_request_is_not_found() {
    let (_pool, cashouts) = services().await;

    let err = cashouts
        .approve(4242, "TX1".to_string(), "01800000000".to_string())
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::NotFound(_));
}
