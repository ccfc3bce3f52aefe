use crate::{
    db::DbPool,
    errors::ServiceError,
    models::cashout_request::{self, CashoutStatus, PaymentMethod},
    services::coupons::CouponService,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, EntityTrait, NotSet, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Lifecycle service for cashout requests: creation, listing, and the
/// administrative status transitions.
#[derive(Debug, Clone)]
pub struct CashoutService {
    db_pool: Arc<DbPool>,
    coupons: Arc<CouponService>,
}

impl CashoutService {
    pub fn new(db_pool: Arc<DbPool>, coupons: Arc<CouponService>) -> Self {
        Self { db_pool, coupons }
    }

    /// Creates a new cashout request in `pending` state and returns its id.
    ///
    /// The coupon must resolve to an active registry entry; its amount is
    /// copied onto the request as an immutable snapshot, so later coupon
    /// changes never affect requests already created.
    #[instrument(skip(self))]
    pub async fn submit(
        &self,
        coupon_code: String,
        cashout_number: String,
        payment_method: PaymentMethod,
    ) -> Result<i64, ServiceError> {
        let coupon = self.coupons.lookup_active(&coupon_code).await?;

        let now = Utc::now();
        let model = cashout_request::ActiveModel {
            id: NotSet,
            coupon_code: Set(coupon_code),
            amount: Set(coupon.amount),
            cashout_number: Set(cashout_number),
            payment_method: Set(payment_method),
            status: Set(CashoutStatus::Pending),
            trx_id: Set(None),
            admin_mobile: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = model.insert(&*self.db_pool).await.map_err(|e| {
            error!(error = %e, "Database error when inserting cashout request");
            ServiceError::db_error(e)
        })?;

        info!(request_id = inserted.id, "Cashout request submitted");
        Ok(inserted.id)
    }

    /// All requests for a destination account, newest-first. Matching is
    /// exact; no pagination.
    #[instrument(skip(self))]
    pub async fn history(
        &self,
        cashout_number: &str,
    ) -> Result<Vec<cashout_request::Model>, ServiceError> {
        cashout_request::Entity::find()
            .filter(cashout_request::Column::CashoutNumber.eq(cashout_number))
            .order_by_desc(cashout_request::Column::CreatedAt)
            .order_by_desc(cashout_request::Column::Id)
            .all(&*self.db_pool)
            .await
            .map_err(|e| {
                error!(cashout_number = %cashout_number, error = %e, "Database error when listing history");
                ServiceError::db_error(e)
            })
    }

    /// Every request in the store, newest-first (administrative view).
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<cashout_request::Model>, ServiceError> {
        cashout_request::Entity::find()
            .order_by_desc(cashout_request::Column::CreatedAt)
            .order_by_desc(cashout_request::Column::Id)
            .all(&*self.db_pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error when listing cashout requests");
                ServiceError::db_error(e)
            })
    }

    /// Sets the status of a request without touching the transaction record.
    ///
    /// Deliberately narrower than [`approve`](Self::approve): moving a
    /// request to `approved` through here leaves `trx_id`/`admin_mobile`
    /// unset, mirroring the original service's behavior.
    #[instrument(skip(self))]
    pub async fn set_status(
        &self,
        id: i64,
        status: CashoutStatus,
    ) -> Result<cashout_request::Model, ServiceError> {
        self.find_required(id).await?;

        let model = cashout_request::ActiveModel {
            id: ActiveValue::Unchanged(id),
            status: Set(status),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        let updated = model.update(&*self.db_pool).await.map_err(|e| {
            error!(request_id = id, error = %e, "Database error when updating status");
            ServiceError::db_error(e)
        })?;

        info!(request_id = id, status = %status, "Cashout request status updated");
        Ok(updated)
    }

    /// Approves a request with its transaction record: status, `trx_id` and
    /// `admin_mobile` are written by a single UPDATE so no half-approved
    /// state is ever visible.
    ///
    /// Current status is not checked; re-approval overwrites the previous
    /// transaction details. Last write wins.
    #[instrument(skip(self))]
    pub async fn approve(
        &self,
        id: i64,
        trx_id: String,
        admin_mobile: String,
    ) -> Result<cashout_request::Model, ServiceError> {
        self.find_required(id).await?;

        let model = cashout_request::ActiveModel {
            id: ActiveValue::Unchanged(id),
            status: Set(CashoutStatus::Approved),
            trx_id: Set(Some(trx_id)),
            admin_mobile: Set(Some(admin_mobile)),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        let updated = model.update(&*self.db_pool).await.map_err(|e| {
            error!(request_id = id, error = %e, "Database error when approving request");
            ServiceError::db_error(e)
        })?;

        info!(request_id = id, "Cashout request approved");
        Ok(updated)
    }

    async fn find_required(&self, id: i64) -> Result<cashout_request::Model, ServiceError> {
        let found = cashout_request::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await
            .map_err(|e| {
                error!(request_id = id, error = %e, "Database error when fetching cashout request");
                ServiceError::db_error(e)
            })?;

        found.ok_or_else(|| ServiceError::NotFound(format!("Cashout request {} not found", id)))
    }
}
