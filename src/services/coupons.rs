use crate::{db::DbPool, errors::ServiceError, models::coupon};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use std::sync::Arc;
use tracing::{error, instrument};

/// Read path over the coupon registry. The registry is fixed after seeding;
/// no mutation surface is exposed here.
#[derive(Debug, Clone)]
pub struct CouponService {
    db_pool: Arc<DbPool>,
}

impl CouponService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Resolves a code to an active coupon. Codes are matched exactly, with
    /// no case or whitespace normalization.
    ///
    /// An unmatched or inactive code is a `NotFound` outcome; storage faults
    /// surface as `DatabaseError` so callers can tell the two apart.
    #[instrument(skip(self))]
    pub async fn lookup_active(&self, code: &str) -> Result<coupon::Model, ServiceError> {
        let db = &*self.db_pool;
        let found = coupon::Entity::find()
            .filter(coupon::Column::Code.eq(code))
            .filter(coupon::Column::Active.eq(true))
            .one(db)
            .await
            .map_err(|e| {
                error!(code = %code, error = %e, "Database error when looking up coupon");
                ServiceError::db_error(e)
            })?;

        found.ok_or_else(|| {
            ServiceError::NotFound(format!("Invalid or inactive coupon code: {}", code))
        })
    }
}
