pub mod cashouts;
pub mod coupons;

use crate::db::DbPool;
use crate::services::{cashouts::CashoutService, coupons::CouponService};
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Debug, Clone)]
pub struct AppServices {
    pub coupons: Arc<CouponService>,
    pub cashouts: Arc<CashoutService>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        let coupons = Arc::new(CouponService::new(db_pool.clone()));
        let cashouts = Arc::new(CashoutService::new(db_pool, coupons.clone()));

        Self { coupons, cashouts }
    }
}
