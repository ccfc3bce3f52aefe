use cashout_api::db::{self, DbConfig, DbPool};
use std::sync::Arc;

/// Fresh in-memory SQLite database with migrations applied and the coupon
/// registry seeded. A single pooled connection keeps the in-memory database
/// alive for the duration of the test.
#[allow(dead_code)]
pub async fn setup_db() -> Arc<DbPool> {
    let cfg = DbConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        ..Default::default()
    };

    let pool = db::establish_connection_with_config(&cfg)
        .await
        .expect("Failed to create DB pool");
    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    db::seed_coupons(&pool)
        .await
        .expect("Failed to seed coupons");

    Arc::new(pool)
}
