use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The `coupons` table. A fixed registry of redeemable codes; rows are
/// created by the seeder (or an external provisioning path) and never
/// mutated by this service.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "coupons")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Redeemable code, unique and case-sensitive as stored.
    #[sea_orm(unique)]
    pub code: String,

    /// Cash value carried by the code, fixed at creation.
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub amount: Decimal,

    /// Inactive coupons are invisible to redemption lookups.
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
