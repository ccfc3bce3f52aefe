use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Mobile payment rails a cashout can be disbursed over.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PaymentMethod {
    #[sea_orm(string_value = "bkash")]
    Bkash,
    #[sea_orm(string_value = "nogod")]
    Nogod,
    #[sea_orm(string_value = "rocket")]
    Rocket,
}

/// Lifecycle state of a cashout request. `Pending` is entered exactly once,
/// at creation; `Approved` and `Canceled` are terminal.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CashoutStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "canceled")]
    Canceled,
}

/// The `cashout_requests` table.
///
/// `amount` is a snapshot of the coupon value at creation time; later coupon
/// changes must not affect existing requests. `trx_id` and `admin_mobile`
/// stay null until the approve operation sets them together with the status.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cashout_requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Code of the redeemed coupon. Not a relational constraint; resolved
    /// against the registry at creation time only.
    pub coupon_code: String,

    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub amount: Decimal,

    /// Destination mobile payment account, free-form.
    pub cashout_number: String,

    pub payment_method: PaymentMethod,

    pub status: CashoutStatus,

    /// Transaction reference, populated on approval.
    pub trx_id: Option<String>,

    /// Mobile number the admin disbursed from, populated on approval.
    pub admin_mobile: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
