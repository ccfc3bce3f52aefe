pub mod cashouts;
pub mod coupons;
