pub mod cashout_request;
pub mod coupon;
