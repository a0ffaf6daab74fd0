//! Razorpay payment gateway adapter.

mod gateway;
mod mock;

pub use gateway::{RazorpayConfig, RazorpayGateway};
pub use mock::MockPaymentGateway;
