//! Billing command handlers.

mod complete_subscription;
mod create_order;

pub use complete_subscription::{
    CompleteSubscriptionCommand, CompleteSubscriptionHandler, CompleteSubscriptionResult,
};
pub use create_order::{CreateOrderCommand, CreateOrderHandler, CreateOrderResult};
