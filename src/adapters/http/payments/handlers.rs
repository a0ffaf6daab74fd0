//! HTTP handlers for the payment endpoints.

use axum::extract::{Json, State};
use axum::response::IntoResponse;

use crate::application::handlers::billing::{CompleteSubscriptionCommand, CreateOrderCommand};

use super::super::auth::AccountResponse;
use super::super::envelope::{ApiEnvelope, ApiError};
use super::super::middleware::RequireAuth;
use super::super::AppState;
use super::dto::{CompleteSubscriptionRequest, CreateOrderRequest, OrderData, SubscriptionData};

/// POST /payments/create-order - Create a gateway order for a plan.
///
/// The charge amount comes from the server-side pricing table; the
/// caller only names a plan.
pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.create_order_handler();
    let result = handler
        .handle(CreateOrderCommand {
            plan_id: request.plan_id,
        })
        .await?;

    let data = OrderData {
        order_id: result.order.id,
        amount: result.order.amount,
        currency: result.order.currency,
        receipt: result.order.receipt,
        plan_id: result.intent.plan.as_str().to_string(),
        key_id: state.razorpay_key_id.clone(),
    };

    Ok(Json(ApiEnvelope::ok("Order created", data)))
}

/// POST /payments/complete-subscription - Complete a purchase.
///
/// Bearer-authenticated. The gateway's recorded charge is re-fetched
/// and must equal the plan's expected amount.
pub async fn complete_subscription(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    Json(request): Json<CompleteSubscriptionRequest>,
) -> Result<impl IntoResponse + std::fmt::Debug, ApiError> {
    let handler = state.complete_subscription_handler();
    let result = handler
        .handle(CompleteSubscriptionCommand {
            account_id: principal.account_id,
            plan_id: request.plan_id,
            order_id: request.order_id,
            payment_id: request.payment_id,
            signature: request.signature,
        })
        .await?;

    let data = SubscriptionData {
        account: AccountResponse::from(&result.account),
        plan_id: result.plan.as_str().to_string(),
    };

    Ok(Json(ApiEnvelope::ok(
        "Subscription activated successfully",
        data,
    )))
}
