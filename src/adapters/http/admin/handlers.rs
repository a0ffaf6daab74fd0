//! HTTP handlers for the administrative endpoints.
//!
//! Operator authorization happens in the application handlers; these
//! handlers only carry the principal through.

use axum::extract::{Json, Path, State};
use axum::response::IntoResponse;
use uuid::Uuid;

use crate::application::handlers::admin::{
    ListAccountsCommand, ToggleEntitlementCommand, UpdateEntitlementCommand,
};
use crate::domain::account::PlanTier;
use crate::domain::foundation::{AccountId, DomainError};

use super::super::auth::AccountResponse;
use super::super::envelope::{ApiEnvelope, ApiError};
use super::super::middleware::RequireAuth;
use super::super::AppState;
use super::dto::{AccountListData, EntitlementData, ToggleData, UpdateEntitlementRequest};

/// GET /admin/accounts - List all accounts.
pub async fn list_accounts(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.list_accounts_handler();
    let accounts = handler.handle(ListAccountsCommand { principal }).await?;

    let data = AccountListData {
        count: accounts.len(),
        accounts: accounts.iter().map(AccountResponse::from).collect(),
    };

    Ok(Json(ApiEnvelope::ok("Accounts fetched", data)))
}

/// PUT /admin/accounts/:id/entitlement - Set an entitlement directly.
pub async fn update_entitlement(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateEntitlementRequest>,
) -> Result<impl IntoResponse + std::fmt::Debug, ApiError> {
    let tier = PlanTier::parse(&request.tier)
        .ok_or_else(|| DomainError::validation("tier", format!("Unknown tier: {}", request.tier)))?;

    let handler = state.update_entitlement_handler();
    let account = handler
        .handle(UpdateEntitlementCommand {
            principal,
            account_id: AccountId::from_uuid(id),
            tier,
            active: request.active,
        })
        .await?;

    let data = EntitlementData {
        account: AccountResponse::from(&account),
    };

    Ok(Json(ApiEnvelope::ok("Entitlement updated", data)))
}

/// POST /admin/accounts/:id/entitlement/toggle - Toggle an entitlement.
pub async fn toggle_entitlement(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.toggle_entitlement_handler();
    let (account, applied) = handler
        .handle(ToggleEntitlementCommand {
            principal,
            account_id: AccountId::from_uuid(id),
        })
        .await?;

    let data = ToggleData {
        account: AccountResponse::from(&account),
        applied_tier: applied.as_str().to_string(),
    };

    Ok(Json(ApiEnvelope::ok("Entitlement toggled", data)))
}
