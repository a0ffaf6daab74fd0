//! PostgreSQL implementation of AccountRepository.
//!
//! Accounts live in a single `accounts` table. Uniqueness of email and
//! mobile number is enforced by database constraints; constraint
//! violations surface as the corresponding duplicate errors.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::account::{Account, AccountError, CredentialDigest, PlanTier};
use crate::domain::foundation::{AccountId, Timestamp};
use crate::ports::AccountRepository;

const EMAIL_CONSTRAINT: &str = "accounts_email_key";
const MOBILE_CONSTRAINT: &str = "accounts_mobile_number_key";

const SELECT_COLUMNS: &str = r#"
    SELECT id, first_name, last_name, email, mobile_number, credential_digest,
           federated_subject, avatar_url, tier, entitlement_active, activated_at,
           email_verified, created_at, updated_at
    FROM accounts
"#;

/// PostgreSQL implementation of the AccountRepository port.
pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    /// Creates a new repository over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of an account.
#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    mobile_number: Option<String>,
    credential_digest: Option<String>,
    federated_subject: Option<String>,
    avatar_url: Option<String>,
    tier: String,
    entitlement_active: bool,
    activated_at: Option<DateTime<Utc>>,
    email_verified: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = AccountError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let tier = parse_tier(&row.tier)?;

        let credential = row
            .credential_digest
            .as_deref()
            .map(|hex| {
                CredentialDigest::from_hex(hex).ok_or_else(|| {
                    AccountError::Infrastructure(format!(
                        "Malformed credential digest for account {}",
                        row.id
                    ))
                })
            })
            .transpose()?;

        Ok(Account {
            id: AccountId::from_uuid(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            mobile_number: row.mobile_number,
            credential,
            federated_subject: row.federated_subject,
            avatar_url: row.avatar_url,
            tier,
            entitlement_active: row.entitlement_active,
            activated_at: row.activated_at.map(Timestamp::from_datetime),
            email_verified: row.email_verified,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn parse_tier(s: &str) -> Result<PlanTier, AccountError> {
    PlanTier::parse(s)
        .ok_or_else(|| AccountError::Infrastructure(format!("Invalid tier value: {}", s)))
}

fn map_unique_violation(e: sqlx::Error, account: &Account, context: &str) -> AccountError {
    if let sqlx::Error::Database(db_err) = &e {
        match db_err.constraint() {
            Some(EMAIL_CONSTRAINT) => {
                return AccountError::duplicate_email(&account.email);
            }
            Some(MOBILE_CONSTRAINT) => {
                return AccountError::duplicate_mobile(
                    account.mobile_number.as_deref().unwrap_or_default(),
                );
            }
            _ => {}
        }
    }
    AccountError::Infrastructure(format!("{}: {}", context, e))
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        let query = format!("{} WHERE email = LOWER($1)", SELECT_COLUMNS);
        let row: Option<AccountRow> = sqlx::query_as(&query)
            .bind(email.trim())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AccountError::Infrastructure(format!("Failed to find account by email: {}", e))
            })?;

        row.map(Account::try_from).transpose()
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        let query = format!("{} WHERE id = $1", SELECT_COLUMNS);
        let row: Option<AccountRow> = sqlx::query_as(&query)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AccountError::Infrastructure(format!("Failed to find account by id: {}", e))
            })?;

        row.map(Account::try_from).transpose()
    }

    async fn find_by_mobile(&self, mobile: &str) -> Result<Option<Account>, AccountError> {
        let query = format!("{} WHERE mobile_number = $1", SELECT_COLUMNS);
        let row: Option<AccountRow> = sqlx::query_as(&query)
            .bind(mobile)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AccountError::Infrastructure(format!("Failed to find account by mobile: {}", e))
            })?;

        row.map(Account::try_from).transpose()
    }

    async fn create(&self, account: &Account) -> Result<(), AccountError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (
                id, first_name, last_name, email, mobile_number, credential_digest,
                federated_subject, avatar_url, tier, entitlement_active, activated_at,
                email_verified, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(account.id.as_uuid())
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(&account.email)
        .bind(&account.mobile_number)
        .bind(account.credential.as_ref().map(CredentialDigest::to_hex))
        .bind(&account.federated_subject)
        .bind(&account.avatar_url)
        .bind(account.tier.as_str())
        .bind(account.entitlement_active)
        .bind(account.activated_at.map(|t| *t.as_datetime()))
        .bind(account.email_verified)
        .bind(account.created_at.as_datetime())
        .bind(account.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, account, "Failed to create account"))?;

        Ok(())
    }

    async fn save(&self, account: &Account) -> Result<(), AccountError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts SET
                first_name = $2,
                last_name = $3,
                email = $4,
                mobile_number = $5,
                credential_digest = $6,
                federated_subject = $7,
                avatar_url = $8,
                tier = $9,
                entitlement_active = $10,
                activated_at = $11,
                email_verified = $12,
                updated_at = $13
            WHERE id = $1
            "#,
        )
        .bind(account.id.as_uuid())
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(&account.email)
        .bind(&account.mobile_number)
        .bind(account.credential.as_ref().map(CredentialDigest::to_hex))
        .bind(&account.federated_subject)
        .bind(&account.avatar_url)
        .bind(account.tier.as_str())
        .bind(account.entitlement_active)
        .bind(account.activated_at.map(|t| *t.as_datetime()))
        .bind(account.email_verified)
        .bind(account.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, account, "Failed to save account"))?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound(account.id));
        }

        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Account>, AccountError> {
        let query = format!("{} ORDER BY created_at DESC", SELECT_COLUMNS);
        let rows: Vec<AccountRow> = sqlx::query_as(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AccountError::Infrastructure(format!("Failed to list accounts: {}", e))
            })?;

        rows.into_iter().map(Account::try_from).collect()
    }
}
