//! Tiergate server binary.
//!
//! Startup is fail-fast: configuration, storage, and identity-provider
//! wiring must all come up before the listener binds. Request-level
//! failures after that point are mapped to error envelopes, never
//! crashes.

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue};
use secrecy::SecretString;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tiergate::adapters::auth::{
    GoogleConfig, GoogleIdentityVerifier, JwtConfig, JwtSessionService,
};
use tiergate::adapters::http::{api_router, AppState};
use tiergate::adapters::postgres::PostgresAccountRepository;
use tiergate::adapters::razorpay::{RazorpayConfig, RazorpayGateway};
use tiergate::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    tracing::info!(
        environment = ?config.server.environment,
        razorpay_test_mode = config.payment.is_test_mode(),
        "Starting tiergate"
    );

    // Storage. Unreachable storage at boot is fatal.
    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    // Sessions: self-issued HS256 tokens.
    let jwt_config = JwtConfig::new(SecretString::new(config.auth.session_secret.clone()))
        .with_validity_days(config.auth.session_validity_days);
    let sessions = Arc::new(JwtSessionService::new(jwt_config));

    // Federated identity. Misconfigured provider credentials are fatal.
    let identity_provider = Arc::new(GoogleIdentityVerifier::new(GoogleConfig::new(
        config.auth.google_project_id.clone(),
    ))?);

    let gateway = Arc::new(RazorpayGateway::new(RazorpayConfig::new(
        config.payment.razorpay_key_id.clone(),
        config.payment.razorpay_key_secret.clone(),
    )));

    let state = AppState {
        repository: Arc::new(PostgresAccountRepository::new(pool.clone())),
        identity_provider,
        session_issuer: sessions.clone(),
        session_validator: sessions,
        gateway,
        pepper: SecretString::new(config.auth.credential_pepper.clone()),
        default_plan: config.payment.default_billing_plan()?,
        razorpay_key_id: config.payment.razorpay_key_id.clone(),
        pool: Some(pool),
    };

    let app = api_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins = config.server.cors_origins_list();
    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
    }
}
