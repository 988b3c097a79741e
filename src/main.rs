//! Wanderwise Travels - Backend Entry Point
//!
//! This is the HTTP backend for a travel agency marketing site. Visitors
//! submit trip enquiries that are validated and forwarded by email to the
//! operator (with a best-effort acknowledgement back to the sender); a
//! small admin surface manages the shared administrator credential.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx (single `admins` table)
//! - **Email**: SMTP via lettre, initialized once at startup
//! - **Format**: JSON requests/responses
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables (missing DATABASE_URL
//!    is fatal)
//! 2. Create database connection pool and run migrations
//! 3. Build the SMTP mailer; if credentials are absent it stays disabled
//!    for the process lifetime (the server still starts)
//! 4. Build HTTP router with routes and middleware
//! 5. Start server on configured port

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use wanderwise_server::{
    config, db, handlers, middleware, services::mailer::SmtpMailer, state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load configuration; a missing DATABASE_URL fails here
    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Create database pool
    let pool = db::create_pool(&config.database_url).await?;
    tracing::info!("Database pool created");

    // Run migrations
    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    // Build the mail transport once. Misconfiguration disables enquiry
    // dispatch but does not crash the process.
    let mailer = if config.smtp_configured() {
        match SmtpMailer::from_config(&config) {
            Ok(mailer) => {
                tracing::info!("Mail transport initialized");
                Some(mailer)
            }
            Err(err) => {
                tracing::error!(error = %err, "Mail transport failed to initialize; enquiry dispatch disabled");
                None
            }
        }
    } else {
        tracing::warn!("SMTP not configured; enquiry dispatch disabled");
        None
    };

    let server_port = config.server_port;
    let state = AppState {
        pool,
        mailer,
        config: Arc::new(config),
    };

    // Credential-record routes, gated by the shared admin token
    let protected_routes = Router::new()
        .route("/api/admin/records", get(handlers::admin::list_records))
        .route("/api/admin/records", post(handlers::admin::upsert_record))
        // Apply the token gate to all routes in this group
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::admin_token::require_admin_token,
        ));

    // Combine protected routes with public routes
    let app = Router::new()
        // Public routes
        .route("/health", get(handlers::health::health_check))
        .route("/api/admin/login", post(handlers::admin::login))
        // Seed carries its token in the body, not the header
        .route("/api/admin/seed", post(handlers::admin::seed))
        .route("/api/enquiry", post(handlers::enquiry::submit))
        .route("/api/enquiry", get(handlers::enquiry::status))
        // Merge token-gated routes
        .merge(protected_routes)
        // Add distributed tracing middleware for observability
        .layer(TraceLayer::new_for_http())
        // Share state with all handlers via State extraction
        .with_state(state);

    // Bind to network address and start server
    let addr = format!("0.0.0.0:{server_port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // Start serving HTTP requests
    // This blocks forever, handling requests concurrently with tokio
    axum::serve(listener, app).await?;

    Ok(())
}
