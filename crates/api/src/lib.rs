//! # CampuSync API
//!
//! The API crate provides the web server implementation for the CampuSync
//! college administration service. It defines RESTful endpoints for
//! accounts, classes, timetables, and the holiday/event calendar, plus a
//! Server-Sent Events stream pushing freshly computed lecture statistics to
//! subscribed clients.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Middleware**: Provide cross-cutting concerns like authentication and error handling
//! - **Stats**: Orchestrate lecture-statistics computation
//! - **Broadcast**: Push computed snapshots to subscribers
//! - **Feed**: Fetch national holidays from the external public-holiday feed
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework and SQLx for database interactions.

/// Broadcast gate pushing updates to subscribed clients
pub mod broadcast;
/// Configuration module for API settings
pub mod config;
/// National-holiday feed client
pub mod feed;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for authentication, logging, and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;
/// Lecture statistics orchestration
pub mod stats;

use std::sync::Arc;

use axum::Router;
use eyre::Result;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use broadcast::Broadcaster;
use feed::{HttpHolidayFeed, NationalHolidayFeed};

/// Shared application state that is accessible to all request handlers
///
/// This struct encapsulates dependencies that are shared across the
/// application: the database pool, the broadcast gate, and the external
/// holiday feed. The broadcaster and feed are constructed once at startup
/// and injected here rather than living in module-level globals.
pub struct ApiState {
    /// PostgreSQL connection pool for database operations
    pub db_pool: PgPool,

    /// Push channel for live updates
    pub broadcaster: Broadcaster,

    /// Source of national holiday dates
    pub feed: Arc<dyn NationalHolidayFeed>,

    /// Lifetime of session tokens, in hours
    pub session_ttl_hours: i64,
}

/// Starts the API server with the provided configuration and database connection
///
/// This function initializes the application, sets up logging, configures
/// routes, and starts the HTTP server.
///
/// # Arguments
///
/// * `config` - API configuration including host, port, and feed settings
/// * `db_pool` - PostgreSQL connection pool for database operations
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Create shared state with dependencies
    let feed: Arc<dyn NationalHolidayFeed> = Arc::new(HttpHolidayFeed::new(&config)?);
    let state = Arc::new(ApiState {
        db_pool,
        broadcaster: Broadcaster::default(),
        feed,
        session_ttl_hours: config.session_ttl_hours,
    });

    // Build the application router with all routes
    let app = Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Account endpoints
        .merge(routes::auth::routes())
        // Class management endpoints
        .merge(routes::class::routes())
        // Timetable and statistics endpoints
        .merge(routes::timetable::routes())
        // Holiday and event calendar endpoints
        .merge(routes::calendar::routes())
        // Bound request time for the API surface
        .layer(
            tower::ServiceBuilder::new()
                .layer(axum::error_handling::HandleErrorLayer::new(
                    |_: tower::BoxError| async {
                        axum::http::StatusCode::REQUEST_TIMEOUT
                    },
                ))
                .timeout(std::time::Duration::from_secs(config.request_timeout)),
        )
        // The SSE stream is merged after the timeout layer so subscriptions
        // can outlive the request timeout
        .merge(routes::stream::routes())
        // Attach shared state to all routes
        .with_state(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(
                origins
                    .iter()
                    .map(|origin| origin.parse().unwrap())
                    .collect::<Vec<_>>(),
            )
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
