// SPDX-FileCopyrightText: 2026 Tabletop Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! API HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the API.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tabletop_booking::BookingService;
use tabletop_core::{Component, EndpointRegistry, RestaurantDirectory, TabletopError, UserDirectory};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{auth_middleware, AuthConfig};
use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct ApiState {
    /// The booking orchestrator.
    pub bookings: BookingService,
    /// Restaurant lookups for the directory endpoints.
    pub restaurants: Arc<dyn RestaurantDirectory>,
    /// User registration and lookup.
    pub users: Arc<dyn UserDirectory>,
    /// Which restaurants accept online bookings.
    pub endpoints: Arc<EndpointRegistry>,
    /// Components reported by `/health`.
    pub components: Vec<Arc<dyn Component>>,
    /// Process start time for uptime calculation.
    pub start_time: Instant,
}

/// Server bind and auth settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Bearer token for auth (None = auth disabled).
    pub bearer_token: Option<String>,
}

/// Build the application router.
///
/// - `GET /health` is always public.
/// - `/api/*` requires a bearer token when `auth.bearer_token` is set.
pub fn build_router(state: ApiState, auth: AuthConfig) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::get_health))
        .with_state(state.clone());

    let mut api_routes = Router::new()
        .route("/api/restaurants", get(handlers::list_restaurants))
        .route("/api/restaurants/{id}", get(handlers::get_restaurant))
        .route(
            "/api/bookings",
            post(handlers::create_booking).get(handlers::list_bookings),
        )
        .route("/api/bookings/availability", get(handlers::check_availability))
        .route("/api/bookings/user/{id}", get(handlers::list_user_bookings))
        .route(
            "/api/bookings/restaurant/{id}",
            get(handlers::list_restaurant_bookings),
        )
        .route(
            "/api/bookings/{id}",
            get(handlers::get_booking).delete(handlers::cancel_booking),
        )
        .route("/api/bookings/{id}/status", put(handlers::update_booking_status))
        .route("/api/users", post(handlers::create_user));

    if auth.bearer_token.is_some() {
        api_routes = api_routes.route_layer(axum_middleware::from_fn_with_state(
            auth,
            auth_middleware,
        ));
    }

    Router::new()
        .merge(public_routes)
        .merge(api_routes.with_state(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind and serve until `shutdown` resolves.
pub async fn start_server(
    config: &ServerConfig,
    state: ApiState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), TabletopError> {
    if config.bearer_token.is_none() {
        tracing::warn!("server.api_token is not set -- the booking API is unauthenticated");
    }

    let app = build_router(
        state,
        AuthConfig {
            bearer_token: config.bearer_token.clone(),
        },
    );

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| TabletopError::Internal(format!("failed to bind API server to {addr}: {e}")))?;

    tracing::info!("API server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| TabletopError::Internal(format!("API server error: {e}")))?;

    tracing::info!("API server stopped");
    Ok(())
}
