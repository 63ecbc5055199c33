// SPDX-FileCopyrightText: 2026 Tabletop Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `tabletop serve`: wire storage, gateway, and orchestrator behind the API.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tabletop_api::{ApiState, ServerConfig};
use tabletop_booking::{BookingPolicy, BookingService};
use tabletop_config::TabletopConfig;
use tabletop_core::{Component, Restaurant, TabletopError, User};
use tabletop_gateway::HttpBookingGateway;
use tabletop_storage::SqliteStorage;
use tracing::{info, warn};

/// Run the server until Ctrl-C or SIGTERM.
pub async fn run_serve(config: TabletopConfig) -> Result<(), TabletopError> {
    init_tracing(&config.log.level, config.log.json);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        database = %config.storage.database_path,
        "starting tabletop"
    );

    let storage = SqliteStorage::new(config.storage.clone());
    storage.initialize().await?;

    let restaurants: Vec<Restaurant> = config
        .restaurants
        .iter()
        .map(|seed| seed.to_restaurant())
        .collect();
    let users: Vec<User> = config.users.iter().map(|seed| seed.to_user()).collect();
    storage.seed(&restaurants, &users).await?;
    let storage = Arc::new(storage);

    let registry = Arc::new(config.endpoint_registry());
    info!(endpoints = registry.len(), "booking endpoints loaded");
    if registry.is_empty() {
        warn!("no restaurant has a booking_api configured; every booking will be rejected");
    }

    let gateway = Arc::new(
        HttpBookingGateway::new(
            registry.clone(),
            Duration::from_secs(config.booking.request_timeout_secs),
        )?
        .with_confirmation_message(config.booking.confirmation_message.clone()),
    );

    let service = BookingService::new(
        storage.clone(),
        storage.clone(),
        storage.clone(),
        gateway.clone(),
        BookingPolicy::from(&config.booking),
    );

    let state = ApiState {
        bookings: service,
        restaurants: storage.clone(),
        users: storage.clone(),
        endpoints: registry,
        components: vec![
            storage.clone() as Arc<dyn Component>,
            gateway as Arc<dyn Component>,
        ],
        start_time: Instant::now(),
    };

    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        bearer_token: config.server.api_token.clone(),
    };

    let served = tabletop_api::start_server(&server_config, state, shutdown_signal()).await;

    if let Err(e) = storage.shutdown().await {
        warn!(error = %e, "storage shutdown failed");
    }
    served?;

    info!("tabletop serve shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received SIGINT (Ctrl+C), initiating shutdown"),
        _ = terminate => info!("received SIGTERM, initiating shutdown"),
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(log_level: &str, json: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(log_level)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn default_directive(log_level: &str) -> String {
    format!("tabletop={log_level},tower_http={log_level},warn")
}
