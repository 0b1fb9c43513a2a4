//! Gateway and teller startup

use crate::api::{self, GatewayState};
use crate::cli::ServeArgs;
use crate::config::{ColorAppConfig, LogFormat};
use crate::history::ColorHistory;
use crate::teller::{self, TellerState};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Load configuration with CLI overrides
pub fn load_config_with_overrides(
    args: &ServeArgs,
) -> Result<ColorAppConfig, Box<dyn std::error::Error>> {
    let mut config = ColorAppConfig::load(args.config.as_deref())?;

    // Apply environment variable overrides
    config = config.with_env_overrides();

    // Apply CLI overrides (highest priority)
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }

    Ok(config)
}

/// Initialize tracing based on configuration
pub fn init_tracing(
    config: &crate::config::LoggingConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter_str = crate::logging::build_filter_directives(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    match config.format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .try_init()?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()?;
        }
    }

    Ok(())
}

/// Wait for shutdown signal (SIGINT or SIGTERM)
async fn shutdown_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for CTRL+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
        _ = cancel_token.cancelled() => {}
    }

    cancel_token.cancel();
}

/// Bind `config.server` and serve `app` until a shutdown signal arrives.
async fn serve(
    app: axum::Router,
    config: &ColorAppConfig,
    cancel_token: CancellationToken,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel_token))
        .await?;

    Ok(())
}

/// `colorapp gateway`
///
/// Refuses to start when `COLOR_TELLER_ENDPOINT` is not configured.
pub async fn run_gateway(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config_with_overrides(&args)?;
    config.validate()?;
    init_tracing(&config.logging)?;

    tracing::info!(port = config.server.port, stage = %config.stage, "Starting gateway");
    tracing::debug!(?config, "Loaded configuration");

    let history = Arc::new(ColorHistory::new(config.gateway.history_capacity));
    let state = match GatewayState::from_config(&config, history) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "Gateway cannot start");
            return Err(e.into());
        }
    };

    tracing::info!(endpoint = %state.color_teller.endpoint(), "Using color teller");
    match state.tcp_echo_endpoint.as_deref() {
        Some(endpoint) => tracing::info!(endpoint = %endpoint, "Using tcp echo"),
        None => tracing::warn!(
            "{} is not set, /tcpecho is disabled",
            crate::downstream::TCP_ECHO_ENDPOINT_VAR
        ),
    }

    let app = api::create_router(Arc::new(state));
    serve(app, &config, CancellationToken::new()).await?;

    tracing::info!("Gateway stopped");
    Ok(())
}

/// `colorapp teller`
pub async fn run_teller(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config_with_overrides(&args)?;
    config.validate()?;
    init_tracing(&config.logging)?;

    tracing::info!(
        port = config.server.port,
        color = %config.teller.color,
        "Starting color teller"
    );

    let app = teller::create_router(Arc::new(TellerState::from_config(&config)));
    serve(app, &config, CancellationToken::new()).await?;

    tracing::info!("Color teller stopped");
    Ok(())
}
