//! Registry entry-point: loads settings, wires the REST endpoints and serves
//! until interrupted.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

mod server;

use std::io;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetricsBuilder;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use registry::inbound::http::health::HealthState;
#[cfg(feature = "metrics")]
use server::initialize_metrics;
use server::{ServerConfig, ServerSettings, create_server};

fn init_tracing() {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}

#[cfg(feature = "metrics")]
fn build_config(settings: &ServerSettings) -> io::Result<ServerConfig> {
    let config = ServerConfig::new(settings.bind_addr()?);
    let prometheus = if settings.metrics {
        initialize_metrics(|| {
            PrometheusMetricsBuilder::new("registry")
                .endpoint("/metrics")
                .build()
        })
    } else {
        None
    };
    Ok(config.with_metrics(prometheus))
}

#[cfg(not(feature = "metrics"))]
fn build_config(settings: &ServerSettings) -> io::Result<ServerConfig> {
    if settings.metrics {
        warn!("metrics requested but this build lacks the `metrics` feature");
    }
    Ok(ServerConfig::new(settings.bind_addr()?))
}

/// Resolve once the process is asked to stop (Ctrl-C, or SIGTERM on Unix).
async fn shutdown_signal() -> io::Result<()> {
    #[cfg(unix)]
    {
        use actix_web::rt::signal::unix::{SignalKind, signal};

        let mut terminate = signal(SignalKind::terminate())?;
        tokio::select! {
            result = actix_web::rt::signal::ctrl_c() => result,
            _ = terminate.recv() => Ok(()),
        }
    }
    #[cfg(not(unix))]
    {
        actix_web::rt::signal::ctrl_c().await
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    init_tracing();

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|error| io::Error::other(format!("load settings: {error}")))?;
    let config = build_config(&settings)?;
    let bind_addr = config.bind_addr();

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "user registry listening");

    let handle = server.handle();
    actix_web::rt::spawn(async move {
        if let Err(error) = shutdown_signal().await {
            warn!(%error, "failed to listen for shutdown signal");
            return;
        }
        info!("shutdown requested; draining");
        health_state.mark_draining();
        handle.stop(true).await;
    });

    server.await
}
