use std::future::Future;

use axum::{extract::MatchedPath, http::Request, routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::configuration::Settings;
use crate::routes::{check_health, home};

#[derive(Debug)]
pub struct Application {
    port: u16,
    listener: TcpListener,
}

impl Application {
    pub async fn build(configuration: &Settings) -> Result<Self, StartupError> {
        let address = configuration.application.address();
        let listener = TcpListener::bind(&address)
            .await
            .map_err(|source| StartupError::Bind {
                address: address.clone(),
                source,
            })?;
        let port = listener
            .local_addr()
            .map_err(StartupError::LocalAddress)?
            .port();

        Ok(Self { port, listener })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), StartupError> {
        run(self.listener, shutdown_signal()).await
    }
}

pub async fn run<F>(listener: TcpListener, shutdown: F) -> Result<(), StartupError>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(address) = listener.local_addr() {
        tracing::info!(%address, "Listening for HTTP requests");
    }

    axum::serve(listener, router())
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(StartupError::Serve)
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health_check", get(check_health))
        .layer(
            // Refer to https://github.com/tokio-rs/axum/blob/main/examples/tracing-aka-logging/Cargo.toml
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                let path = request
                    .extensions()
                    .get::<MatchedPath>()
                    .map(MatchedPath::as_str);
                tracing::info_span!(
                    "Starting HTTP request",
                    method = ?request.method(),
                    path,
                    request_id = %Uuid::new_v4(),
                )
            }),
        )
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, shutting down gracefully");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, shutting down gracefully");
        },
    }
}

#[derive(thiserror::Error)]
pub enum StartupError {
    #[error("Failed to bind a listener on {address}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read the address the listener is bound to")]
    LocalAddress(#[source] std::io::Error),
    #[error("Failed to serve HTTP requests")]
    Serve(#[source] std::io::Error),
}

impl std::fmt::Debug for StartupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
