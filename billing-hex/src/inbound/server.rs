//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use billing_types::{CardCharger, CustomerStore, PaymentStore};

use super::handlers::{self, AppState};
use crate::{CustomerRegistry, PaymentProcessor};

/// HTTP Server for the Billing API.
pub struct HttpServer<R, C>
where
    R: CustomerStore + PaymentStore,
    C: CardCharger,
{
    state: Arc<AppState<R, C>>,
}

impl<R, C> HttpServer<R, C>
where
    R: CustomerStore + PaymentStore,
    C: CardCharger,
{
    /// Creates a new HTTP server over the given services.
    pub fn new(
        registry: CustomerRegistry<Arc<R>>,
        processor: PaymentProcessor<Arc<R>, Arc<R>, C>,
    ) -> Self {
        Self {
            state: Arc::new(AppState {
                registry,
                processor,
            }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/api/customers", post(handlers::register_customer::<R, C>))
            .route("/api/customers/{id}", get(handlers::get_customer::<R, C>))
            .route(
                "/api/customers/{id}/payments",
                post(handlers::charge_card::<R, C>),
            )
            .route("/api/payments/{id}", get(handlers::get_payment::<R, C>))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
