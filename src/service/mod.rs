//! Remote access to the frontier store
//!
//! Exposes the store operations as a JSON-over-HTTP API so workers in other
//! processes can share one frontier. The service can announce itself to a
//! registry under a well-known name.

mod handlers;
mod registry;
mod routes;

pub use registry::{register, Registration};
pub use routes::create_router;

use crate::config::ServiceConfig;
use crate::frontier::FrontierStore;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Registration with {url} failed: {message}")]
    Registry { url: String, message: String },

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Server task failed: {0}")]
    Join(String),
}

/// A running service; stop it with [`ServiceHandle::stop`]
#[derive(Debug)]
pub struct ServiceHandle {
    local_addr: SocketAddr,
    shutdown: CancellationToken,
    task: JoinHandle<std::io::Result<()>>,
}

impl ServiceHandle {
    /// Address the listener actually bound (resolves port 0)
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Base URI clients use to reach the service
    pub fn uri(&self) -> String {
        format!("http://{}", self.local_addr)
    }

    /// Stops accepting connections and waits for in-flight requests
    pub async fn stop(self) -> Result<(), ServiceError> {
        self.shutdown.cancel();
        self.task
            .await
            .map_err(|e| ServiceError::Join(e.to_string()))??;
        tracing::info!("Frontier service on {} stopped", self.local_addr);
        Ok(())
    }
}

/// Binds the listener, starts serving and registers with the registry
///
/// Bind and registration failures are returned; a service that failed to
/// register is stopped before returning.
pub async fn start(
    store: Arc<FrontierStore>,
    config: &ServiceConfig,
) -> Result<ServiceHandle, ServiceError> {
    let listener = TcpListener::bind(&config.bind_address)
        .await
        .map_err(|source| ServiceError::Bind {
            address: config.bind_address.clone(),
            source,
        })?;
    let local_addr = listener.local_addr()?;

    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();
    let app = create_router(store);

    let task = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { signal.cancelled().await })
            .await
    });

    let handle = ServiceHandle {
        local_addr,
        shutdown,
        task,
    };
    tracing::info!(
        "Frontier service '{}' listening on {}",
        config.service_name,
        handle.uri()
    );

    if let Some(registry_url) = &config.registry_url {
        let registration = Registration {
            name: config.service_name.clone(),
            uri: handle.uri(),
        };

        if let Err(e) = register(registry_url, &registration).await {
            if let Err(stop_err) = handle.stop().await {
                tracing::warn!("Service did not stop cleanly: {}", stop_err);
            }
            return Err(e);
        }
        tracing::info!(
            "Registered '{}' at {} with {}",
            registration.name,
            registration.uri,
            registry_url
        );
    }

    Ok(handle)
}
