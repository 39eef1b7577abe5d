//! Graceful shutdown signal handling

use std::io;

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;
use tracing::info;

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("failed to install Ctrl+C handler: {0}")]
    CtrlC(#[source] io::Error),

    #[cfg(unix)]
    #[error("failed to install SIGTERM handler: {0}")]
    SigTerm(#[source] io::Error),
}

/// Block until an interrupt arrives, then ask the server to drain.
pub(crate) async fn listen(handle: ServerHandle) -> Result<(), ShutdownSignalError> {
    #[cfg(unix)]
    {
        let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())
            .map_err(ShutdownSignalError::SigTerm)?;

        tokio::select! {
            result = signal::ctrl_c() => {
                result.map_err(ShutdownSignalError::CtrlC)?;
                info!("ctrl_c signal received");
            }
            _ = sigterm.recv() => {
                info!("terminate signal received");
            }
        }
    }

    #[cfg(not(unix))]
    {
        signal::ctrl_c()
            .await
            .map_err(ShutdownSignalError::CtrlC)?;

        info!("ctrl_c signal received");
    }

    // In-flight requests are allowed to finish; new connections are refused.
    handle.stop_graceful(None);

    Ok(())
}
