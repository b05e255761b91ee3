// src/engine/shutdown.rs

//! Cooperative shutdown token and OS signal wiring.
//!
//! A [`Shutdown`] is created once per invocation and passed to the
//! supervisor, which observes it at its wait points. Triggering it never
//! touches child processes; it only stops the supervisor from waiting.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Request shutdown. Idempotent.
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolves once [`Shutdown::trigger`] has been called (immediately if it
    /// already was).
    pub async fn triggered(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives as long as `self`, so this only returns once the
        // value is `true`.
        let _ = rx.wait_for(|triggered| *triggered).await;
    }
}

/// Install handlers for SIGINT and SIGTERM (Ctrl+C only on non-Unix).
///
/// Handlers are registered before this returns, so a signal arriving right
/// after is not lost. The first signal triggers `shutdown`; later ones are
/// swallowed so post commands are not interrupted.
#[cfg(unix)]
pub fn install_signal_handlers(shutdown: Shutdown) -> std::io::Result<JoinHandle<()>> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;

    Ok(tokio::spawn(async move {
        let Some(name) = next_signal(&mut interrupt, &mut terminate).await else {
            return;
        };
        info!(signal = name, "termination signal received; running post commands");
        shutdown.trigger();

        while let Some(name) = next_signal(&mut interrupt, &mut terminate).await {
            debug!(signal = name, "ignoring signal; shutdown already in progress");
        }
    }))
}

#[cfg(unix)]
async fn next_signal(
    interrupt: &mut tokio::signal::unix::Signal,
    terminate: &mut tokio::signal::unix::Signal,
) -> Option<&'static str> {
    tokio::select! {
        Some(()) = interrupt.recv() => Some("SIGINT"),
        Some(()) = terminate.recv() => Some("SIGTERM"),
        else => None,
    }
}

#[cfg(not(unix))]
pub fn install_signal_handlers(shutdown: Shutdown) -> std::io::Result<JoinHandle<()>> {
    Ok(tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl+C");
            return;
        }
        info!(signal = "ctrl-c", "termination signal received; running post commands");
        shutdown.trigger();

        while tokio::signal::ctrl_c().await.is_ok() {
            debug!(signal = "ctrl-c", "ignoring signal; shutdown already in progress");
        }
    }))
}
