//! Stop signal shared by the HTTP (or HTTPS) listener and `main`.
//!
//! `main` holds the [`Shutdown`], hands a receiver to the server, and fires
//! it once SIGINT or SIGTERM arrives. In-flight sends finish before the
//! listener closes; nothing is persisted on the way out.

use tokio::sync::broadcast;

/// One-shot stop signal for the wallet server.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receiver for a server about to start listening.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Tell every listener to stop accepting. No-op when none is running.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_plain_and_tls_listeners_both_stop() {
        let shutdown = Shutdown::new();
        let mut http = shutdown.subscribe();
        let mut https = shutdown.subscribe();

        shutdown.trigger();
        assert!(http.recv().await.is_ok());
        assert!(https.recv().await.is_ok());
    }

    #[test]
    fn test_trigger_before_server_starts() {
        Shutdown::new().trigger();
    }
}
