use mdns_responder_application::use_cases::ProcessQueryUseCase;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Drives [`ProcessQueryUseCase`] one datagram at a time until cancelled.
pub struct MdnsServer {
    process_query: ProcessQueryUseCase,
    shutdown: CancellationToken,
}

impl MdnsServer {
    pub fn new(process_query: ProcessQueryUseCase) -> Self {
        Self {
            process_query,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    /// Returns the number of datagrams handled.
    pub async fn run(mut self) -> u64 {
        let hostname = self.process_query.responder().hostname().unwrap_or_default();
        info!(hostname = %hostname, "mDNS responder running");

        let mut handled = 0u64;
        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!(handled, "mDNS responder shutting down");
                    break;
                }
                result = self.process_query.execute() => {
                    match result {
                        Ok(Some(_)) => handled += 1,
                        Ok(None) => {}
                        Err(e) => warn!(error = %e, "Query cycle failed"),
                    }
                }
            }
        }
        handled
    }
}
