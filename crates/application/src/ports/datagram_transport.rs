use async_trait::async_trait;
use mdns_responder_domain::DomainError;

/// Datagram I/O on the mDNS multicast group.
#[async_trait]
pub trait DatagramTransport: Send + Sync {
    /// Waits for the next datagram and copies it into `buf`, returning its
    /// length. Datagrams longer than `buf` are cut to fit.
    async fn receive(&self, buf: &mut [u8]) -> Result<usize, DomainError>;

    /// Sends `bytes` to the multicast group.
    async fn send_multicast(&self, bytes: &[u8]) -> Result<(), DomainError>;
}
