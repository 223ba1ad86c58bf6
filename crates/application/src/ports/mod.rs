mod datagram_transport;
mod host_identity;

pub use datagram_transport::DatagramTransport;
pub use host_identity::HostIdentity;
