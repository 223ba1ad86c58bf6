pub mod server;
pub mod transport;

pub use server::MdnsServer;
pub use transport::UdpMulticastTransport;
