use async_trait::async_trait;
use mdns_responder_application::ports::DatagramTransport;
use mdns_responder_domain::config::ServerConfig;
use mdns_responder_domain::DomainError;
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use tokio::net::UdpSocket;
use tracing::info;

/// Multicast TTL for link-local mDNS traffic.
const MULTICAST_TTL: u32 = 255;

/// UDP socket joined to the mDNS group; answers go back to the group.
pub struct UdpMulticastTransport {
    socket: UdpSocket,
    group: SocketAddrV4,
}

impl UdpMulticastTransport {
    /// Binds the port shared with other mDNS stacks on this host and joins
    /// the group on the configured interface. Must run inside a tokio
    /// runtime.
    pub fn bind(config: &ServerConfig) -> Result<Self, DomainError> {
        let group = SocketAddrV4::new(config.multicast_group, config.port);
        let socket = create_multicast_socket(config)
            .and_then(UdpSocket::from_std)
            .map_err(|e| {
                DomainError::Transport(format!("failed to bind {}: {}", group, e))
            })?;

        info!(
            group = %group,
            interface = %config.interface,
            "Joined mDNS multicast group"
        );
        Ok(Self { socket, group })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, DomainError> {
        self.socket
            .local_addr()
            .map_err(|e| DomainError::Transport(e.to_string()))
    }
}

fn create_multicast_socket(config: &ServerConfig) -> io::Result<std::net::UdpSocket> {
    let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;
    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.bind(&SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, config.port).into())?;
    socket.join_multicast_v4(&config.multicast_group, &config.interface)?;
    if !config.interface.is_unspecified() {
        socket.set_multicast_if_v4(&config.interface)?;
    }
    socket.set_multicast_ttl_v4(MULTICAST_TTL)?;
    socket.set_multicast_loop_v4(true)?;
    socket.set_nonblocking(true)?;
    Ok(socket.into())
}

#[async_trait]
impl DatagramTransport for UdpMulticastTransport {
    async fn receive(&self, buf: &mut [u8]) -> Result<usize, DomainError> {
        let (n, _from) = self
            .socket
            .recv_from(buf)
            .await
            .map_err(|e| DomainError::Transport(format!("receive failed: {}", e)))?;
        Ok(n)
    }

    async fn send_multicast(&self, bytes: &[u8]) -> Result<(), DomainError> {
        self.socket
            .send_to(bytes, self.group)
            .await
            .map_err(|e| DomainError::Transport(format!("send to {} failed: {}", self.group, e)))?;
        Ok(())
    }
}
