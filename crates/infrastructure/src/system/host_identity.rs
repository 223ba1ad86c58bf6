use async_trait::async_trait;
use mdns_responder_application::ports::HostIdentity;
use mdns_responder_domain::DomainError;
use std::net::{IpAddr, Ipv4Addr, SocketAddrV4};
use tokio::net::UdpSocket;
use tracing::debug;

/// Longest hostname the responder accepts (one byte under a full label).
const MAX_HOSTNAME_LEN: usize = 62;

/// Destination used to ask the routing table which local address reaches
/// the mDNS group. Nothing is sent.
const ROUTE_PROBE: SocketAddrV4 = SocketAddrV4::new(Ipv4Addr::new(224, 0, 0, 251), 5353);

/// Reads the machine's hostname and picks the IPv4 address of the
/// interface the multicast route goes through.
pub struct SystemHostIdentity {
    interface: Ipv4Addr,
}

impl SystemHostIdentity {
    /// A specified `interface` is advertised as-is; `0.0.0.0` means ask the
    /// routing table.
    pub fn new(interface: Ipv4Addr) -> Self {
        Self { interface }
    }
}

impl Default for SystemHostIdentity {
    fn default() -> Self {
        Self::new(Ipv4Addr::UNSPECIFIED)
    }
}

#[async_trait]
impl HostIdentity for SystemHostIdentity {
    async fn hostname(&self) -> Result<Option<String>, DomainError> {
        let raw = hostname::get().map_err(|e| {
            DomainError::InvalidHostname(format!("Failed to read system hostname: {}", e))
        })?;
        let raw = raw.to_string_lossy();
        let sanitized = sanitize_hostname(&raw);
        debug!(system = %raw, sanitized = ?sanitized, "System hostname");
        Ok(sanitized)
    }

    async fn ipv4_address(&self) -> Result<Option<Ipv4Addr>, DomainError> {
        if !self.interface.is_unspecified() {
            return Ok(Some(self.interface));
        }

        let socket = UdpSocket::bind(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 0))
            .await
            .map_err(|e| DomainError::Transport(format!("Failed to open probe socket: {}", e)))?;
        if let Err(e) = socket.connect(ROUTE_PROBE).await {
            debug!(error = %e, "No route to the mDNS group");
            return Ok(None);
        }

        let local = socket
            .local_addr()
            .map_err(|e| DomainError::Transport(e.to_string()))?;
        Ok(match local.ip() {
            IpAddr::V4(address) if !address.is_unspecified() => Some(address),
            _ => None,
        })
    }
}

/// Turns a system hostname into a single host label: the part before the
/// first dot, with anything but ASCII letters, digits and `-` replaced by
/// `-`, cut to 62 bytes. Returns `None` when nothing usable is left.
pub fn sanitize_hostname(raw: &str) -> Option<String> {
    let first = raw.split('.').next().unwrap_or_default();
    let label: String = first
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '-' })
        .take(MAX_HOSTNAME_LEN)
        .collect();

    if label.is_empty() || label.bytes().all(|b| b == b'-') {
        return None;
    }
    Some(label)
}
