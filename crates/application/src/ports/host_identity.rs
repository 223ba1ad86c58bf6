use async_trait::async_trait;
use mdns_responder_domain::DomainError;
use std::net::Ipv4Addr;

/// Where the advertised identity comes from when the config leaves it out.
#[async_trait]
pub trait HostIdentity: Send + Sync {
    /// A label usable as `<hostname>.local`, if the system has one.
    async fn hostname(&self) -> Result<Option<String>, DomainError>;

    async fn ipv4_address(&self) -> Result<Option<Ipv4Addr>, DomainError>;
}
