use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

use crate::wire::{DEFAULT_BUFFER_SIZE, MDNS_GROUP, MDNS_PORT};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// IPv4 interface the multicast group is joined on.
    #[serde(default = "default_interface")]
    pub interface: Ipv4Addr,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_multicast_group")]
    pub multicast_group: Ipv4Addr,

    /// Capacity of the packet buffer, used for both directions.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            interface: default_interface(),
            port: default_port(),
            multicast_group: default_multicast_group(),
            buffer_size: default_buffer_size(),
        }
    }
}

fn default_interface() -> Ipv4Addr {
    Ipv4Addr::UNSPECIFIED
}

fn default_port() -> u16 {
    MDNS_PORT
}

fn default_multicast_group() -> Ipv4Addr {
    Ipv4Addr::from(MDNS_GROUP)
}

fn default_buffer_size() -> usize {
    DEFAULT_BUFFER_SIZE
}
