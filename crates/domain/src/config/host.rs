use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// Identity advertised for this machine. Missing values are filled in at
/// startup from the system hostname and the local interface address.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HostConfig {
    #[serde(default)]
    pub hostname: Option<String>,

    #[serde(default)]
    pub address: Option<Ipv4Addr>,
}
