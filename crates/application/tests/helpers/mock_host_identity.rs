#![allow(dead_code)]

use async_trait::async_trait;
use mdns_responder_application::ports::HostIdentity;
use mdns_responder_domain::DomainError;
use std::net::Ipv4Addr;

#[derive(Clone, Default)]
pub struct MockHostIdentity {
    hostname: Option<String>,
    address: Option<Ipv4Addr>,
    fail_address: bool,
}

impl MockHostIdentity {
    pub fn new(hostname: Option<&str>, address: Option<Ipv4Addr>) -> Self {
        Self {
            hostname: hostname.map(str::to_string),
            address,
            fail_address: false,
        }
    }

    pub fn failing_address(mut self) -> Self {
        self.fail_address = true;
        self
    }
}

#[async_trait]
impl HostIdentity for MockHostIdentity {
    async fn hostname(&self) -> Result<Option<String>, DomainError> {
        Ok(self.hostname.clone())
    }

    async fn ipv4_address(&self) -> Result<Option<Ipv4Addr>, DomainError> {
        if self.fail_address {
            return Err(DomainError::Transport("no route".to_string()));
        }
        Ok(self.address)
    }
}
