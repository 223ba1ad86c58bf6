use crate::ports::HostIdentity;
use mdns_responder_domain::config::{HostConfig, ServiceConfig};
use mdns_responder_domain::{Config, DomainError, Responder};
use std::net::Ipv4Addr;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Builds the responder from configuration: host identity first, then every
/// configured service with its TXT entries.
///
/// A service that fails validation is logged and skipped so one bad entry
/// does not take the others down. A missing or invalid hostname is fatal.
pub struct RegisterServicesUseCase {
    identity: Arc<dyn HostIdentity>,
}

impl RegisterServicesUseCase {
    pub fn new(identity: Arc<dyn HostIdentity>) -> Self {
        Self { identity }
    }

    pub async fn execute(&self, config: &Config) -> Result<Responder, DomainError> {
        let address = self.resolve_address(&config.host).await;
        let hostname = self.resolve_hostname(&config.host).await?;

        let mut responder = Responder::new(address);
        responder.set_hostname(&hostname)?;
        info!(
            hostname = %responder.hostname().unwrap_or_default(),
            address = %address,
            "Host registered"
        );

        let mut registered = 0usize;
        for service in &config.services {
            match Self::register_service(&mut responder, service) {
                Ok(()) => registered += 1,
                Err(e) => warn!(
                    error = %e,
                    instance = %service.instance,
                    service_type = %service.service_type,
                    "Skipping service"
                ),
            }
        }

        info!(
            registered,
            configured = config.services.len(),
            "Services registered"
        );
        Ok(responder)
    }

    fn register_service(
        responder: &mut Responder,
        service: &ServiceConfig,
    ) -> Result<(), DomainError> {
        let handle = responder.add_service(
            &service.protocol,
            &service.service_type,
            service.port,
            &service.instance,
            service.subtypes.as_slice(),
        )?;

        for entry in &service.txt {
            if let Err(e) = responder.add_txt_entry(handle, &entry.key, entry.value.as_deref()) {
                warn!(error = %e, key = %entry.key, instance = %service.instance, "Skipping TXT entry");
            }
        }

        info!(
            instance = %service.instance,
            service_type = %service.service_type,
            protocol = %service.protocol,
            port = service.port,
            subtypes = service.subtypes.len(),
            "Service registered"
        );
        Ok(())
    }

    async fn resolve_hostname(&self, host: &HostConfig) -> Result<String, DomainError> {
        if let Some(hostname) = &host.hostname {
            return Ok(hostname.clone());
        }

        match self.identity.hostname().await? {
            Some(hostname) => {
                debug!(hostname = %hostname, "Using system hostname");
                Ok(hostname)
            }
            None => Err(DomainError::InvalidHostname(
                "no hostname configured and none found on the system".to_string(),
            )),
        }
    }

    async fn resolve_address(&self, host: &HostConfig) -> Ipv4Addr {
        if let Some(address) = host.address {
            return address;
        }

        match self.identity.ipv4_address().await {
            Ok(Some(address)) => {
                debug!(address = %address, "Using detected interface address");
                address
            }
            Ok(None) => {
                warn!("No IPv4 interface address found, advertising loopback");
                Ipv4Addr::LOCALHOST
            }
            Err(e) => {
                warn!(error = %e, "Address detection failed, advertising loopback");
                Ipv4Addr::LOCALHOST
            }
        }
    }
}
