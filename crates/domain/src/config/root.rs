use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

use super::errors::ConfigError;
use super::host::HostConfig;
use super::logging::{LogFormat, LoggingConfig, LOG_LEVELS};
use super::server::ServerConfig;
use super::services::ServiceConfig;
use crate::wire::{HEADER_LEN, MAX_BUFFER_SIZE};

const LOCAL_CONFIG_PATH: &str = "mdns-responder.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/mdns-responder/config.toml";

/// Main configuration structure for the responder
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Socket and buffer settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Advertised hostname and address
    #[serde(default)]
    pub host: HostConfig,

    /// DNS-SD service instances
    #[serde(default)]
    pub services: Vec<ServiceConfig>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. mdns-responder.toml in current directory
    /// 3. /etc/mdns-responder/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(path) = Self::get_config_path() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(hostname) = overrides.hostname {
            self.host.hostname = Some(hostname);
        }
        if let Some(address) = overrides.address {
            self.host.address = Some(address);
        }
        if let Some(interface) = overrides.interface {
            self.server.interface = interface;
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(format) = overrides.log_format {
            self.logging.format = format;
        }
    }

    /// Validate configuration
    ///
    /// Name syntax is left to the responder, which reports it per service.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("Port cannot be 0".to_string()));
        }

        if !(HEADER_LEN..=MAX_BUFFER_SIZE).contains(&self.server.buffer_size) {
            return Err(ConfigError::Validation(format!(
                "Buffer size {} must be between {} and {}",
                self.server.buffer_size, HEADER_LEN, MAX_BUFFER_SIZE
            )));
        }

        if !self.server.multicast_group.is_multicast() {
            return Err(ConfigError::Validation(format!(
                "{} is not a multicast address",
                self.server.multicast_group
            )));
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::Validation(format!(
                "Unknown log level '{}'",
                self.logging.level
            )));
        }

        for service in &self.services {
            if service.protocol.is_empty()
                || service.service_type.is_empty()
                || service.instance.is_empty()
            {
                return Err(ConfigError::Validation(format!(
                    "Service '{}' needs a protocol, a service type and an instance name",
                    service.instance
                )));
            }
        }

        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        [LOCAL_CONFIG_PATH, SYSTEM_CONFIG_PATH]
            .into_iter()
            .find(|path| std::path::Path::new(path).exists())
            .map(str::to_string)
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub hostname: Option<String>,
    pub address: Option<Ipv4Addr>,
    pub interface: Option<Ipv4Addr>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
}
