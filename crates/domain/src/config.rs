pub mod errors;
pub mod host;
pub mod logging;
pub mod root;
pub mod server;
pub mod services;

pub use errors::ConfigError;
pub use host::HostConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use services::{ServiceConfig, TxtEntryConfig};
