use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Hostname already set")]
    DuplicateHostname,

    #[error("Invalid hostname: {0}")]
    InvalidHostname(String),

    #[error("Hostname not set")]
    HostnameNotSet,

    #[error("Invalid service name: {0}")]
    InvalidServiceName(String),

    #[error("Service instance already registered: {0}")]
    DuplicateServiceInstance(String),

    #[error("Invalid TXT entry: {0}")]
    InvalidTxtEntry(String),

    #[error("Label of {0} bytes exceeds the 63 byte limit")]
    LabelTooLong(usize),

    #[error("Transport error: {0}")]
    Transport(String),
}
