use serde::{Deserialize, Serialize};

/// A DNS-SD service instance to advertise.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Transport label without the leading underscore, e.g. `tcp`.
    pub protocol: String,

    /// Service label without the leading underscore, e.g. `http`.
    pub service_type: String,

    pub port: u16,

    /// Human readable instance name, e.g. `My Printer`.
    pub instance: String,

    #[serde(default)]
    pub subtypes: Vec<String>,

    #[serde(default)]
    pub txt: Vec<TxtEntryConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TxtEntryConfig {
    pub key: String,

    #[serde(default)]
    pub value: Option<String>,
}
