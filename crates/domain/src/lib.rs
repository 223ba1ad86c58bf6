//! mDNS Responder Domain Layer
//!
//! The DNS wire engine (cursor, labels, reader, matcher, records) and the
//! responder that ties them into one query/response cycle per datagram.
pub mod config;
pub mod dns_record;
pub mod errors;
pub mod name;
pub mod responder;
pub mod wire;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_record::{RecordType, ResourceRecord, TxtEntry};
pub use errors::DomainError;
pub use name::{LabelArena, LabelId, NameLabel, NameMatcher, NameReader};
pub use responder::{CycleReport, Responder, ScanStatus, ServiceHandle};
pub use wire::ByteCursor;
