pub mod host_identity;

pub use host_identity::{sanitize_hostname, SystemHostIdentity};
