pub mod mdns;
pub mod system;
