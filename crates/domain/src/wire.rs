//! DNS wire-format primitives shared by the name and record layers.

mod cursor;
mod header;

pub use cursor::{ByteCursor, Checkpoint};
pub use header::{QueryHeader, ResponseHeader};

pub const CLASS_IN: u16 = 1;

pub const HEADER_LEN: usize = 12;
pub const QUESTION_TRAILER_LEN: usize = 4;

pub const MAX_LABEL_LEN: usize = 63;
pub const POINTER_MASK: u8 = 0xC0;
pub const POINTER_OFFSET_MASK: u16 = 0x3FFF;

pub const TTL_HOST: u32 = 120;
pub const TTL_SERVICE: u32 = 4500;

pub const MDNS_PORT: u16 = 5353;
pub const MDNS_GROUP: [u8; 4] = [224, 0, 0, 251];

pub const DEFAULT_BUFFER_SIZE: usize = 512;
/// Largest buffer whose every offset fits a 14-bit compression pointer.
pub const MAX_BUFFER_SIZE: usize = POINTER_OFFSET_MASK as usize;
