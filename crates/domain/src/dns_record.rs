mod record;
mod record_type;

pub use record::{
    RecordData, RecordFlags, RecordId, RecordStore, ResourceRecord, TxtEntry,
};
pub use record_type::RecordType;
