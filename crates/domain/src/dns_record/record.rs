use super::RecordType;
use crate::errors::DomainError;
use crate::name::{LabelArena, LabelId};
use crate::wire::{ByteCursor, CLASS_IN, TTL_HOST, TTL_SERVICE};
use std::net::Ipv4Addr;

// Type bitmaps (window 0): A for hosts, TXT + SRV for service instances.
const HOST_NSEC_BITMAP: [u8; 3] = [0x00, 0x01, 0x40];
const INSTANCE_NSEC_BITMAP: [u8; 7] = [0x00, 0x05, 0x00, 0x00, 0x80, 0x00, 0x40];

const MAX_TXT_ENTRY_LEN: usize = 255;
/// RDLENGTH is a u16, so the strings of one TXT record cannot exceed it.
const MAX_TXT_RDATA_LEN: usize = u16::MAX as usize;

/// One `key[=value]` string of a TXT record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxtEntry {
    pub key: String,
    pub value: Option<String>,
}

impl TxtEntry {
    pub fn new(key: &str, value: Option<&str>) -> Result<Self, DomainError> {
        if key.is_empty() || key.contains('=') {
            return Err(DomainError::InvalidTxtEntry(format!(
                "key '{}' must be non-empty and must not contain '='",
                key
            )));
        }
        let entry = Self {
            key: key.to_string(),
            value: value.map(str::to_string),
        };
        if entry.encoded_len() > MAX_TXT_ENTRY_LEN {
            return Err(DomainError::InvalidTxtEntry(format!(
                "entry '{}' is longer than {} bytes",
                key, MAX_TXT_ENTRY_LEN
            )));
        }
        Ok(entry)
    }

    pub fn encoded_len(&self) -> usize {
        self.key.len() + self.value.as_ref().map_or(0, |value| value.len() + 1)
    }

    fn write(&self, cursor: &mut ByteCursor) {
        cursor.write_u8(self.encoded_len() as u8);
        cursor.write_bytes(self.key.as_bytes());
        if let Some(value) = &self.value {
            cursor.write_u8(b'=');
            cursor.write_bytes(value.as_bytes());
        }
    }
}

/// Type-specific part of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    Address(Ipv4Addr),
    Pointer { instance: LabelId },
    Service { host: LabelId, port: u16 },
    Text { entries: Vec<TxtEntry> },
    HostNsec,
    InstanceNsec,
}

impl RecordData {
    pub fn record_type(&self) -> RecordType {
        match self {
            RecordData::Address(_) => RecordType::A,
            RecordData::Pointer { .. } => RecordType::PTR,
            RecordData::Service { .. } => RecordType::SRV,
            RecordData::Text { .. } => RecordType::TXT,
            RecordData::HostNsec | RecordData::InstanceNsec => RecordType::NSEC,
        }
    }

    pub fn default_ttl(&self) -> u32 {
        match self {
            RecordData::Pointer { .. } | RecordData::Text { .. } => TTL_SERVICE,
            _ => TTL_HOST,
        }
    }
}

/// Section membership decided while scanning the questions of one packet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordFlags {
    answer: bool,
    additional: bool,
    known: bool,
}

impl RecordFlags {
    pub fn is_answer(&self) -> bool {
        self.answer && !self.known
    }

    pub fn is_additional(&self) -> bool {
        self.additional && !self.answer && !self.known
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    owner: LabelId,
    ttl: u32,
    data: RecordData,
    flags: RecordFlags,
}

impl ResourceRecord {
    pub fn new(owner: LabelId, data: RecordData) -> Self {
        Self {
            owner,
            ttl: data.default_ttl(),
            data,
            flags: RecordFlags::default(),
        }
    }

    pub fn owner(&self) -> LabelId {
        self.owner
    }

    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    pub fn record_type(&self) -> RecordType {
        self.data.record_type()
    }

    pub fn data(&self) -> &RecordData {
        &self.data
    }

    pub fn flags(&self) -> RecordFlags {
        self.flags
    }

    pub fn is_answer(&self) -> bool {
        self.flags.is_answer()
    }

    pub fn is_additional(&self) -> bool {
        self.flags.is_additional()
    }

    pub fn set_answer(&mut self) {
        self.flags.answer = true;
    }

    pub fn set_additional(&mut self) {
        self.flags.additional = true;
    }

    /// Marks the record as already held by the querier; it is then left out
    /// of both sections.
    pub fn set_known(&mut self) {
        self.flags.known = true;
    }

    pub fn reset(&mut self) {
        self.flags = RecordFlags::default();
    }

    pub fn push_txt_entry(&mut self, entry: TxtEntry) -> Result<(), DomainError> {
        match &mut self.data {
            RecordData::Text { entries } => {
                let used: usize = entries.iter().map(|e| e.encoded_len() + 1).sum();
                if used + entry.encoded_len() + 1 > MAX_TXT_RDATA_LEN {
                    return Err(DomainError::InvalidTxtEntry(format!(
                        "entry '{}' would grow the TXT record past {} bytes",
                        entry.key, MAX_TXT_RDATA_LEN
                    )));
                }
                entries.push(entry);
                Ok(())
            }
            other => Err(DomainError::InvalidTxtEntry(format!(
                "record is {}, not TXT",
                other.record_type()
            ))),
        }
    }

    /// Owner name, type, class, TTL and RDATA. Names go through the arena
    /// so they compress against everything already in this packet.
    pub fn write(&self, labels: &mut LabelArena, cursor: &mut ByteCursor) {
        labels.write_name(self.owner, cursor);
        cursor.write_u16(self.record_type().to_u16());
        cursor.write_u16(CLASS_IN);
        cursor.write_u32(self.ttl);

        match &self.data {
            RecordData::Address(address) => {
                cursor.write_u16(4);
                cursor.write_bytes(&address.octets());
            }
            RecordData::Pointer { instance } => {
                cursor.write_u16(labels.encoded_size(*instance));
                labels.write_name(*instance, cursor);
            }
            RecordData::Service { host, port } => {
                cursor.write_u16(6 + labels.encoded_size(*host));
                cursor.write_u16(0);
                cursor.write_u16(0);
                cursor.write_u16(*port);
                labels.write_name(*host, cursor);
            }
            RecordData::Text { entries } => {
                let len: usize = entries.iter().map(|entry| entry.encoded_len() + 1).sum();
                cursor.write_u16(len as u16);
                for entry in entries {
                    entry.write(cursor);
                }
            }
            RecordData::HostNsec => {
                self.write_nsec(labels, cursor, &HOST_NSEC_BITMAP);
            }
            RecordData::InstanceNsec => {
                self.write_nsec(labels, cursor, &INSTANCE_NSEC_BITMAP);
            }
        }
    }

    fn write_nsec(&self, labels: &mut LabelArena, cursor: &mut ByteCursor, bitmap: &[u8]) {
        cursor.write_u16(labels.encoded_size(self.owner) + bitmap.len() as u16);
        labels.write_name(self.owner, cursor);
        cursor.write_bytes(bitmap);
    }
}

/// Index of a record inside a [`RecordStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(u32);

/// Every registered record, in registration order.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<ResourceRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ResourceRecord) -> RecordId {
        let id = RecordId(self.records.len() as u32);
        self.records.push(record);
        id
    }

    pub fn contains(&self, id: RecordId) -> bool {
        (id.0 as usize) < self.records.len()
    }

    pub fn get(&self, id: RecordId) -> &ResourceRecord {
        &self.records[id.0 as usize]
    }

    pub fn get_mut(&mut self, id: RecordId) -> &mut ResourceRecord {
        &mut self.records[id.0 as usize]
    }

    pub fn mark_answer(&mut self, id: RecordId) {
        self.get_mut(id).set_answer();
    }

    pub fn mark_additional(&mut self, id: RecordId) {
        self.get_mut(id).set_additional();
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn answer_count(&self) -> usize {
        self.records.iter().filter(|record| record.is_answer()).count()
    }

    pub fn additional_count(&self) -> usize {
        self.records
            .iter()
            .filter(|record| record.is_additional())
            .count()
    }

    /// Writes answers, then additionals, each group in registration order.
    pub fn write_sections(&self, labels: &mut LabelArena, cursor: &mut ByteCursor) {
        for record in self.records.iter().filter(|record| record.is_answer()) {
            record.write(labels, cursor);
        }
        for record in self.records.iter().filter(|record| record.is_additional()) {
            record.write(labels, cursor);
        }
    }

    pub fn reset(&mut self) {
        for record in &mut self.records {
            record.reset();
        }
    }
}
