use std::collections::BTreeMap;

use crate::dns_record::{RecordId, RecordStore, ResourceRecord};
use crate::errors::DomainError;
use crate::name::{LabelArena, LabelId, LabelKind, NameLabel, NameMatcher};
use crate::wire::ByteCursor;

/// Registered names and records.
///
/// `names` holds the heads a question can match, keyed by full name and
/// iterated in key order. `tails` holds the structural suffixes
/// (`_tcp.local`, `_sub._http._tcp.local`) that are shared between heads
/// but never answered on their own.
#[derive(Debug, Clone)]
pub struct Registry {
    labels: LabelArena,
    records: RecordStore,
    names: BTreeMap<String, LabelId>,
    tails: BTreeMap<String, LabelId>,
    local: LabelId,
}

impl Registry {
    pub fn new() -> Self {
        let mut labels = LabelArena::new();
        let root = labels.push(NameLabel::root());
        let local = labels.push(local_label(root));
        Self {
            labels,
            records: RecordStore::new(),
            names: BTreeMap::new(),
            tails: BTreeMap::new(),
            local,
        }
    }

    pub fn local(&self) -> LabelId {
        self.local
    }

    pub fn labels(&self) -> &LabelArena {
        &self.labels
    }

    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    pub(crate) fn records_mut(&mut self) -> &mut RecordStore {
        &mut self.records
    }

    pub(crate) fn labels_mut(&mut self) -> &mut LabelArena {
        &mut self.labels
    }

    pub fn lookup(&self, key: &str) -> Option<LabelId> {
        self.names.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.names.contains_key(key)
    }

    /// Full names in matching order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }

    pub(crate) fn insert_name(&mut self, key: String, label: NameLabel) -> LabelId {
        let id = self.labels.push(label);
        self.names.insert(key, id);
        id
    }

    /// Returns the tail stored under `key`, creating it from `text` on top
    /// of `next` the first time.
    pub(crate) fn tail(
        &mut self,
        key: String,
        text: &str,
        next: LabelId,
    ) -> Result<LabelId, DomainError> {
        if let Some(id) = self.tails.get(&key) {
            return Ok(*id);
        }
        let id = self
            .labels
            .push(NameLabel::new(text, Some(next), false, LabelKind::Plain)?);
        self.tails.insert(key, id);
        Ok(id)
    }

    pub(crate) fn push_record(&mut self, record: ResourceRecord) -> RecordId {
        self.records.push(record)
    }

    /// Runs the name at the cursor through the matcher against every head.
    pub fn find(&self, cursor: &mut ByteCursor) -> Option<LabelId> {
        NameMatcher::find(&self.labels, self.names.values().copied(), cursor)
    }

    /// Flags the records a question for `label` asks for.
    pub fn apply_question(&mut self, label: LabelId, qtype: u16, qclass: u16) {
        let Self {
            labels, records, ..
        } = self;
        labels.get(label).kind().matched(qtype, qclass, records);
    }

    /// Writes the flagged records: answers first, then additionals.
    pub fn write_sections(&mut self, cursor: &mut ByteCursor) {
        let Self {
            labels, records, ..
        } = self;
        records.write_sections(labels, cursor);
    }

    /// Clears per-packet state on every name and record.
    pub fn reset(&mut self) {
        for head in self.names.values() {
            self.labels.reset(*head);
        }
        self.records.reset();
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

fn local_label(root: LabelId) -> NameLabel {
    match NameLabel::new("local", Some(root), false, LabelKind::Plain) {
        Ok(label) => label,
        Err(_) => unreachable!("'local' fits in a label"),
    }
}
