use crate::dns_record::{RecordId, RecordStore, RecordType};
use crate::errors::DomainError;
use crate::wire::{ByteCursor, MAX_LABEL_LEN};

/// Index of a label inside a [`LabelArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LabelId(u32);

impl LabelId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Records of one service instance, as seen from its service type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstanceRecords {
    pub ptr: RecordId,
    pub srv: RecordId,
    pub txt: RecordId,
}

/// DNS-SD role of a label, deciding which records a matching question flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelKind {
    Plain,
    Host {
        a: RecordId,
        nsec: RecordId,
    },
    ServiceType {
        a: RecordId,
        instances: Vec<InstanceRecords>,
    },
    ServiceInstance {
        srv: RecordId,
        txt: RecordId,
        nsec: RecordId,
        a: RecordId,
    },
}

impl LabelKind {
    /// Flags the records answering a `qtype` question for this name. The
    /// question class does not take part in the dispatch.
    pub fn matched(&self, qtype: u16, _qclass: u16, records: &mut RecordStore) {
        let qtype = RecordType::from_u16(qtype);

        match self {
            LabelKind::Plain => {}
            LabelKind::Host { a, nsec } => match qtype {
                Some(RecordType::A | RecordType::ANY) => {
                    records.mark_answer(*a);
                    records.mark_additional(*nsec);
                }
                _ => records.mark_answer(*nsec),
            },
            LabelKind::ServiceType { a, instances } => {
                if matches!(qtype, Some(RecordType::PTR | RecordType::ANY)) {
                    for instance in instances {
                        records.mark_answer(instance.ptr);
                        records.mark_additional(instance.srv);
                        records.mark_additional(instance.txt);
                    }
                    records.mark_additional(*a);
                }
            }
            LabelKind::ServiceInstance { srv, txt, nsec, a } => match qtype {
                Some(RecordType::SRV) => {
                    records.mark_answer(*srv);
                    records.mark_additional(*txt);
                    records.mark_additional(*nsec);
                    records.mark_additional(*a);
                }
                Some(RecordType::TXT) => {
                    records.mark_answer(*txt);
                    records.mark_additional(*srv);
                    records.mark_additional(*nsec);
                    records.mark_additional(*a);
                }
                Some(RecordType::ANY) => {
                    records.mark_answer(*srv);
                    records.mark_answer(*txt);
                    records.mark_additional(*nsec);
                    records.mark_additional(*a);
                }
                _ => records.mark_answer(*nsec),
            },
        }
    }
}

/// One length-prefixed name segment linked to its (shared) tail.
#[derive(Debug, Clone)]
pub struct NameLabel {
    // data[0] is the length byte, the payload follows.
    data: [u8; MAX_LABEL_LEN + 1],
    case_sensitive: bool,
    next: Option<LabelId>,
    kind: LabelKind,
    write_offset: Option<u16>,
}

impl NameLabel {
    pub fn new(
        text: &str,
        next: Option<LabelId>,
        case_sensitive: bool,
        kind: LabelKind,
    ) -> Result<Self, DomainError> {
        let bytes = text.as_bytes();
        if bytes.len() > MAX_LABEL_LEN {
            return Err(DomainError::LabelTooLong(bytes.len()));
        }

        let mut data = [0u8; MAX_LABEL_LEN + 1];
        data[0] = bytes.len() as u8;
        data[1..=bytes.len()].copy_from_slice(bytes);

        Ok(Self {
            data,
            case_sensitive,
            next,
            kind,
            write_offset: None,
        })
    }

    pub fn root() -> Self {
        Self {
            data: [0u8; MAX_LABEL_LEN + 1],
            case_sensitive: false,
            next: None,
            kind: LabelKind::Plain,
            write_offset: None,
        }
    }

    pub fn len(&self) -> usize {
        self.data[0] as usize
    }

    pub fn is_root(&self) -> bool {
        self.data[0] == 0
    }

    pub fn payload(&self) -> &[u8] {
        &self.data[1..=self.len()]
    }

    /// Length byte plus payload, as it appears on the wire.
    pub fn encoded(&self) -> &[u8] {
        &self.data[..=self.len()]
    }

    /// Byte at `offset` of the encoded form (0 is the length byte).
    pub fn byte_at(&self, offset: usize) -> Option<u8> {
        self.encoded().get(offset).copied()
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn next(&self) -> Option<LabelId> {
        self.next
    }

    pub fn kind(&self) -> &LabelKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut LabelKind {
        &mut self.kind
    }

    pub fn write_offset(&self) -> Option<u16> {
        self.write_offset
    }
}

/// Owner of every label; heads and tails refer to each other by [`LabelId`],
/// so one tail can sit under any number of heads.
#[derive(Debug, Clone, Default)]
pub struct LabelArena {
    labels: Vec<NameLabel>,
}

impl LabelArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: NameLabel) -> LabelId {
        let id = LabelId(self.labels.len() as u32);
        self.labels.push(label);
        id
    }

    pub fn get(&self, id: LabelId) -> &NameLabel {
        &self.labels[id.index()]
    }

    pub fn get_mut(&mut self, id: LabelId) -> &mut NameLabel {
        &mut self.labels[id.index()]
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels from `head` down to the root.
    pub fn chain(&self, head: LabelId) -> impl Iterator<Item = &NameLabel> + '_ {
        std::iter::successors(Some(self.get(head)), move |label| {
            label.next.map(|id| self.get(id))
        })
    }

    /// Dotted text of the name starting at `head`, without the trailing dot.
    pub fn to_text(&self, head: LabelId) -> String {
        self.chain(head)
            .filter(|label| !label.is_root())
            .map(|label| String::from_utf8_lossy(label.payload()).into_owned())
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Emits the name at `head`, replacing the first suffix already written
    /// in this packet by a compression pointer.
    pub fn write_name(&mut self, head: LabelId, cursor: &mut ByteCursor) {
        let mut current = Some(head);

        while let Some(id) = current {
            let label = &mut self.labels[id.index()];
            if label.is_root() {
                cursor.write_u8(0);
                return;
            }
            match label.write_offset {
                Some(offset) => {
                    cursor.write_u16(0xC000 | offset);
                    return;
                }
                None => {
                    // Offsets beyond 14 bits cannot be pointed at; leave
                    // those labels unrecorded so they are emitted in full.
                    if let Ok(offset) = u16::try_from(cursor.position()) {
                        if offset <= crate::wire::POINTER_OFFSET_MASK {
                            label.write_offset = Some(offset);
                        }
                    }
                    cursor.write_bytes(label.encoded());
                    current = label.next;
                }
            }
        }
    }

    /// Size [`LabelArena::write_name`] would emit right now.
    pub fn encoded_size(&self, head: LabelId) -> u16 {
        let mut size = 0u16;
        for label in self.chain(head) {
            if label.write_offset.is_some() {
                return size + 2;
            }
            size += label.len() as u16 + 1;
        }
        size
    }

    /// Forgets the write offsets recorded along the chain at `head`.
    pub fn reset(&mut self, head: LabelId) {
        let mut current = Some(head);
        while let Some(id) = current {
            let label = &mut self.labels[id.index()];
            label.write_offset = None;
            current = label.next;
        }
    }
}
