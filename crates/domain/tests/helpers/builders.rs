#![allow(dead_code)]

/// Builds query datagrams the way an mDNS querier would put them on the
/// wire.
pub struct QueryBuilder {
    id: u16,
    flags: u16,
    qdcount: Option<u16>,
    count: u16,
    questions: Vec<u8>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self {
            id: 0,
            flags: 0,
            qdcount: None,
            count: 0,
            questions: Vec::new(),
        }
    }

    pub fn id(mut self, id: u16) -> Self {
        self.id = id;
        self
    }

    pub fn flags(mut self, flags: u16) -> Self {
        self.flags = flags;
        self
    }

    /// Overrides the question count written in the header.
    pub fn qdcount(mut self, qdcount: u16) -> Self {
        self.qdcount = Some(qdcount);
        self
    }

    /// Adds a question with an uncompressed `name` (dotted, no trailing
    /// dot).
    pub fn question(mut self, name: &str, qtype: u16, qclass: u16) -> Self {
        self.count += 1;
        self.questions.extend(encode_name(name));
        self.questions.extend(qtype.to_be_bytes());
        self.questions.extend(qclass.to_be_bytes());
        self
    }

    /// Adds a question whose name is `prefix` followed by a pointer to
    /// `target`, an offset into the finished datagram.
    pub fn compressed_question(mut self, prefix: &str, target: u16, qtype: u16, qclass: u16) -> Self {
        self.count += 1;
        for label in prefix.split('.').filter(|label| !label.is_empty()) {
            self.questions.push(label.len() as u8);
            self.questions.extend(label.as_bytes());
        }
        self.questions.extend((0xC000 | target).to_be_bytes());
        self.questions.extend(qtype.to_be_bytes());
        self.questions.extend(qclass.to_be_bytes());
        self
    }

    /// Appends raw bytes after the questions.
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.questions.extend_from_slice(bytes);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let qdcount = self.qdcount.unwrap_or(self.count);
        let mut packet = Vec::with_capacity(12 + self.questions.len());
        for field in [self.id, self.flags, qdcount, 0, 0, 0] {
            packet.extend(field.to_be_bytes());
        }
        packet.extend(self.questions);
        packet
    }
}

pub fn encode_name(name: &str) -> Vec<u8> {
    let mut bytes = Vec::new();
    for label in name.split('.').filter(|label| !label.is_empty()) {
        bytes.push(label.len() as u8);
        bytes.extend(label.as_bytes());
    }
    bytes.push(0);
    bytes
}

/// Decodes the name at `offset`, following pointers. Returns the dotted name
/// and the offset just past the name at its original position.
pub fn decode_name(packet: &[u8], offset: usize) -> (String, usize) {
    let mut labels = Vec::new();
    let mut pos = offset;
    let mut end = None;
    let mut jumps = 0;

    loop {
        let len = packet[pos];
        if len & 0xC0 == 0xC0 {
            let target = (((len & 0x3F) as usize) << 8) | packet[pos + 1] as usize;
            assert!(target < pos, "pointer must reference an earlier offset");
            end.get_or_insert(pos + 2);
            pos = target;
            jumps += 1;
            assert!(jumps < 64);
            continue;
        }
        if len == 0 {
            end.get_or_insert(pos + 1);
            break;
        }
        let start = pos + 1;
        labels.push(String::from_utf8_lossy(&packet[start..start + len as usize]).into_owned());
        pos = start + len as usize;
    }

    (labels.join("."), end.unwrap())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRecord {
    pub name: String,
    pub rtype: u16,
    pub class: u16,
    pub ttl: u32,
    pub rdata_offset: usize,
    pub rdata: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct ParsedResponse {
    pub id: u16,
    pub flags: u16,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
    pub answers: Vec<ParsedRecord>,
    pub additional: Vec<ParsedRecord>,
}

fn be16(packet: &[u8], at: usize) -> u16 {
    u16::from_be_bytes([packet[at], packet[at + 1]])
}

/// Parses a response produced by the responder (no question section).
pub fn parse_response(packet: &[u8]) -> ParsedResponse {
    let mut response = ParsedResponse {
        id: be16(packet, 0),
        flags: be16(packet, 2),
        qdcount: be16(packet, 4),
        ancount: be16(packet, 6),
        nscount: be16(packet, 8),
        arcount: be16(packet, 10),
        answers: Vec::new(),
        additional: Vec::new(),
    };

    let mut pos = 12;
    let parse = |pos: &mut usize| {
        let (name, after) = decode_name(packet, *pos);
        let rtype = be16(packet, after);
        let class = be16(packet, after + 2);
        let ttl = u32::from_be_bytes([
            packet[after + 4],
            packet[after + 5],
            packet[after + 6],
            packet[after + 7],
        ]);
        let rdlength = be16(packet, after + 8) as usize;
        let rdata_offset = after + 10;
        *pos = rdata_offset + rdlength;
        ParsedRecord {
            name,
            rtype,
            class,
            ttl,
            rdata_offset,
            rdata: packet[rdata_offset..rdata_offset + rdlength].to_vec(),
        }
    };

    for _ in 0..response.ancount {
        response.answers.push(parse(&mut pos));
    }
    for _ in 0..response.arcount {
        response.additional.push(parse(&mut pos));
    }
    assert_eq!(pos, packet.len(), "trailing bytes after the last record");
    response
}
