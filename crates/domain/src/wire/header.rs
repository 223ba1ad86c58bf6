use super::{ByteCursor, HEADER_LEN};

const FLAG_RESPONSE: u16 = 0x8000;
const FLAG_AUTHORITATIVE: u16 = 0x0400;

/// Header of an inbound message. A datagram shorter than the header reads
/// as all zeroes, which the responder treats as "no questions".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryHeader {
    pub id: u16,
    pub flags: u16,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

impl QueryHeader {
    pub fn read(cursor: &mut ByteCursor) -> Self {
        if cursor.available() < HEADER_LEN {
            return Self::default();
        }
        let mut field = || cursor.read_u16().unwrap_or_default();
        Self {
            id: field(),
            flags: field(),
            qdcount: field(),
            ancount: field(),
            nscount: field(),
            arcount: field(),
        }
    }

    pub fn is_response(&self) -> bool {
        self.flags & FLAG_RESPONSE != 0
    }

    pub fn has_questions(&self) -> bool {
        !self.is_response() && self.qdcount > 0
    }
}

/// Header of an outbound mDNS response: id 0, response + authoritative,
/// no questions, no authority records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseHeader {
    pub ancount: u16,
    pub arcount: u16,
}

impl ResponseHeader {
    pub const FLAGS: u16 = FLAG_RESPONSE | FLAG_AUTHORITATIVE;

    pub fn write(&self, cursor: &mut ByteCursor) {
        cursor.write_u16(0);
        cursor.write_u16(Self::FLAGS);
        cursor.write_u16(0);
        cursor.write_u16(self.ancount);
        cursor.write_u16(0);
        cursor.write_u16(self.arcount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_header_reads_as_zero() {
        let mut cursor = ByteCursor::new(64);
        cursor.load(&[0x12, 0x34, 0x00, 0x00, 0x00, 0x01]);
        let header = QueryHeader::read(&mut cursor);
        assert_eq!(header, QueryHeader::default());
        assert!(!header.has_questions());
    }

    #[test]
    fn test_response_bit_disables_questions() {
        let mut cursor = ByteCursor::new(64);
        cursor.load(&[0, 0, 0x84, 0x00, 0, 1, 0, 0, 0, 0, 0, 0]);
        let header = QueryHeader::read(&mut cursor);
        assert!(header.is_response());
        assert_eq!(header.qdcount, 1);
        assert!(!header.has_questions());
    }

    #[test]
    fn test_response_header_layout() {
        let mut cursor = ByteCursor::new(64);
        ResponseHeader {
            ancount: 2,
            arcount: 3,
        }
        .write(&mut cursor);
        assert_eq!(
            cursor.written(),
            &[0, 0, 0x84, 0x00, 0, 0, 0, 2, 0, 0, 0, 3]
        );
    }
}
