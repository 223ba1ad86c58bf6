use crate::wire::{ByteCursor, Checkpoint, POINTER_MASK};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadState {
    /// Next byte is a length byte (or a pointer).
    Length,
    /// This many payload bytes of the current label remain.
    Payload(u8),
    /// The root label was produced.
    Terminated,
    /// Input ran out, or a pointer/label type was unusable.
    Broken,
}

/// Pull decoder over the wire name at the cursor position.
///
/// Yields every label's length byte followed by its payload, ending with the
/// root's zero byte. Compression pointers are followed transparently: the
/// first jump takes a checkpoint of the position right after the pointer,
/// and [`NameReader::finish`] puts the cursor back there so the fields
/// following the name can be read.
///
/// Each pointer has to land strictly before the previous jump target (and
/// before the first pointer itself), so a hostile packet cannot loop the
/// reader.
pub struct NameReader<'c> {
    cursor: &'c mut ByteCursor,
    state: ReadState,
    checkpoint: Option<Checkpoint>,
    floor: usize,
}

impl<'c> NameReader<'c> {
    pub fn new(cursor: &'c mut ByteCursor) -> Self {
        let floor = cursor.position();
        Self {
            cursor,
            state: ReadState::Length,
            checkpoint: None,
            floor,
        }
    }

    /// True when the name ended on the root label rather than running out
    /// of input.
    pub fn end_of_name(&self) -> bool {
        self.state == ReadState::Terminated
    }

    /// Restores the post-pointer position if a jump happened and reports
    /// whether the name terminated cleanly.
    pub fn finish(self) -> bool {
        if let Some(checkpoint) = self.checkpoint {
            self.cursor.restore(checkpoint);
        }
        self.state == ReadState::Terminated
    }

    fn read_length(&mut self) -> Option<u8> {
        loop {
            let pointer_at = self.cursor.position();
            let byte = self.cursor.read_u8()?;

            match byte & POINTER_MASK {
                0x00 => return Some(byte),
                POINTER_MASK => {
                    let low = self.cursor.read_u8()?;
                    let target = (usize::from(byte & !POINTER_MASK) << 8) | usize::from(low);
                    if target >= self.floor.min(pointer_at) {
                        return None;
                    }
                    if self.checkpoint.is_none() {
                        self.checkpoint = Some(self.cursor.checkpoint());
                    }
                    self.floor = target;
                    self.cursor.seek(target);
                }
                // 0x40 and 0x80 label types are reserved.
                _ => return None,
            }
        }
    }
}

impl Iterator for NameReader<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        match self.state {
            ReadState::Terminated | ReadState::Broken => None,
            ReadState::Length => match self.read_length() {
                Some(0) => {
                    self.state = ReadState::Terminated;
                    Some(0)
                }
                Some(len) => {
                    self.state = ReadState::Payload(len);
                    Some(len)
                }
                None => {
                    self.state = ReadState::Broken;
                    None
                }
            },
            ReadState::Payload(remaining) => match self.cursor.read_u8() {
                Some(byte) => {
                    self.state = if remaining > 1 {
                        ReadState::Payload(remaining - 1)
                    } else {
                        ReadState::Length
                    };
                    Some(byte)
                }
                None => {
                    self.state = ReadState::Broken;
                    None
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(bytes: &[u8], start: usize) -> (Vec<u8>, bool, usize) {
        let mut cursor = ByteCursor::new(128);
        cursor.load(bytes);
        cursor.seek(start);
        let mut reader = NameReader::new(&mut cursor);
        let produced: Vec<u8> = reader.by_ref().collect();
        let clean = reader.finish();
        (produced, clean, cursor.position())
    }

    #[test]
    fn test_plain_name() {
        let (bytes, clean, end) = read_all(b"\x04desk\x05local\x00\xff", 0);
        assert_eq!(bytes, b"\x04desk\x05local\x00");
        assert!(clean);
        assert_eq!(end, 12);
    }

    #[test]
    fn test_pointer_is_followed_and_position_restored() {
        // "local" at 0, then "desk" + pointer to 0 at 7.
        let packet = b"\x05local\x00\x04desk\xc0\x00\x00\x01";
        let (bytes, clean, end) = read_all(packet, 7);
        assert_eq!(bytes, b"\x04desk\x05local\x00");
        assert!(clean);
        assert_eq!(end, 14);
    }

    #[test]
    fn test_chained_pointers() {
        // 0: "local", 7: "b" + ptr 0, 11: "a" + ptr 7
        let packet = b"\x05local\x00\x01b\xc0\x00\x01a\xc0\x07";
        let (bytes, clean, end) = read_all(packet, 11);
        assert_eq!(bytes, b"\x01a\x01b\x05local\x00");
        assert!(clean);
        assert_eq!(end, packet.len());
    }

    #[test]
    fn test_truncated_name_is_not_clean() {
        let (bytes, clean, _) = read_all(b"\x04de", 0);
        assert_eq!(bytes, b"\x04de");
        assert!(!clean);
    }

    #[test]
    fn test_self_pointer_does_not_loop() {
        let (bytes, clean, _) = read_all(b"\x00\x00\xc0\x02", 2);
        assert!(bytes.is_empty());
        assert!(!clean);
    }

    #[test]
    fn test_forward_pointer_is_rejected() {
        let (_, clean, _) = read_all(b"\xc0\x04\x00\x00\x00", 0);
        assert!(!clean);
    }

    #[test]
    fn test_pointer_loop_between_labels_is_rejected() {
        // 5: "b" + ptr 0, 0: "a" + ptr 5. The jump back up to 5 is refused.
        let packet = b"\x01a\xc0\x05\x00\x01b\xc0\x00";
        let (bytes, clean, _) = read_all(packet, 5);
        assert_eq!(bytes, b"\x01b\x01a");
        assert!(!clean);
    }

    #[test]
    fn test_payload_bytes_are_not_pointers() {
        let (bytes, clean, _) = read_all(b"\x02\xc3\xa9\x00", 0);
        assert_eq!(bytes, b"\x02\xc3\xa9\x00");
        assert!(clean);
    }
}
