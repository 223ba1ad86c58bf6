/// Saved cursor position, handed back to [`ByteCursor::restore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

impl Checkpoint {
    pub fn offset(&self) -> usize {
        self.0
    }
}

/// Fixed-capacity packet buffer shared by the receive and send phases of a
/// query cycle.
///
/// While reading, `offset` walks towards `limit` (the number of bytes that
/// were ingested). While writing, `offset` is the number of bytes emitted so
/// far. Writes past the capacity are dropped byte by byte; the earlier
/// content is left untouched and [`ByteCursor::overflowed`] turns true.
#[derive(Debug, Clone)]
pub struct ByteCursor {
    data: Box<[u8]>,
    offset: usize,
    limit: usize,
    overflowed: bool,
}

impl ByteCursor {
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![0u8; capacity].into_boxed_slice(),
            offset: 0,
            limit: 0,
            overflowed: false,
        }
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Copies up to `capacity` bytes of `bytes` in and rewinds for reading.
    pub fn load(&mut self, bytes: &[u8]) -> usize {
        let n = bytes.len().min(self.data.len());
        self.data[..n].copy_from_slice(&bytes[..n]);
        self.set_received(n);
        n
    }

    /// Whole backing store, for transports that receive in place.
    /// Follow up with [`ByteCursor::set_received`].
    pub fn receive_buffer(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn set_received(&mut self, n: usize) {
        self.limit = n.min(self.data.len());
        self.offset = 0;
        self.overflowed = false;
    }

    /// Unread bytes left in read mode.
    pub fn available(&self) -> usize {
        self.limit.saturating_sub(self.offset)
    }

    pub fn position(&self) -> usize {
        self.offset
    }

    pub fn seek(&mut self, offset: usize) {
        self.offset = offset;
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.offset)
    }

    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.offset = checkpoint.0;
    }

    pub fn read_u8(&mut self) -> Option<u8> {
        if self.offset >= self.limit {
            return None;
        }
        let value = self.data[self.offset];
        self.offset += 1;
        Some(value)
    }

    pub fn read_u16(&mut self) -> Option<u16> {
        if self.available() < 2 {
            return None;
        }
        let value = u16::from_be_bytes([self.data[self.offset], self.data[self.offset + 1]]);
        self.offset += 2;
        Some(value)
    }

    pub fn write_u8(&mut self, value: u8) {
        if self.offset < self.data.len() {
            self.data[self.offset] = value;
            self.offset += 1;
        } else {
            self.overflowed = true;
        }
    }

    pub fn write_u16(&mut self, value: u16) {
        for byte in value.to_be_bytes() {
            self.write_u8(byte);
        }
    }

    pub fn write_u32(&mut self, value: u32) {
        for byte in value.to_be_bytes() {
            self.write_u8(byte);
        }
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.write_u8(byte);
        }
    }

    /// Bytes emitted since the last [`ByteCursor::clear`].
    pub fn written(&self) -> &[u8] {
        &self.data[..self.offset.min(self.data.len())]
    }

    pub fn is_empty(&self) -> bool {
        self.offset == 0
    }

    /// True once a write was dropped for lack of space.
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    pub fn clear(&mut self) {
        self.offset = 0;
        self.limit = 0;
        self.overflowed = false;
    }
}
