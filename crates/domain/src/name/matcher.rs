use smallvec::SmallVec;

use super::label::{LabelArena, LabelId, NameLabel};
use super::reader::NameReader;
use crate::wire::ByteCursor;

/// Progress of one registered name against the incoming byte stream.
struct Candidate<'a> {
    head: LabelId,
    label: Option<&'a NameLabel>,
    offset: usize,
    matches: bool,
}

impl<'a> Candidate<'a> {
    fn new(arena: &'a LabelArena, head: LabelId) -> Self {
        Self {
            head,
            label: Some(arena.get(head)),
            offset: 0,
            matches: true,
        }
    }

    /// Compares the next wire byte. Once a byte differs the candidate stays
    /// rejected for the rest of the name.
    fn feed(&mut self, arena: &'a LabelArena, byte: u8) {
        if !self.matches {
            return;
        }

        while let Some(label) = self.label {
            if self.offset <= label.len() {
                break;
            }
            self.label = label.next().map(|id| arena.get(id));
            self.offset = 0;
        }

        self.matches = match self.label.and_then(|label| {
            label
                .byte_at(self.offset)
                .map(|expected| (expected, label.is_case_sensitive()))
        }) {
            Some((expected, true)) => expected == byte,
            Some((expected, false)) => expected.eq_ignore_ascii_case(&byte),
            None => false,
        };
        self.offset += 1;
    }
}

/// Tests the wire name at the cursor against every registered name in a
/// single pass, without decoding it to text.
///
/// Every candidate walks its own label chain; label boundaries on the two
/// sides need not line up because length bytes and payload bytes are
/// compared as one positional stream.
pub struct NameMatcher;

impl NameMatcher {
    /// Returns the first candidate (in iteration order) equal to the wire
    /// name, or `None` when nothing matches or the name is unterminated.
    /// The cursor ends up just after the name in the packet.
    pub fn find<I>(arena: &LabelArena, candidates: I, cursor: &mut ByteCursor) -> Option<LabelId>
    where
        I: IntoIterator<Item = LabelId>,
    {
        let mut live: SmallVec<[Candidate<'_>; 16]> = candidates
            .into_iter()
            .map(|head| Candidate::new(arena, head))
            .collect();

        let mut reader = NameReader::new(cursor);
        for byte in reader.by_ref() {
            for candidate in live.iter_mut() {
                candidate.feed(arena, byte);
            }
        }

        if !reader.finish() {
            return None;
        }

        live.iter()
            .find(|candidate| candidate.matches)
            .map(|candidate| candidate.head)
    }
}
