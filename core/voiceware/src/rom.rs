//! ROM container walker: segments, headers, and offset tables.

use std::collections::VecDeque;

use byteorder::{BigEndian, ReadBytesExt};

use crate::error::{VoicewareError, VoicewareResult};

/// Size in bytes of a single ROM segment.
pub const SEGMENT_SIZE: usize = 131_072;

/// Magic sentinel that must follow `last_msg_index` at the start of every
/// present segment.
pub const SEGMENT_MAGIC: [u8; 4] = [0x5A, 0xA5, 0x69, 0x55];

/// One message's byte range plus its (segment, local, absolute) identity.
///
/// `start`/`end` are absolute ROM offsets of the mode byte and one past the
/// end of the payload respectively. `end` is not clamped to the ROM length —
/// callers (the dispatcher) clamp it when reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRecord {
    pub segment_index: usize,
    pub msg_index_in_segment: usize,
    pub absolute_index: usize,
    pub start: usize,
    pub end: usize,
}

/// Lazily walks a ROM image's segments, yielding one [`MessageRecord`] per
/// message in strictly ascending `(segment_index, msg_index_in_segment)`
/// order.
///
/// A container-level error (bad magic/truncated header in segment 0, an
/// offset table overrunning its segment or the ROM) is yielded once as
/// `Err` and ends iteration. Reaching a segment boundary that merely looks
/// like "no more data" (segment index > 0 with a short or mismatched
/// header) ends iteration cleanly with no error, per §4.B.
pub struct RomWalker<'a> {
    rom: &'a [u8],
    next_segment: usize,
    absolute_index: usize,
    pending: VecDeque<MessageRecord>,
    done: bool,
}

impl<'a> RomWalker<'a> {
    /// Start walking `rom` from segment 0.
    pub fn new(rom: &'a [u8]) -> Self {
        RomWalker {
            rom,
            next_segment: 0,
            absolute_index: 0,
            pending: VecDeque::new(),
            done: false,
        }
    }

    /// Parse the next segment's header and offset table, queuing its
    /// messages. `Ok(true)` means a segment was queued; `Ok(false)` means a
    /// clean end of ROM content was reached; `Err` is a fatal container
    /// error.
    fn load_next_segment(&mut self) -> VoicewareResult<bool> {
        let segment_index = self.next_segment;
        let segment_start = segment_index * SEGMENT_SIZE;

        if segment_start >= self.rom.len() {
            return Ok(false);
        }
        if segment_start + 5 > self.rom.len() {
            return if segment_index == 0 {
                Err(VoicewareError::TruncatedHeader)
            } else {
                Ok(false)
            };
        }

        let last_msg_index = self.rom[segment_start];
        let magic = &self.rom[segment_start + 1..segment_start + 5];
        if magic != SEGMENT_MAGIC {
            return if segment_index == 0 {
                Err(VoicewareError::InvalidMagic)
            } else {
                Ok(false)
            };
        }

        let message_count = last_msg_index as usize + 1;
        let offset_table_start = segment_start + 5;
        let offset_table_size = message_count * 2;

        if offset_table_start + offset_table_size > self.rom.len()
            || offset_table_start + offset_table_size > segment_start + SEGMENT_SIZE
        {
            return Err(VoicewareError::OffsetTableOverrun {
                segment: segment_index,
            });
        }

        let mut table_reader = &self.rom[offset_table_start..offset_table_start + offset_table_size];
        let mut word_offsets = Vec::with_capacity(message_count);
        for _ in 0..message_count {
            word_offsets.push(
                table_reader
                    .read_u16::<BigEndian>()
                    .expect("size checked above"),
            );
        }

        for k in 0..message_count {
            let off_k = word_offsets[k] as usize * 2;
            let next_k = if k + 1 < message_count {
                word_offsets[k + 1] as usize * 2
            } else {
                SEGMENT_SIZE
            };
            self.pending.push_back(MessageRecord {
                segment_index,
                msg_index_in_segment: k,
                absolute_index: self.absolute_index,
                start: segment_start + off_k,
                end: segment_start + next_k,
            });
            self.absolute_index += 1;
        }

        self.next_segment += 1;
        Ok(true)
    }
}

impl<'a> Iterator for RomWalker<'a> {
    type Item = VoicewareResult<MessageRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            if let Some(record) = self.pending.pop_front() {
                return Some(Ok(record));
            }
            match self.load_next_segment() {
                Ok(true) => continue,
                Ok(false) => {
                    self.done = true;
                    return None;
                }
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }
    }
}
