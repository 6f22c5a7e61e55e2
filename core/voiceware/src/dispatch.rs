//! Per-message mode dispatch: ADPCM decode vs raw PCM passthrough.

use crate::adpcm::decode_message;
use crate::error::VoicewareResult;
use crate::rom::MessageRecord;

/// Message payload mode byte selecting ADPCM decoding.
pub const MODE_ADPCM: u8 = 0x00;
/// Message payload mode byte selecting raw PCM passthrough.
pub const MODE_PCM: u8 = 0x40;

/// What came out of dispatching one message.
///
/// `OutOfBounds` and `UnknownMode` mirror the original decoder's behavior of
/// warning and moving on rather than aborting the whole run.
pub enum DispatchOutcome {
    /// The message's mode byte lies past the end of the ROM.
    OutOfBounds,
    /// ADPCM decoded to at least one sample.
    Adpcm(Vec<i16>),
    /// ADPCM decoded cleanly but produced no samples; no file is written.
    AdpcmEmpty,
    /// Raw PCM bytes, mode byte included, ready to write verbatim.
    Pcm(Vec<u8>),
    /// Raw PCM message whose computed byte range is empty or inverted.
    PcmEmptyRange,
    /// A mode byte outside the two known values.
    UnknownMode(u8),
}

/// Default output name for a message with no map-file entry:
/// `message_<segment>_<index within segment, zero-padded to 3 digits>`.
pub fn default_name(segment_index: usize, msg_index_in_segment: usize) -> String {
    format!("message_{}_{:03}", segment_index, msg_index_in_segment)
}

/// Read `record`'s mode byte and decode or extract its payload accordingly.
pub fn dispatch_message(rom: &[u8], record: &MessageRecord) -> VoicewareResult<DispatchOutcome> {
    if record.start >= rom.len() {
        return Ok(DispatchOutcome::OutOfBounds);
    }

    let mode = rom[record.start];
    match mode {
        MODE_ADPCM => {
            let mut cursor = record.start + 1;
            let mut samples = Vec::new();
            decode_message(rom, &mut cursor, rom.len(), &mut samples)?;
            if samples.is_empty() {
                Ok(DispatchOutcome::AdpcmEmpty)
            } else {
                Ok(DispatchOutcome::Adpcm(samples))
            }
        }
        MODE_PCM => {
            let end = record.end.min(rom.len());
            if end <= record.start {
                Ok(DispatchOutcome::PcmEmptyRange)
            } else {
                Ok(DispatchOutcome::Pcm(rom[record.start..end].to_vec()))
            }
        }
        other => Ok(DispatchOutcome::UnknownMode(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rom::SEGMENT_SIZE;

    fn record(start: usize, end: usize) -> MessageRecord {
        MessageRecord {
            segment_index: 0,
            msg_index_in_segment: 0,
            absolute_index: 0,
            start,
            end,
        }
    }

    #[test]
    fn default_name_zero_pads_to_three_digits() {
        assert_eq!(default_name(2, 7), "message_2_007");
    }

    #[test]
    fn out_of_bounds_start_is_reported_without_error() {
        let rom = vec![0u8; 4];
        let outcome = dispatch_message(&rom, &record(10, 20)).unwrap();
        assert!(matches!(outcome, DispatchOutcome::OutOfBounds));
    }

    #[test]
    fn adpcm_mode_decodes_to_samples() {
        let mut rom = vec![MODE_ADPCM, 0x05, 0x00];
        rom.resize(8, 0);
        let outcome = dispatch_message(&rom, &record(0, SEGMENT_SIZE)).unwrap();
        match outcome {
            DispatchOutcome::Adpcm(samples) => assert_eq!(samples.len(), 40),
            _ => panic!("expected Adpcm outcome"),
        }
    }

    #[test]
    fn pcm_mode_includes_the_mode_byte_in_the_slice() {
        let rom = vec![MODE_PCM, 0x01, 0x02, 0x03];
        let outcome = dispatch_message(&rom, &record(0, 4)).unwrap();
        match outcome {
            DispatchOutcome::Pcm(bytes) => assert_eq!(bytes, vec![MODE_PCM, 0x01, 0x02, 0x03]),
            _ => panic!("expected Pcm outcome"),
        }
    }

    #[test]
    fn unknown_mode_is_reported_without_error() {
        let rom = vec![0x99, 0x00];
        let outcome = dispatch_message(&rom, &record(0, 2)).unwrap();
        assert!(matches!(outcome, DispatchOutcome::UnknownMode(0x99)));
    }
}
