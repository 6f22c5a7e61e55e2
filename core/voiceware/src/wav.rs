//! Hand-written RIFF/WAVE writer with a `LIST`/`INFO` metadata sub-chunk.
//!
//! `hound` (used elsewhere in this workspace) has no way to emit `LIST`
//! chunks, so the container is assembled by hand the way the rest of this
//! crate assembles binary formats: with `byteorder` and explicit chunk
//! bookkeeping.

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};
use chrono::Local;

use crate::error::{VoicewareError, VoicewareResult};

const ALBUM: &str = "Nortel Millennium VoiceWare";
pub const SAMPLE_RATE: u32 = 8000;
pub const CHANNELS: u16 = 1;
pub const BITS_PER_SAMPLE: u16 = 16;

/// Metadata carried into the WAV file's `LIST`/`INFO` tags.
pub struct TrackMetadata<'a> {
    pub artist: &'a str,
    pub title: &'a str,
    pub track_number: u32,
    pub comment: Option<&'a str>,
}

/// Write `samples` (mono, 16-bit, 8 kHz PCM) plus `metadata` as a complete
/// WAV file to `writer`.
pub fn write_wav<W: Write>(
    writer: &mut W,
    samples: &[i16],
    metadata: &TrackMetadata,
) -> VoicewareResult<()> {
    let (data_chunk_size, data_needs_padding) = compute_data_chunk_size(samples.len())?;
    let padded_data_chunk_size = data_chunk_size + if data_needs_padding { 1 } else { 0 };

    let date_str = Local::now().format("%Y-%m-%d").to_string();
    let track_number_str = metadata.track_number.to_string();

    let mut info = Vec::new();
    info.extend_from_slice(b"INFO");
    write_info_sub_chunk(&mut info, b"IALB", ALBUM)?;
    write_info_sub_chunk(&mut info, b"IART", metadata.artist)?;
    write_info_sub_chunk(&mut info, b"INAM", metadata.title)?;
    write_info_sub_chunk(&mut info, b"ITRK", &track_number_str)?;
    write_info_sub_chunk(&mut info, b"ICRD", &date_str)?;
    if let Some(comment) = metadata.comment.filter(|c| !c.is_empty()) {
        write_info_sub_chunk(&mut info, b"ICMT", comment)?;
    }

    let fmt_chunk_size: u32 = 16;
    let block_align = CHANNELS * (BITS_PER_SAMPLE / 8);
    let bytes_per_sec = SAMPLE_RATE * block_align as u32;

    let riff_chunk_size = 4
        + (4 + 4 + fmt_chunk_size)
        + (4 + 4 + info.len() as u32)
        + (4 + 4 + padded_data_chunk_size);

    writer.write_all(b"RIFF")?;
    writer.write_u32::<LittleEndian>(riff_chunk_size)?;
    writer.write_all(b"WAVE")?;

    writer.write_all(b"fmt ")?;
    writer.write_u32::<LittleEndian>(fmt_chunk_size)?;
    writer.write_u16::<LittleEndian>(1)?; // wFormatTag: PCM
    writer.write_u16::<LittleEndian>(CHANNELS)?;
    writer.write_u32::<LittleEndian>(SAMPLE_RATE)?;
    writer.write_u32::<LittleEndian>(bytes_per_sec)?;
    writer.write_u16::<LittleEndian>(block_align)?;
    writer.write_u16::<LittleEndian>(BITS_PER_SAMPLE)?;

    writer.write_all(b"LIST")?;
    writer.write_u32::<LittleEndian>(info.len() as u32)?;
    writer.write_all(&info)?;

    writer.write_all(b"data")?;
    writer.write_u32::<LittleEndian>(data_chunk_size)?;
    for &sample in samples {
        writer.write_i16::<LittleEndian>(sample)?;
    }
    if data_needs_padding {
        writer.write_all(&[0u8])?;
    }

    Ok(())
}

fn compute_data_chunk_size(sample_count: usize) -> VoicewareResult<(u32, bool)> {
    let size64 = sample_count as u64 * (BITS_PER_SAMPLE as u64 / 8);
    if size64 > u32::MAX as u64 {
        return Err(VoicewareError::DataSizeOverflow { bytes: size64 });
    }
    let size = size64 as u32;
    Ok((size, size % 2 != 0))
}

fn write_info_sub_chunk(buf: &mut Vec<u8>, id: &[u8; 4], text: &str) -> VoicewareResult<()> {
    let mut data = text.as_bytes().to_vec();
    data.push(0);
    let chunk_size = data.len() as u32;

    buf.extend_from_slice(id);
    buf.write_u32::<LittleEndian>(chunk_size)?;
    buf.extend_from_slice(&data);
    if chunk_size % 2 != 0 {
        buf.push(0);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_chunk_size_overflow_is_rejected_without_allocating() {
        let huge = u32::MAX as usize / 2 + 1;
        let err = compute_data_chunk_size(huge).unwrap_err();
        assert!(matches!(err, VoicewareError::DataSizeOverflow { .. }));
    }

    #[test]
    fn odd_sample_count_needs_padding() {
        let (size, pad) = compute_data_chunk_size(3).unwrap();
        assert_eq!(size, 6);
        assert!(!pad); // 6 bytes is even even though sample count is odd
    }

    #[test]
    fn round_trips_through_hound() {
        let samples = [0i16, 100, -100, 32767, -32768];
        let metadata = TrackMetadata {
            artist: "rom_basename.bin",
            title: "message_0_000",
            track_number: 0,
            comment: Some("(PCM)"),
        };

        let mut buf = Vec::new();
        write_wav(&mut buf, &samples, &metadata).unwrap();

        let mut reader = hound::WavReader::new(std::io::Cursor::new(buf)).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.sample_rate, SAMPLE_RATE);
        assert_eq!(spec.channels, CHANNELS);
        assert_eq!(spec.bits_per_sample, BITS_PER_SAMPLE);

        let decoded: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(decoded, samples);
    }

    #[test]
    fn empty_comment_is_omitted() {
        let metadata = TrackMetadata {
            artist: "a",
            title: "b",
            track_number: 1,
            comment: Some(""),
        };
        let mut buf = Vec::new();
        write_wav(&mut buf, &[], &metadata).unwrap();
        let text = String::from_utf8_lossy(&buf);
        assert!(!text.contains("ICMT"));
    }
}
