//! Error types for ROM container parsing and ADPCM decoding.

use thiserror::Error;

/// Result type alias for voiceware operations.
pub type VoicewareResult<T> = Result<T, VoicewareError>;

/// Errors that can occur while walking a ROM or decoding a message.
#[derive(Debug, Error)]
pub enum VoicewareError {
    /// An I/O error occurred while reading the ROM or writing a sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Segment 0 is missing or too short to hold a header.
    #[error("ROM is too small for even one segment header")]
    TruncatedHeader,

    /// Segment 0's magic sentinel did not match `5A A5 69 55`.
    #[error("invalid magic number in segment 0 header")]
    InvalidMagic,

    /// The offset table for a segment would run past the segment or ROM end.
    #[error("offset table for segment {segment} overruns segment/ROM bounds")]
    OffsetTableOverrun {
        /// Index of the offending segment.
        segment: usize,
    },

    /// The ADPCM stream ran out of bytes before an end-of-message opcode.
    #[error("truncated ADPCM stream: {reason}")]
    Truncation {
        /// Human-readable description of what was being read.
        reason: String,
    },

    /// The WAV `data` chunk would exceed the 32-bit chunk size limit.
    #[error("WAV data chunk size {bytes} exceeds the 32-bit chunk size limit")]
    DataSizeOverflow {
        /// The size in bytes that would have been written.
        bytes: u64,
    },
}

impl VoicewareError {
    /// Create a new truncation error with the given reason.
    pub fn truncation(reason: impl Into<String>) -> Self {
        VoicewareError::Truncation {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_error_carries_reason() {
        let err = VoicewareError::truncation("reading command byte");
        assert!(matches!(err, VoicewareError::Truncation { .. }));
        assert!(err.to_string().contains("reading command byte"));
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        let err: VoicewareError = io_err.into();
        assert!(matches!(err, VoicewareError::Io(_)));
    }

    #[test]
    fn offset_table_overrun_reports_segment() {
        let err = VoicewareError::OffsetTableOverrun { segment: 3 };
        assert!(err.to_string().contains('3'));
    }
}
