//! Nortel Millennium VoiceWare ROM container parsing and uPD7759-style
//! 4-bit ADPCM decoding.
//!
//! This crate covers the data model: walking a ROM's segments
//! ([`rom::RomWalker`]), decoding a single message's command stream
//! ([`adpcm::decode_message`]), dispatching on its mode byte
//! ([`dispatch::dispatch_message`]), holding a parsed map-file table
//! ([`map::MappingTable`]), formatting `--list` rows ([`listing::render_row`]),
//! and writing the resulting audio as a tagged WAV file ([`wav::write_wav`]).
//!
//! Reading CLI flags and the map file's text syntax is left to the binary
//! crate that drives this library.

pub mod adpcm;
pub mod dispatch;
pub mod error;
pub mod listing;
pub mod map;
pub mod rom;
pub mod wav;

pub use adpcm::{decode_message, AdpcmState};
pub use dispatch::{dispatch_message, DispatchOutcome};
pub use error::{VoicewareError, VoicewareResult};
pub use map::{MappingEntry, MappingTable};
pub use rom::{MessageRecord, RomWalker, SEGMENT_SIZE};
pub use wav::{write_wav, TrackMetadata};
