//! WAV audio format support
//!
//! This module implements RIFF/WAV header parsing and writing. The reader
//! accepts any chunk layout between `WAVE` and `data` (unknown chunks are
//! skipped); the writer emits the canonical 44-byte header only.

pub mod dump;
pub mod header;

pub use dump::{dump, print_header};
pub use header::{FormatTag, WavFormat, WavHeader};

/// WAV format magic numbers
pub const RIFF_MAGIC: &[u8; 4] = b"RIFF";
pub const WAVE_MAGIC: &[u8; 4] = b"WAVE";
pub const FMT_CHUNK: &[u8; 4] = b"fmt ";
pub const DATA_CHUNK: &[u8; 4] = b"data";

/// Size of the canonical header: RIFF(8) + WAVE(4) + fmt(8+16) + data(8)
pub const CANONICAL_HEADER_SIZE: u64 = 44;

/// Bytes counted by `riff_size` besides the payload in the canonical
/// layout: WAVE(4) + fmt chunk(8+16) + data chunk header(8)
pub const RIFF_OVERHEAD: u32 = 36;
