//! WAV file header structures and parsing

use super::{CANONICAL_HEADER_SIZE, DATA_CHUNK, FMT_CHUNK, RIFF_MAGIC, WAVE_MAGIC};
use crate::error::{Error, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Seek, SeekFrom, Write};
use tracing::warn;

/// WAV format tag identifying the codec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum FormatTag {
    /// PCM (uncompressed)
    Pcm = 0x0001,
    /// IEEE Float
    IeeeFloat = 0x0003,
    /// A-Law
    ALaw = 0x0006,
    /// Mu-Law
    MuLaw = 0x0007,
    /// Unknown format
    Unknown(u16),
}

impl From<u16> for FormatTag {
    fn from(val: u16) -> Self {
        match val {
            0x0001 => FormatTag::Pcm,
            0x0003 => FormatTag::IeeeFloat,
            0x0006 => FormatTag::ALaw,
            0x0007 => FormatTag::MuLaw,
            other => FormatTag::Unknown(other),
        }
    }
}

impl From<FormatTag> for u16 {
    fn from(tag: FormatTag) -> Self {
        match tag {
            FormatTag::Pcm => 0x0001,
            FormatTag::IeeeFloat => 0x0003,
            FormatTag::ALaw => 0x0006,
            FormatTag::MuLaw => 0x0007,
            FormatTag::Unknown(val) => val,
        }
    }
}

/// WAV format chunk data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavFormat {
    /// Format tag (codec ID)
    pub format_tag: FormatTag,
    /// Number of channels (1 = mono, 2 = stereo)
    pub channels: u16,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Average bytes per second
    pub byte_rate: u32,
    /// Block alignment (bytes per sample frame)
    pub block_align: u16,
    /// Bits per sample
    pub bits_per_sample: u16,
}

impl WavFormat {
    /// Read the 16 fixed fmt chunk bytes
    fn read<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(WavFormat {
            format_tag: reader.read_u16::<LittleEndian>()?.into(),
            channels: reader.read_u16::<LittleEndian>()?,
            sample_rate: reader.read_u32::<LittleEndian>()?,
            byte_rate: reader.read_u32::<LittleEndian>()?,
            block_align: reader.read_u16::<LittleEndian>()?,
            bits_per_sample: reader.read_u16::<LittleEndian>()?,
        })
    }

    /// Write the 16 fixed fmt chunk bytes
    fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_u16::<LittleEndian>(self.format_tag.into())?;
        writer.write_u16::<LittleEndian>(self.channels)?;
        writer.write_u32::<LittleEndian>(self.sample_rate)?;
        writer.write_u32::<LittleEndian>(self.byte_rate)?;
        writer.write_u16::<LittleEndian>(self.block_align)?;
        writer.write_u16::<LittleEndian>(self.bits_per_sample)?;
        Ok(())
    }

    /// Calculate expected byte rate
    pub fn calculate_byte_rate(&self) -> u32 {
        self.sample_rate * self.block_align as u32
    }

    /// Calculate expected block alignment
    pub fn calculate_block_align(&self) -> u16 {
        self.channels * (self.bits_per_sample / 8)
    }

    /// Validate format parameters
    pub fn validate(&self) -> Result<()> {
        if self.channels == 0 {
            return Err(Error::format("Invalid channel count: 0"));
        }

        if self.sample_rate == 0 {
            return Err(Error::format("Invalid sample rate: 0"));
        }

        if self.bits_per_sample == 0 || self.bits_per_sample % 8 != 0 {
            return Err(Error::format(format!(
                "Invalid bits per sample: {}",
                self.bits_per_sample
            )));
        }

        let expected_block_align = self.calculate_block_align();
        if self.block_align != expected_block_align {
            return Err(Error::format(format!(
                "Block align mismatch: expected {}, got {}",
                expected_block_align, self.block_align
            )));
        }

        let expected_byte_rate = self.calculate_byte_rate();
        if self.byte_rate != expected_byte_rate {
            return Err(Error::format(format!(
                "Byte rate mismatch: expected {}, got {}",
                expected_byte_rate, self.byte_rate
            )));
        }

        Ok(())
    }
}

/// Complete WAV file header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavHeader {
    /// RIFF chunk size (bytes following the size field)
    pub riff_size: u32,
    /// fmt chunk size as read from the file (16 in the canonical layout)
    pub fmt_size: u32,
    /// WAV format information
    pub format: WavFormat,
    /// Data chunk size in bytes
    pub data_size: u32,
    /// Data chunk payload offset from the start of the header
    pub data_start: u64,
}

impl WavHeader {
    /// Read and parse a WAV header from a reader.
    ///
    /// Reads sequentially from the current position. Unknown chunks between
    /// `WAVE` and `data` are skipped. The reader is left positioned at the
    /// first payload byte; `data_start` records that offset. `name` is used
    /// in diagnostics only.
    pub fn read<R: Read + Seek>(reader: &mut R, name: &str) -> Result<Self> {
        let mut tag = [0u8; 4];
        reader.read_exact(&mut tag)?;
        if &tag != RIFF_MAGIC {
            return Err(Error::format(format!(
                "{}: expected chunk RIFF, but got {}",
                name,
                fourcc(&tag)
            )));
        }
        let riff_size = reader.read_u32::<LittleEndian>()?;
        reader.read_exact(&mut tag)?;
        if &tag != WAVE_MAGIC {
            return Err(Error::format(format!(
                "{}: expected chunk WAVE, but got {}",
                name,
                fourcc(&tag)
            )));
        }

        let mut offset: u64 = 12;
        let mut fmt: Option<(u32, WavFormat)> = None;

        loop {
            let mut chunk_tag = [0u8; 4];
            match reader.read_exact(&mut chunk_tag) {
                Ok(()) => offset += 4,
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    return Err(Error::format(format!("{}: data chunk not found", name)));
                }
                Err(e) => return Err(e.into()),
            }

            if &chunk_tag == FMT_CHUNK {
                let fmt_size = reader.read_u32::<LittleEndian>()?;
                offset += 4;
                if fmt_size < 16 {
                    return Err(Error::format(format!(
                        "{}: expected length of chunk fmt >= 16 bytes, got {}",
                        name, fmt_size
                    )));
                }
                let format = WavFormat::read(reader)?;
                offset += 16;
                if fmt_size > 16 {
                    let skip = fmt_size - 16;
                    warn!("{}: skipping extra {} bytes at end of chunk fmt", name, skip);
                    reader.seek(SeekFrom::Current(skip as i64))?;
                    offset += skip as u64;
                }
                fmt = Some((fmt_size, format));
            } else if &chunk_tag == DATA_CHUNK {
                let data_size = reader.read_u32::<LittleEndian>()?;
                offset += 4;
                let (fmt_size, format) = fmt.ok_or_else(|| {
                    Error::format(format!("{}: data chunk before fmt chunk", name))
                })?;
                // Payload is not read; the reader stays at its first byte.
                return Ok(WavHeader {
                    riff_size,
                    fmt_size,
                    format,
                    data_size,
                    data_start: offset,
                });
            } else {
                let chunk_size = reader.read_u32::<LittleEndian>()?;
                offset += 4;
                warn!("{}: ignoring chunk {}", name, fourcc(&chunk_tag));
                reader.seek(SeekFrom::Current(chunk_size as i64))?;
                offset += chunk_size as u64;
            }
        }
    }

    /// Write the canonical 44-byte header.
    ///
    /// Emits only the `fmt ` (size 16) and `data` chunks, in that order.
    /// The caller must have set `fmt_size = 16`, consistent derived fields,
    /// and `riff_size = data_size + 36`. Returns the number of bytes written.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<u64> {
        writer.write_all(RIFF_MAGIC)?;
        writer.write_u32::<LittleEndian>(self.riff_size)?;
        writer.write_all(WAVE_MAGIC)?;
        writer.write_all(FMT_CHUNK)?;
        writer.write_u32::<LittleEndian>(self.fmt_size)?;
        self.format.write(writer)?;
        writer.write_all(DATA_CHUNK)?;
        writer.write_u32::<LittleEndian>(self.data_size)?;
        Ok(CANONICAL_HEADER_SIZE)
    }

    /// Get total number of samples (per channel)
    pub fn num_samples(&self) -> u64 {
        self.data_size as u64 / self.format.block_align as u64
    }

    /// Get duration in seconds
    pub fn duration_seconds(&self) -> f64 {
        self.num_samples() as f64 / self.format.sample_rate as f64
    }
}

fn fourcc(tag: &[u8; 4]) -> String {
    String::from_utf8_lossy(tag).into_owned()
}
