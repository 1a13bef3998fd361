//! Streaming sample-by-sample filter pipeline
//!
//! Streams a mono WAV file through a [`SampleFilter`] one sample at a time,
//! converting between 16-bit PCM and 32-bit IEEE float on the way. The
//! output length is fixed before any sample is written, so the header never
//! needs rewriting.

use super::SampleFilter;
use crate::error::{Error, Result};
use crate::format::wav::{FormatTag, WavHeader, CANONICAL_HEADER_SIZE, RIFF_OVERHEAD};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Nominal PCM full scale; decode divisor and encode multiplier
const PCM_SCALE: f64 = 32767.0;

/// On-disk sample codec for one conversion endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SampleCodec {
    /// Signed 16-bit little-endian PCM
    Pcm16,
    /// Little-endian IEEE-754 binary32
    Float32,
}

impl SampleCodec {
    /// Pick the codec for a parsed input header
    fn for_input(header: &WavHeader, name: &str) -> Result<Self> {
        match (header.format.format_tag, header.format.bits_per_sample) {
            (FormatTag::Pcm, 16) => Ok(SampleCodec::Pcm16),
            (FormatTag::IeeeFloat, 32) => Ok(SampleCodec::Float32),
            _ => Err(Error::unsupported(format!("{}: unsupported format", name))),
        }
    }

    fn bits_per_sample(self) -> u16 {
        match self {
            SampleCodec::Pcm16 => 16,
            SampleCodec::Float32 => 32,
        }
    }

    fn block_align(self) -> u16 {
        match self {
            SampleCodec::Pcm16 => 2,
            SampleCodec::Float32 => 4,
        }
    }

    fn read_sample<R: Read>(self, reader: &mut R) -> io::Result<f32> {
        match self {
            SampleCodec::Pcm16 => {
                let s = reader.read_i16::<LittleEndian>()?;
                Ok((s as f64 / PCM_SCALE) as f32)
            }
            SampleCodec::Float32 => reader.read_f32::<LittleEndian>(),
        }
    }

    /// Write one clamped sample. PCM encoding maps +1.0 to 32767 and
    /// 0.0 to 0, rounding half toward positive infinity.
    fn write_sample<W: Write>(self, writer: &mut W, y: f32) -> io::Result<()> {
        match self {
            SampleCodec::Pcm16 => {
                let s = ((32768.5 + PCM_SCALE * y as f64) as i32 - 32768) as i16;
                writer.write_i16::<LittleEndian>(s)
            }
            SampleCodec::Float32 => writer.write_f32::<LittleEndian>(y),
        }
    }
}

/// Filter a mono WAV file sample by sample.
///
/// Reads `infile`, runs every sample through `f`, clamps the result to
/// [-1.0, +1.0] and writes `outfile` in `out_format` (PCM-16 or FLOAT-32).
/// `t == 0.0` makes the output the same length as the input; otherwise the
/// output holds exactly `floor(sample_rate * t)` samples. When the requested
/// length exceeds the input, the filter keeps running on zero input so IIR
/// tails ring out; when it is shorter, output stops at the requested length.
///
/// Errors carry the classic result codes through [`Error::code`]:
/// -2 open failure, -3 header parse failure, -4 unsupported format
/// (input not mono PCM-16/FLOAT-32, or `out_format` not PCM/FLOAT).
pub fn filter<P: AsRef<Path>, Q: AsRef<Path>>(
    infile: P,
    outfile: Q,
    f: &mut dyn SampleFilter,
    out_format: FormatTag,
    t: f64,
) -> Result<()> {
    let infile = infile.as_ref();
    let outfile = outfile.as_ref();

    let input = File::open(infile).map_err(|e| Error::open(infile, e))?;
    let mut reader = BufReader::new(input);
    let output = File::create(outfile).map_err(|e| Error::open(outfile, e))?;
    let mut writer = BufWriter::new(output);

    let name = infile.display().to_string();
    let header = WavHeader::read(&mut reader, &name)?;
    header.format.validate()?;

    if header.format.channels != 1 {
        return Err(Error::unsupported(format!(
            "{}: number of channels must be 1",
            name
        )));
    }
    let out_codec = match out_format {
        FormatTag::Pcm => SampleCodec::Pcm16,
        FormatTag::IeeeFloat => SampleCodec::Float32,
        other => {
            return Err(Error::unsupported(format!(
                "unsupported output format {}",
                u16::from(other)
            )))
        }
    };
    let in_codec = SampleCodec::for_input(&header, &name)?;

    let nin = header.num_samples();
    let nout = if t == 0.0 {
        nin
    } else {
        (header.format.sample_rate as f64 * t) as u64
    };

    let mut out = header.clone();
    out.format.format_tag = out_format;
    out.format.bits_per_sample = out_codec.bits_per_sample();
    out.format.block_align = out_codec.block_align();
    out.format.byte_rate = out.format.block_align as u32 * out.format.sample_rate;
    out.fmt_size = 16;
    let data_bytes = nout * out.format.block_align as u64;
    if data_bytes > (u32::MAX - RIFF_OVERHEAD) as u64 {
        return Err(Error::unsupported(format!(
            "output length of {} samples does not fit in a WAV file",
            nout
        )));
    }
    out.data_size = data_bytes as u32;
    out.riff_size = out.data_size + RIFF_OVERHEAD;
    out.data_start = CANONICAL_HEADER_SIZE;
    out.write(&mut writer)?;

    for n in 0..nout {
        let x = if n < nin {
            in_codec.read_sample(&mut reader)?
        } else {
            // Ring-out: drive the filter with silence past the input end.
            0.0
        };
        let y = f.process_sample(x).clamp(-1.0, 1.0);
        out_codec.write_sample(&mut writer, y)?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_pcm16(s: i16) -> f32 {
        (s as f64 / PCM_SCALE) as f32
    }

    fn encode_pcm16(y: f32) -> i16 {
        ((32768.5 + PCM_SCALE * y as f64) as i32 - 32768) as i16
    }

    #[test]
    fn test_pcm_encode_reference_points() {
        assert_eq!(encode_pcm16(0.0), 0);
        assert_eq!(encode_pcm16(1.0), 32767);
        assert_eq!(encode_pcm16(-1.0), -32767);
        assert_eq!(encode_pcm16(0.5), 16384);
    }

    #[test]
    fn test_pcm_round_trip_within_one_quantum() {
        let quantum = (1.0 / PCM_SCALE) as f32;
        for s in [-32767i16, -16384, -1, 0, 1, 12345, 16384, 32767] {
            let x = decode_pcm16(s);
            assert!(x >= -1.0 - quantum && x <= 1.0);
            assert_eq!(encode_pcm16(x.clamp(-1.0, 1.0)), s);
        }
    }

    #[test]
    fn test_pcm_min_decodes_below_full_scale() {
        // -32768 / 32767 is just below -1.0 and must be clamped before
        // re-encoding, landing on -32767.
        let x = decode_pcm16(i16::MIN);
        assert!(x < -1.0);
        assert_eq!(encode_pcm16(x.clamp(-1.0, 1.0)), -32767);
    }

    #[test]
    fn test_sample_codec_round_trip() {
        let mut buf = Vec::new();
        SampleCodec::Pcm16.write_sample(&mut buf, 0.5).unwrap();
        SampleCodec::Float32.write_sample(&mut buf, -0.25).unwrap();
        assert_eq!(buf.len(), 6);

        let mut cursor = io::Cursor::new(&buf);
        let x = SampleCodec::Pcm16.read_sample(&mut cursor).unwrap();
        assert!((x - 0.5).abs() < 1e-4);
        let y = SampleCodec::Float32.read_sample(&mut cursor).unwrap();
        assert_eq!(y, -0.25);
    }

    #[test]
    fn test_input_codec_selection() {
        use crate::format::wav::WavFormat;
        let mut header = WavHeader {
            riff_size: 36,
            fmt_size: 16,
            format: WavFormat {
                format_tag: FormatTag::Pcm,
                channels: 1,
                sample_rate: 8000,
                byte_rate: 16000,
                block_align: 2,
                bits_per_sample: 16,
            },
            data_size: 0,
            data_start: 44,
        };
        assert_eq!(
            SampleCodec::for_input(&header, "t").unwrap(),
            SampleCodec::Pcm16
        );

        header.format.format_tag = FormatTag::IeeeFloat;
        header.format.bits_per_sample = 32;
        assert_eq!(
            SampleCodec::for_input(&header, "t").unwrap(),
            SampleCodec::Float32
        );

        // PCM-32 is not a supported input
        header.format.format_tag = FormatTag::Pcm;
        assert_eq!(SampleCodec::for_input(&header, "t").unwrap_err().code(), -4);
    }
}
