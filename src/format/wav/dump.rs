//! Human-readable WAV header dump utility

use super::header::{FormatTag, WavHeader};
use crate::error::{Error, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Print a parsed WAV header to stdout
pub fn print_header(header: &WavHeader) {
    println!("file length: {}", header.riff_size as u64 + 8);
    let format_name = match header.format.format_tag {
        FormatTag::Pcm => "PCM".to_string(),
        FormatTag::IeeeFloat => "IEEE float".to_string(),
        FormatTag::ALaw => "8 bit A-law".to_string(),
        FormatTag::MuLaw => "8 bit mu-law".to_string(),
        FormatTag::Unknown(val) => format!("unknown {}", val),
    };
    println!("format: {}", format_name);
    println!("channels: {}", header.format.channels);
    println!("sample rate: {}", header.format.sample_rate);
    println!("byte rate: {}", header.format.byte_rate);
    println!("block align: {}", header.format.block_align);
    println!("bits per sample: {}", header.format.bits_per_sample);
    println!("data length (bytes): {}", header.data_size);
}

/// Open a WAV file, parse its header and print it to stdout.
///
/// Returns the payload offset. `Error::code()` on the failure gives -2 when
/// the file cannot be opened and -3 when the header cannot be parsed.
pub fn dump<P: AsRef<Path>>(path: P) -> Result<u64> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::open(path, e))?;
    let mut reader = BufReader::new(file);

    let name = path.display().to_string();
    let header = WavHeader::read(&mut reader, &name)?;

    print_header(&header);
    println!("data seek start: {:#010x}", header.data_start);

    Ok(header.data_start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dump_missing_file() {
        let err = dump("definitely/not/here.wav").unwrap_err();
        assert_eq!(err.code(), -2);
    }
}
