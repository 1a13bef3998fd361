//! wavkit - mono WAV filtering library
//!
//! wavkit reads a mono WAV file, runs each sample through a user-supplied
//! scalar filter, and writes a mono WAV file of chosen sample format and
//! duration.
//!
//! # Architecture
//!
//! - `format`: RIFF/WAVE header parsing, writing and dumping
//! - `filter`: the [`SampleFilter`] trait, the canonical Direct Form II
//!   IIR primitive, and the streaming filter pipeline
//! - `error`: crate error type with classic result-code mapping
//!
//! # Example
//!
//! ```no_run
//! use wavkit::{filter, CanonicalFilter, FormatTag};
//!
//! // One-pole low-pass smoother, output padded to ring out for 0.1 s.
//! let mut lp = CanonicalFilter::new(vec![0.5], vec![1.0, -0.5]);
//! filter("in.wav", "out.wav", &mut lp, FormatTag::IeeeFloat, 0.1)?;
//! # Ok::<(), wavkit::Error>(())
//! ```

pub mod error;
pub mod filter;
pub mod format;

pub use error::{Error, Result};
pub use filter::{filter, CanonicalFilter, Identity, SampleFilter};
pub use format::wav::{dump, FormatTag, WavFormat, WavHeader};
