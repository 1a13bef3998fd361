//! Container format handling

pub mod wav;

pub use wav::{dump, FormatTag, WavFormat, WavHeader};
