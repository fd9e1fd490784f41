//! Audio Module
//!
//! Format detection, decoding of WAV and MP3 files into tagged sample
//! buffers, and the WAV writer.

pub mod file;
pub mod format;
#[cfg(feature = "mp3")]
pub mod mp3;
pub mod samples;
pub mod wav;

pub use file::{AudioFile, DEFAULT_FRAME_RATE};
pub use format::{resolve_format, AudioFormat};
pub use samples::{SampleData, SampleType, WrappingCast, NORMALIZATION_DIVISOR};
