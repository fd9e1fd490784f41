//! Error Types

use thiserror::Error;

/// Main error type
#[derive(Debug, Clone, Error)]
pub enum AudioFileError {
    #[error("Audio error: {message}")]
    Audio { message: String },
    #[error("Config error: {message}")]
    Config { message: String },
    #[error("IO error: {message}")]
    Io { message: String },
    #[error("Unsupported format: {message}")]
    UnsupportedFormat { message: String },
}

impl AudioFileError {
    pub fn audio<S: Into<String>>(msg: S) -> Self { Self::Audio { message: msg.into() } }
    pub fn config<S: Into<String>>(msg: S) -> Self { Self::Config { message: msg.into() } }
    pub fn io<S: Into<String>>(msg: S) -> Self { Self::Io { message: msg.into() } }
    pub fn unsupported_format<S: Into<String>>(msg: S) -> Self {
        Self::UnsupportedFormat { message: msg.into() }
    }
}

pub type Result<T> = std::result::Result<T, AudioFileError>;

impl From<std::io::Error> for AudioFileError {
    fn from(err: std::io::Error) -> Self { Self::io(err.to_string()) }
}

impl From<hound::Error> for AudioFileError {
    fn from(err: hound::Error) -> Self {
        match err {
            hound::Error::IoError(e) => Self::io(e.to_string()),
            other => Self::audio(format!("WAV: {}", other)),
        }
    }
}

#[cfg(feature = "mp3")]
impl From<symphonia::core::errors::Error> for AudioFileError {
    fn from(err: symphonia::core::errors::Error) -> Self {
        match err {
            symphonia::core::errors::Error::IoError(e) => Self::io(e.to_string()),
            other => Self::audio(format!("MP3: {}", other)),
        }
    }
}
