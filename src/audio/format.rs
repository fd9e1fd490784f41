//! Container format detection

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AudioFileError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    #[default]
    Wav,
    Mp3,
}

impl AudioFormat {
    pub fn name(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "wav",
            AudioFormat::Mp3 => "mp3",
        }
    }

    /// Maps a lowercase extension to a format, `None` for anything unknown.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "wav" => Some(AudioFormat::Wav),
            "mp3" => Some(AudioFormat::Mp3),
            _ => None,
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AudioFormat {
    type Err = AudioFileError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_extension(&s.to_ascii_lowercase())
            .ok_or_else(|| AudioFileError::config(format!("Unknown audio format: {}", s)))
    }
}

/// Picks the format used to decode `filename`.
///
/// An explicit format always wins. Otherwise the text after the final `.`
/// is lowercased and matched; unknown or missing extensions fall back to WAV.
pub fn resolve_format<P: AsRef<Path>>(filename: P, explicit: Option<AudioFormat>) -> AudioFormat {
    if let Some(format) = explicit {
        return format;
    }

    let name = filename.as_ref().to_string_lossy();
    let ending = name.rsplit('.').next().unwrap_or_default().to_lowercase();

    AudioFormat::from_extension(&ending).unwrap_or(AudioFormat::Wav)
}
