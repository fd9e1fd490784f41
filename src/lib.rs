//! loadaudio - load WAV and MP3 files into sample arrays
//!
//! WAV decoding and encoding goes through `hound`; MP3 decoding goes through
//! `symphonia` when the `mp3` feature is enabled.

pub mod audio;
pub mod config;
pub mod error;

pub use audio::{AudioFile, AudioFormat, SampleData, SampleType};
pub use config::{Args, Config};
pub use error::{AudioFileError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Whether this build can decode MP3 input.
pub const fn mp3_available() -> bool {
    cfg!(feature = "mp3")
}

/// Installs `env_logger`; `RUST_LOG` still overrides the chosen level.
pub fn init_logging(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info })
        .parse_default_env()
        .try_init()
        .ok();

    if !mp3_available() {
        log::warn!("MP3 support was not compiled in; only WAV files can be read");
    }
}

pub fn get_library_info() -> LibraryInfo {
    LibraryInfo {
        name: NAME.to_string(),
        version: VERSION.to_string(),
        description: DESCRIPTION.to_string(),
        mp3: mp3_available(),
    }
}

#[derive(Debug, Clone)]
pub struct LibraryInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    pub mp3: bool,
}

impl std::fmt::Display for LibraryInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} v{} - {}", self.name, self.version, self.description)?;
        if !self.mp3 {
            write!(f, " (wav only)")?;
        }
        Ok(())
    }
}
