//! Configuration management for loading and writing audio

use crate::audio::AudioFormat;
use crate::error::{AudioFileError, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Highest frame rate accepted for output files.
pub const MAX_FRAME_RATE: u32 = 192000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input_path: PathBuf,
    pub output_path: Option<PathBuf>,
    pub verbose: bool,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Overrides extension-based detection when set
    pub format: Option<AudioFormat>,
    pub normalized: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Falls back to the decoded frame rate when unset
    pub frame_rate: Option<u32>,
    pub format: AudioFormat,
}

impl Config {
    pub fn input_format(&self) -> Option<AudioFormat> {
        self.input.format
    }

    pub fn normalized(&self) -> bool {
        self.input.normalized
    }

    pub fn output_format(&self) -> AudioFormat {
        self.output.format
    }

    /// Output frame rate, or `decoded` when none was configured
    pub fn output_frame_rate(&self, decoded: u32) -> u32 {
        self.output.frame_rate.unwrap_or(decoded)
    }
}

#[derive(Debug, Clone, Parser)]
#[command(
    name = "loadaudio",
    about = "Load WAV/MP3 audio and optionally re-encode it as WAV",
    version,
    author
)]
pub struct Args {
    #[arg(short = 'i', long = "input", help = "Input audio file path (WAV or MP3)")]
    pub input: PathBuf,

    #[arg(
        short = 'f',
        long = "format",
        help = "Input format (wav or mp3), overrides the file extension"
    )]
    pub format: Option<AudioFormat>,

    #[arg(short = 'n', long = "normalized", help = "Divide samples by 2^15 after decoding")]
    pub normalized: bool,

    #[arg(
        short = 'o',
        long = "output",
        help = "Write the decoded mono samples to this file as stereo WAV"
    )]
    pub output: Option<PathBuf>,

    #[arg(
        short = 'r',
        long = "frame-rate",
        help = "Output frame rate (Hz), defaults to the decoded rate"
    )]
    pub frame_rate: Option<u32>,

    #[arg(long = "output-format", help = "Output format; anything but wav writes nothing")]
    pub output_format: Option<AudioFormat>,

    #[arg(short = 'v', long = "verbose", help = "Enable verbose output mode")]
    pub verbose: bool,

    #[arg(short = 'c', long = "config", help = "Config file path (TOML format)")]
    pub config_file: Option<PathBuf>,
}

impl Config {
    /// Create config from command line arguments and config file
    pub fn from_args_and_config(args: Args) -> Result<Self> {
        let mut config = if let Some(config_path) = &args.config_file {
            Self::from_file(config_path)?
        } else {
            Self::default()
        };

        // Command line arguments override config file settings
        config.input_path = args.input;
        if args.output.is_some() {
            config.output_path = args.output;
        }
        if args.format.is_some() {
            config.input.format = args.format;
        }
        if args.frame_rate.is_some() {
            config.output.frame_rate = args.frame_rate;
        }
        if let Some(format) = args.output_format {
            config.output.format = format;
        }
        config.input.normalized |= args.normalized;
        config.verbose |= args.verbose;

        config.validate()?;

        Ok(config)
    }

    /// Load config from TOML config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AudioFileError::config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| AudioFileError::config(format!("Failed to parse config file: {}", e)))
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(rate) = self.output.frame_rate {
            if rate == 0 {
                return Err(AudioFileError::config("Frame rate must be greater than 0"));
            }
            if rate > MAX_FRAME_RATE {
                return Err(AudioFileError::config(format!(
                    "Frame rate cannot exceed {} Hz",
                    MAX_FRAME_RATE
                )));
            }
        }

        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| AudioFileError::config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| AudioFileError::config(format!("Failed to write config file: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["loadaudio", "-i", "in.wav"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.input_format(), None);
        assert!(!config.normalized());
        assert_eq!(config.output_format(), AudioFormat::Wav);
        assert_eq!(config.output_frame_rate(48000), 48000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        config.output.frame_rate = Some(0);
        assert!(config.validate().is_err());

        config.output.frame_rate = Some(MAX_FRAME_RATE + 1);
        assert!(config.validate().is_err());

        config.output.frame_rate = Some(22050);
        assert!(config.validate().is_ok());
        assert_eq!(config.output_frame_rate(48000), 22050);
    }

    #[test]
    fn test_config_file_operations() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.input.format = Some(AudioFormat::Mp3);
        config.input.normalized = true;
        config.output.frame_rate = Some(22050);

        assert!(config.save_to_file(&config_path).is_ok());
        assert!(config_path.exists());

        let loaded = Config::from_file(&config_path).unwrap();
        assert_eq!(loaded.input_format(), Some(AudioFormat::Mp3));
        assert!(loaded.normalized());
        assert_eq!(loaded.output.frame_rate, Some(22050));
    }

    #[test]
    fn test_partial_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[output]\nformat = \"mp3\"\n").unwrap();

        let loaded = Config::from_file(&config_path).unwrap();
        assert_eq!(loaded.output_format(), AudioFormat::Mp3);
        assert_eq!(loaded.input_format(), None);
    }

    #[test]
    fn test_args_override_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let content = "[input]\nformat = \"mp3\"\n\n[output]\nframe_rate = 8000\n";
        std::fs::write(&config_path, content).unwrap();
        let config_arg = config_path.to_string_lossy().to_string();

        let config = Config::from_args_and_config(args(&["-c", &config_arg])).unwrap();
        assert_eq!(config.input_format(), Some(AudioFormat::Mp3));
        assert_eq!(config.output.frame_rate, Some(8000));

        let overrides = args(&["-c", &config_arg, "-f", "WAV", "-r", "22050", "-n"]);
        let config = Config::from_args_and_config(overrides).unwrap();
        assert_eq!(config.input_format(), Some(AudioFormat::Wav));
        assert_eq!(config.output.frame_rate, Some(22050));
        assert!(config.normalized());
        assert_eq!(config.input_path, PathBuf::from("in.wav"));
    }

    #[test]
    fn test_invalid_args() {
        assert!(Args::try_parse_from(["loadaudio", "-i", "in.wav", "-f", "ogg"]).is_err());
        assert!(Config::from_args_and_config(args(&["-r", "0"])).is_err());
    }
}
