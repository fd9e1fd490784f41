//! The `AudioFile` adapter: resolve the format, decode once, hand out samples.

use std::path::{Path, PathBuf};

use ndarray::{Array2, ArrayD};

use crate::audio::format::{resolve_format, AudioFormat};
use crate::audio::samples::{SampleData, WrappingCast};
use crate::audio::wav;
use crate::error::{AudioFileError, Result};

/// Frame rate used by [`AudioFile::write_default`].
pub const DEFAULT_FRAME_RATE: u32 = 44100;

/// One decoded audio clip.
///
/// Decoding happens inside the constructor, so a value of this type always
/// holds samples and a frame rate.
#[derive(Debug, Clone)]
pub struct AudioFile {
    filename: PathBuf,
    format: AudioFormat,
    normalized: bool,
    data: SampleData,
    frame_rate: u32,
}

impl AudioFile {
    /// Loads `filename`, detecting the format from its extension.
    pub fn open<P: AsRef<Path>>(filename: P) -> Result<Self> {
        Self::new(filename, None, false)
    }

    /// Loads `filename` as `format` (or the extension-derived format when
    /// `None`), dividing samples by 2^15 when `normalized` is set.
    pub fn new<P: AsRef<Path>>(
        filename: P,
        format: Option<AudioFormat>,
        normalized: bool,
    ) -> Result<Self> {
        let filename = filename.as_ref().to_path_buf();
        let format = resolve_format(&filename, format);

        let (frame_rate, data) = match format {
            AudioFormat::Wav => Self::read_wav(&filename)?,
            AudioFormat::Mp3 => Self::read_mp3(&filename)?,
        };

        let data = if normalized { data.normalize() } else { data };

        log::debug!(
            "Loaded {} as {}: shape {:?}, {}, {} Hz",
            filename.display(), format, data.shape(), data.sample_type(), frame_rate
        );

        Ok(Self { filename, format, normalized, data, frame_rate })
    }

    fn read_wav(filename: &Path) -> Result<(u32, SampleData)> {
        wav::read_wav(filename)
    }

    #[cfg(feature = "mp3")]
    fn read_mp3(filename: &Path) -> Result<(u32, SampleData)> {
        use crate::audio::mp3::decode_mp3;
        use crate::audio::samples::from_interleaved;

        let decoded = decode_mp3(filename)?;
        // Only stereo is split into columns; every other layout stays flat.
        let columns = if decoded.channels == 2 { 2 } else { 1 };
        let data = from_interleaved(decoded.samples, columns)?;

        Ok((decoded.frame_rate, SampleData::Float64(data)))
    }

    #[cfg(not(feature = "mp3"))]
    fn read_mp3(filename: &Path) -> Result<(u32, SampleData)> {
        Err(AudioFileError::unsupported_format(format!(
            "cannot decode {}: mp3 codec unavailable", filename.display()
        )))
    }

    pub fn read(&self) -> &SampleData {
        &self.data
    }

    pub fn into_data(self) -> SampleData {
        self.data
    }

    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    pub fn filename(&self) -> &Path {
        &self.filename
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    pub fn normalized(&self) -> bool {
        self.normalized
    }

    pub fn duration(&self) -> f64 {
        self.data.len() as f64 / self.frame_rate as f64
    }

    /// Writes mono `data` as a 16-bit stereo file with both channels equal.
    ///
    /// Samples are truncated and wrapped to int16, never clamped. Only
    /// [`AudioFormat::Wav`] is written; any other format writes nothing and
    /// still returns `Ok`.
    pub fn write<T: WrappingCast, P: AsRef<Path>>(
        data: &[T],
        filename: P,
        frame_rate: u32,
        format: AudioFormat,
    ) -> Result<()> {
        let filename = filename.as_ref();

        let column: Vec<i16> = data.iter().map(|&x| x.wrapping_i16()).collect();
        let column = Array2::from_shape_vec((column.len(), 1), column)
            .map_err(|e| AudioFileError::audio(format!("Cannot shape output buffer: {}", e)))?;
        let stereo = column
            .broadcast((column.nrows(), 2))
            .ok_or_else(|| AudioFileError::audio("Cannot broadcast output buffer to stereo"))?
            .to_owned();

        log::info!("Output buffer shape: {:?}", stereo.shape());

        match format {
            AudioFormat::Wav => wav::write_wav(filename, frame_rate, &stereo),
            other => {
                log::warn!("Not writing {}: {} output is not supported", filename.display(), other);
                Ok(())
            }
        }
    }

    /// [`AudioFile::write`] at [`DEFAULT_FRAME_RATE`] in WAV format.
    pub fn write_default<T: WrappingCast, P: AsRef<Path>>(data: &[T], filename: P) -> Result<()> {
        Self::write(data, filename, DEFAULT_FRAME_RATE, AudioFormat::Wav)
    }

    /// Writes a decoded buffer through [`AudioFile::write`].
    ///
    /// Only mono buffers are accepted.
    pub fn write_data<P: AsRef<Path>>(
        data: &SampleData,
        filename: P,
        frame_rate: u32,
        format: AudioFormat,
    ) -> Result<()> {
        if !data.is_mono() {
            return Err(AudioFileError::audio(format!(
                "Writer expects mono samples, got shape {:?}", data.shape()
            )));
        }

        match data {
            SampleData::Int8(d) => Self::write(&flatten(d), filename, frame_rate, format),
            SampleData::Int16(d) => Self::write(&flatten(d), filename, frame_rate, format),
            SampleData::Int32(d) => Self::write(&flatten(d), filename, frame_rate, format),
            SampleData::Float32(d) => Self::write(&flatten(d), filename, frame_rate, format),
            SampleData::Float64(d) => Self::write(&flatten(d), filename, frame_rate, format),
        }
    }
}

fn flatten<T: Copy>(data: &ArrayD<T>) -> Vec<T> {
    data.iter().copied().collect()
}
