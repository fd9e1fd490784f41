//! WAV audio file processing

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use ndarray::Array2;

use crate::audio::samples::{from_interleaved, SampleData};
use crate::error::{AudioFileError, Result};

/// Reads a WAV file, returning its frame rate and samples in the
/// container's native sample type.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(u32, SampleData)> {
    let path = path.as_ref();

    let file = File::open(path)
        .map_err(|e| AudioFileError::Io {
            message: format!("Cannot open audio file {}: {}", path.display(), e)
        })?;

    let reader = WavReader::new(BufReader::new(file))
        .map_err(|e| AudioFileError::Audio {
            message: format!("Cannot create WAV reader for {}: {}", path.display(), e)
        })?;

    let spec = reader.spec();
    let channels = spec.channels as usize;

    log::debug!(
        "WAV {}: {} Hz, {} channel(s), {}-bit {:?}",
        path.display(), spec.sample_rate, spec.channels, spec.bits_per_sample, spec.sample_format
    );

    let data = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Int, 8) => {
            SampleData::Int8(from_interleaved(collect_samples(reader)?, channels)?)
        }
        (SampleFormat::Int, 16) => {
            SampleData::Int16(from_interleaved(collect_samples(reader)?, channels)?)
        }
        (SampleFormat::Int, 24 | 32) => {
            SampleData::Int32(from_interleaved(collect_samples(reader)?, channels)?)
        }
        (SampleFormat::Float, 32) => {
            SampleData::Float32(from_interleaved(collect_samples(reader)?, channels)?)
        }
        (format, bits) => return Err(AudioFileError::audio(
            format!("Unsupported WAV sample layout: {}-bit {:?}", bits, format)
        )),
    };

    Ok((spec.sample_rate, data))
}

fn collect_samples<S: hound::Sample>(mut reader: WavReader<BufReader<File>>) -> Result<Vec<S>> {
    reader.samples::<S>()
        .map(|sample| sample.map_err(|e| AudioFileError::Audio {
            message: format!("Failed to read sample: {}", e)
        }))
        .collect()
}

/// Writes interleaved int16 frames, one column per channel.
pub fn write_wav<P: AsRef<Path>>(path: P, frame_rate: u32, data: &Array2<i16>) -> Result<()> {
    let path = path.as_ref();

    let spec = WavSpec {
        channels: data.ncols() as u16,
        sample_rate: frame_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)
        .map_err(|e| AudioFileError::Io {
            message: format!("Cannot create output file {}: {}", path.display(), e)
        })?;

    for row in data.rows() {
        for &sample in row.iter() {
            writer.write_sample(sample)
                .map_err(|e| AudioFileError::Audio {
                    message: format!("Failed to write sample: {}", e)
                })?;
        }
    }

    writer.finalize()
        .map_err(|e| AudioFileError::Audio {
            message: format!("Failed to finalize WAV writing: {}", e)
        })?;

    Ok(())
}
