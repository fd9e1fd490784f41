//! MP3 decoding via symphonia
//!
//! Samples are decoded to 16-bit integers and widened to `f64`, so values
//! span the int16 range just like the WAV path does for 16-bit files.

use std::fs::File;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::{AudioFileError, Result};

/// Flat interleaved samples plus the stream metadata needed to lay them out.
#[derive(Debug, Clone)]
pub struct DecodedMp3 {
    pub samples: Vec<f64>,
    pub frame_rate: u32,
    pub channels: usize,
}

pub fn decode_mp3<P: AsRef<Path>>(path: P) -> Result<DecodedMp3> {
    let path = path.as_ref();
    log::debug!("Decoding MP3 {}", path.display());

    let file = File::open(path)
        .map_err(|e| AudioFileError::Io {
            message: format!("Cannot open audio file {}: {}", path.display(), e)
        })?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    // The caller already resolved the format; the real extension may be anything.
    let mut hint = Hint::new();
    hint.with_extension("mp3");

    // Gapless mode drops the encoder delay and padding announced by a LAME tag.
    let format_opts = FormatOptions { enable_gapless: true, ..Default::default() };

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &format_opts, &MetadataOptions::default())
        .map_err(|e| AudioFileError::Audio {
            message: format!("Cannot probe MP3 stream {}: {}", path.display(), e)
        })?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| {
            AudioFileError::audio(format!("No audio track found in {}", path.display()))
        })?;

    let track_id = track.id;
    let mut frame_rate = track.codec_params.sample_rate;
    let mut channels = track.codec_params.channels.map(|c| c.count());

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())?;

    let mut samples: Vec<f64> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(Error::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => break,
            Err(Error::ResetRequired) => break,
            Err(e) => return Err(e.into()),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(Error::DecodeError(msg)) => {
                log::warn!("Skipping corrupt MP3 frame in {}: {}", path.display(), msg);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let spec = *decoded.spec();
        frame_rate.get_or_insert(spec.rate);
        channels.get_or_insert(spec.channels.count());

        let mut buf = SampleBuffer::<i16>::new(decoded.capacity() as u64, spec);
        buf.copy_interleaved_ref(decoded);
        samples.extend(buf.samples().iter().map(|&s| f64::from(s)));
    }

    let frame_rate = frame_rate.ok_or_else(|| {
        AudioFileError::audio(format!("Sample rate unknown for {}", path.display()))
    })?;
    let channels = channels.unwrap_or(1);

    log::debug!(
        "MP3 {}: {} Hz, {} channel(s), {} samples",
        path.display(), frame_rate, channels, samples.len()
    );

    Ok(DecodedMp3 { samples, frame_rate, channels })
}

/// Builds small MPEG-1 Layer III streams for tests.
///
/// The first channel of every granule carries one full-scale spectral line,
/// coded in the count1 region with quad table B; a second channel is silent.
#[cfg(test)]
pub(crate) mod test_stream {
    use std::path::Path;

    /// Samples per channel produced by one MPEG-1 Layer III frame.
    pub(crate) const SAMPLES_PER_FRAME: usize = 1152;

    const BITRATE_KBPS: u32 = 128;

    #[derive(Default)]
    struct BitWriter {
        bytes: Vec<u8>,
        bits: usize,
    }

    impl BitWriter {
        fn push(&mut self, value: u32, width: u32) {
            for shift in (0..width).rev() {
                if self.bits % 8 == 0 {
                    self.bytes.push(0);
                }
                if (value >> shift) & 1 == 1 {
                    let last = self.bytes.len() - 1;
                    self.bytes[last] |= 0x80 >> (self.bits % 8);
                }
                self.bits += 1;
            }
        }
    }

    #[derive(Clone, Copy)]
    struct Granule {
        part2_3_length: u32,
        global_gain: u32,
        scalefac_compress: u32,
        count1_table_b: bool,
    }

    const TONE: Granule = Granule {
        part2_3_length: 5,
        global_gain: 230,
        scalefac_compress: 0,
        count1_table_b: true,
    };
    const SILENT: Granule = Granule {
        part2_3_length: 0,
        global_gain: 0,
        scalefac_compress: 0,
        count1_table_b: false,
    };
    // Scale factors need 74 bits but the granule claims none: rejected by the decoder.
    const BROKEN: Granule = Granule {
        part2_3_length: 0,
        global_gain: 0,
        scalefac_compress: 15,
        count1_table_b: false,
    };

    fn frame(channels: u16, frame_rate: u32, corrupt: bool) -> Vec<u8> {
        let rate_bits = match frame_rate {
            44100 => 0,
            48000 => 1,
            32000 => 2,
            other => panic!("unsupported MPEG-1 rate {}", other),
        };
        let frame_len = (144 * BITRATE_KBPS * 1000 / frame_rate) as usize;

        let mut w = BitWriter::default();
        w.push(0xFFFB, 16); // sync, MPEG-1, layer III, no CRC
        w.push(9, 4); // 128 kbps
        w.push(rate_bits, 2);
        w.push(0, 2); // padding, private
        w.push(if channels == 1 { 0b11 } else { 0b00 }, 2);
        w.push(0, 6); // mode extension, copyright, original, emphasis

        let mut granules = [[SILENT; 2]; 2];
        for gr in granules.iter_mut() {
            gr[0] = TONE;
        }
        if corrupt {
            granules[0][0] = BROKEN;
        }
        let channels = channels as usize;

        // Side info
        w.push(0, 9); // main_data_begin
        w.push(0, if channels == 1 { 5 } else { 3 });
        w.push(0, 4 * channels as u32); // scfsi
        for gr in &granules {
            for ch in &gr[..channels] {
                w.push(ch.part2_3_length, 12);
                w.push(0, 9); // big_values
                w.push(ch.global_gain, 8);
                w.push(ch.scalefac_compress, 4);
                w.push(0, 1); // window_switching_flag
                w.push(0, 15); // table_select
                w.push(0, 4 + 3); // region0_count, region1_count
                w.push(0, 2); // preflag, scalefac_scale
                w.push(ch.count1_table_b as u32, 1);
            }
        }

        // Main data
        for gr in &granules {
            for ch in &gr[..channels] {
                if ch.count1_table_b {
                    w.push(0b0111, 4); // quad (1, 0, 0, 0)
                    w.push(0, 1); // positive
                }
            }
        }

        let mut bytes = w.bytes;
        bytes.resize(frame_len, 0);
        bytes
    }

    /// Writes `frames` frames; frames whose index is in `corrupt` fail to decode.
    pub(crate) fn write_mp3(
        path: &Path,
        channels: u16,
        frame_rate: u32,
        frames: usize,
        corrupt: &[usize],
    ) {
        let stream: Vec<u8> = (0..frames)
            .flat_map(|i| frame(channels, frame_rate, corrupt.contains(&i)))
            .collect();
        std::fs::write(path, stream).unwrap();
    }
}
