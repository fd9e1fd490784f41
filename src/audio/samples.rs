//! Tagged sample buffers
//!
//! WAV decoding keeps the container's native integer (or float) type while MP3
//! decoding always yields `f64`, so the buffer carries its own dtype instead of
//! forcing both paths into one representation.

use std::fmt;

use ndarray::{ArrayD, IxDyn};

use crate::error::{AudioFileError, Result};

/// Divisor applied by normalization, maps the int16 range onto roughly [-1, 1].
pub const NORMALIZATION_DIVISOR: f64 = 32768.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleType {
    Int8,
    Int16,
    Int32,
    Float32,
    Float64,
}

impl SampleType {
    pub fn name(&self) -> &'static str {
        match self {
            SampleType::Int8 => "int8",
            SampleType::Int16 => "int16",
            SampleType::Int32 => "int32",
            SampleType::Float32 => "float32",
            SampleType::Float64 => "float64",
        }
    }

    pub fn bytes_per_sample(&self) -> u16 {
        match self {
            SampleType::Int8 => 1,
            SampleType::Int16 => 2,
            SampleType::Int32 | SampleType::Float32 => 4,
            SampleType::Float64 => 8,
        }
    }

    pub fn is_float(&self) -> bool {
        matches!(self, SampleType::Float32 | SampleType::Float64)
    }
}

impl fmt::Display for SampleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decoded samples, shaped `(n,)` for mono and `(n, channels)` otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleData {
    Int8(ArrayD<i8>),
    Int16(ArrayD<i16>),
    Int32(ArrayD<i32>),
    Float32(ArrayD<f32>),
    Float64(ArrayD<f64>),
}

impl SampleData {
    pub fn sample_type(&self) -> SampleType {
        match self {
            SampleData::Int8(_) => SampleType::Int8,
            SampleData::Int16(_) => SampleType::Int16,
            SampleData::Int32(_) => SampleType::Int32,
            SampleData::Float32(_) => SampleType::Float32,
            SampleData::Float64(_) => SampleType::Float64,
        }
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            SampleData::Int8(data) => data.shape(),
            SampleData::Int16(data) => data.shape(),
            SampleData::Int32(data) => data.shape(),
            SampleData::Float32(data) => data.shape(),
            SampleData::Float64(data) => data.shape(),
        }
    }

    /// Number of frames (rows).
    pub fn len(&self) -> usize {
        self.shape().first().copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn channels(&self) -> usize {
        match self.shape() {
            [_] => 1,
            [_, channels, ..] => *channels,
            [] => 0,
        }
    }

    pub fn is_mono(&self) -> bool {
        self.shape().len() == 1
    }

    /// Divides every sample by 2^15.
    ///
    /// Integer buffers cannot hold the quotient and are widened to `Float64`;
    /// float buffers keep their type.
    pub fn normalize(self) -> SampleData {
        match self {
            SampleData::Int8(data) => {
                SampleData::Float64(data.mapv(|x| f64::from(x) / NORMALIZATION_DIVISOR))
            }
            SampleData::Int16(data) => {
                SampleData::Float64(data.mapv(|x| f64::from(x) / NORMALIZATION_DIVISOR))
            }
            SampleData::Int32(data) => {
                SampleData::Float64(data.mapv(|x| f64::from(x) / NORMALIZATION_DIVISOR))
            }
            SampleData::Float32(data) => {
                SampleData::Float32(data.mapv(|x| x / NORMALIZATION_DIVISOR as f32))
            }
            SampleData::Float64(mut data) => {
                data.mapv_inplace(|x| x / NORMALIZATION_DIVISOR);
                SampleData::Float64(data)
            }
        }
    }

    /// Copies the buffer into `f64`, keeping the shape.
    pub fn to_f64(&self) -> ArrayD<f64> {
        match self {
            SampleData::Int8(data) => data.mapv(f64::from),
            SampleData::Int16(data) => data.mapv(f64::from),
            SampleData::Int32(data) => data.mapv(f64::from),
            SampleData::Float32(data) => data.mapv(f64::from),
            SampleData::Float64(data) => data.clone(),
        }
    }

    pub fn as_int16(&self) -> Option<&ArrayD<i16>> {
        match self {
            SampleData::Int16(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_float64(&self) -> Option<&ArrayD<f64>> {
        match self {
            SampleData::Float64(data) => Some(data),
            _ => None,
        }
    }
}

/// Lays out an interleaved sample sequence: flat for `channels <= 1`,
/// `(n, channels)` otherwise.
pub fn from_interleaved<T>(samples: Vec<T>, channels: usize) -> Result<ArrayD<T>> {
    let total = samples.len();
    let shape = if channels <= 1 {
        IxDyn(&[total])
    } else {
        if total % channels != 0 {
            return Err(AudioFileError::audio(format!(
                "{} interleaved samples do not split into {} channels", total, channels
            )));
        }
        IxDyn(&[total / channels, channels])
    };

    ArrayD::from_shape_vec(shape, samples)
        .map_err(|e| AudioFileError::audio(format!("Cannot shape sample buffer: {}", e)))
}

/// Conversion to int16 by truncation, wrapping out-of-range values instead
/// of clamping them.
pub trait WrappingCast: Copy {
    fn wrapping_i16(self) -> i16;
}

macro_rules! impl_wrapping_cast_int {
    ($($t:ty),*) => {
        $(impl WrappingCast for $t {
            fn wrapping_i16(self) -> i16 { self as i16 }
        })*
    };
}

impl_wrapping_cast_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl WrappingCast for f32 {
    fn wrapping_i16(self) -> i16 { (self as i64) as i16 }
}

impl WrappingCast for f64 {
    fn wrapping_i16(self) -> i16 { (self as i64) as i16 }
}
