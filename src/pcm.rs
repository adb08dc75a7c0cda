//! PCM sample widths and per-width byte serialization.
//!
//! A single width-parameterized codec replaces separate per-width buffer
//! types: channel buffers are `Vec<i32>` everywhere, and the [`BitDepth`]
//! in effect bounds sample magnitude and picks the on-disk layout.

use crate::error::{BinauralError, BinauralResult};

/// Supported PCM sample widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitDepth {
    /// 8-bit signed samples.
    Eight,
    /// 16-bit signed little-endian samples.
    Sixteen,
    /// 32-bit signed little-endian samples.
    ThirtyTwo,
}

impl BitDepth {
    /// Construct from a bit count, rejecting anything outside {8, 16, 32}.
    pub fn from_bits(bits: u16) -> BinauralResult<Self> {
        match bits {
            8 => Ok(BitDepth::Eight),
            16 => Ok(BitDepth::Sixteen),
            32 => Ok(BitDepth::ThirtyTwo),
            other => Err(BinauralError::InvalidParameter(format!(
                "unsupported bit depth {other}, expected 8, 16 or 32"
            ))),
        }
    }

    /// Bits per sample.
    pub fn bits(self) -> u16 {
        match self {
            BitDepth::Eight => 8,
            BitDepth::Sixteen => 16,
            BitDepth::ThirtyTwo => 32,
        }
    }

    /// Bytes per sample.
    pub fn bytes(self) -> u16 {
        self.bits() / 8
    }

    /// Full-scale amplitude, `2^(bits-1) - 1` (e.g. 32767 for 16-bit).
    pub fn full_scale(self) -> i32 {
        match self {
            BitDepth::Eight => i8::MAX as i32,
            BitDepth::Sixteen => i16::MAX as i32,
            BitDepth::ThirtyTwo => i32::MAX,
        }
    }

    /// Append one sample to `out` as signed little-endian bytes of this width.
    ///
    /// Fails with `EncodingFailure` when the sample does not fit the width.
    pub(crate) fn put_sample(self, out: &mut Vec<u8>, sample: i32) -> BinauralResult<()> {
        match self {
            BitDepth::Eight => {
                let s = i8::try_from(sample).map_err(|_| out_of_range(sample, 8))?;
                out.extend_from_slice(&s.to_le_bytes());
            }
            BitDepth::Sixteen => {
                let s = i16::try_from(sample).map_err(|_| out_of_range(sample, 16))?;
                out.extend_from_slice(&s.to_le_bytes());
            }
            BitDepth::ThirtyTwo => {
                out.extend_from_slice(&sample.to_le_bytes());
            }
        }
        Ok(())
    }
}

fn out_of_range(sample: i32, bits: u16) -> BinauralError {
    BinauralError::EncodingFailure(format!("sample {sample} out of range for {bits}-bit PCM"))
}
