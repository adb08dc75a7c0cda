//! Byte-exact PCM WAV container encoding.
//!
//! One authoritative encoder produces the canonical 44-byte
//! RIFF/WAVE/fmt/data header followed by little-endian signed sample data,
//! either as one interleaved multi-channel container or as a single-channel
//! container per call for independent per-ear routing.

use crate::error::{BinauralError, BinauralResult};
use crate::pcm::BitDepth;

/// Length of the RIFF/fmt/data header preceding the sample bytes.
pub const HEADER_LEN: usize = 44;

/// Length of the fmt chunk body for plain PCM.
const FMT_CHUNK_LEN: u32 = 16;

/// WAVE audio format tag for uncompressed PCM.
const FORMAT_PCM: u16 = 1;

/// Encode channel buffers as one interleaved PCM WAV container.
///
/// Each frame carries one sample per channel, in the order the buffers are
/// given. All buffers must be non-empty and equal in length.
///
/// # Returns
/// The complete container bytes, or `InvalidParameter` for an empty channel
/// list / empty buffer, or `EncodingFailure` when buffer lengths disagree or
/// a sample does not fit the width.
pub fn encode_interleaved(
    channels: &[&[i32]],
    sample_rate: u32,
    bit_depth: BitDepth,
) -> BinauralResult<Vec<u8>> {
    if channels.is_empty() {
        return Err(BinauralError::InvalidParameter(
            "at least one channel buffer is required".into(),
        ));
    }
    if channels.iter().any(|c| c.is_empty()) {
        return Err(BinauralError::InvalidParameter(
            "channel buffers must not be empty".into(),
        ));
    }

    let frames = channels[0].len();
    if let Some(odd) = channels.iter().find(|c| c.len() != frames) {
        return Err(BinauralError::EncodingFailure(format!(
            "cannot interleave channels of different lengths ({} vs {})",
            frames,
            odd.len()
        )));
    }

    let num_channels = channels.len() as u16;
    let mut out = alloc_container(frames, num_channels, bit_depth);
    put_header(&mut out, frames, num_channels, sample_rate, bit_depth);
    for i in 0..frames {
        for channel in channels {
            bit_depth.put_sample(&mut out, channel[i])?;
        }
    }
    debug_assert_eq!(
        out.len(),
        HEADER_LEN + data_len(frames, num_channels, bit_depth) as usize
    );
    Ok(out)
}

/// Encode a single channel buffer as a mono PCM WAV container.
///
/// Same header layout as [`encode_interleaved`] with NumChannels = 1; used
/// to route each ear into its own file.
pub fn encode_mono(
    samples: &[i32],
    sample_rate: u32,
    bit_depth: BitDepth,
) -> BinauralResult<Vec<u8>> {
    if samples.is_empty() {
        return Err(BinauralError::InvalidParameter(
            "channel buffer must not be empty".into(),
        ));
    }

    let mut out = alloc_container(samples.len(), 1, bit_depth);
    put_header(&mut out, samples.len(), 1, sample_rate, bit_depth);
    for &sample in samples {
        bit_depth.put_sample(&mut out, sample)?;
    }
    Ok(out)
}

fn alloc_container(frames: usize, num_channels: u16, bit_depth: BitDepth) -> Vec<u8> {
    Vec::with_capacity(HEADER_LEN + data_len(frames, num_channels, bit_depth) as usize)
}

fn data_len(frames: usize, num_channels: u16, bit_depth: BitDepth) -> u32 {
    frames as u32 * num_channels as u32 * bit_depth.bytes() as u32
}

/// Write the canonical 44-byte PCM header.
fn put_header(
    out: &mut Vec<u8>,
    frames: usize,
    num_channels: u16,
    sample_rate: u32,
    bit_depth: BitDepth,
) {
    let data_bytes = data_len(frames, num_channels, bit_depth);
    let block_align = bit_depth.bytes() * num_channels;
    let byte_rate = sample_rate * block_align as u32;

    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_bytes).to_le_bytes());
    out.extend_from_slice(b"WAVE");

    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&FMT_CHUNK_LEN.to_le_bytes());
    out.extend_from_slice(&FORMAT_PCM.to_le_bytes());
    out.extend_from_slice(&num_channels.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&bit_depth.bits().to_le_bytes());

    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_bytes.to_le_bytes());
}
