//! Expansion of single-period buffers into full-length channel buffers.
//!
//! Both channels of a binaural clip come from periods of slightly different
//! length (left frequency = base + beat), so the builders here are what keeps
//! the final buffers loop-seamless: every output is a purely periodic
//! repetition of its own period, with no mid-buffer discontinuity.

use crate::error::{BinauralError, BinauralResult};

/// Build matched right/left channel buffers with the loop-count policy.
///
/// The common period length is `min(len(right), len(left))`; both channels
/// are repeated out to exactly `num_loops * common` samples, so they end at
/// the same length while each stays phase-continuous from its own period.
///
/// Fails with `InvalidParameter` when `num_loops` is zero or a period is
/// empty.
pub fn build_looped(
    right_period: &[i32],
    left_period: &[i32],
    num_loops: u32,
) -> BinauralResult<(Vec<i32>, Vec<i32>)> {
    if num_loops == 0 {
        return Err(BinauralError::InvalidParameter(
            "number of loops must be positive".into(),
        ));
    }
    let common = right_period.len().min(left_period.len());
    if common == 0 {
        return Err(BinauralError::InvalidParameter(
            "channel periods must not be empty".into(),
        ));
    }

    let channel_length = num_loops as usize * common;
    Ok((
        repeat_to_length(right_period, channel_length),
        repeat_to_length(left_period, channel_length),
    ))
}

/// Build one channel buffer with the duration policy.
///
/// The target length is `floor(duration_seconds * sample_rate)`, rounded down
/// to whole periods; the result is that many seamless repetitions of the
/// period. Channels built separately may differ slightly in length; callers
/// needing stereo sync must clamp both to the shorter result.
///
/// Fails with `InvalidParameter` when the duration is non-positive, the
/// period is empty, or the duration is too short to fit one whole period.
pub fn build_for_duration(
    period: &[i32],
    duration_seconds: f64,
    sample_rate: u32,
) -> BinauralResult<Vec<i32>> {
    if !duration_seconds.is_finite() || duration_seconds <= 0.0 {
        return Err(BinauralError::InvalidParameter(format!(
            "duration must be positive, got {duration_seconds}"
        )));
    }
    if period.is_empty() {
        return Err(BinauralError::InvalidParameter(
            "channel period must not be empty".into(),
        ));
    }

    let target_length = (duration_seconds * sample_rate as f64) as usize;
    let whole_periods = target_length / period.len();
    if whole_periods == 0 {
        return Err(BinauralError::InvalidParameter(format!(
            "duration {duration_seconds}s holds no whole period of {} samples",
            period.len()
        )));
    }
    Ok(repeat_to_length(period, whole_periods * period.len()))
}

/// Repeat `period` cyclically to exactly `length` samples, truncating the
/// final pass if needed.
fn repeat_to_length(period: &[i32], length: usize) -> Vec<i32> {
    (0..length).map(|i| period[i % period.len()]).collect()
}
