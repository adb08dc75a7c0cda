//! Clip generation, memoization and container writing.
//!
//! [`ClipService`] orchestrates the synthesis pipeline: one period per ear
//! from [`crate::waveform`], loop-matched channel buffers from
//! [`crate::channel`], container bytes from [`crate::wav`]. The last
//! generated clip is memoized against its request so repeated requests with
//! identical parameters skip synthesis entirely.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::channel;
use crate::error::{BinauralError, BinauralResult};
use crate::pcm::BitDepth;
use crate::wav;
use crate::waveform;

/// Default output sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Default sample width.
pub const DEFAULT_BIT_DEPTH: BitDepth = BitDepth::Sixteen;

/// Extension given to written container files.
pub const FILE_EXTENSION: &str = "wav";

/// How long a generated clip should run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClipLength {
    /// Repeat the common period exactly this many times (canonical policy).
    Loops(u32),
    /// Fill this many seconds with whole periods, clamped to stereo sync.
    Seconds(f64),
}

/// Parameters of one synthesis run; doubles as the memoization key.
///
/// Equality is field-wise and exact, including the floating-point fields.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Base tone routed to the right ear, in Hz.
    pub frequency_hz: f64,
    /// Beat offset added to the left-ear tone, in Hz.
    pub beat_hz: f64,
    /// Phase shift applied to the left-ear tone, in degrees.
    pub phase_shift_deg: f64,
    /// Requested clip length.
    pub length: ClipLength,
}

/// How a clip maps onto output containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    /// One stereo container with frames interleaved in channel order.
    Interleaved,
    /// One mono container per channel for independent per-ear routing.
    PerEar,
}

/// An immutable synthesized clip: equal-length PCM buffers per channel.
///
/// Channel order is right ear first, then left, matching the interleave
/// order of the written containers.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    sample_rate: u32,
    bit_depth: BitDepth,
    channels: Vec<Vec<i32>>,
}

impl AudioClip {
    /// Wrap channel buffers as a clip, enforcing the clip invariants:
    /// positive sample rate, at least one non-empty channel, all channels
    /// equal in length.
    pub fn new(
        sample_rate: u32,
        bit_depth: BitDepth,
        channels: Vec<Vec<i32>>,
    ) -> BinauralResult<Self> {
        if sample_rate == 0 {
            return Err(BinauralError::InvalidParameter(
                "sample rate must be positive".into(),
            ));
        }
        let Some(first) = channels.first() else {
            return Err(BinauralError::InvalidParameter(
                "a clip needs at least one channel".into(),
            ));
        };
        if first.is_empty() {
            return Err(BinauralError::InvalidParameter(
                "channel buffers must not be empty".into(),
            ));
        }
        if channels.iter().any(|c| c.len() != first.len()) {
            return Err(BinauralError::InvalidParameter(
                "all channel buffers must have equal length".into(),
            ));
        }
        Ok(Self {
            sample_rate,
            bit_depth,
            channels,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn bit_depth(&self) -> BitDepth {
        self.bit_depth
    }

    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Channel buffers in container order (right, left).
    pub fn channels(&self) -> &[Vec<i32>] {
        &self.channels
    }

    /// Samples per channel.
    pub fn duration_samples(&self) -> usize {
        self.channels[0].len()
    }

    /// Playback length in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.duration_samples() as f64 / self.sample_rate as f64
    }
}

/// Memoizing synthesis front end.
///
/// The cache is plain mutable state with no internal locking; `&mut self`
/// on [`generate`](Self::generate) and [`clear`](Self::clear) leaves
/// serialization of concurrent callers to the owner, e.g. a single
/// background worker.
#[derive(Debug)]
pub struct ClipService {
    sample_rate: u32,
    bit_depth: BitDepth,
    cache: Option<(GenerationRequest, AudioClip)>,
}

impl ClipService {
    pub fn new(sample_rate: u32, bit_depth: BitDepth) -> BinauralResult<Self> {
        if sample_rate == 0 {
            return Err(BinauralError::InvalidParameter(
                "sample rate must be positive".into(),
            ));
        }
        Ok(Self {
            sample_rate,
            bit_depth,
            cache: None,
        })
    }

    /// Synthesize a clip for `request`, or return the memoized clip when the
    /// request is field-equal to the previous one.
    ///
    /// The right ear carries the base frequency with zero shift; the left
    /// ear carries base + beat with the requested shift. A rejected request
    /// leaves the cached clip untouched.
    pub fn generate(&mut self, request: &GenerationRequest) -> BinauralResult<AudioClip> {
        if let Some((cached_request, clip)) = &self.cache
            && cached_request == request
        {
            log::debug!("clip already generated with identical parameters, reusing");
            return Ok(clip.clone());
        }

        let full_scale = self.bit_depth.full_scale();
        let right_period = waveform::generate_period(
            request.frequency_hz,
            self.sample_rate,
            0.0,
            full_scale,
        )?;
        let left_period = waveform::generate_period(
            request.frequency_hz + request.beat_hz,
            self.sample_rate,
            request.phase_shift_deg,
            full_scale,
        )?;

        let (right, left) = match request.length {
            ClipLength::Loops(num_loops) => {
                channel::build_looped(&right_period, &left_period, num_loops)?
            }
            ClipLength::Seconds(seconds) => {
                let mut right =
                    channel::build_for_duration(&right_period, seconds, self.sample_rate)?;
                let mut left =
                    channel::build_for_duration(&left_period, seconds, self.sample_rate)?;
                // Duration-built channels can differ slightly; clamp both to
                // the shorter so the clip invariant holds.
                let common = right.len().min(left.len());
                right.truncate(common);
                left.truncate(common);
                (right, left)
            }
        };

        let clip = AudioClip::new(self.sample_rate, self.bit_depth, vec![right, left])?;
        self.cache = Some((request.clone(), clip.clone()));
        Ok(clip)
    }

    /// Encode a clip into container byte blobs for the given layout:
    /// one stereo blob, or one mono blob per channel.
    pub fn encode(&self, clip: &AudioClip, layout: ChannelLayout) -> BinauralResult<Vec<Vec<u8>>> {
        match layout {
            ChannelLayout::Interleaved => {
                let channels: Vec<&[i32]> =
                    clip.channels().iter().map(Vec::as_slice).collect();
                Ok(vec![wav::encode_interleaved(
                    &channels,
                    clip.sample_rate(),
                    clip.bit_depth(),
                )?])
            }
            ChannelLayout::PerEar => clip
                .channels()
                .iter()
                .map(|c| wav::encode_mono(c, clip.sample_rate(), clip.bit_depth()))
                .collect(),
        }
    }

    /// Write a clip as one interleaved stereo container in `dir`.
    ///
    /// Returns the path of the created `<basename>.wav` file.
    pub fn write_stereo(
        &self,
        clip: &AudioClip,
        dir: &Path,
        basename: &str,
    ) -> BinauralResult<PathBuf> {
        let bytes = self.encode(clip, ChannelLayout::Interleaved)?.remove(0);
        write_atomic(dir, basename, &bytes)
    }

    /// Write a clip as one mono container per channel, named by `basenames`
    /// in channel order.
    pub fn write_per_ear(
        &self,
        clip: &AudioClip,
        dir: &Path,
        basenames: &[&str],
    ) -> BinauralResult<Vec<PathBuf>> {
        if basenames.len() != clip.num_channels() {
            return Err(BinauralError::InvalidParameter(format!(
                "expected {} basenames, one per channel, got {}",
                clip.num_channels(),
                basenames.len()
            )));
        }
        let blobs = self.encode(clip, ChannelLayout::PerEar)?;
        blobs
            .iter()
            .zip(basenames)
            .map(|(bytes, basename)| write_atomic(dir, basename, bytes))
            .collect()
    }

    /// Drop the memoized clip.
    pub fn clear(&mut self) {
        self.cache = None;
    }

    /// The currently memoized clip, if any.
    pub fn cached(&self) -> Option<&AudioClip> {
        self.cache.as_ref().map(|(_, clip)| clip)
    }
}

impl Default for ClipService {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            bit_depth: DEFAULT_BIT_DEPTH,
            cache: None,
        }
    }
}

/// Write container bytes to `<dir>/<basename>.wav`, going through a
/// temporary sibling so an interrupted write never leaves a corrupt
/// partial file under the final name.
fn write_atomic(dir: &Path, basename: &str, bytes: &[u8]) -> BinauralResult<PathBuf> {
    let final_path = dir.join(format!("{basename}.{FILE_EXTENSION}"));
    let tmp_path = dir.join(format!("{basename}.{FILE_EXTENSION}.tmp"));

    let result = File::create(&tmp_path).and_then(|mut file| {
        file.write_all(bytes)?;
        file.sync_all()?;
        fs::rename(&tmp_path, &final_path)
    });
    if let Err(err) = result {
        if let Err(cleanup) = fs::remove_file(&tmp_path) {
            log::warn!(
                "failed to remove partial file {}: {cleanup}",
                tmp_path.display()
            );
        }
        return Err(err.into());
    }

    log::debug!("created container file {}", final_path.display());
    Ok(final_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loop_request() -> GenerationRequest {
        GenerationRequest {
            frequency_hz: 440.0,
            beat_hz: 4.0,
            phase_shift_deg: 180.0,
            length: ClipLength::Loops(10),
        }
    }

    #[test]
    fn test_loop_count_scenario() {
        // 440 Hz -> 100-sample period, 444 Hz -> 99, common 99, 10 loops.
        let mut service = ClipService::default();
        let clip = service.generate(&loop_request()).unwrap();

        assert_eq!(clip.num_channels(), 2);
        assert_eq!(clip.duration_samples(), 990);
        assert_eq!(clip.sample_rate(), 44100);
        assert_eq!(clip.bit_depth(), BitDepth::Sixteen);

        let blobs = service.encode(&clip, ChannelLayout::Interleaved).unwrap();
        assert_eq!(blobs.len(), 1);
        let wav = &blobs[0];
        assert_eq!(wav.len(), 44 + 3960);
        let chunk_size = u32::from_le_bytes(wav[4..8].try_into().unwrap());
        assert_eq!(chunk_size, 3996);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let mut service = ClipService::default();
        let first = service.generate(&loop_request()).unwrap();
        service.clear();
        let second = service.generate(&loop_request()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_identical_request_hits_cache() {
        let mut service = ClipService::default();
        let first = service.generate(&loop_request()).unwrap();
        let second = service.generate(&loop_request()).unwrap();
        assert_eq!(first, second);
        assert_eq!(service.cached(), Some(&first));
    }

    #[test]
    fn test_differing_request_replaces_cache() {
        let mut service = ClipService::default();
        let first = service.generate(&loop_request()).unwrap();

        let mut changed = loop_request();
        changed.beat_hz = 8.0;
        let second = service.generate(&changed).unwrap();
        assert_ne!(first, second);
        assert_eq!(service.cached(), Some(&second));
    }

    #[test]
    fn test_invalid_request_leaves_cache_untouched() {
        let mut service = ClipService::default();
        let clip = service.generate(&loop_request()).unwrap();

        let mut bad = loop_request();
        bad.frequency_hz = 0.0;
        let result = service.generate(&bad);
        assert!(matches!(result, Err(BinauralError::InvalidParameter(_))));
        assert_eq!(service.cached(), Some(&clip));
    }

    #[test]
    fn test_zero_loops_rejected() {
        let mut service = ClipService::default();
        let mut bad = loop_request();
        bad.length = ClipLength::Loops(0);
        let result = service.generate(&bad);
        assert!(matches!(result, Err(BinauralError::InvalidParameter(_))));
    }

    #[test]
    fn test_seconds_policy_yields_equal_channels() {
        let mut service = ClipService::default();
        let request = GenerationRequest {
            frequency_hz: 440.0,
            beat_hz: 4.0,
            phase_shift_deg: 0.0,
            length: ClipLength::Seconds(1.61803),
        };
        let clip = service.generate(&request).unwrap();
        assert_eq!(clip.num_channels(), 2);
        assert_eq!(clip.channels()[0].len(), clip.channels()[1].len());
        assert!(clip.duration_samples() > 0);
        // Never longer than the requested duration allows.
        assert!(clip.duration_samples() <= (1.61803 * 44100.0) as usize);
    }

    #[test]
    fn test_clear_drops_cache() {
        let mut service = ClipService::default();
        service.generate(&loop_request()).unwrap();
        assert!(service.cached().is_some());
        service.clear();
        assert!(service.cached().is_none());
    }

    #[test]
    fn test_clip_invariants_enforced() {
        let result = AudioClip::new(44100, BitDepth::Sixteen, vec![]);
        assert!(matches!(result, Err(BinauralError::InvalidParameter(_))));

        let result = AudioClip::new(44100, BitDepth::Sixteen, vec![vec![]]);
        assert!(matches!(result, Err(BinauralError::InvalidParameter(_))));

        let result = AudioClip::new(44100, BitDepth::Sixteen, vec![vec![1, 2], vec![1]]);
        assert!(matches!(result, Err(BinauralError::InvalidParameter(_))));

        let result = AudioClip::new(0, BitDepth::Sixteen, vec![vec![1, 2]]);
        assert!(matches!(result, Err(BinauralError::InvalidParameter(_))));
    }

    #[test]
    fn test_write_stereo_creates_final_file_only() {
        let mut service = ClipService::default();
        let clip = service.generate(&loop_request()).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = service.write_stereo(&clip, dir.path(), "custom").unwrap();
        assert_eq!(path, dir.path().join("custom.wav"));

        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(bytes.len(), 44 + 3960);
        assert!(!dir.path().join("custom.wav.tmp").exists());
    }

    #[test]
    fn test_write_per_ear_creates_one_file_per_channel() {
        let mut service = ClipService::default();
        let clip = service.generate(&loop_request()).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let paths = service
            .write_per_ear(&clip, dir.path(), &["right", "left"])
            .unwrap();
        assert_eq!(paths.len(), 2);

        for path in &paths {
            let bytes = fs::read(path).unwrap();
            let channels = u16::from_le_bytes(bytes[22..24].try_into().unwrap());
            assert_eq!(channels, 1);
            assert_eq!(bytes.len(), 44 + 990 * 2);
        }
    }

    #[test]
    fn test_write_per_ear_rejects_wrong_basename_count() {
        let mut service = ClipService::default();
        let clip = service.generate(&loop_request()).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let result = service.write_per_ear(&clip, dir.path(), &["only-one"]);
        assert!(matches!(result, Err(BinauralError::InvalidParameter(_))));
    }
}
