//! Binaural beat synthesis and byte-exact PCM WAV encoding.
//!
//! The pipeline is: one sine period per ear ([`waveform`]), loop-matched
//! channel buffers ([`channel`]), a 44-byte-header WAV container ([`wav`]),
//! orchestrated and memoized by [`clip::ClipService`]. Handoff to an
//! external playback subsystem goes through [`playback`].
//!
//! ```no_run
//! use binaural_rs::{ClipLength, ClipService, GenerationRequest};
//!
//! let mut service = ClipService::default();
//! let clip = service.generate(&GenerationRequest {
//!     frequency_hz: 440.0,
//!     beat_hz: 4.0,
//!     phase_shift_deg: 180.0,
//!     length: ClipLength::Loops(10),
//! })?;
//! let _path = service.write_stereo(&clip, std::path::Path::new("/tmp"), "custom")?;
//! # Ok::<(), binaural_rs::BinauralError>(())
//! ```

pub mod channel;
pub mod clip;
pub mod error;
pub mod frequencies;
pub mod pcm;
pub mod playback;
pub mod wav;
pub mod waveform;

pub use clip::{
    AudioClip, ChannelLayout, ClipLength, ClipService, GenerationRequest, DEFAULT_BIT_DEPTH,
    DEFAULT_SAMPLE_RATE,
};
pub use error::{BinauralError, BinauralResult};
pub use pcm::BitDepth;
pub use playback::{LoadCompleter, LoadHandle, LoadStatus, PlaybackSink, SoundId, StreamId};
