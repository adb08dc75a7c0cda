//! Handoff to an external asynchronous playback subsystem.
//!
//! The playback side (a sound pool, an OS mixer, a test double) is consumed
//! through [`PlaybackSink`]. Loading is asynchronous: `load` returns
//! immediately with a [`LoadHandle`], and the subsystem signals readiness
//! through the paired [`LoadCompleter`] once the bytes are in. The producer
//! blocks on the handle instead of polling, and only deletes the container
//! file after readiness has been signalled.

use std::fs;
use std::io;
use std::path::Path;
use std::sync::mpsc;

use crate::error::{BinauralError, BinauralResult};

/// Opaque identifier of a loaded sound.
pub type SoundId = u32;

/// Opaque identifier of a running playback stream.
pub type StreamId = u32;

/// Outcome reported by the playback subsystem for one load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// The sound is fully loaded and ready to play.
    Ready,
    /// The subsystem could not load the sound.
    Failed,
}

/// Blocking one-shot notification for a pending load.
#[derive(Debug)]
pub struct LoadHandle {
    rx: mpsc::Receiver<LoadStatus>,
}

/// Completion side of a [`LoadHandle`], held by the playback subsystem.
#[derive(Debug)]
pub struct LoadCompleter {
    tx: mpsc::Sender<LoadStatus>,
}

impl LoadHandle {
    /// Create a connected completer/handle pair.
    pub fn channel() -> (LoadCompleter, LoadHandle) {
        let (tx, rx) = mpsc::channel();
        (LoadCompleter { tx }, LoadHandle { rx })
    }

    /// Block until the subsystem signals completion.
    ///
    /// A completer dropped without signalling counts as a failed load.
    pub fn wait(self) -> LoadStatus {
        self.rx.recv().unwrap_or(LoadStatus::Failed)
    }
}

impl LoadCompleter {
    /// Signal the waiting producer. Consumes the completer; each load
    /// completes at most once.
    pub fn complete(self, status: LoadStatus) {
        // The receiver may already be gone; nothing left to notify then.
        let _ = self.tx.send(status);
    }
}

/// The asynchronous playback capability this crate hands containers to.
pub trait PlaybackSink {
    /// Begin loading the container at `path`. The returned handle resolves
    /// once the subsystem has finished reading the bytes.
    fn load(&mut self, path: &Path) -> BinauralResult<(SoundId, LoadHandle)>;

    /// Start playing a loaded sound, optionally looping until stopped.
    fn play(&mut self, sound: SoundId, looped: bool) -> BinauralResult<StreamId>;

    /// Stop a running stream.
    fn stop(&mut self, stream: StreamId);

    /// Release a loaded sound.
    fn unload(&mut self, sound: SoundId);
}

/// Hand a written container over to the playback subsystem.
///
/// Loads the file, waits for the readiness signal, deletes the file (the
/// bytes now live inside the subsystem; a failed deletion is logged and
/// otherwise ignored), then starts playback.
///
/// # Returns
/// The sound and stream identifiers, or `IoFailure` when the subsystem
/// reports a failed load. The file is left in place on failure.
pub fn hand_off<S: PlaybackSink>(
    sink: &mut S,
    path: &Path,
    looped: bool,
) -> BinauralResult<(SoundId, StreamId)> {
    let (sound, handle) = sink.load(path)?;
    if handle.wait() == LoadStatus::Failed {
        return Err(BinauralError::IoFailure(io::Error::other(format!(
            "playback subsystem failed to load {}",
            path.display()
        ))));
    }

    if let Err(err) = fs::remove_file(path) {
        log::warn!(
            "failed to delete handed-off container {}: {err}",
            path.display()
        );
    }

    let stream = sink.play(sound, looped)?;
    Ok((sound, stream))
}
