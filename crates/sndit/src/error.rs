//! Error types for sound registration and playback backends.

use thiserror::Error;

/// Errors surfaced by engines and backend adapters.
///
/// Only registration and backend construction can fail outward. Playback
/// calls on the engines never return these.
#[derive(Debug, Error)]
pub enum SoundError {
    /// The identifier already has a player in this engine.
    #[error("sound {0} already registered")]
    DuplicateId(String),

    /// The backend rejected the asset bytes.
    #[error("Failed to decode audio: {0}")]
    Decode(String),

    /// The backend could not open an output device.
    #[error("Failed to initialize audio device: {0}")]
    DeviceInitFailed(String),

    /// The backend could not create a playback channel for a player.
    #[error("Failed to create audio sink: {0}")]
    SinkCreationFailed(String),

    /// Moving the transport back to the start failed.
    #[error("Failed to rewind player: {0}")]
    Rewind(String),
}

/// Result type for sound operations.
pub type SoundResult<T> = Result<T, SoundError>;
