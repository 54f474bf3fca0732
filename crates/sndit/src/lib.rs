//! # sndit
//!
//! Runtime playback layer for audio assets embedded by `sndit-generate`.
//!
//! This crate provides:
//! - Capability contracts for an audio backend ([`Player`], [`Context`])
//! - The [`SoundId`] trait implemented by every generated identifier type
//! - [`SfxEngine`]: one-shot effects that restart when re-triggered
//! - [`MusicEngine`]: a single looping track that is replaced on switch
//! - A rodio backend adapter (feature `rodio`)
//!
//! ## Threading
//!
//! Engines are driven by one caller, typically once per tick of a host loop,
//! and hold no locks. Each engine exclusively owns its players; only the
//! context may be shared between engines.
//!
//! ## Errors
//!
//! Registration surfaces failures synchronously. `play` and `stop` never
//! fail: unknown identifiers are ignored and transport glitches are logged.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

#[cfg(feature = "rodio")]
pub mod backend;
pub mod error;
pub mod ids;
pub mod music;
pub mod player;
pub mod sfx;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::*;
    pub use crate::ids::*;
    pub use crate::music::*;
    pub use crate::player::*;
    pub use crate::sfx::*;
}

pub use prelude::*;
