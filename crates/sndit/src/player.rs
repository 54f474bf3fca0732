//! Capability contracts between the engines and an audio backend.
//!
//! The engines only ever talk to a [`Player`] and construct players through a
//! [`Context`]. Everything concrete (decoding, output devices, looping)
//! lives in a backend adapter such as the rodio one behind the `rodio` feature.

use std::rc::Rc;
use std::sync::Arc;

use crate::error::SoundResult;

/// Transport controls for one decoded asset.
pub trait Player {
    /// Starts or resumes playback from the current position.
    fn play(&mut self);

    /// Stops playback, keeping the current position.
    fn pause(&mut self);

    /// Moves the transport back to the start.
    fn rewind(&mut self) -> SoundResult<()>;

    /// Returns true while audio is being produced.
    fn is_playing(&self) -> bool;

    /// Sets the output volume (0.0-1.0).
    fn set_volume(&mut self, volume: f32);
}

/// Factory that turns raw asset bytes into players.
///
/// A context holds no per-player state, so a single instance may back
/// several engines through `&C`, `Rc<C>` or `Arc<C>`.
pub trait Context {
    /// The player type this backend produces.
    type Player: Player;

    /// Decodes `data` into a player that stops at the end of the asset.
    fn new_player(&self, data: &[u8]) -> SoundResult<Self::Player>;

    /// Decodes `data` into a player that repeats the asset indefinitely.
    fn new_loop_player(&self, data: &[u8]) -> SoundResult<Self::Player>;
}

impl<C: Context + ?Sized> Context for &C {
    type Player = C::Player;

    fn new_player(&self, data: &[u8]) -> SoundResult<Self::Player> {
        (**self).new_player(data)
    }

    fn new_loop_player(&self, data: &[u8]) -> SoundResult<Self::Player> {
        (**self).new_loop_player(data)
    }
}

impl<C: Context + ?Sized> Context for Rc<C> {
    type Player = C::Player;

    fn new_player(&self, data: &[u8]) -> SoundResult<Self::Player> {
        (**self).new_player(data)
    }

    fn new_loop_player(&self, data: &[u8]) -> SoundResult<Self::Player> {
        (**self).new_loop_player(data)
    }
}

impl<C: Context + ?Sized> Context for Arc<C> {
    type Player = C::Player;

    fn new_player(&self, data: &[u8]) -> SoundResult<Self::Player> {
        (**self).new_player(data)
    }

    fn new_loop_player(&self, data: &[u8]) -> SoundResult<Self::Player> {
        (**self).new_loop_player(data)
    }
}

impl<P: Player + ?Sized> Player for Box<P> {
    fn play(&mut self) {
        (**self).play();
    }

    fn pause(&mut self) {
        (**self).pause();
    }

    fn rewind(&mut self) -> SoundResult<()> {
        (**self).rewind()
    }

    fn is_playing(&self) -> bool {
        (**self).is_playing()
    }

    fn set_volume(&mut self, volume: f32) {
        (**self).set_volume(volume);
    }
}
