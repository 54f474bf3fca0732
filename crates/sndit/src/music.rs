//! Music engine.
//!
//! This module provides:
//! - Looping music tracks keyed by identifier
//! - At most one track playing at a time
//! - Tracks that always restart from the beginning when selected again
//!
//! Selecting an identifier that was never registered stops the current
//! track and leaves the engine silent; it is not an error.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use tracing::{debug, warn};

use crate::error::{SoundError, SoundResult};
use crate::ids::SoundId;
use crate::player::{Context, Player};

/// Plays one looping track at a time.
pub struct MusicEngine<ID, C: Context> {
    ctx: C,
    players: HashMap<ID, C::Player>,
    /// Last selected track. Only meaningful while `playing` is set.
    current: Option<ID>,
    playing: bool,
    /// Volume applied to every track, including ones registered later.
    volume: Option<f32>,
}

impl<ID, C: Context> std::fmt::Debug for MusicEngine<ID, C>
where
    ID: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MusicEngine")
            .field("registered", &self.players.keys().collect::<Vec<_>>())
            .field("current", &self.current)
            .field("playing", &self.playing)
            .field("volume", &self.volume)
            .finish_non_exhaustive()
    }
}

impl<ID, C> MusicEngine<ID, C>
where
    ID: Copy + Eq + Hash + Debug,
    C: Context,
{
    /// Creates an engine with no tracks and nothing playing.
    pub fn new(ctx: C) -> Self {
        Self {
            ctx,
            players: HashMap::new(),
            current: None,
            playing: false,
            volume: None,
        }
    }

    /// Decodes `data` into a looping player stored under `id`.
    ///
    /// Same contract as [`crate::SfxEngine::register`], but the player
    /// repeats indefinitely once started.
    pub fn register(&mut self, id: ID, data: &[u8]) -> SoundResult<()> {
        if self.players.contains_key(&id) {
            return Err(SoundError::DuplicateId(format!("{id:?}")));
        }
        let mut player = self.ctx.new_loop_player(data)?;
        if let Some(volume) = self.volume {
            player.set_volume(volume);
        }
        self.players.insert(id, player);
        debug!("Registered music track {:?}", id);
        Ok(())
    }

    /// Switches to the track `id`, starting it from the beginning.
    ///
    /// Re-selecting the track that is already playing does nothing. If `id`
    /// is not registered, the current track is stopped and nothing replaces it.
    pub fn play(&mut self, id: ID) {
        if self.playing && self.current == Some(id) {
            return;
        }
        self.stop_current();

        let Some(player) = self.players.get_mut(&id) else {
            debug!("Music track {:?} not registered, switching to silence", id);
            return;
        };
        if let Err(e) = player.rewind() {
            warn!("Failed to rewind music track {:?}: {e}", id);
        }
        player.play();
        self.current = Some(id);
        self.playing = true;
        debug!("Playing music track {:?}", id);
    }

    /// Stops the current track and rewinds it. Does nothing when silent.
    pub fn stop(&mut self) {
        self.stop_current();
    }

    /// Sets the volume of every track (0.0-1.0).
    pub fn set_volume(&mut self, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        self.volume = Some(volume);
        for player in self.players.values_mut() {
            player.set_volume(volume);
        }
    }

    /// The track playing now, if any.
    #[must_use]
    pub fn current(&self) -> Option<ID> {
        if self.playing {
            self.current
        } else {
            None
        }
    }

    /// Returns true while a track is selected and not stopped.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Returns true if `id` has a player.
    #[must_use]
    pub fn is_registered(&self, id: ID) -> bool {
        self.players.contains_key(&id)
    }

    /// Returns the player registered under `id`.
    #[must_use]
    pub fn player(&self, id: ID) -> Option<&C::Player> {
        self.players.get(&id)
    }

    /// Returns the player registered under `id` for direct transport control.
    pub fn player_mut(&mut self, id: ID) -> Option<&mut C::Player> {
        self.players.get_mut(&id)
    }

    /// Number of registered tracks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    fn stop_current(&mut self) {
        if !self.playing {
            return;
        }
        if let Some(id) = self.current {
            if let Some(player) = self.players.get_mut(&id) {
                player.pause();
                if let Err(e) = player.rewind() {
                    warn!("Failed to rewind music track {:?}: {e}", id);
                }
            }
        }
        self.playing = false;
    }
}

impl<ID, C> MusicEngine<ID, C>
where
    ID: SoundId,
    C: Context,
{
    /// Registers every identifier of a generated group with its embedded bytes.
    ///
    /// Stops at the first failure; identifiers registered before it stay registered.
    pub fn register_all(&mut self) -> SoundResult<()> {
        for &id in ID::ALL {
            self.register(id, id.bytes())?;
        }
        Ok(())
    }
}
