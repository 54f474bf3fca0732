//! Sound effect engine.
//!
//! Effects are one-shot and restartable: playing an effect that is already
//! running restarts it from the beginning. Each identifier has at most one
//! active instance, and there is no queuing or overlap.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use tracing::{debug, warn};

use crate::error::{SoundError, SoundResult};
use crate::ids::SoundId;
use crate::player::{Context, Player};

/// Tracks one player per effect identifier.
pub struct SfxEngine<ID, C: Context> {
    ctx: C,
    players: HashMap<ID, C::Player>,
}

impl<ID, C: Context> std::fmt::Debug for SfxEngine<ID, C>
where
    ID: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SfxEngine")
            .field("registered", &self.players.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl<ID, C> SfxEngine<ID, C>
where
    ID: Copy + Eq + Hash + Debug,
    C: Context,
{
    /// Creates an engine with an empty registry.
    pub fn new(ctx: C) -> Self {
        Self {
            ctx,
            players: HashMap::new(),
        }
    }

    /// Decodes `data` into a one-shot player stored under `id`.
    ///
    /// Fails if `id` is already registered (the existing player is left
    /// untouched) or if the backend rejects the bytes (nothing is stored).
    pub fn register(&mut self, id: ID, data: &[u8]) -> SoundResult<()> {
        if self.players.contains_key(&id) {
            return Err(SoundError::DuplicateId(format!("{id:?}")));
        }
        let player = self.ctx.new_player(data)?;
        self.players.insert(id, player);
        debug!("Registered sound effect {:?}", id);
        Ok(())
    }

    /// Plays the effect from the beginning, restarting it if it is running.
    ///
    /// Unregistered identifiers are ignored.
    pub fn play(&mut self, id: ID) {
        let Some(player) = self.players.get_mut(&id) else {
            return;
        };
        if player.is_playing() {
            player.pause();
        }
        if let Err(e) = player.rewind() {
            warn!("Failed to rewind sound effect {:?}: {e}", id);
        }
        player.play();
    }

    /// Sets the volume of one effect. Unregistered identifiers are ignored.
    pub fn set_volume(&mut self, id: ID, volume: f32) {
        if let Some(player) = self.players.get_mut(&id) {
            player.set_volume(volume.clamp(0.0, 1.0));
        }
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

    /// Number of registered effects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

impl<ID, C> SfxEngine<ID, C>
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
