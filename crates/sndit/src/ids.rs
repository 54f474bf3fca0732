//! Identifier model shared with generated asset manifests.
//!
//! The generator emits one `#[repr(u32)]` enum per asset group and
//! implements [`SoundId`] for it, so each group's identifiers form a closed,
//! compile-checked set that carries its own embedded bytes.

use std::fmt::Debug;
use std::hash::Hash;

/// A typed identifier for one embedded audio asset.
///
/// Implementations are normally generated. Ordinals are dense and start at
/// zero, in the lexicographic order of the source file names.
pub trait SoundId: Copy + Eq + Hash + Debug + 'static {
    /// Every identifier in the group, in ordinal order.
    const ALL: &'static [Self];

    /// The dense 0-based value of this identifier.
    fn ordinal(self) -> u32;

    /// The file name the asset was embedded from.
    fn file_name(self) -> &'static str;

    /// The embedded asset bytes.
    fn bytes(self) -> &'static [u8];

    /// Looks up an identifier by ordinal.
    #[must_use]
    fn from_ordinal(ordinal: u32) -> Option<Self> {
        Self::ALL.get(ordinal as usize).copied()
    }
}
