//! # sndit-generate
//!
//! Turns a directory tree of audio files into Rust source that binds each
//! file to a typed identifier and its embedded bytes.
//!
//! ## Layout
//!
//! Every immediate subdirectory of the root that contains at least one
//! recognized audio file is an *asset group*. Each group gets one generated
//! file, written into the group directory:
//!
//! ```text
//! assets/
//! ├── music/
//! │   ├── theme.wav
//! │   └── sounds_gen.rs     <- enum Sound { Theme = 0 }
//! └── sfx/
//!     ├── beep.wav
//!     ├── click.wav
//!     └── sounds_gen.rs     <- enum Sound { Beep = 0, Click = 1 }
//! ```
//!
//! The generated file is mounted as a module and registered with an engine:
//!
//! ```ignore
//! #[path = "../assets/sfx/sounds_gen.rs"]
//! mod sfx;
//!
//! let mut engine = sndit::SfxEngine::<sfx::Sound, _>::new(ctx);
//! engine.register_all()?;
//! engine.play(sfx::Sound::Click);
//! ```
//!
//! ## Guarantees
//!
//! - Ordinals are dense, start at 0 and follow file-name order
//! - An unchanged tree regenerates byte-identical output
//! - Two files mapping to one identifier abort the run
//! - A failed run replaces no files

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod emit;
pub mod error;
pub mod generator;
pub mod naming;
pub mod scan;

use std::path::Path;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::*;
    pub use crate::error::*;
    pub use crate::generator::*;
    pub use crate::scan::{Asset, AssetGroup};
}

pub use prelude::*;

/// Generates manifests under `root` with the default configuration.
pub fn generate(root: impl AsRef<Path>, module_path: &str) -> GenerateResult<GenerateReport> {
    Generator::default().generate(root, module_path)
}
