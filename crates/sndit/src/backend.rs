//! Rodio backend adapter.
//!
//! Implements [`Context`] and [`Player`] on top of rodio:
//!
//! - `RodioContext`: wrapper around rodio's output stream
//! - `RodioPlayer`: one sink per registered asset, holding the asset bytes
//!
//! Assets are decoded as WAV. Loop players queue the decoded source
//! repeated indefinitely.
//!
//! # Example
//!
//! ```ignore
//! use sndit::backend::RodioContext;
//! use sndit::{MusicEngine, SfxEngine};
//!
//! let ctx = std::rc::Rc::new(RodioContext::new()?);
//! let mut sfx = SfxEngine::<sfx::Sound, _>::new(ctx.clone());
//! sfx.register_all()?;
//! let mut music = MusicEngine::<music::Sound, _>::new(ctx);
//! music.register_all()?;
//!
//! sfx.play(sfx::Sound::Click);
//! music.play(music::Sound::Theme);
//! ```

use std::io::Cursor;
use std::sync::Arc;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use tracing::{debug, info};

use crate::error::{SoundError, SoundResult};
use crate::player::{Context, Player};

type WavDecoder = Decoder<Cursor<Arc<[u8]>>>;

fn decode(data: &Arc<[u8]>) -> SoundResult<WavDecoder> {
    Decoder::new_wav(Cursor::new(Arc::clone(data))).map_err(|e| SoundError::Decode(e.to_string()))
}

/// A new sink that starts paused.
fn paused_sink(handle: &OutputStreamHandle) -> SoundResult<Sink> {
    let sink = Sink::try_new(handle).map_err(|e| SoundError::SinkCreationFailed(e.to_string()))?;
    sink.pause();
    Ok(sink)
}

/// Owns the output device that every [`RodioPlayer`] plays through.
pub struct RodioContext {
    /// The output stream (must be kept alive).
    _stream: OutputStream,
    /// Handle for creating sinks.
    handle: OutputStreamHandle,
}

impl std::fmt::Debug for RodioContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioContext").finish_non_exhaustive()
    }
}

impl RodioContext {
    /// Opens the default output device.
    pub fn new() -> SoundResult<Self> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|e| SoundError::DeviceInitFailed(e.to_string()))?;

        info!("Audio device initialized");

        Ok(Self {
            _stream: stream,
            handle,
        })
    }

    fn create_player(&self, data: &[u8], looping: bool) -> SoundResult<RodioPlayer> {
        let data: Arc<[u8]> = Arc::from(data);
        // Bad bytes fail here, before a sink is allocated.
        let source = decode(&data)?;
        let sink = paused_sink(&self.handle)?;

        let player = RodioPlayer {
            sink,
            handle: self.handle.clone(),
            data,
            looping,
            volume: 1.0,
        };
        player.enqueue(source);
        debug!("Created {} player", if looping { "looping" } else { "one-shot" });
        Ok(player)
    }
}

impl Context for RodioContext {
    type Player = RodioPlayer;

    fn new_player(&self, data: &[u8]) -> SoundResult<RodioPlayer> {
        self.create_player(data, false)
    }

    fn new_loop_player(&self, data: &[u8]) -> SoundResult<RodioPlayer> {
        self.create_player(data, true)
    }
}

/// A rodio sink bound to one asset.
pub struct RodioPlayer {
    sink: Sink,
    /// Used to open a replacement sink on rewind.
    handle: OutputStreamHandle,
    data: Arc<[u8]>,
    looping: bool,
    volume: f32,
}

impl std::fmt::Debug for RodioPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioPlayer")
            .field("bytes", &self.data.len())
            .field("looping", &self.looping)
            .field("volume", &self.volume)
            .field("paused", &self.sink.is_paused())
            .finish_non_exhaustive()
    }
}

impl RodioPlayer {
    fn enqueue(&self, source: WavDecoder) {
        if self.looping {
            self.sink.append(source.repeat_infinite());
        } else {
            self.sink.append(source);
        }
    }
}

impl Player for RodioPlayer {
    fn play(&mut self) {
        self.sink.play();
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    /// Swaps in a new paused sink holding a fresh source at the start.
    ///
    /// `Sink::clear` waits for the audio thread to drain the queue, so the old
    /// sink is dropped instead, which stops it without waiting.
    fn rewind(&mut self) -> SoundResult<()> {
        let source = decode(&self.data).map_err(|e| SoundError::Rewind(e.to_string()))?;
        let sink = paused_sink(&self.handle).map_err(|e| SoundError::Rewind(e.to_string()))?;
        sink.set_volume(self.volume);
        drop(std::mem::replace(&mut self.sink, sink));
        self.enqueue(source);
        Ok(())
    }

    fn is_playing(&self) -> bool {
        !self.sink.is_paused() && !self.sink.empty()
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.sink.set_volume(self.volume);
    }
}
