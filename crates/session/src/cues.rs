//! Sound cue delivery.
//!
//! Engines only name cues. The session forwards them to a [`CueSink`]; the
//! [`SoundBoard`] sink applies the player's preferences and hands anything audible to
//! a [`CuePlayer`]. Playback is fire-and-forget: nothing here can fail back into the
//! session.

use std::io::Write;

use tokio::sync::mpsc;

use crate::store::KeyValueStore;
use crate::types::{SoundCue, DEFAULT_VOLUME, SOUND_ENABLED_KEY, SOUND_VOLUME_KEY};

/// Receiver of cue triggers raised by the active game
pub trait CueSink: Send {
    fn cue(&mut self, cue: SoundCue);

    /// Flip sound on or off and return the new setting.
    ///
    /// Sinks without preferences are always on.
    fn toggle(&mut self, _store: &mut dyn KeyValueStore) -> bool {
        true
    }

    fn is_enabled(&self) -> bool {
        true
    }

    /// Move the volume by `delta`, persisting it, and return the new level.
    ///
    /// Sinks without a volume return `None`.
    fn change_volume(&mut self, _delta: f32, _store: &mut dyn KeyValueStore) -> Option<f32> {
        None
    }
}

/// Something that can make a cue audible
pub trait CuePlayer: Send {
    fn play(&mut self, cue: SoundCue, volume: f32);
}

/// Cue as handed to a player task
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayedCue {
    pub cue: SoundCue,
    pub volume: f32,
}

/// Forwards cues to a background task so playback never stalls the session.
#[derive(Debug, Clone)]
pub struct ChannelPlayer {
    tx: mpsc::UnboundedSender<PlayedCue>,
}

impl ChannelPlayer {
    /// Player whose cues land on the returned receiver
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<PlayedCue>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Spawn a tokio task that drives `player` from the channel.
    ///
    /// Must be called from within a runtime. The task ends once every sender is gone.
    pub fn spawn<P: CuePlayer + 'static>(mut player: P) -> Self {
        let (this, mut rx) = Self::channel();
        tokio::spawn(async move {
            while let Some(played) = rx.recv().await {
                player.play(played.cue, played.volume);
            }
        });
        this
    }
}

impl CuePlayer for ChannelPlayer {
    fn play(&mut self, cue: SoundCue, volume: f32) {
        // Receiver gone means playback stopped; cues are best effort.
        let _ = self.tx.send(PlayedCue { cue, volume });
    }
}

/// Rings the terminal bell for the cues worth interrupting the player for.
///
/// A terminal has no volume control, so anything above zero rings.
#[derive(Debug, Default)]
pub struct BellPlayer;

impl BellPlayer {
    fn rings_for(cue: SoundCue) -> bool {
        matches!(
            cue,
            SoundCue::Eat | SoundCue::LineClear | SoundCue::LevelUp | SoundCue::GameOver
        )
    }
}

impl CuePlayer for BellPlayer {
    fn play(&mut self, cue: SoundCue, volume: f32) {
        if volume <= 0.0 || !Self::rings_for(cue) {
            return;
        }
        let mut out = std::io::stdout();
        if let Err(err) = out.write_all(b"\x07").and_then(|_| out.flush()) {
            log::debug!("bell for '{}' failed: {}", cue.as_str(), err);
        }
    }
}

/// Player preferences in front of a [`CuePlayer`].
#[derive(Debug)]
pub struct SoundBoard<P> {
    player: P,
    enabled: bool,
    volume: f32,
}

impl<P: CuePlayer> SoundBoard<P> {
    pub fn new(player: P, enabled: bool, volume: f32) -> Self {
        Self {
            player,
            enabled,
            volume: clamp_volume(volume),
        }
    }

    /// Restore preferences from `store`, defaulting to enabled at 0.4.
    ///
    /// A stored volume of zero also restores as 0.4.
    pub fn from_store(player: P, store: &dyn KeyValueStore) -> Self {
        let enabled = store.get_bool(SOUND_ENABLED_KEY).unwrap_or(true);
        let volume = store
            .get_f32(SOUND_VOLUME_KEY)
            .filter(|&v| v != 0.0)
            .unwrap_or(DEFAULT_VOLUME);
        Self::new(player, enabled, volume)
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    /// Change the volume, clamped to `0.0..=1.0`, and persist it.
    pub fn set_volume(&mut self, volume: f32, store: &mut dyn KeyValueStore) {
        self.volume = clamp_volume(volume);
        if let Err(err) = store.set_f32(SOUND_VOLUME_KEY, self.volume) {
            log::warn!("failed to persist sound volume: {:#}", err);
        }
    }

    /// Play a cue by name. Unknown names are logged and ignored.
    pub fn play_named(&mut self, name: &str) {
        match SoundCue::from_str(name) {
            Some(cue) => self.cue(cue),
            None => log::warn!("unknown sound cue '{}'", name),
        }
    }
}

impl<P: CuePlayer> CueSink for SoundBoard<P> {
    fn cue(&mut self, cue: SoundCue) {
        if self.enabled {
            self.player.play(cue, self.volume);
        }
    }

    fn toggle(&mut self, store: &mut dyn KeyValueStore) -> bool {
        self.enabled = !self.enabled;
        if let Err(err) = store.set_bool(SOUND_ENABLED_KEY, self.enabled) {
            log::warn!("failed to persist sound setting: {:#}", err);
        }
        if self.enabled {
            self.player.play(SoundCue::Move, self.volume);
        }
        log::info!("sound {}", if self.enabled { "on" } else { "off" });
        self.enabled
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn change_volume(&mut self, delta: f32, store: &mut dyn KeyValueStore) -> Option<f32> {
        self.set_volume(self.volume + delta, store);
        log::info!("sound volume {:.1}", self.volume);
        Some(self.volume)
    }
}

fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        DEFAULT_VOLUME
    } else {
        volume.clamp(0.0, 1.0)
    }
}
