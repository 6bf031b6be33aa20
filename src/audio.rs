//! Sound cues.
//!
//! Actual playback belongs to the frontend. The engine only decides *when* a cue plays and hands it to an injected [`AudioService`][service]. Playback is fire-and-forget: errors are logged and never affect the game.
//!
//! [service]: trait.AudioService.html "AudioService — plays sound cues for the game"

use core::time::Duration;
use std::sync::{
    atomic::{AtomicBool, AtomicU32, Ordering},
    Arc,
};
use crate::{AudioError, Scheduler, TaskHandle};

/// A sound the game asks the frontend to play.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// A mine went off.
    Explosion,
}

/// Plays sound cues for the game.
pub trait AudioService: Send + Sync {
    /// Plays `cue` at `volume`, between `0.0` and `1.0`.
    fn play(&self, cue: SoundCue, volume: f32) -> Result<(), AudioError>;
}
impl<A: AudioService + ?Sized> AudioService for Arc<A> {
    #[inline(always)]
    fn play(&self, cue: SoundCue, volume: f32) -> Result<(), AudioError> {
        (**self).play(cue, volume)
    }
}

/// Plays nothing.
#[derive(Copy, Clone, Debug, Default)]
pub struct SilentAudio;
impl AudioService for SilentAudio {
    #[inline(always)]
    fn play(&self, _cue: SoundCue, _volume: f32) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Adds a global volume and a mute switch in front of another service.
///
/// The volume is clamped to `[0, 1]` and multiplies the volume of every cue. Cues are swallowed entirely while muted or at zero volume. The switches can be flipped through a shared reference, so the mixer can sit behind the same `Arc` the game holds.
#[derive(Debug)]
pub struct Mixer<A> {
    inner: A,
    muted: AtomicBool,
    volume_bits: AtomicU32,
}
impl<A: AudioService> Mixer<A> {
    /// Wraps `inner` at full volume, unmuted.
    pub fn new(inner: A) -> Self {
        Self { inner, muted: AtomicBool::new(false), volume_bits: AtomicU32::new(1.0_f32.to_bits()) }
    }
    /// Silences every cue until `unmute` is called.
    pub fn mute(&self) {
        self.muted.store(true, Ordering::Relaxed);
    }
    /// Lets cues through again.
    pub fn unmute(&self) {
        self.muted.store(false, Ordering::Relaxed);
    }
    /// Returns `true` while muted.
    pub fn is_muted(&self) -> bool {
        self.muted.load(Ordering::Relaxed)
    }
    /// Sets the global volume, clamped to `[0, 1]`. `NaN` counts as silence.
    pub fn set_volume(&self, volume: f32) {
        let volume = if volume.is_nan() { 0.0 } else { volume.clamp(0.0, 1.0) };
        self.volume_bits.store(volume.to_bits(), Ordering::Relaxed);
    }
    /// Returns the global volume.
    pub fn volume(&self) -> f32 {
        f32::from_bits(self.volume_bits.load(Ordering::Relaxed))
    }
    /// Returns the wrapped service.
    pub const fn inner(&self) -> &A {
        &self.inner
    }
}
impl<A: AudioService> AudioService for Mixer<A> {
    fn play(&self, cue: SoundCue, volume: f32) -> Result<(), AudioError> {
        let volume = volume * self.volume();
        if self.is_muted() || volume <= 0.0 {
            return Ok(());
        }
        self.inner.play(cue, volume)
    }
}

/// Delays, counted from the explosion, of the echoes following it.
pub const EXPLOSION_ECHOES: [Duration; 3] = [
    Duration::from_millis(200),
    Duration::from_millis(350),
    Duration::from_millis(500),
];
/// The volume of each echo relative to the explosion.
const ECHO_VOLUME: f32 = 0.6;

fn play_logged(audio: &dyn AudioService, cue: SoundCue, volume: f32) {
    if let Err(err) = audio.play(cue, volume) {
        log::warn!("ignoring {:?} cue: {}", cue, err);
    }
}

/// Plays an explosion right away, then schedules its echoes.
///
/// Returns the handles of the echoes so that they can be cancelled if the game restarts or goes away before they play.
pub fn play_explosion(audio: &Arc<dyn AudioService>, scheduler: &dyn Scheduler) -> Vec<TaskHandle> {
    play_logged(audio.as_ref(), SoundCue::Explosion, 1.0);
    EXPLOSION_ECHOES.iter()
        .map(|&delay| {
            let audio = Arc::clone(audio);
            scheduler.once(delay, Box::new(move || {
                play_logged(audio.as_ref(), SoundCue::Explosion, ECHO_VOLUME);
            }))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use crate::testing::ManualScheduler;

    #[derive(Default)]
    struct Recorder {
        played: Mutex<Vec<(SoundCue, f32)>>,
        fail: bool,
    }
    impl AudioService for Recorder {
        fn play(&self, cue: SoundCue, volume: f32) -> Result<(), AudioError> {
            self.played.lock().unwrap().push((cue, volume));
            if self.fail {
                Err(AudioError::new("no device"))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn mixer_scales_and_mutes() {
        let mixer = Mixer::new(Recorder::default());
        mixer.set_volume(0.5);
        mixer.play(SoundCue::Explosion, 0.8).unwrap();
        mixer.mute();
        mixer.play(SoundCue::Explosion, 1.0).unwrap();
        mixer.unmute();
        mixer.set_volume(0.0);
        mixer.play(SoundCue::Explosion, 1.0).unwrap();
        assert_eq!(*mixer.inner().played.lock().unwrap(), vec![(SoundCue::Explosion, 0.4)]);
    }

    #[test]
    fn mixer_clamps_volume() {
        let mixer = Mixer::new(SilentAudio);
        mixer.set_volume(3.0);
        assert_eq!(mixer.volume(), 1.0);
        mixer.set_volume(-1.0);
        assert_eq!(mixer.volume(), 0.0);
        mixer.set_volume(f32::NAN);
        assert_eq!(mixer.volume(), 0.0);
        assert!(!mixer.is_muted());
    }

    #[test]
    fn explosion_plays_now_then_echoes() {
        let recorder = Arc::new(Recorder::default());
        let audio: Arc<dyn AudioService> = recorder.clone();
        let scheduler = ManualScheduler::new();
        let handles = play_explosion(&audio, &scheduler);
        assert_eq!(handles.len(), EXPLOSION_ECHOES.len());
        assert_eq!(recorder.played.lock().unwrap().len(), 1);
        scheduler.advance(Duration::from_secs(1));
        let played = recorder.played.lock().unwrap();
        assert_eq!(played.len(), 1 + EXPLOSION_ECHOES.len());
        assert!(played[1..].iter().all(|&(_, volume)| volume < 1.0));
    }

    #[test]
    fn failures_are_swallowed() {
        let recorder = Arc::new(Recorder { fail: true, ..Recorder::default() });
        let audio: Arc<dyn AudioService> = recorder.clone();
        let scheduler = ManualScheduler::new();
        let mut handles = play_explosion(&audio, &scheduler);
        handles.iter_mut().for_each(TaskHandle::cancel);
        scheduler.advance(Duration::from_secs(1));
        assert_eq!(recorder.played.lock().unwrap().len(), 1);
    }
}
