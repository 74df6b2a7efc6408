//! Audio cue sequencing driven by countdown ticks.
//!
//! The sequencer owns every cue through a single [`CuePlayer`] adapter and
//! keeps at most one of them playing. States advance from countdown ticks and
//! end-of-media notifications; mute is orthogonal and never changes state.
//!
//! ```text
//! Ambient --(remaining == threshold)--> ThresholdCue --(threshold cue ended)--> Celebration
//!    \                                        |
//!     `------(target reached)-----------> Celebration  (only if the threshold cue is not playing)
//! ```

use crate::clock::CountdownState;
use crate::config::{SequencerConfig, WindowConfig};
use crate::window::{effect_window, EffectWindow};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    AmbientLoop,
    Threshold,
    Completion,
}

impl Cue {
    pub const ALL: [Cue; 3] = [Cue::AmbientLoop, Cue::Threshold, Cue::Completion];
}

/// One playable asset.
#[derive(Clone, Debug, PartialEq)]
pub struct CueSpec {
    pub path: String,
    pub volume: f32,
    pub looped: bool,
}

impl CueSpec {
    pub fn new(path: impl Into<String>, volume: f32, looped: bool) -> Self {
        Self {
            path: path.into(),
            volume,
            looped,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CueAssets {
    pub ambient: CueSpec,
    pub threshold: CueSpec,
    pub completion: CueSpec,
}

impl CueAssets {
    pub fn get(&self, cue: Cue) -> &CueSpec {
        match cue {
            Cue::AmbientLoop => &self.ambient,
            Cue::Threshold => &self.threshold,
            Cue::Completion => &self.completion,
        }
    }
}

/// Playback engine seam.
///
/// `play` is fire-and-forget: an engine that later rejects the start reports it
/// back through [`AudioSequencer::on_play_rejected`], and natural completion
/// through [`AudioSequencer::on_cue_ended`].
pub trait CuePlayer {
    fn load(&mut self, cue: Cue, spec: &CueSpec);
    fn play(&mut self, cue: Cue);
    fn pause(&mut self, cue: Cue);
    fn set_muted(&mut self, cue: Cue, muted: bool);
    /// Called once after the first user interaction.
    fn unlock(&mut self) {}
    /// Free the underlying engine. No other call follows.
    fn release(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequencerState {
    Ambient,
    ThresholdCue,
    Celebration,
}

pub struct AudioSequencer<P: CuePlayer> {
    player: P,
    window: WindowConfig,
    cfg: SequencerConfig,
    state: SequencerState,
    muted: bool,
    unlocked: bool,
    running: bool,
    playing: Option<Cue>,
    threshold_fired: bool,
    completion_done: bool,
    suspended: bool,
}

impl<P: CuePlayer> AudioSequencer<P> {
    /// Starts in `Ambient`, muted and locked: nothing is audible until both an
    /// unmute and [`unlock`](Self::unlock) have happened.
    pub fn new(player: P, window: WindowConfig, cfg: SequencerConfig) -> Self {
        Self {
            player,
            window,
            cfg,
            state: SequencerState::Ambient,
            muted: true,
            unlocked: false,
            running: false,
            playing: None,
            threshold_fired: false,
            completion_done: false,
            suspended: false,
        }
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// The cue most recently started and not yet paused, ended or rejected.
    pub fn playing(&self) -> Option<Cue> {
        self.playing
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut P {
        &mut self.player
    }

    pub fn start(&mut self) {
        if self.running {
            return;
        }
        for cue in Cue::ALL {
            self.player.load(cue, self.cfg.cues.get(cue));
            self.player.set_muted(cue, self.muted);
        }
        self.running = true;
        log::info!("[audio] sequencer started state={:?} muted={}", self.state, self.muted);
        self.sync();
    }

    /// Pause everything and release the engine. Safe to call more than once.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        for cue in Cue::ALL {
            self.player.pause(cue);
        }
        self.player.release();
        self.running = false;
        self.playing = None;
        log::info!("[audio] sequencer stopped");
    }

    /// Silence the current cue while keeping state, cues and unlock intact.
    /// Used when the page is frozen into the back/forward cache.
    pub fn suspend(&mut self) {
        if self.suspended {
            return;
        }
        self.suspended = true;
        if let Some(cue) = self.playing.take() {
            self.player.pause(cue);
        }
        log::info!("[audio] suspended state={:?}", self.state);
    }

    /// Undo [`suspend`](Self::suspend) and start whatever the state calls for.
    pub fn resume(&mut self) {
        if !self.suspended {
            return;
        }
        self.suspended = false;
        log::info!("[audio] resumed state={:?}", self.state);
        self.sync();
    }

    pub fn unlock(&mut self) {
        if self.unlocked {
            return;
        }
        self.unlocked = true;
        self.player.unlock();
        self.sync();
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        for cue in Cue::ALL {
            self.player.set_muted(cue, muted);
        }
        log::info!("[audio] muted={}", muted);
        if !muted {
            self.sync();
        }
    }

    /// Flip mute and return the new value.
    pub fn toggle_mute(&mut self) -> bool {
        self.set_muted(!self.muted);
        self.muted
    }

    pub fn on_countdown(&mut self, countdown: &CountdownState) {
        let celebrating = effect_window(countdown, false, &self.window) == EffectWindow::Celebration;
        match self.state {
            SequencerState::Ambient if celebrating => self.enter(SequencerState::Celebration),
            SequencerState::Ambient => {
                if !self.threshold_fired && countdown.remaining == self.cfg.threshold {
                    self.threshold_fired = true;
                    self.enter(SequencerState::ThresholdCue);
                }
            }
            // a threshold cue already under way is allowed to finish and chain
            SequencerState::ThresholdCue if celebrating && self.playing != Some(Cue::Threshold) => {
                self.enter(SequencerState::Celebration)
            }
            SequencerState::ThresholdCue | SequencerState::Celebration => {}
        }
    }

    /// End-of-media notification from the engine.
    pub fn on_cue_ended(&mut self, cue: Cue) {
        if self.playing == Some(cue) {
            self.playing = None;
        }
        match (self.state, cue) {
            (SequencerState::ThresholdCue, Cue::Threshold) => {
                self.enter(SequencerState::Celebration)
            }
            (SequencerState::Celebration, Cue::Completion) => {
                self.completion_done = true;
                self.sync();
            }
            _ => {}
        }
    }

    /// The engine refused to start `cue`; behave as if it was never asked.
    pub fn on_play_rejected(&mut self, cue: Cue) {
        if self.playing == Some(cue) {
            log::warn!("[audio] {:?} start was rejected", cue);
            self.playing = None;
        }
    }

    fn enter(&mut self, next: SequencerState) {
        log::info!("[audio] {:?} -> {:?}", self.state, next);
        self.state = next;
        self.sync();
    }

    fn desired_cue(&self) -> Cue {
        match self.state {
            SequencerState::Ambient => Cue::AmbientLoop,
            SequencerState::ThresholdCue => Cue::Threshold,
            SequencerState::Celebration if self.completion_done => Cue::AmbientLoop,
            SequencerState::Celebration => Cue::Completion,
        }
    }

    fn can_play(&self) -> bool {
        self.running && self.unlocked && !self.muted && !self.suspended
    }

    // Pause whatever no longer matches the state, then start the wanted cue if allowed.
    fn sync(&mut self) {
        let want = self.desired_cue();
        if let Some(current) = self.playing {
            if current != want {
                self.player.pause(current);
                self.playing = None;
            }
        }
        if self.playing.is_none() && self.can_play() {
            self.player.play(want);
            self.playing = Some(want);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::TimeRemaining;

    #[derive(Default)]
    struct Counting {
        plays: usize,
        pauses: usize,
        released: bool,
    }

    impl CuePlayer for Counting {
        fn load(&mut self, _cue: Cue, _spec: &CueSpec) {}
        fn play(&mut self, _cue: Cue) {
            self.plays += 1;
        }
        fn pause(&mut self, _cue: Cue) {
            self.pauses += 1;
        }
        fn set_muted(&mut self, _cue: Cue, _muted: bool) {}
        fn release(&mut self) {
            self.released = true;
        }
    }

    fn sequencer() -> AudioSequencer<Counting> {
        AudioSequencer::new(
            Counting::default(),
            WindowConfig::default(),
            SequencerConfig::default(),
        )
    }

    #[test]
    fn silent_until_unmuted_and_unlocked() {
        let mut s = sequencer();
        s.start();
        assert_eq!(s.player().plays, 0);
        s.set_muted(false);
        assert_eq!(s.player().plays, 0);
        s.unlock();
        assert_eq!(s.player().plays, 1);
        assert_eq!(s.playing(), Some(Cue::AmbientLoop));
    }

    #[test]
    fn reload_after_target_goes_straight_to_celebration() {
        let mut s = sequencer();
        s.start();
        s.on_countdown(&CountdownState::REACHED);
        assert_eq!(s.state(), SequencerState::Celebration);
    }

    #[test]
    fn threshold_match_is_exact() {
        let mut s = sequencer();
        s.start();
        s.on_countdown(&CountdownState::counting(TimeRemaining::new(0, 0, 0, 59)));
        assert_eq!(s.state(), SequencerState::Ambient);
    }

    #[test]
    fn stop_is_idempotent() {
        let mut s = sequencer();
        s.start();
        s.stop();
        s.stop();
        assert!(s.player().released);
        assert_eq!(s.player().pauses, 3);
        assert!(!s.is_running());
    }
}
