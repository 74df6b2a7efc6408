use crate::clock::CountdownState;
use crate::config::WindowConfig;

/// Which part of the countdown the scene is in, as far as effects are concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectWindow {
    Inactive,
    /// Under a minute to go and within the configured final seconds.
    FinalSeconds,
    Celebration,
}

impl EffectWindow {
    pub fn is_active(self) -> bool {
        self != EffectWindow::Inactive
    }

    /// Per-tick chance of launching a new firework.
    pub fn spawn_probability(self, cfg: &WindowConfig) -> f32 {
        match self {
            EffectWindow::Inactive => 0.0,
            EffectWindow::FinalSeconds => cfg.final_seconds_spawn_probability,
            EffectWindow::Celebration => cfg.celebration_spawn_probability,
        }
    }
}

/// Classify the countdown. Shared by the emitter and the audio sequencer.
pub fn effect_window(
    countdown: &CountdownState,
    celebrating: bool,
    cfg: &WindowConfig,
) -> EffectWindow {
    if celebrating || countdown.reached_target {
        return EffectWindow::Celebration;
    }
    let r = &countdown.remaining;
    // sub-second remainders show as 0s before the target latches; still final seconds
    if r.days == 0 && r.hours == 0 && r.minutes == 0 && r.seconds <= cfg.final_seconds {
        EffectWindow::FinalSeconds
    } else {
        EffectWindow::Inactive
    }
}

#[inline]
pub fn is_effect_window_active(
    countdown: &CountdownState,
    celebrating: bool,
    cfg: &WindowConfig,
) -> bool {
    effect_window(countdown, celebrating, cfg).is_active()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::TimeRemaining;

    fn at(seconds: u32) -> CountdownState {
        CountdownState::counting(TimeRemaining::new(0, 0, 0, seconds))
    }

    #[test]
    fn final_seconds_boundaries() {
        let cfg = WindowConfig::default();
        assert_eq!(effect_window(&at(11), false, &cfg), EffectWindow::Inactive);
        assert_eq!(effect_window(&at(10), false, &cfg), EffectWindow::FinalSeconds);
        assert_eq!(effect_window(&at(1), false, &cfg), EffectWindow::FinalSeconds);
        assert_eq!(effect_window(&at(0), false, &cfg), EffectWindow::FinalSeconds);
    }

    #[test]
    fn minutes_left_is_inactive_even_with_low_seconds() {
        let cfg = WindowConfig::default();
        let s = CountdownState::counting(TimeRemaining::new(0, 0, 1, 5));
        assert!(!is_effect_window_active(&s, false, &cfg));
    }

    #[test]
    fn reached_or_flag_means_celebration() {
        let cfg = WindowConfig::default();
        assert_eq!(
            effect_window(&CountdownState::REACHED, false, &cfg),
            EffectWindow::Celebration
        );
        let far = CountdownState::counting(TimeRemaining::new(3, 0, 0, 0));
        assert_eq!(effect_window(&far, true, &cfg), EffectWindow::Celebration);
    }

    #[test]
    fn celebration_spawns_more_often() {
        let cfg = WindowConfig::default();
        assert_eq!(EffectWindow::Inactive.spawn_probability(&cfg), 0.0);
        assert!(
            EffectWindow::Celebration.spawn_probability(&cfg)
                > EffectWindow::FinalSeconds.spawn_probability(&cfg)
        );
    }
}
