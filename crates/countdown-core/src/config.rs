//! Init-time configuration. Nothing here is edited once the scene is running.

use crate::clock::TimeRemaining;
use crate::constants::*;
use crate::error::ConfigError;
use crate::sequencer::{CueAssets, CueSpec};

/// Policy for when fireworks may spawn and how often.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowConfig {
    /// Fireworks start once this many seconds (or fewer) remain.
    pub final_seconds: u32,
    pub final_seconds_spawn_probability: f32,
    pub celebration_spawn_probability: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            final_seconds: FINAL_SECONDS_WINDOW,
            final_seconds_spawn_probability: FINAL_SECONDS_SPAWN_PROBABILITY,
            celebration_spawn_probability: CELEBRATION_SPAWN_PROBABILITY,
        }
    }
}

/// Box above the floor plane that rockets launch from, plus their launch speed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaunchRegion {
    pub floor_y: f32,
    pub half_width: f32,
    pub depth_min: f32,
    pub depth_max: f32,
    pub speed_min: f32,
    pub speed_max: f32,
    pub drift: f32,
}

impl Default for LaunchRegion {
    fn default() -> Self {
        Self {
            floor_y: LAUNCH_FLOOR_Y,
            half_width: LAUNCH_HALF_WIDTH,
            depth_min: LAUNCH_DEPTH_MIN,
            depth_max: LAUNCH_DEPTH_MAX,
            speed_min: LAUNCH_SPEED_MIN,
            speed_max: LAUNCH_SPEED_MAX,
            drift: LAUNCH_DRIFT,
        }
    }
}

/// Pool size and per-tick physics for the fireworks emitter.
#[derive(Clone, Debug, PartialEq)]
pub struct EmitterConfig {
    pub pool_capacity: usize,
    pub launch: LaunchRegion,
    pub ascent_age_min: u32,
    pub ascent_age_max: u32,
    pub gravity: f32,
    pub burst_min: usize,
    pub burst_max: usize,
    pub explosion_force: f32,
    pub friction: f32,
    pub burst_gravity: f32,
    pub fade_ticks: u32,
    pub rocket_size: f32,
    pub spark_size: f32,
    pub palette: Vec<[f32; 3]>,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            pool_capacity: POOL_CAPACITY,
            launch: LaunchRegion::default(),
            ascent_age_min: ASCENT_AGE_MIN,
            ascent_age_max: ASCENT_AGE_MAX,
            gravity: GRAVITY,
            burst_min: BURST_MIN,
            burst_max: BURST_MAX,
            explosion_force: EXPLOSION_FORCE,
            friction: FRICTION,
            burst_gravity: BURST_GRAVITY,
            fade_ticks: FADE_TICKS,
            rocket_size: ROCKET_SIZE,
            spark_size: SPARK_SIZE,
            palette: FIREWORK_PALETTE.to_vec(),
        }
    }
}

/// Threshold instant and cue assets for the audio sequencer.
#[derive(Clone, Debug, PartialEq)]
pub struct SequencerConfig {
    pub threshold: TimeRemaining,
    pub cues: CueAssets,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        let (d, h, m, s) = THRESHOLD_REMAINING;
        Self {
            threshold: TimeRemaining::new(d, h, m, s),
            cues: CueAssets {
                ambient: CueSpec::new(AMBIENT_CUE_PATH, AMBIENT_CUE_VOLUME, true),
                threshold: CueSpec::new(THRESHOLD_CUE_PATH, THRESHOLD_CUE_VOLUME, false),
                completion: CueSpec::new(COMPLETION_CUE_PATH, COMPLETION_CUE_VOLUME, false),
            },
        }
    }
}

/// Everything the scene needs at startup.
#[derive(Clone, Debug, PartialEq)]
pub struct CountdownConfig {
    /// Target instant, milliseconds since the Unix epoch.
    pub target_ms: i64,
    pub window: WindowConfig,
    pub emitter: EmitterConfig,
    pub sequencer: SequencerConfig,
    pub ember_count: usize,
}

impl CountdownConfig {
    pub fn new(target_ms: i64) -> Self {
        Self {
            target_ms,
            window: WindowConfig::default(),
            emitter: EmitterConfig::default(),
            sequencer: SequencerConfig::default(),
            ember_count: EMBER_COUNT,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.window;
        check_probability("final_seconds_spawn_probability", w.final_seconds_spawn_probability)?;
        check_probability("celebration_spawn_probability", w.celebration_spawn_probability)?;
        if w.celebration_spawn_probability < w.final_seconds_spawn_probability {
            return Err(ConfigError::ProbabilityOrder);
        }

        let e = &self.emitter;
        if e.pool_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if e.ascent_age_min > e.ascent_age_max {
            return Err(ConfigError::EmptyRange { name: "ascent age" });
        }
        if e.burst_min > e.burst_max {
            return Err(ConfigError::EmptyRange { name: "burst size" });
        }
        // float ranges are written `!(a <= b)` so a NaN bound is rejected too
        let l = &e.launch;
        if !(l.speed_min <= l.speed_max) {
            return Err(ConfigError::EmptyRange { name: "launch speed" });
        }
        if !(l.depth_min <= l.depth_max) {
            return Err(ConfigError::EmptyRange { name: "launch depth" });
        }
        // both are sampled symmetrically as -x..=x
        if !(l.half_width >= 0.0) {
            return Err(ConfigError::EmptyRange { name: "launch width" });
        }
        if !(l.drift >= 0.0) {
            return Err(ConfigError::EmptyRange { name: "launch drift" });
        }
        if e.palette.is_empty() {
            return Err(ConfigError::EmptyRange { name: "palette" });
        }
        if !(e.friction > 0.0 && e.friction <= 1.0) {
            return Err(ConfigError::Friction(e.friction));
        }
        if e.fade_ticks == 0 {
            return Err(ConfigError::ZeroFade);
        }
        Ok(())
    }
}

fn check_probability(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ProbabilityOutOfRange { name, value })
    }
}
