//! Fireworks simulation, advanced once per rendered frame.
//!
//! A firework rises as a single rocket (drawn outside the pool), then bursts
//! into a block of pool slots that drift, slow down, sag and fade to black.
//! All constants are per tick; there is no catch-up when frames are missed.

use crate::clock::CountdownState;
use crate::config::{EmitterConfig, WindowConfig};
use crate::error::ConfigError;
use crate::pool::{ParticlePool, ParticleVertex, SlotRange};
use crate::window::effect_window;
use glam::Vec3;
use rand::prelude::*;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EffectId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Ascending,
    Exploded,
}

/// One firework.
#[derive(Clone, Debug)]
pub struct Effect {
    id: EffectId,
    phase: Phase,
    position: Vec3,
    velocity: Vec3,
    age: u32,
    age_limit: u32,
    color: [f32; 3],
    slots: Option<SlotRange>,
}

impl Effect {
    pub fn id(&self) -> EffectId {
        self.id
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn position(&self) -> Vec3 {
        self.position
    }
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }
    pub fn age(&self) -> u32 {
        self.age
    }
    pub fn age_limit(&self) -> u32 {
        self.age_limit
    }
    pub fn color(&self) -> [f32; 3] {
        self.color
    }
    pub fn slots(&self) -> Option<SlotRange> {
        self.slots
    }
}

/// What happened during one [`Emitter::tick`].
#[derive(Clone, Debug, Default)]
pub struct TickReport {
    pub spawned: Option<EffectId>,
    pub exploded: SmallVec<[EffectId; 4]>,
    pub retired: SmallVec<[EffectId; 4]>,
}

enum Step {
    Keep,
    Explode,
    Retire,
}

pub struct Emitter {
    window: WindowConfig,
    cfg: EmitterConfig,
    pool: ParticlePool,
    effects: Vec<Effect>,
    next_id: u32,
    rng: StdRng,
}

impl Emitter {
    /// The pool is sized from `cfg.pool_capacity`.
    pub fn new(window: WindowConfig, cfg: EmitterConfig, seed: u64) -> Result<Self, ConfigError> {
        let pool = ParticlePool::new(cfg.pool_capacity)?;
        Ok(Self {
            window,
            cfg,
            pool,
            effects: Vec::new(),
            next_id: 0,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn from_entropy(window: WindowConfig, cfg: EmitterConfig) -> Result<Self, ConfigError> {
        let seed = rand::thread_rng().gen();
        Self::new(window, cfg, seed)
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut ParticlePool {
        &mut self.pool
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    pub fn active_count(&self) -> usize {
        self.effects.len()
    }

    /// Launch a rocket with explicit parameters.
    pub fn launch(&mut self, position: Vec3, velocity: Vec3, age_limit: u32) -> EffectId {
        let id = EffectId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let color = *self
            .cfg
            .palette
            .choose(&mut self.rng)
            .unwrap_or(&[1.0, 1.0, 1.0]);
        self.effects.push(Effect {
            id,
            phase: Phase::Ascending,
            position,
            velocity,
            age: 0,
            age_limit,
            color,
            slots: None,
        });
        id
    }

    fn spawn_random(&mut self) -> EffectId {
        let l = self.cfg.launch;
        let position = Vec3::new(
            self.rng.gen_range(-l.half_width..=l.half_width),
            l.floor_y,
            self.rng.gen_range(l.depth_min..=l.depth_max),
        );
        let velocity = Vec3::new(
            self.rng.gen_range(-l.drift..=l.drift),
            self.rng.gen_range(l.speed_min..=l.speed_max),
            self.rng.gen_range(-l.drift..=l.drift),
        );
        let age_limit = self
            .rng
            .gen_range(self.cfg.ascent_age_min..=self.cfg.ascent_age_max);
        self.launch(position, velocity, age_limit)
    }

    /// Advance every live firework by one frame, possibly spawning a new one.
    pub fn tick(&mut self, countdown: &CountdownState, celebrating: bool) -> TickReport {
        let mut report = TickReport::default();

        let window = effect_window(countdown, celebrating, &self.window);
        if window.is_active() && self.rng.gen::<f32>() < window.spawn_probability(&self.window) {
            report.spawned = Some(self.spawn_random());
        }

        let mut effects = std::mem::take(&mut self.effects);
        effects.retain_mut(|effect| {
            effect.age += 1;
            match self.step(effect) {
                Step::Keep => true,
                Step::Explode => {
                    self.explode(effect);
                    report.exploded.push(effect.id);
                    true
                }
                Step::Retire => {
                    if let Some(range) = effect.slots {
                        self.pool.retire_owned(range, effect.id);
                    }
                    report.retired.push(effect.id);
                    false
                }
            }
        });
        self.effects = effects;

        if !report.exploded.is_empty() || !report.retired.is_empty() {
            log::debug!(
                "[emitter] exploded={:?} retired={:?} live={}",
                report.exploded,
                report.retired,
                self.effects.len()
            );
        }
        report
    }

    fn step(&mut self, effect: &mut Effect) -> Step {
        match effect.phase {
            Phase::Ascending => {
                effect.position += effect.velocity;
                effect.velocity.y += self.cfg.gravity;
                if effect.age >= effect.age_limit || effect.velocity.y < 0.0 {
                    Step::Explode
                } else {
                    Step::Keep
                }
            }
            Phase::Exploded => {
                if effect.age >= effect.age_limit {
                    return Step::Retire;
                }
                let fade = (1.0 - effect.age as f32 / effect.age_limit as f32).max(0.0);
                let rgb = effect.color.map(|c| c * fade);
                if let Some(range) = effect.slots {
                    for i in range.indices() {
                        if self.pool.owner(i) != Some(effect.id) {
                            continue;
                        }
                        let mut v = self.pool.velocity(i);
                        let p = self.pool.position(i) + v;
                        v *= self.cfg.friction;
                        v.y += self.cfg.burst_gravity;
                        self.pool.write(i, p, v, rgb, self.cfg.spark_size);
                    }
                }
                Step::Keep
            }
        }
    }

    fn explode(&mut self, effect: &mut Effect) {
        let count = self.rng.gen_range(self.cfg.burst_min..=self.cfg.burst_max);
        let range = self.pool.allocate(count);
        self.pool.claim(range, effect.id);
        for i in range.indices() {
            let theta = self.rng.gen::<f32>() * std::f32::consts::TAU;
            let phi = (self.rng.gen::<f32>() * 2.0 - 1.0).acos();
            let dir = Vec3::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos());
            let speed = self.cfg.explosion_force * self.rng.gen_range(0.3..=1.0);
            self.pool
                .write(i, effect.position, dir * speed, effect.color, self.cfg.spark_size);
        }
        effect.phase = Phase::Exploded;
        effect.slots = Some(range);
        effect.velocity = Vec3::ZERO;
        effect.age = 0;
        effect.age_limit = self.cfg.fade_ticks;
    }

    /// Rising rockets as drawable points.
    pub fn rockets(&self) -> impl Iterator<Item = ParticleVertex> + '_ {
        let size = self.cfg.rocket_size;
        self.effects
            .iter()
            .filter(|e| e.phase == Phase::Ascending)
            .map(move |e| ParticleVertex::new(e.position, size, e.color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::TimeRemaining;

    fn emitter_with(cfg: EmitterConfig) -> Emitter {
        Emitter::new(WindowConfig::default(), cfg, 7).unwrap()
    }

    fn far_away() -> CountdownState {
        CountdownState::counting(TimeRemaining::new(1, 0, 0, 0))
    }

    #[test]
    fn no_spawn_outside_window() {
        let mut e = emitter_with(EmitterConfig::default());
        for _ in 0..500 {
            assert!(e.tick(&far_away(), false).spawned.is_none());
        }
        assert_eq!(e.active_count(), 0);
    }

    #[test]
    fn celebration_spawns_eventually() {
        let mut e = emitter_with(EmitterConfig::default());
        let spawned = (0..500)
            .filter_map(|_| e.tick(&CountdownState::REACHED, false).spawned)
            .count();
        assert!(spawned > 0);
    }

    #[test]
    fn apex_triggers_explosion_before_age_limit() {
        let mut e = emitter_with(EmitterConfig {
            gravity: -0.1,
            ..EmitterConfig::default()
        });
        e.launch(Vec3::ZERO, Vec3::new(0.0, 0.15, 0.0), 1_000);
        // vy: 0.15 -> 0.05 -> -0.05 on the second tick
        assert!(e.tick(&far_away(), false).exploded.is_empty());
        assert_eq!(e.tick(&far_away(), false).exploded.len(), 1);
        assert_eq!(e.effects()[0].phase(), Phase::Exploded);
    }

    #[test]
    fn exploded_effect_fades_and_retires() {
        let mut e = emitter_with(EmitterConfig {
            fade_ticks: 5,
            burst_min: 10,
            burst_max: 10,
            ..EmitterConfig::default()
        });
        let id = e.launch(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0), 1);
        assert_eq!(e.tick(&far_away(), false).exploded.as_slice(), &[id]);
        let range = e.effects()[0].slots().unwrap();
        assert_eq!(range.len(), 10);

        for _ in 0..4 {
            assert!(e.tick(&far_away(), false).retired.is_empty());
        }
        let first = range.indices().next().unwrap();
        assert!(e.pool().vertices()[first].color[0] < 1.0);

        assert_eq!(e.tick(&far_away(), false).retired.as_slice(), &[id]);
        assert_eq!(e.active_count(), 0);
        for i in range.indices() {
            assert_eq!(e.pool().vertices()[i], ParticleVertex::RETIRED);
        }
    }

    #[test]
    fn pool_is_sized_from_config() {
        let e = emitter_with(EmitterConfig {
            pool_capacity: 17,
            ..EmitterConfig::default()
        });
        assert_eq!(e.pool().capacity(), 17);
        let zero = Emitter::new(
            WindowConfig::default(),
            EmitterConfig {
                pool_capacity: 0,
                ..EmitterConfig::default()
            },
            7,
        );
        assert!(matches!(zero, Err(ConfigError::ZeroCapacity)));
    }

    #[test]
    fn rockets_only_lists_ascending() {
        let mut e = emitter_with(EmitterConfig::default());
        e.launch(Vec3::ZERO, Vec3::Y, 1);
        e.launch(Vec3::X, Vec3::Y, 100);
        e.tick(&far_away(), false);
        assert_eq!(e.rockets().count(), 1);
    }
}
