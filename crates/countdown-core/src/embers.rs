//! Slowly rising embers that fill the scene at all times, plus the 1 Hz
//! heartbeat used to pulse scene brightness.

use crate::constants::{EMBER_BAND, EMBER_COLOR, EMBER_SIZE};
use crate::pool::ParticleVertex;
use glam::Vec3;
use rand::prelude::*;

struct Ember {
    base: Vec3,
    speed: f32,
    offset: f32,
}

/// Ember positions are a closed-form function of elapsed time, so a skipped
/// frame never desynchronises them.
pub struct EmberField {
    embers: Vec<Ember>,
    vertices: Vec<ParticleVertex>,
}

impl EmberField {
    pub fn new(count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let embers = (0..count)
            .map(|_| Ember {
                base: Vec3::new(
                    (rng.gen::<f32>() - 0.5) * 35.0,
                    (rng.gen::<f32>() - 0.5) * 25.0 - 10.0, // start low
                    (rng.gen::<f32>() - 0.5) * 20.0 - 2.0,
                ),
                speed: 0.2 + rng.gen::<f32>() * 0.5,
                offset: rng.gen::<f32>() * 100.0,
            })
            .collect::<Vec<_>>();
        let vertices = vec![ParticleVertex::RETIRED; count];
        let mut field = Self { embers, vertices };
        field.update(0.0);
        field
    }

    pub fn len(&self) -> usize {
        self.embers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.embers.is_empty()
    }

    pub fn update(&mut self, elapsed_sec: f32) {
        let t = elapsed_sec;
        let half = EMBER_BAND * 0.5;
        for (e, v) in self.embers.iter().zip(self.vertices.iter_mut()) {
            let y = (e.base.y + e.speed * t).rem_euclid(EMBER_BAND) - half;
            let x = e.base.x + (t * e.speed + e.offset).sin() * 0.5;
            let z = e.base.z + (t * e.speed * 0.8 + e.offset).cos() * 0.5;
            let flicker = 0.8 + (t * 5.0 + e.offset).sin() * 0.2;
            *v = ParticleVertex {
                position: [x, y, z],
                size: EMBER_SIZE * flicker,
                color: EMBER_COLOR,
            };
        }
    }

    pub fn vertices(&self) -> &[ParticleVertex] {
        &self.vertices
    }
}

/// Scene brightness: a base level with a beat once per second.
#[inline]
pub fn heartbeat(elapsed_sec: f32) -> f32 {
    let pulse = (elapsed_sec * std::f32::consts::TAU).sin();
    0.5 + pulse.max(0.0) * 0.2
}
