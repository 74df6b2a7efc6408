//! Slow handheld sway applied to the scene camera.

use crate::constants::{SHAKE_FREQUENCY, SHAKE_MAX_PITCH, SHAKE_MAX_ROLL, SHAKE_MAX_YAW};
use glam::{EulerRot, Quat};
use std::f32::consts::TAU;

// Second partial runs at an irrational ratio so the sway never visibly repeats.
const GOLDEN: f32 = 1.618_034;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraShake {
    pub max_yaw: f32,
    pub max_pitch: f32,
    pub max_roll: f32,
    pub frequency: f32,
    /// 0 disables the shake, 1 allows the full angles.
    pub intensity: f32,
}

impl Default for CameraShake {
    fn default() -> Self {
        Self {
            max_yaw: SHAKE_MAX_YAW,
            max_pitch: SHAKE_MAX_PITCH,
            max_roll: SHAKE_MAX_ROLL,
            frequency: SHAKE_FREQUENCY,
            intensity: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ShakeAngles {
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl CameraShake {
    pub fn angles(&self, elapsed_sec: f32) -> ShakeAngles {
        let k = self.intensity.clamp(0.0, 1.0);
        let w = TAU * self.frequency;
        ShakeAngles {
            yaw: self.max_yaw * k * sway(w, elapsed_sec, 0.0),
            pitch: self.max_pitch * k * sway(w, elapsed_sec, 1.7),
            roll: self.max_roll * k * sway(w, elapsed_sec, 3.1),
        }
    }

    /// Camera-space rotation for `elapsed_sec`. The view matrix is
    /// pre-multiplied by its inverse.
    pub fn rotation(&self, elapsed_sec: f32) -> Quat {
        let a = self.angles(elapsed_sec);
        Quat::from_euler(EulerRot::YXZ, a.yaw, a.pitch, a.roll)
    }
}

// Smooth value in [-1, 1].
#[inline]
fn sway(w: f32, t: f32, phase: f32) -> f32 {
    0.5 * ((w * t + phase).sin() + (w * GOLDEN * t + 2.0 * phase).sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angles_stay_within_limits() {
        let shake = CameraShake::default();
        for i in 0..5_000 {
            let a = shake.angles(i as f32 * 0.37);
            assert!(a.yaw.abs() <= shake.max_yaw + 1e-6);
            assert!(a.pitch.abs() <= shake.max_pitch + 1e-6);
            assert!(a.roll.abs() <= shake.max_roll + 1e-6);
        }
    }

    #[test]
    fn sway_is_slow_and_continuous() {
        let shake = CameraShake::default();
        // one 60 Hz frame moves the camera a tiny fraction of the range
        let step = 1.0 / 60.0;
        for i in 0..600 {
            let t = i as f32 * step;
            let (a, b) = (shake.angles(t), shake.angles(t + step));
            assert!((a.yaw - b.yaw).abs() < shake.max_yaw * 0.02);
        }
        assert_ne!(shake.angles(0.0), shake.angles(2.5));
    }

    #[test]
    fn zero_intensity_is_identity() {
        let shake = CameraShake {
            intensity: 0.0,
            ..CameraShake::default()
        };
        assert_eq!(shake.angles(12.3), ShakeAngles::default());
        assert!(shake.rotation(12.3).abs_diff_eq(Quat::IDENTITY, 1e-6));
    }
}
