// Host-side tests for the scene framing constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use countdown_core::constants::{
    ASCENT_AGE_MIN, GRAVITY, LAUNCH_FLOOR_Y, LAUNCH_SPEED_MAX, LAUNCH_SPEED_MIN, RETIRED_POSITION,
};

// Half the visible height at the z = 0 plane.
fn visible_half_height() -> f32 {
    CAMERA_EYE.z * (CAMERA_FOVY_DEG.to_radians() * 0.5).tan()
}

fn rise_after(speed: f32, ticks: u32) -> f32 {
    let t = ticks as f32;
    speed * t + 0.5 * GRAVITY * t * t
}

// Height gained before vertical velocity turns negative.
fn apex_rise(speed: f32) -> f32 {
    speed * speed / (2.0 * -GRAVITY)
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_constants_are_within_reasonable_bounds() {
    assert!(CAMERA_FOVY_DEG > 0.0 && CAMERA_FOVY_DEG < 180.0);
    assert!(CAMERA_ZNEAR > 0.0);
    assert!(CAMERA_ZFAR > CAMERA_EYE.z);
    assert!(POINT_SCALE > 0.0);
    assert!(HEARTBEAT_GAIN > 0.0);
    assert!(MAX_ROCKETS > 0);
    assert!(CLOCK_TICK_MS > 0);
}

// Same curve as the vignette in shaders/post.wgsl.
fn vignette(dist_from_centre: f32) -> f32 {
    let d = dist_from_centre * (VIGNETTE_DARKNESS + VIGNETTE_OFFSET);
    let (e0, e1) = (0.8, VIGNETTE_OFFSET * 0.799);
    let t = ((d - e0) / (e1 - e0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn post_chain_constants_are_within_reasonable_bounds() {
    assert!(BLOOM_THRESHOLD > 0.0 && BLOOM_THRESHOLD < 1.0);
    assert!(BLOOM_SMOOTHING >= 0.0);
    assert!(BLOOM_INTENSITY > 0.0);
    assert!(BLOOM_SPREAD > 0.0);
    assert!((0.0..=1.0).contains(&NOISE_OPACITY));
}

#[test]
fn vignette_keeps_the_centre_and_darkens_the_corners() {
    assert_eq!(vignette(0.0), 1.0);
    // bursts near the middle are barely touched
    assert!(vignette(0.1) > 0.95);
    let corner = vignette(0.5f32.hypot(0.5));
    assert!(corner < 0.5, "corner factor {corner}");
    let mut last = 1.0;
    for i in 0..=70 {
        let v = vignette(i as f32 * 0.01);
        assert!(v <= last + 1e-6);
        last = v;
    }
}

#[test]
fn rockets_launch_from_below_the_frame() {
    assert!(LAUNCH_FLOOR_Y < -visible_half_height());
}

#[test]
fn every_rocket_peaks_on_screen() {
    let half = visible_half_height();
    // the earliest burst is a slow rocket hitting its minimum age limit
    let low = LAUNCH_FLOOR_Y
        + rise_after(LAUNCH_SPEED_MIN, ASCENT_AGE_MIN).min(apex_rise(LAUNCH_SPEED_MIN));
    let high = LAUNCH_FLOOR_Y + apex_rise(LAUNCH_SPEED_MAX);
    assert!(low > -half, "lowest burst {low} below frame edge {}", -half);
    assert!(high < half, "highest burst {high} above frame edge {half}");
}

#[test]
fn retired_slots_are_out_of_view() {
    assert!(RETIRED_POSITION[1].abs() > CAMERA_ZFAR * 10.0);
}

#[test]
fn dom_ids_are_distinct() {
    let mut ids = vec![CANVAS_ID, COUNTDOWN_ID, TRIBUTE_ID, SOUND_TOGGLE_ID];
    ids.extend(UNIT_IDS);
    let n = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), n);
    assert_ne!(MUTE_LABEL, UNMUTE_LABEL);
}
