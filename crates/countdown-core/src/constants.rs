// Default tuning for the countdown scene. Physics constants are per frame tick.

// Clock
pub const MS_PER_SECOND: i64 = 1_000;
pub const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

// Effect window
pub const FINAL_SECONDS_WINDOW: u32 = 10;
pub const FINAL_SECONDS_SPAWN_PROBABILITY: f32 = 0.04;
pub const CELEBRATION_SPAWN_PROBABILITY: f32 = 0.08;

// Particle pool
pub const POOL_CAPACITY: usize = 3000;
pub const RETIRED_POSITION: [f32; 3] = [0.0, -10_000.0, 0.0]; // far below the visible volume

// Launch region (world units, camera looks down -Z from z=12)
pub const LAUNCH_FLOOR_Y: f32 = -4.5;
pub const LAUNCH_HALF_WIDTH: f32 = 4.0;
pub const LAUNCH_DEPTH_MIN: f32 = -3.0;
pub const LAUNCH_DEPTH_MAX: f32 = 0.0;
pub const LAUNCH_SPEED_MIN: f32 = 0.08;
pub const LAUNCH_SPEED_MAX: f32 = 0.14;
pub const LAUNCH_DRIFT: f32 = 0.01; // max sideways speed of a rising rocket

// Ascent
pub const ASCENT_AGE_MIN: u32 = 40;
pub const ASCENT_AGE_MAX: u32 = 70;
pub const GRAVITY: f32 = -0.0015;
pub const ROCKET_SIZE: f32 = 0.12;

// Explosion
pub const BURST_MIN: usize = 60;
pub const BURST_MAX: usize = 140;
pub const EXPLOSION_FORCE: f32 = 0.08;
pub const FRICTION: f32 = 0.96; // multiplicative velocity decay per tick
pub const BURST_GRAVITY: f32 = -0.0008;
pub const FADE_TICKS: u32 = 90;
pub const SPARK_SIZE: f32 = 0.08;

// Firework palette (deep blue, red, white)
pub const FIREWORK_PALETTE: [[f32; 3]; 3] = [
    [0.0, 0.2, 0.8],
    [0.8, 0.0, 0.0],
    [1.0, 1.0, 1.0],
];

// Embers
pub const EMBER_COUNT: usize = 400;
pub const EMBER_BAND: f32 = 30.0; // vertical cycle length
pub const EMBER_SIZE: f32 = 0.04;
pub const EMBER_COLOR: [f32; 4] = [1.0, 0.67, 0.0, 0.4];

// Audio cues
pub const THRESHOLD_REMAINING: (u32, u32, u32, u32) = (0, 0, 1, 0); // fire the threshold cue at 1:00 left
pub const AMBIENT_CUE_PATH: &str = "/sounds/bgm.mp3";
pub const AMBIENT_CUE_VOLUME: f32 = 0.5;
pub const THRESHOLD_CUE_PATH: &str = "/sounds/countdown.MP3";
pub const THRESHOLD_CUE_VOLUME: f32 = 1.0;
pub const COMPLETION_CUE_PATH: &str = "/sounds/celebration.mp3";
pub const COMPLETION_CUE_VOLUME: f32 = 1.0;

// Camera shake (slow handheld sway, radians and Hz)
pub const SHAKE_MAX_YAW: f32 = 0.05;
pub const SHAKE_MAX_PITCH: f32 = 0.05;
pub const SHAKE_MAX_ROLL: f32 = 0.05;
pub const SHAKE_FREQUENCY: f32 = 0.1;
