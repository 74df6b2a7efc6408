use glam::Vec3;

// Shared visual and timing constants used by the web frontend.

// Drivers
pub const CLOCK_TICK_MS: i32 = 1_000; // countdown recompute cadence

// Camera (cinematic framing: slightly zoomed, narrow FOV)
pub const CAMERA_EYE: Vec3 = Vec3::new(0.0, 0.0, 12.0);
pub const CAMERA_FOVY_DEG: f32 = 35.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;

// Point sprites
pub const POINT_SCALE: f32 = 1.0; // world-size multiplier applied to every particle
pub const MAX_ROCKETS: usize = 64; // instance slots reserved for rising rockets

// Brightness: heartbeat base (0.5) maps to this multiplier
pub const HEARTBEAT_GAIN: f32 = 2.0;

// Post chain (bloom, vignette, film grain)
pub const BLOOM_THRESHOLD: f32 = 0.2; // luminance where glow starts
pub const BLOOM_SMOOTHING: f32 = 0.025;
pub const BLOOM_INTENSITY: f32 = 1.5;
pub const BLOOM_SPREAD: f32 = 1.5; // blur tap distance in half-res texels
pub const VIGNETTE_OFFSET: f32 = 0.1;
pub const VIGNETTE_DARKNESS: f32 = 1.1;
pub const NOISE_OPACITY: f32 = 0.15;

// Transparent clear so the page background shows through
pub const CLEAR_RGBA: [f64; 4] = [0.0, 0.0, 0.0, 0.0];

// DOM contract
pub const CANVAS_ID: &str = "app-canvas";
pub const TARGET_ATTR: &str = "data-target";
pub const TARGET_QUERY_KEY: &str = "target";
pub const COUNTDOWN_ID: &str = "countdown";
pub const TRIBUTE_ID: &str = "tribute";
pub const SOUND_TOGGLE_ID: &str = "sound-toggle";
pub const UNIT_IDS: [&str; 4] = ["cd-days", "cd-hours", "cd-minutes", "cd-seconds"];
pub const UNMUTE_LABEL: &str = "Unmute Sound";
pub const MUTE_LABEL: &str = "Mute Sound";
