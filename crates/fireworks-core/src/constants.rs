// Shared simulation and rendering tuning constants used by both web and native frontends.

// Render capacity
pub const MAX_POINTS: usize = 15_000; // points packed per frame before truncation
pub const OFFSCREEN_Y: f32 = -10_000.0; // parking spot for blanked render slots

// Frame timing
pub const MAX_DT: f32 = 0.1; // seconds; larger gaps are clamped

// Physics
pub const GRAVITY: f32 = 40.0; // units/s^2
pub const PARTICLE_GRAVITY_SCALE: f32 = 0.25; // particles fall at quarter strength
pub const PARTICLE_DRAG: f32 = 0.97; // per-tick velocity retention
pub const DETONATION_VELOCITY: f32 = 8.0; // detonate once vy drops below this

// Launch cadence
pub const LAUNCH_INTERVAL_MIN: f32 = 0.5;
pub const LAUNCH_INTERVAL_MAX: f32 = 1.3;
pub const PAIRED_LAUNCH_CHANCE: f32 = 0.5;
pub const PAIRED_DELAY_MIN_MS: f32 = 100.0;
pub const PAIRED_DELAY_MAX_MS: f32 = 300.0;

// Launch geometry
pub const LAUNCH_WIDTH_FRACTION: f32 = 0.8; // central share of the screen width
pub const APEX_MIN_FRACTION: f32 = 0.3; // of half the vertical frustum
pub const APEX_MAX_FRACTION: f32 = 0.8;
pub const DRIFT_MAX: f32 = 15.0; // horizontal drift, units
pub const FLIGHT_TIME_MIN: f32 = 1.2;
pub const FLIGHT_TIME_MAX: f32 = 1.8;

// Trail
pub const TRAIL_SPAWN_CHANCE: f32 = 0.8; // per tick while ascending
pub const TRAIL_DECAY_PER_SEC: f32 = 4.0;
pub const TRAIL_SIZE: f32 = 3.0;
pub const TRAIL_GREEN_WEIGHT: f32 = 0.7;
pub const TRAIL_BLUE_WEIGHT: f32 = 0.3;

// Rocket head marker
pub const ROCKET_HEAD_SIZE: f32 = 6.0;
pub const ROCKET_HEAD_WHITE_MIX: f32 = 0.5;

// Burst
pub const BURST_COUNT_MIN: usize = 100;
pub const BURST_COUNT_MAX: usize = 160; // exclusive
pub const BURST_ANGLE_JITTER: f32 = 0.15; // radians
pub const BURST_SPEED_MIN: f32 = 15.0;
pub const BURST_SPEED_MAX: f32 = 35.0;
pub const BURST_LIFE_MIN: f32 = 1.5;
pub const BURST_LIFE_MAX: f32 = 2.5;
pub const BURST_SIZE_MIN: f32 = 3.0;
pub const BURST_SIZE_MAX: f32 = 5.0;
pub const BURST_HUE_JITTER: f32 = 0.075;
pub const BURST_SATURATION_JITTER: f32 = 0.15;
pub const BURST_LIGHTNESS_JITTER: f32 = 0.15;

// Sparks
pub const SPARK_COUNT: usize = 20;
pub const SPARK_SPEED_MIN: f32 = 5.0;
pub const SPARK_SPEED_MAX: f32 = 15.0;
pub const SPARK_LIFE_MIN: f32 = 0.8;
pub const SPARK_LIFE_MAX: f32 = 1.2;
pub const SPARK_SIZE_MIN: f32 = 4.0;
pub const SPARK_SIZE_MAX: f32 = 6.0;

// Camera
pub const CAMERA_Z: f32 = 100.0; // eye distance from the z = 0 plane
pub const CAMERA_FOVY_DEGREES: f32 = 60.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;
