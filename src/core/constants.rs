// Scene and animation tuning shared by the pure core and the web frontend.
// Rates are per rendered frame; the loop is tied to the display refresh.

// Camera
pub const CAMERA_Z: f32 = 5.0;
pub const CAMERA_FOV_DEG: f32 = 50.0;

// Convergence-blend factors (fraction of the remaining distance per frame)
pub const K_POSITION: f32 = 0.03;
pub const K_ROTATION: f32 = 0.05;
pub const K_SCALE: f32 = 0.05;
pub const K_COLOR: f32 = 0.05;
pub const K_MORPH: f32 = 0.05;
pub const K_PUPIL: f32 = 0.1;
pub const K_GIMBAL: f32 = 0.08;

// Oscillation layer
pub const FLOAT_PHASE_STEP: f32 = 0.008;
pub const FLOAT_AMPLITUDE: f32 = 0.15;
pub const TILT_X_AMPLITUDE: f32 = 0.05;
pub const TILT_X_RATE: f32 = 0.7;
pub const TILT_Z_AMPLITUDE: f32 = 0.03;
pub const TILT_Z_RATE: f32 = 0.5;
pub const BREATHE_PHASE_STEP: f32 = 0.025; // 1.5 rad/s at 60 fps
pub const BREATHE_AMPLITUDE: f32 = 0.03;
pub const POINTER_YAW_GAIN: f32 = 0.2;

// Eyes
pub const PUPIL_LOOK_GAIN: f32 = 0.15;
pub const PUPIL_MAX_OFFSET: f32 = 0.15;

// Morph: scroll distance (fraction of viewport height) for a full transition
pub const MORPH_SCROLL_FRACTION: f32 = 0.8;

// Mesh resolution
pub const BODY_SEGMENTS: u32 = 64;
pub const DETAIL_SEGMENTS: u32 = 24;

// Drone
pub const ROTOR_SPIN_PER_FRAME: f32 = 0.6;

// Glow pulse
pub const GLOW_PHASE_STEP: f32 = 2.0 / 60.0;
pub const GLOW_PULSE_AMPLITUDE: f32 = 0.5;
