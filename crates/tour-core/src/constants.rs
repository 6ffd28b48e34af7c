// Navigation and zone tuning constants.
//
// These constants express intended behavior (time constants, clamp limits,
// gesture thresholds) and keep magic numbers out of the code. Every
// configuration record falls back to these values when a field is omitted.

// Frame-rate reference: damping is expressed as "retained fraction per 1/60 s frame"
pub const REFERENCE_FPS: f32 = 60.0;

// Navigator
pub const DEFAULT_METERS_PER_PIXEL: f32 = 0.01;
pub const DEFAULT_DAMPING: f32 = 0.9;
pub const MAX_DAMPING: f32 = 0.999; // 1.0 would coast forever
pub const VELOCITY_SNAP: f32 = 1e-3; // m/s below which velocity is zeroed
pub const DEFAULT_END_OFFSET: f32 = 0.5; // metres blocked before the last path knot
pub const VIRTUAL_ROUNDING: f32 = 100.0; // virtual distance is rounded to centimetres
pub const VIRTUAL_SYNC_EPSILON: f32 = 0.01; // metres from a bound at which virtual snaps back

// Speed profile
pub const MIN_SPEED_MULTIPLIER: f32 = 0.01; // never a full stop
pub const DEFAULT_EASE_IN: f32 = 2.0;
pub const DEFAULT_EASE_OUT: f32 = 2.0;

// Look / yaw
pub const DEFAULT_LOOK_SPEED: f32 = 0.1; // degrees per pixel
pub const DEFAULT_ROTATION_DAMPING: f32 = 0.1;
pub const YAW_DAMPING_EXPONENT: f32 = 1.2;
pub const YAW_RETURN_RATE: f32 = 5.0; // per second, applied as lerp(yaw, 0, dt * rate)
pub const DEFAULT_MIN_YAW: f32 = -45.0;
pub const DEFAULT_MAX_YAW: f32 = 45.0;

// Gestures
pub const TAP_MAX_DURATION_SEC: f32 = 0.15;
pub const TAP_MAX_TRAVEL_PX: f32 = 10.0;
pub const DOUBLE_TAP_WINDOW_SEC: f32 = 0.3;
pub const DEFAULT_DEADZONE_PX: f32 = 0.5;

// Zoom
pub const DEFAULT_FOV: f32 = 60.0;
pub const DEFAULT_ZOOMED_FOV: f32 = 30.0;
pub const DEFAULT_ZOOM_HOLD_SEC: f32 = 1.5;
pub const DEFAULT_ZOOM_SPEED: f32 = 5.0;
pub const ZOOM_SETTLE_EPSILON: f32 = 0.1; // degrees

// Culling
pub const DEFAULT_ACTIVATION_RADIUS: f32 = 50.0;
pub const DEFAULT_DEACTIVATION_RADIUS: f32 = 60.0;
pub const DEFAULT_HYSTERESIS_DELAY_SEC: f32 = 0.1;

// Ambient sounds and music
pub const DEFAULT_FADE_IN_SEC: f32 = 1.0;
pub const DEFAULT_FADE_OUT_SEC: f32 = 1.0;
pub const DEFAULT_CROSSFADE_SEC: f32 = 2.0;

// Scroll audio (speed-driven noise + step clicks)
pub const DEFAULT_CLICK_STEP: f32 = 0.5;
pub const DEFAULT_CLICK_PITCH_MIN: f32 = 0.95;
pub const DEFAULT_CLICK_PITCH_MAX: f32 = 1.05;
pub const DEFAULT_MAX_NOISE_VOLUME: f32 = 0.15;
pub const DEFAULT_SPEED_FOR_MAX_VOLUME: f32 = 5.0;
pub const DEFAULT_MIN_CUTOFF_HZ: f32 = 500.0;
pub const DEFAULT_MAX_CUTOFF_HZ: f32 = 5000.0;
pub const NOISE_PITCH_MAX: f32 = 1.05;
pub const AUDIO_SMOOTHING_RATE: f32 = 5.0;

// Idle detection
pub const DEFAULT_IDLE_TIMEOUT_SEC: f32 = 180.0;
pub const DEFAULT_IDLE_MOVEMENT_THRESHOLD: f32 = 0.1;
