//! [`InputShaper`] – deadbanded, direction-preserving stick shaping.
//!
//! Converts one tick's raw joystick axes into a holonomic velocity command:
//!
//! 1. The translation pair is decomposed into polar form so that one
//!    deadband applies to the *magnitude* of the stick vector.  Deadbanding
//!    each axis independently would distort the commanded direction whenever
//!    one axis sits just under the threshold; the polar form keeps direction
//!    exact all the way down to the deadband boundary.
//! 2. The rotation axis is deadbanded on its own.
//! 3. The unit-range results are scaled by the platform's maximum linear and
//!    angular speeds.
//!
//! The deadband clips the origin only – values above the threshold pass
//! through unscaled.  The output is therefore discontinuous exactly at the
//! deadband boundary, which is intentional: it suppresses stick drift without
//! changing the feel of the rest of the range.
//!
//! # Example
//!
//! ```rust
//! use teleo_control::{InputShaper, ShaperConfig};
//! use teleo_types::AxisSample;
//!
//! let shaper = InputShaper::new(ShaperConfig::default());
//!
//! // Stick drift well under the deadband produces a zero command.
//! let cmd = shaper.shape(AxisSample { lateral: 0.05, forward: 0.05, rotation: 0.0 });
//! assert_eq!(cmd.velocity_x, 0.0);
//! assert_eq!(cmd.velocity_y, 0.0);
//! assert_eq!(cmd.rotational_rate, 0.0);
//! ```

use serde::{Deserialize, Serialize};
use teleo_types::{AxisSample, DriveCommand};

// ────────────────────────────────────────────────────────────────────────────
// Configuration
// ────────────────────────────────────────────────────────────────────────────

/// Stick deflection below which an axis reads as zero.
pub const DEFAULT_DEADBAND: f32 = 0.10;

/// Platform top linear speed (m/s), from the drive's free-speed estimate.
pub const DEFAULT_MAX_SPEED_MPS: f32 = 5.12;

/// Platform top angular rate for teleop (rad/s).
pub const DEFAULT_MAX_ANGULAR_RATE_RPS: f32 = 2.5 * std::f32::consts::PI;

/// Shaping parameters.  Fixed at construction; the shaper itself is
/// stateless.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShaperConfig {
    /// Deadband width applied to the rotation axis and to the translation
    /// vector magnitude.
    #[serde(default = "default_deadband")]
    pub deadband: f32,
    /// Maximum linear speed the platform can reach (m/s).
    #[serde(default = "default_max_speed")]
    pub max_speed_mps: f32,
    /// Maximum commanded angular rate (rad/s).
    #[serde(default = "default_max_angular_rate")]
    pub max_angular_rate_rps: f32,
}

fn default_deadband() -> f32 {
    DEFAULT_DEADBAND
}

fn default_max_speed() -> f32 {
    DEFAULT_MAX_SPEED_MPS
}

fn default_max_angular_rate() -> f32 {
    DEFAULT_MAX_ANGULAR_RATE_RPS
}

impl Default for ShaperConfig {
    fn default() -> Self {
        Self {
            deadband: DEFAULT_DEADBAND,
            max_speed_mps: DEFAULT_MAX_SPEED_MPS,
            max_angular_rate_rps: DEFAULT_MAX_ANGULAR_RATE_RPS,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Deadband
// ────────────────────────────────────────────────────────────────────────────

/// Force `value` to exactly zero when its magnitude is under `deadband`;
/// pass it through unchanged otherwise.
///
/// Deliberately does NOT rescale the surviving range: a stick at 0.11 with a
/// 0.10 deadband commands 0.11, not 0.011.  Polynomial input scaling could
/// slot in here later without touching the callers.
pub fn apply_deadband(value: f32, deadband: f32) -> f32 {
    if value.abs() < deadband { 0.0 } else { value }
}

// ────────────────────────────────────────────────────────────────────────────
// InputShaper
// ────────────────────────────────────────────────────────────────────────────

/// Pure mapping from raw stick axes to a [`DriveCommand`].
///
/// Holds only read-only configuration, so calling [`shape`][Self::shape]
/// twice with the same sample always yields the same command.
#[derive(Debug, Clone, Copy)]
pub struct InputShaper {
    config: ShaperConfig,
}

impl InputShaper {
    /// Create a shaper with the given configuration.
    pub fn new(config: ShaperConfig) -> Self {
        Self { config }
    }

    /// The configuration this shaper was built with.
    pub fn config(&self) -> &ShaperConfig {
        &self.config
    }

    /// Shape one tick's stick sample into a velocity command.
    ///
    /// Any finite input produces a valid command: the translation magnitude
    /// is clamped to 1.0 before scaling, and `atan2` is defined for the
    /// whole plane (including the origin, where the magnitude is zero and
    /// the angle is irrelevant).
    pub fn shape(&self, sample: AxisSample) -> DriveCommand {
        let angle = sample.forward.atan2(sample.lateral);
        let magnitude = sample.lateral.hypot(sample.forward).min(1.0);

        let magnitude = apply_deadband(magnitude, self.config.deadband);
        let rotation = apply_deadband(sample.rotation, self.config.deadband);

        // Recompose along the original direction with the deadbanded
        // magnitude.  "Left" is positive field Y, hence the negated cosine.
        let forward = angle.sin() * magnitude;
        let left = -(angle.cos() * magnitude);

        DriveCommand {
            velocity_x: forward * self.config.max_speed_mps,
            velocity_y: left * self.config.max_speed_mps,
            rotational_rate: rotation * self.config.max_angular_rate_rps,
        }
    }
}

impl Default for InputShaper {
    fn default() -> Self {
        Self::new(ShaperConfig::default())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
