//! `teleo-types` – shared data model for the teleoperation core.
//!
//! Every other crate in the workspace speaks these types: raw joystick
//! samples, shaped drive commands, poses, vision-derived corrections, the
//! event-bus envelope, and the workspace-wide error type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

// ────────────────────────────────────────────────────────────────────────────
// Control-input types
// ────────────────────────────────────────────────────────────────────────────

/// One tick's worth of raw joystick input.
///
/// Each axis is nominally in `[-1.0, 1.0]`; clamping out-of-range hardware
/// values is the input device's responsibility.  Downstream shaping stays
/// well-defined for any finite value (the translation magnitude is clamped),
/// so a misbehaving device degrades gracefully rather than panicking.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisSample {
    /// Sideways stick deflection (positive = right).
    pub lateral: f32,
    /// Forward stick deflection (positive = away from the operator).
    pub forward: f32,
    /// Rotation stick deflection (positive = counter-clockwise).
    pub rotation: f32,
}

/// A holonomic velocity command, produced fresh every tick and consumed once
/// by the drivetrain.
///
/// Invariant: each component's magnitude never exceeds the platform's
/// configured maximum (the shaper clamps the translation magnitude before
/// scaling, and the rotation axis is already bounded by the stick range).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DriveCommand {
    /// Forward velocity in m/s (field-centric X).
    pub velocity_x: f32,
    /// Leftward velocity in m/s (field-centric Y).
    pub velocity_y: f32,
    /// Angular velocity in rad/s (counter-clockwise positive).
    pub rotational_rate: f32,
}

// ────────────────────────────────────────────────────────────────────────────
// Geometry
// ────────────────────────────────────────────────────────────────────────────

/// A 3-D translation vector (metres).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    /// Create a new vector.
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// The zero vector.
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

/// A planar pose: position on the field plus heading.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose2 {
    /// Field X position (metres, non-negative on a valid field).
    pub x: f32,
    /// Field Y position (metres, non-negative on a valid field).
    pub y: f32,
    /// Heading, counter-clockwise from field +X (radians).
    pub heading_rad: f32,
}

impl Pose2 {
    /// Create a planar pose.
    pub fn new(x: f32, y: f32, heading_rad: f32) -> Self {
        Self { x, y, heading_rad }
    }
}

/// A full 3-D pose solve as returned by the vision system.
///
/// The robot lives on the field plane, so `z` carries no information about
/// where the robot is – a large `|z|` is evidence the solve itself is bad.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Heading about the vertical axis (radians).
    pub yaw_rad: f32,
}

impl Pose3 {
    /// Create a 3-D pose.
    pub fn new(x: f32, y: f32, z: f32, yaw_rad: f32) -> Self {
        Self { x, y, z, yaw_rad }
    }

    /// Project onto the field plane, dropping `z`.
    pub fn project(&self) -> Pose2 {
        Pose2::new(self.x, self.y, self.yaw_rad)
    }
}

/// A vision-derived correction for the drivetrain's pose estimator.
///
/// Derived from an accepted observation by projecting the 3-D solve onto the
/// field plane; the capture timestamp rides along so the estimator can apply
/// the correction with latency compensation.  Consumed exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoseCorrection {
    pub pose: Pose2,
    /// Monotonic capture time of the underlying camera frame (seconds).
    pub timestamp_seconds: f64,
}

// ────────────────────────────────────────────────────────────────────────────
// Event bus envelope
// ────────────────────────────────────────────────────────────────────────────

/// Unified event wrapper for the event bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    /// e.g. "teleo-runtime::teleop"
    pub source: String,
    pub payload: EventPayload,
}

impl Event {
    /// Build an event stamped with a fresh id and the current wall-clock time.
    pub fn now(source: impl Into<String>, payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            source: source.into(),
            payload,
        }
    }
}

/// Variants of data routed over the internal event bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EventPayload {
    /// A vision correction was accepted and forwarded to the pose estimator.
    PoseUpdate(PoseCorrection),
    /// The drive command issued this tick.
    Drive(DriveCommand),
    /// A hardware collaborator reported a fault.
    HardwareFault { component: String, details: String },
}

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

/// Workspace-wide error type.
///
/// Absence of a vision observation and filter rejection are *not* errors –
/// they are ordinary per-tick outcomes.  `TeleoError` covers the cases where
/// a collaborator genuinely failed.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum TeleoError {
    #[error("Hardware Fault on {component}: {details}")]
    HardwareFault { component: String, details: String },

    #[error("Event Bus Error: {0}")]
    Channel(String),

    #[error("Configuration Error: {0}")]
    Config(String),
}
