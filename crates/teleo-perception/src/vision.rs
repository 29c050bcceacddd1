//! [`VisionSource`] – polling wrapper around the external pose solver.
//!
//! The actual multi-target PnP solve runs outside this crate (typically on a
//! vision coprocessor).  This module owns the polling contract: one call to
//! [`VisionSource::poll`] performs at most one solve and returns either
//! nothing – no targets visible, solve failed, or solve over budget – or
//! exactly one [`VisionObservation`].  Absence is a normal per-tick outcome,
//! never an error.
//!
//! The camera's mounting transform is calibrated once and never mutated; it
//! is carried here so the solver seam stays the only moving part.

use serde::{Deserialize, Serialize};
use teleo_types::{Pose3, Vec3};
use tracing::trace;

// ────────────────────────────────────────────────────────────────────────────
// Observation data
// ────────────────────────────────────────────────────────────────────────────

/// Per-fiducial metadata for one target that contributed to a solve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackedTarget {
    /// Apparent size of the target in the image (pixel area).  Bigger means
    /// closer and better resolved, hence more trustworthy.
    pub area: f32,
}

/// One fused pose solve from the vision system.
///
/// Ownership flows forward through the pipeline: the source produces it, the
/// filter judges it, and an accepted observation is consumed by the pose
/// estimator.  Nothing retains observation history across ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisionObservation {
    /// The solved robot pose in the field frame.
    pub pose: Pose3,
    /// Monotonic capture time of the camera frame (seconds).
    pub timestamp_seconds: f64,
    /// The fiducial targets that contributed to the solve, in solver order.
    pub targets: Vec<TrackedTarget>,
}

impl VisionObservation {
    /// Pixel area of the best-seen contributing target, or 0.0 when the
    /// solver reported no targets.
    pub fn max_target_area(&self) -> f32 {
        self.targets.iter().fold(0.0, |acc, t| acc.max(t.area))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Camera configuration
// ────────────────────────────────────────────────────────────────────────────

/// Rigid camera mounting offset: where the camera sits on the robot.
///
/// Translation in the robot frame plus a pitch about the robot's Y axis
/// (the camera looks up or down; it is not rolled or yawed on this
/// platform).  Set once at construction, read-only afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraTransform {
    /// Camera position relative to the robot origin (metres).
    pub translation: Vec3,
    /// Camera pitch relative to the robot's horizontal plane (radians,
    /// negative = tilted up).
    pub pitch_rad: f32,
}

impl Default for CameraTransform {
    fn default() -> Self {
        // Measured mounting offset of the front camera.  The translation is
        // an approximation pending a proper calibration pass.
        Self {
            translation: Vec3::new(0.0841, 0.0, 0.2984),
            pitch_rad: (-30.0_f32).to_radians(),
        }
    }
}

/// Identity and mounting of the single fixed camera this source wraps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Name the solver pipeline knows the camera by.
    #[serde(default = "default_camera_name")]
    pub name: String,
    /// Fixed robot-to-camera transform handed to the solver at start-up.
    #[serde(default)]
    pub robot_to_camera: CameraTransform,
}

fn default_camera_name() -> String {
    "Arducam_OV9281_USB_Camera".to_string()
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            name: default_camera_name(),
            robot_to_camera: CameraTransform::default(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Solver seam
// ────────────────────────────────────────────────────────────────────────────

/// The external pose-solving computation.
///
/// Implementations wrap whatever actually produces fused multi-target
/// solves (a coprocessor client on the robot, a canned sequence in tests).
/// A call must be bounded well under one control-loop period; when the
/// result is not ready in time the implementation returns `None` rather
/// than blocking the loop.
pub trait PoseSolver: Send + Sync {
    /// Run (or collect) at most one solve.  `None` means no observation
    /// this tick.
    fn solve(&mut self) -> Option<VisionObservation>;
}

// ────────────────────────────────────────────────────────────────────────────
// VisionSource
// ────────────────────────────────────────────────────────────────────────────

/// Polling front-end over a [`PoseSolver`] for one fixed camera.
pub struct VisionSource {
    config: CameraConfig,
    solver: Box<dyn PoseSolver>,
}

impl VisionSource {
    /// Wrap `solver` for the camera described by `config`.
    pub fn new(config: CameraConfig, solver: Box<dyn PoseSolver>) -> Self {
        Self { config, solver }
    }

    /// The camera this source polls.
    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Poll for one candidate observation.
    ///
    /// At most one solve happens per call.  `None` on any given tick is
    /// normal and the caller simply tries again next tick.
    pub fn poll(&mut self) -> Option<VisionObservation> {
        let observation = self.solver.solve();
        match &observation {
            Some(obs) => trace!(
                camera = %self.config.name,
                x = obs.pose.x,
                y = obs.pose.y,
                z = obs.pose.z,
                timestamp = obs.timestamp_seconds,
                targets = obs.targets.len(),
                "vision observation"
            ),
            None => trace!(camera = %self.config.name, "no vision observation"),
        }
        observation
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
