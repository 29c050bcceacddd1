//! [`MeasurementFilter`] – acceptance gate for vision pose observations.
//!
//! Every candidate observation passes through this gate before it is allowed
//! to correct the drivetrain's pose estimate.  The predicates are cheap
//! plausibility checks that catch the common failure modes of a fiducial
//! solve: an out-of-plane height (bad solve geometry), a pose off the field
//! (bad data association), and a solve built only from small, distant
//! targets (low confidence).
//!
//! Rejection is not an error – the observation is dropped and the next tick
//! starts fresh.  The filter is pure: the same observation always gets the
//! same verdict.
//!
//! # Example
//!
//! ```rust
//! use teleo_perception::{FilterConfig, MeasurementFilter};
//! use teleo_perception::vision::{TrackedTarget, VisionObservation};
//! use teleo_types::Pose3;
//!
//! let filter = MeasurementFilter::new(FilterConfig::default());
//! let obs = VisionObservation {
//!     pose: Pose3::new(5.0, 5.0, 0.05, 0.0),
//!     timestamp_seconds: 1.0,
//!     targets: vec![TrackedTarget { area: 25_000.0 }],
//! };
//! assert!(filter.accept(&obs));
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::vision::VisionObservation;

// ────────────────────────────────────────────────────────────────────────────
// Configuration
// ────────────────────────────────────────────────────────────────────────────

/// Rejection thresholds.
///
/// These are tuned constants carried as configuration, not derived physical
/// quantities; the defaults are the values that held up in practice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Maximum plausible |z| of a solve (metres).  The robot drives on the
    /// field plane, so height in the solve is pure solve error.
    #[serde(default = "default_max_height")]
    pub max_height: f32,
    /// Far field boundary for the projected x and y (metres).
    /// Approximation of the field dimensions; worth revisiting against the
    /// official field drawing.
    #[serde(default = "default_field_max")]
    pub field_max: f32,
    /// Minimum pixel area of the best contributing target.
    #[serde(default = "default_min_target_area")]
    pub min_target_area: f32,
}

fn default_max_height() -> f32 {
    0.2
}

fn default_field_max() -> f32 {
    13.0
}

fn default_min_target_area() -> f32 {
    20_000.0
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            max_height: default_max_height(),
            field_max: default_field_max(),
            min_target_area: default_min_target_area(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Rejection reasons
// ────────────────────────────────────────────────────────────────────────────

/// Which predicate rejected an observation.
///
/// Diagnostic only – a rejection is a normal outcome, and these carry enough
/// context to make a debug log line useful when tuning the thresholds.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum RejectReason {
    #[error("solve height {z} m is out of plane")]
    OutOfPlane { z: f32 },

    #[error("pose ({x}, {y}) is outside the field quadrant")]
    OutsideField { x: f32, y: f32 },

    #[error("pose ({x}, {y}) is beyond the far field boundary")]
    BeyondFieldBoundary { x: f32, y: f32 },

    #[error("best target area {max_area} px is below the confidence floor")]
    LowConfidence { max_area: f32 },
}

// ────────────────────────────────────────────────────────────────────────────
// MeasurementFilter
// ────────────────────────────────────────────────────────────────────────────

/// Stateless acceptance test applied to each candidate observation.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeasurementFilter {
    config: FilterConfig,
}

impl MeasurementFilter {
    /// Create a filter with the given thresholds.
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    /// The thresholds this filter applies.
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Run the rejection predicates in policy order, returning the first
    /// one that fires.
    ///
    /// The predicates are independent – the order only determines which
    /// reason is reported when several would fire.
    pub fn evaluate(&self, observation: &VisionObservation) -> Result<(), RejectReason> {
        let pose = observation.pose;

        if pose.z.abs() > self.config.max_height {
            return Err(RejectReason::OutOfPlane { z: pose.z });
        }

        // The field origin convention puts every valid pose in the
        // non-negative quadrant.
        if pose.x < 0.0 || pose.y < 0.0 {
            return Err(RejectReason::OutsideField {
                x: pose.x,
                y: pose.y,
            });
        }

        let projected = pose.project();
        if projected.x > self.config.field_max || projected.y > self.config.field_max {
            return Err(RejectReason::BeyondFieldBoundary {
                x: projected.x,
                y: projected.y,
            });
        }

        let max_area = observation.max_target_area();
        if max_area < self.config.min_target_area {
            return Err(RejectReason::LowConfidence { max_area });
        }

        Ok(())
    }

    /// `true` when no rejection predicate fires.
    pub fn accept(&self, observation: &VisionObservation) -> bool {
        self.evaluate(observation).is_ok()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
