//! `teleo-perception` – camera-pose observation plumbing.
//!
//! Turns the external fiducial pose solver's raw output into vetted
//! corrections for the drivetrain's pose estimator.
//!
//! # Modules
//!
//! - [`vision`] – [`VisionSource`][vision::VisionSource]: polling wrapper
//!   around a [`PoseSolver`][vision::PoseSolver] that yields at most one
//!   [`VisionObservation`][vision::VisionObservation] per control-loop tick.
//! - [`filter`] – [`MeasurementFilter`][filter::MeasurementFilter]:
//!   stateless plausibility and confidence gate applied to every candidate
//!   observation before it may touch the pose estimate.

pub mod filter;
pub mod vision;

pub use filter::{FilterConfig, MeasurementFilter, RejectReason};
pub use vision::{CameraConfig, CameraTransform, PoseSolver, TrackedTarget, VisionObservation, VisionSource};
