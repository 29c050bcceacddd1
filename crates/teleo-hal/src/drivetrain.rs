//! Generic `Drivetrain` trait: velocity actuation plus the pose-correction
//! sink.
//!
//! The drivetrain collaborator owns both the motor control and the running
//! pose estimate (wheel odometry fused with whatever corrections it is
//! handed).  The core never implements that fusion – it only decides which
//! corrections are worth feeding in.

use teleo_types::{DriveCommand, Pose2, TeleoError};

/// A holonomic drivetrain with an onboard pose estimator.
///
/// Exactly one instance exists per robot; it is constructed once at process
/// start and handed by reference to every consumer (no global state).
pub trait Drivetrain: Send + Sync {
    /// Stable identifier for this drivetrain, e.g. `"swerve_base"`.
    fn id(&self) -> &str;

    /// Apply one tick's velocity command.
    ///
    /// # Errors
    ///
    /// Returns [`TeleoError::HardwareFault`] when the command cannot be
    /// applied (motor controller offline, bus fault, …).  The host decides
    /// whether a fault is fatal; the orchestrator just reports it.
    fn apply_command(&mut self, command: &DriveCommand) -> Result<(), TeleoError>;

    /// Feed an accepted vision pose into the latency-compensated estimator.
    ///
    /// Callable at any time and non-blocking.  The estimator is responsible
    /// for ordering and for deduplicating corrections that carry the same
    /// capture timestamp, so calling this twice with identical arguments is
    /// harmless.
    fn add_vision_measurement(&mut self, pose: Pose2, timestamp_seconds: f64);

    /// The drivetrain's current best pose estimate.
    fn pose(&self) -> Pose2;
}
