//! In-process simulation stubs for CI testing without physical hardware.
//!
//! [`SimJoystick`] and [`SimDrivetrain`] record everything they are handed
//! and never fail, letting the full teleoperation stack run in headless
//! tests exactly as it does on the robot.
//!
//! # Example
//!
//! ```rust
//! use teleo_hal::sim::SimDrivetrain;
//! use teleo_hal::Drivetrain;
//! use teleo_types::DriveCommand;
//!
//! let mut base = SimDrivetrain::new("swerve_base");
//! base.apply_command(&DriveCommand {
//!     velocity_x: 1.0,
//!     velocity_y: 0.0,
//!     rotational_rate: 0.0,
//! })
//! .expect("sim drive must succeed");
//! assert_eq!(base.last_command().velocity_x, 1.0);
//! ```

use teleo_types::{AxisSample, DriveCommand, Pose2, PoseCorrection, TeleoError};

use crate::drivetrain::Drivetrain;
use crate::input::InputDevice;

// ────────────────────────────────────────────────────────────────────────────
// Stub joystick
// ────────────────────────────────────────────────────────────────────────────

/// A simulated input device whose axes are set programmatically.
pub struct SimJoystick {
    id: String,
    axes: AxisSample,
}

impl SimJoystick {
    /// Create a centred simulated joystick with the given identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            axes: AxisSample::default(),
        }
    }

    /// Position the simulated sticks for subsequent samples.
    pub fn set_axes(&mut self, axes: AxisSample) {
        self.axes = axes;
    }
}

impl InputDevice for SimJoystick {
    fn id(&self) -> &str {
        &self.id
    }

    fn sample(&mut self) -> AxisSample {
        self.axes
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Stub drivetrain
// ────────────────────────────────────────────────────────────────────────────

/// A simulated drivetrain that records the most recent command and every
/// vision correction it is fed.  Always succeeds.
///
/// The recorded corrections let tests assert on exactly what reached the
/// pose-estimator boundary; the pose estimate simply snaps to the latest
/// correction.
pub struct SimDrivetrain {
    id: String,
    last_command: DriveCommand,
    corrections: Vec<PoseCorrection>,
    pose: Pose2,
}

impl SimDrivetrain {
    /// Create a simulated drivetrain with the given identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            last_command: DriveCommand::default(),
            corrections: Vec::new(),
            pose: Pose2::default(),
        }
    }

    /// The most recently applied command.
    pub fn last_command(&self) -> &DriveCommand {
        &self.last_command
    }

    /// Every correction forwarded so far, in arrival order.
    pub fn corrections(&self) -> &[PoseCorrection] {
        &self.corrections
    }
}

impl Drivetrain for SimDrivetrain {
    fn id(&self) -> &str {
        &self.id
    }

    fn apply_command(&mut self, command: &DriveCommand) -> Result<(), TeleoError> {
        self.last_command = *command;
        Ok(())
    }

    fn add_vision_measurement(&mut self, pose: Pose2, timestamp_seconds: f64) {
        self.corrections.push(PoseCorrection {
            pose,
            timestamp_seconds,
        });
        self.pose = pose;
    }

    fn pose(&self) -> Pose2 {
        self.pose
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sim_joystick_returns_set_axes() {
        let mut stick = SimJoystick::new("driver_gamepad");
        assert_eq!(stick.sample(), AxisSample::default());

        stick.set_axes(AxisSample {
            lateral: 1.0,
            forward: 0.0,
            rotation: -0.5,
        });
        let sample = stick.sample();
        assert!((sample.lateral - 1.0).abs() < f32::EPSILON);
        assert!((sample.rotation + 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn sim_drivetrain_records_last_command() {
        let mut base = SimDrivetrain::new("swerve_base");
        base.apply_command(&DriveCommand {
            velocity_x: 0.5,
            velocity_y: -0.2,
            rotational_rate: 1.0,
        })
        .unwrap();
        base.apply_command(&DriveCommand {
            velocity_x: 1.5,
            velocity_y: 0.0,
            rotational_rate: 0.0,
        })
        .unwrap();
        assert!((base.last_command().velocity_x - 1.5).abs() < f32::EPSILON);
    }

    #[test]
    fn sim_drivetrain_accumulates_corrections_in_order() {
        let mut base = SimDrivetrain::new("swerve_base");
        base.add_vision_measurement(Pose2::new(1.0, 1.0, 0.0), 10.0);
        base.add_vision_measurement(Pose2::new(2.0, 2.0, 0.0), 11.0);

        let corrections = base.corrections();
        assert_eq!(corrections.len(), 2);
        assert!((corrections[0].timestamp_seconds - 10.0).abs() < f64::EPSILON);
        assert!((corrections[1].pose.x - 2.0).abs() < f32::EPSILON);
        assert!((base.pose().x - 2.0).abs() < f32::EPSILON);
    }
}
