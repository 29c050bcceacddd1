//! [`TeleopLoop`] – the once-per-tick teleoperation orchestrator.
//!
//! Each tick runs two unconditional steps:
//!
//! 1. **Drive** – sample the input device, shape the axes into a
//!    [`DriveCommand`], apply it to the drivetrain, and publish it on the
//!    [`Topic::DriveCommands`] lane.
//! 2. **Vision** – poll the vision source for at most one candidate
//!    observation; discard it if it predates the last applied correction or
//!    fails the measurement filter; otherwise project it to a planar
//!    [`PoseCorrection`], feed it to the drivetrain's pose estimator, and
//!    publish a pose update on [`Topic::Telemetry`].
//!
//! There is no retry policy on either step.  An absent, stale, or rejected
//! observation is simply dropped and reconsidered fresh next tick, and the
//! tick never waits on the vision side.  The only error a tick can return is
//! a hardware fault from applying the drive command – policy for that
//! belongs to the host.
//!
//! # Example
//!
//! ```rust
//! use teleo_control::{InputShaper, ShaperConfig};
//! use teleo_hal::sim::{SimDrivetrain, SimJoystick};
//! use teleo_middleware::EventBus;
//! use teleo_perception::vision::{CameraConfig, PoseSolver, VisionObservation, VisionSource};
//! use teleo_perception::{FilterConfig, MeasurementFilter};
//! use teleo_runtime::TeleopLoop;
//!
//! struct NoSolver;
//! impl PoseSolver for NoSolver {
//!     fn solve(&mut self) -> Option<VisionObservation> {
//!         None
//!     }
//! }
//!
//! let mut teleop = TeleopLoop::new(
//!     SimJoystick::new("driver_gamepad"),
//!     InputShaper::new(ShaperConfig::default()),
//!     VisionSource::new(CameraConfig::default(), Box::new(NoSolver)),
//!     MeasurementFilter::new(FilterConfig::default()),
//!     SimDrivetrain::new("swerve_base"),
//!     EventBus::default(),
//! );
//! let outcome = teleop.tick().expect("sim tick must succeed");
//! assert_eq!(outcome.command.velocity_x, 0.0);
//! ```

use teleo_control::InputShaper;
use teleo_hal::{Drivetrain, InputDevice};
use teleo_middleware::{EventBus, Topic};
use teleo_perception::vision::VisionSource;
use teleo_perception::{MeasurementFilter, RejectReason};
use teleo_types::{DriveCommand, Event, EventPayload, PoseCorrection, TeleoError};
use tracing::{debug, info};

/// Event `source` tag for everything this loop publishes.
const EVENT_SOURCE: &str = "teleo-runtime::teleop";

// ────────────────────────────────────────────────────────────────────────────
// Tick outcome
// ────────────────────────────────────────────────────────────────────────────

/// What happened on the vision side of one tick.
#[derive(Debug, Clone, PartialEq)]
pub enum VisionVerdict {
    /// The source produced no observation this tick.
    NoObservation,
    /// The observation predates the most recently applied correction and
    /// was discarded unfused.
    Stale { timestamp_seconds: f64 },
    /// The measurement filter rejected the observation.
    Rejected(RejectReason),
    /// The correction was forwarded to the pose estimator.
    Fused(PoseCorrection),
}

/// Diagnostic summary of one tick, returned to the host.
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    /// The drive command applied this tick.
    pub command: DriveCommand,
    /// The fate of this tick's vision observation, if any.
    pub vision: VisionVerdict,
}

// ────────────────────────────────────────────────────────────────────────────
// TeleopLoop
// ────────────────────────────────────────────────────────────────────────────

/// The teleoperation orchestrator.
///
/// Owns explicit handles to every collaborator (dependency injection – the
/// one drivetrain instance is constructed at process start and handed in,
/// never reached through global state).  Call [`tick`][Self::tick] from the
/// host's fixed-rate loop; the call is re-entrant and keeps no state across
/// ticks beyond the timestamp of the last applied correction.
pub struct TeleopLoop<I: InputDevice, D: Drivetrain> {
    input: I,
    shaper: InputShaper,
    vision: VisionSource,
    filter: MeasurementFilter,
    drivetrain: D,
    bus: EventBus,
    /// Capture time of the most recently applied correction; used to drop
    /// stale in-flight solve results.
    last_correction_timestamp: Option<f64>,
}

impl<I: InputDevice, D: Drivetrain> TeleopLoop<I, D> {
    /// Wire up a loop from its collaborators.
    pub fn new(
        input: I,
        shaper: InputShaper,
        vision: VisionSource,
        filter: MeasurementFilter,
        drivetrain: D,
        bus: EventBus,
    ) -> Self {
        Self {
            input,
            shaper,
            vision,
            filter,
            drivetrain,
            bus,
            last_correction_timestamp: None,
        }
    }

    /// The drivetrain collaborator (primarily for hosts and tests).
    pub fn drivetrain(&self) -> &D {
        &self.drivetrain
    }

    /// Mutable access to the input device, e.g. to reposition a
    /// [`SimJoystick`][teleo_hal::sim::SimJoystick] between ticks.
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// Run one control-loop tick.
    ///
    /// # Errors
    ///
    /// Only [`TeleoError::HardwareFault`] from applying the drive command;
    /// every vision-side outcome is reported in the [`TickOutcome`] instead.
    pub fn tick(&mut self) -> Result<TickOutcome, TeleoError> {
        let sample = self.input.sample();
        let command = self.shaper.shape(sample);
        self.drivetrain.apply_command(&command)?;

        // Observers are optional; a bus without subscribers is a no-op.
        let _ = self
            .bus
            .publish_to(Topic::DriveCommands, Event::now(EVENT_SOURCE, EventPayload::Drive(command)));

        let vision = self.ingest_vision();

        Ok(TickOutcome { command, vision })
    }

    /// Poll, vet, and conditionally fuse this tick's vision observation.
    fn ingest_vision(&mut self) -> VisionVerdict {
        let Some(observation) = self.vision.poll() else {
            return VisionVerdict::NoObservation;
        };

        // An asynchronously computed solve can arrive after a newer
        // correction has already been applied; fusing it would drag the
        // estimate backwards in time.
        if let Some(last) = self.last_correction_timestamp
            && observation.timestamp_seconds < last
        {
            debug!(
                timestamp = observation.timestamp_seconds,
                last_applied = last,
                "discarding stale vision observation"
            );
            return VisionVerdict::Stale {
                timestamp_seconds: observation.timestamp_seconds,
            };
        }

        match self.filter.evaluate(&observation) {
            Err(reason) => {
                debug!(%reason, "vision observation rejected");
                VisionVerdict::Rejected(reason)
            }
            Ok(()) => {
                let correction = PoseCorrection {
                    pose: observation.pose.project(),
                    timestamp_seconds: observation.timestamp_seconds,
                };
                self.drivetrain
                    .add_vision_measurement(correction.pose, correction.timestamp_seconds);
                self.last_correction_timestamp = Some(correction.timestamp_seconds);

                let _ = self.bus.publish_to(
                    Topic::Telemetry,
                    Event::now(EVENT_SOURCE, EventPayload::PoseUpdate(correction)),
                );
                info!(
                    x = correction.pose.x,
                    y = correction.pose.y,
                    heading = correction.pose.heading_rad,
                    timestamp = correction.timestamp_seconds,
                    "vision correction applied"
                );
                VisionVerdict::Fused(correction)
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use teleo_control::shaper::DEFAULT_MAX_SPEED_MPS;
    use teleo_control::ShaperConfig;
    use teleo_hal::sim::{SimDrivetrain, SimJoystick};
    use teleo_perception::vision::{CameraConfig, PoseSolver, TrackedTarget, VisionObservation};
    use teleo_perception::FilterConfig;
    use teleo_types::{AxisSample, Pose3};

    /// Yields a fixed queue of solve results, front first, then `None`.
    struct ScriptedSolver {
        script: Vec<Option<VisionObservation>>,
    }

    impl PoseSolver for ScriptedSolver {
        fn solve(&mut self) -> Option<VisionObservation> {
            if self.script.is_empty() {
                None
            } else {
                self.script.remove(0)
            }
        }
    }

    fn observation(x: f32, y: f32, z: f32, area: f32, timestamp: f64) -> VisionObservation {
        VisionObservation {
            pose: Pose3::new(x, y, z, 0.4),
            timestamp_seconds: timestamp,
            targets: vec![TrackedTarget { area }],
        }
    }

    fn teleop_with(
        script: Vec<Option<VisionObservation>>,
    ) -> TeleopLoop<SimJoystick, SimDrivetrain> {
        TeleopLoop::new(
            SimJoystick::new("driver_gamepad"),
            InputShaper::new(ShaperConfig::default()),
            VisionSource::new(CameraConfig::default(), Box::new(ScriptedSolver { script })),
            MeasurementFilter::new(FilterConfig::default()),
            SimDrivetrain::new("swerve_base"),
            EventBus::default(),
        )
    }

    #[test]
    fn stick_drift_under_deadband_commands_zero() {
        let mut teleop = teleop_with(vec![]);
        teleop.input_mut().set_axes(AxisSample {
            lateral: 0.05,
            forward: 0.05,
            rotation: 0.0,
        });

        let outcome = teleop.tick().unwrap();
        assert_eq!(outcome.command, DriveCommand::default());
        assert_eq!(outcome.vision, VisionVerdict::NoObservation);
        assert_eq!(teleop.drivetrain().last_command(), &DriveCommand::default());
    }

    #[test]
    fn full_lateral_deflection_reaches_drivetrain_at_max_speed() {
        let mut teleop = teleop_with(vec![]);
        teleop.input_mut().set_axes(AxisSample {
            lateral: 1.0,
            forward: 0.0,
            rotation: 0.0,
        });

        let outcome = teleop.tick().unwrap();
        assert!(outcome.command.velocity_x.abs() < 1e-5);
        assert!((outcome.command.velocity_y + DEFAULT_MAX_SPEED_MPS).abs() < 1e-4);
        assert_eq!(teleop.drivetrain().last_command(), &outcome.command);
    }

    #[test]
    fn accepted_observation_is_forwarded_with_original_timestamp() {
        let mut teleop = teleop_with(vec![Some(observation(6.0, 6.0, 0.1, 30_000.0, 21.5))]);

        let outcome = teleop.tick().unwrap();
        let VisionVerdict::Fused(correction) = outcome.vision else {
            panic!("expected fused correction, got {:?}", outcome.vision);
        };
        assert!((correction.pose.x - 6.0).abs() < f32::EPSILON);
        assert!((correction.pose.y - 6.0).abs() < f32::EPSILON);
        assert!((correction.timestamp_seconds - 21.5).abs() < f64::EPSILON);

        let forwarded = teleop.drivetrain().corrections();
        assert_eq!(forwarded.len(), 1);
        assert!((forwarded[0].timestamp_seconds - 21.5).abs() < f64::EPSILON);
    }

    #[test]
    fn rejected_observation_never_reaches_the_estimator() {
        // Out-of-plane solve: filtered out before fusion.
        let mut teleop = teleop_with(vec![Some(observation(5.0, 5.0, 0.25, 30_000.0, 21.5))]);

        let outcome = teleop.tick().unwrap();
        assert!(matches!(outcome.vision, VisionVerdict::Rejected(_)));
        assert!(teleop.drivetrain().corrections().is_empty());
    }

    #[test]
    fn absent_observation_is_a_normal_outcome() {
        let mut teleop = teleop_with(vec![None, None]);
        assert_eq!(teleop.tick().unwrap().vision, VisionVerdict::NoObservation);
        assert_eq!(teleop.tick().unwrap().vision, VisionVerdict::NoObservation);
    }

    #[test]
    fn stale_observation_is_discarded_unfused() {
        let mut teleop = teleop_with(vec![
            Some(observation(6.0, 6.0, 0.1, 30_000.0, 21.5)),
            // Arrives later but was captured earlier than the applied one.
            Some(observation(2.0, 2.0, 0.1, 30_000.0, 20.0)),
        ]);

        assert!(matches!(
            teleop.tick().unwrap().vision,
            VisionVerdict::Fused(_)
        ));
        let outcome = teleop.tick().unwrap();
        assert_eq!(
            outcome.vision,
            VisionVerdict::Stale {
                timestamp_seconds: 20.0
            }
        );
        assert_eq!(teleop.drivetrain().corrections().len(), 1);
    }

    #[test]
    fn no_retry_rejection_does_not_block_next_tick() {
        let mut teleop = teleop_with(vec![
            Some(observation(5.0, 14.0, 0.0, 30_000.0, 10.0)),
            Some(observation(5.0, 5.0, 0.0, 30_000.0, 11.0)),
        ]);

        assert!(matches!(
            teleop.tick().unwrap().vision,
            VisionVerdict::Rejected(RejectReason::BeyondFieldBoundary { .. })
        ));
        assert!(matches!(
            teleop.tick().unwrap().vision,
            VisionVerdict::Fused(_)
        ));
        assert_eq!(teleop.drivetrain().corrections().len(), 1);
    }

    #[test]
    fn tick_publishes_drive_and_pose_events() {
        let bus = EventBus::default();
        let mut drive_rx = bus.subscribe_to(Topic::DriveCommands);
        let mut pose_rx = bus.subscribe_to(Topic::Telemetry);

        let mut teleop = TeleopLoop::new(
            SimJoystick::new("driver_gamepad"),
            InputShaper::new(ShaperConfig::default()),
            VisionSource::new(
                CameraConfig::default(),
                Box::new(ScriptedSolver {
                    script: vec![Some(observation(6.0, 6.0, 0.1, 30_000.0, 21.5))],
                }),
            ),
            MeasurementFilter::new(FilterConfig::default()),
            SimDrivetrain::new("swerve_base"),
            bus,
        );
        teleop.tick().unwrap();

        let drive_event = drive_rx.try_recv().expect("drive event must be published");
        assert!(matches!(drive_event.payload, EventPayload::Drive(_)));
        assert_eq!(drive_event.source, EVENT_SOURCE);

        let pose_event = pose_rx.try_recv().expect("pose update must be published");
        let EventPayload::PoseUpdate(correction) = pose_event.payload else {
            panic!("expected pose update payload");
        };
        assert!((correction.timestamp_seconds - 21.5).abs() < f64::EPSILON);
    }

    #[test]
    fn tick_without_subscribers_still_succeeds() {
        // Publishing to an observer-less bus must never fail the tick.
        let mut teleop = teleop_with(vec![Some(observation(6.0, 6.0, 0.1, 30_000.0, 21.5))]);
        assert!(teleop.tick().is_ok());
    }

    #[test]
    fn both_steps_run_every_tick() {
        let mut teleop = teleop_with(vec![
            Some(observation(6.0, 6.0, 0.1, 30_000.0, 10.0)),
            Some(observation(7.0, 7.0, 0.1, 30_000.0, 11.0)),
        ]);
        teleop.input_mut().set_axes(AxisSample {
            lateral: 0.0,
            forward: 1.0,
            rotation: 0.0,
        });

        for expected_corrections in 1..=2 {
            let outcome = teleop.tick().unwrap();
            // Drive step ran…
            assert!((outcome.command.velocity_x - DEFAULT_MAX_SPEED_MPS).abs() < 1e-4);
            // …and the vision step fused independently of it.
            assert!(matches!(outcome.vision, VisionVerdict::Fused(_)));
            assert_eq!(teleop.drivetrain().corrections().len(), expected_corrections);
        }
    }
}
