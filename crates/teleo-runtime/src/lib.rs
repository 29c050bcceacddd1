//! `teleo-runtime` – the teleoperation tick engine.
//!
//! The execution layer that ties input shaping and vision fusion together
//! into the once-per-tick cycle the host scheduler drives.
//!
//! # Modules
//!
//! - [`teleop_loop`] – [`TeleopLoop`][teleop_loop::TeleopLoop]: the
//!   orchestrator.  One call to [`tick`][teleop_loop::TeleopLoop::tick]
//!   samples the operator's input, shapes and applies a drive command, polls
//!   the vision source, filters the candidate observation, and forwards an
//!   accepted correction to the drivetrain's pose estimator.
//! - [`config`] – [`TeleopConfig`][config::TeleopConfig]: TOML-backed
//!   configuration covering the shaper, the camera, and the measurement
//!   filter, with working defaults for every field.
//! - [`telemetry`] – [`init_tracing`][telemetry::init_tracing]: one-shot
//!   `tracing` subscriber setup (env-filtered, compact or JSON output).
//!
//! The host owns scheduling: it calls `tick()` at a fixed rate (tens of Hz)
//! from a single thread.  The loop itself has no states besides "running"
//! and no failure mode that halts it – absent or rejected vision
//! observations are ordinary outcomes, and only genuine hardware faults
//! surface to the host.

pub mod config;
pub mod teleop_loop;
pub mod telemetry;

pub use config::TeleopConfig;
pub use teleop_loop::{TeleopLoop, TickOutcome, VisionVerdict};
pub use telemetry::init_tracing;
