//! `teleo-hal` – hardware collaborator boundary.
//!
//! The teleoperation core owns no hardware I/O.  These traits are the seams
//! to the collaborators that do: the operator's input device and the
//! drivetrain (which also fronts the latency-compensating pose estimator).
//! The core only ever talks to the traits, so real drivers and simulation
//! stubs are interchangeable.
//!
//! # Modules
//!
//! - [`input`] – [`InputDevice`][input::InputDevice]: per-tick joystick
//!   sampling.
//! - [`drivetrain`] – [`Drivetrain`][drivetrain::Drivetrain]: velocity
//!   actuation plus the `add_vision_measurement` pose-correction sink.
//! - [`sim`] – [`SimJoystick`][sim::SimJoystick] /
//!   [`SimDrivetrain`][sim::SimDrivetrain]: recording stubs for headless
//!   tests and CI.

pub mod drivetrain;
pub mod input;
pub mod sim;

pub use drivetrain::Drivetrain;
pub use input::InputDevice;
pub use sim::{SimDrivetrain, SimJoystick};
