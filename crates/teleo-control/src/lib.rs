//! `teleo-control` – joystick-to-drive-command shaping.
//!
//! # Modules
//!
//! - [`shaper`] – [`InputShaper`][shaper::InputShaper]: pure function from a
//!   raw [`AxisSample`][teleo_types::AxisSample] to a deadbanded,
//!   speed-scaled [`DriveCommand`][teleo_types::DriveCommand].

pub mod shaper;

pub use shaper::{apply_deadband, InputShaper, ShaperConfig};
