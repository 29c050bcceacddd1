//! Generic `InputDevice` trait for operator input hardware.

use teleo_types::AxisSample;

/// An operator input device (gamepad, flight stick, …).
///
/// The orchestrator samples the device exactly once per control-loop tick.
/// Implementations are expected to hand back axes already mapped to the
/// core's sign convention (forward positive away from the operator, rotation
/// positive counter-clockwise) and clamped to `[-1.0, 1.0]` – axis
/// inversion and range clamping are driver concerns, not shaping concerns.
pub trait InputDevice: Send + Sync {
    /// Stable identifier for this device, e.g. `"driver_gamepad"`.
    fn id(&self) -> &str;

    /// Read the current axis positions.  Must not block.
    fn sample(&mut self) -> AxisSample;
}
