//! `teleo-middleware` – in-process pub/sub plumbing.
//!
//! # Modules
//!
//! - [`bus`] – [`EventBus`][bus::EventBus]: typed, topic-based broadcast bus
//!   that carries pose-update telemetry, drive commands, and fault alerts to
//!   any number of observers without any observer being able to stall the
//!   control loop.

pub mod bus;

pub use bus::{EventBus, Topic, TopicReceiver};
