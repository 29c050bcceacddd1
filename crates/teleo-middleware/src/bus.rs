//! Headless, typed, topic-based publish/subscribe event bus.
//!
//! Uses [`tokio::sync::broadcast`] channels under the hood so that every
//! subscriber receives every message without any single subscriber blocking
//! the others – essential on the control path, where a slow telemetry
//! consumer must never delay a tick.
//!
//! This is how observers register for pose updates: instead of handing the
//! orchestrator a callback, a consumer subscribes to [`Topic::Telemetry`]
//! and receives a [`PoseUpdate`][teleo_types::EventPayload::PoseUpdate]
//! event every time a vision correction is applied.
//!
//! # Topics
//!
//! | Topic | Typical traffic |
//! |---|---|
//! | [`Topic::Telemetry`] | Pose updates after each accepted vision correction |
//! | [`Topic::DriveCommands`] | The shaped velocity command issued each tick |
//! | [`Topic::Faults`] | Hardware faults reported by collaborators |

use teleo_types::{Event, TeleoError};
use tokio::sync::broadcast;
use tracing::warn;

/// Default channel capacity (number of buffered events before old ones are
/// dropped for slow subscribers).
const DEFAULT_CAPACITY: usize = 256;

/// Enumeration of all routing topics on the event bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Pose updates published after each accepted vision correction.
    Telemetry,
    /// The shaped drive command issued each tick.
    DriveCommands,
    /// Hardware faults reported by collaborators.
    Faults,
}

/// Shared event bus.  Clone it cheaply – all clones share the same
/// underlying broadcast channels.
#[derive(Clone, Debug)]
pub struct EventBus {
    telemetry: broadcast::Sender<Event>,
    drive_commands: broadcast::Sender<Event>,
    faults: broadcast::Sender<Event>,
}

impl EventBus {
    /// Create a new bus with the given per-topic channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (telemetry, _) = broadcast::channel(capacity);
        let (drive_commands, _) = broadcast::channel(capacity);
        let (faults, _) = broadcast::channel(capacity);
        Self {
            telemetry,
            drive_commands,
            faults,
        }
    }

    /// Publish `event` to the given [`Topic`] channel.
    ///
    /// Returns the number of active receivers that were handed the event.
    /// Publishing with zero subscribers yields [`TeleoError::Channel`];
    /// control-path callers treat that as a no-op rather than a failure,
    /// since observers are optional.
    pub fn publish_to(&self, topic: Topic, event: Event) -> Result<usize, TeleoError> {
        self.topic_sender(topic).send(event).map_err(|_| {
            TeleoError::Channel(format!("no subscribers for topic {topic:?}"))
        })
    }

    /// Subscribe to a specific [`Topic`] channel.
    ///
    /// The returned receiver yields only events published to that topic.
    pub fn subscribe_to(&self, topic: Topic) -> TopicReceiver {
        TopicReceiver {
            topic,
            receiver: self.topic_sender(topic).subscribe(),
        }
    }

    fn topic_sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Telemetry => &self.telemetry,
            Topic::DriveCommands => &self.drive_commands,
            Topic::Faults => &self.faults,
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Topic-based receiver
// ---------------------------------------------------------------------------

/// An async receiver bound to a single [`Topic`] channel.
///
/// Obtained via [`EventBus::subscribe_to`].
pub struct TopicReceiver {
    topic: Topic,
    receiver: broadcast::Receiver<Event>,
}

impl TopicReceiver {
    /// Wait for the next event on this topic.
    ///
    /// Returns:
    /// * `Ok(event)` – a successfully received event.
    /// * `Err(broadcast::error::RecvError::Lagged(n))` – the subscriber fell
    ///   behind and `n` messages were dropped.  The caller decides whether
    ///   to continue or abort.
    /// * `Err(broadcast::error::RecvError::Closed)` – the bus has shut down.
    pub async fn recv(&mut self) -> Result<Event, broadcast::error::RecvError> {
        self.receiver.recv().await
    }

    /// Receive without waiting; `None` when no event is pending.
    ///
    /// Useful for synchronous hosts that drain telemetry between ticks.
    /// A subscriber that fell behind skips the dropped events (with a
    /// warning) and resumes at the oldest one still buffered.
    pub fn try_recv(&mut self) -> Option<Event> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => return Some(event),
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    warn!(topic = ?self.topic, lagged_by = n, "subscriber lagged");
                    continue;
                }
                Err(_) => return None,
            }
        }
    }

    /// The [`Topic`] this receiver is bound to.
    pub fn topic(&self) -> Topic {
        self.topic
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teleo_types::{DriveCommand, EventPayload, Pose2, PoseCorrection};

    fn pose_event(source: &str) -> Event {
        Event::now(
            source,
            EventPayload::PoseUpdate(PoseCorrection {
                pose: Pose2::new(1.0, 2.0, 0.0),
                timestamp_seconds: 5.0,
            }),
        )
    }

    #[tokio::test]
    async fn publish_and_receive_on_topic() -> Result<(), Box<dyn std::error::Error>> {
        let bus = EventBus::default();
        let mut rx = bus.subscribe_to(Topic::Telemetry);

        let event = pose_event("teleo-runtime::teleop");
        bus.publish_to(Topic::Telemetry, event.clone())?;

        let received = rx.recv().await?;
        assert_eq!(received.id, event.id);
        assert_eq!(received.source, event.source);
        Ok(())
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() -> Result<(), Box<dyn std::error::Error>> {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe_to(Topic::Telemetry);
        let mut rx2 = bus.subscribe_to(Topic::Telemetry);

        let event = pose_event("teleo-runtime::teleop");
        bus.publish_to(Topic::Telemetry, event.clone())?;

        assert_eq!(rx1.recv().await?.id, event.id);
        assert_eq!(rx2.recv().await?.id, event.id);
        Ok(())
    }

    #[tokio::test]
    async fn subscriber_does_not_receive_other_topic_events(
    ) -> Result<(), Box<dyn std::error::Error>> {
        let bus = EventBus::default();
        let mut faults_rx = bus.subscribe_to(Topic::Faults);
        let _telemetry_rx = bus.subscribe_to(Topic::Telemetry);

        bus.publish_to(Topic::Telemetry, pose_event("teleo-runtime::teleop"))?;

        let result = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            faults_rx.recv(),
        )
        .await;
        assert!(
            result.is_err(),
            "Faults subscriber must not receive a Telemetry event"
        );
        Ok(())
    }

    #[test]
    fn publish_no_subscribers_returns_channel_error() {
        let bus = EventBus::default();
        let result = bus.publish_to(
            Topic::DriveCommands,
            Event::now("test", EventPayload::Drive(DriveCommand::default())),
        );
        assert!(matches!(result, Err(TeleoError::Channel(_))));
    }

    #[test]
    fn try_recv_returns_pending_event_without_waiting() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe_to(Topic::DriveCommands);

        assert!(rx.try_recv().is_none());

        let event = Event::now("test", EventPayload::Drive(DriveCommand::default()));
        bus.publish_to(Topic::DriveCommands, event.clone()).unwrap();

        let received = rx.try_recv().expect("event must be pending");
        assert_eq!(received.id, event.id);
        assert_eq!(rx.topic(), Topic::DriveCommands);
    }

    #[tokio::test]
    async fn slow_subscriber_lags_rather_than_blocking() {
        const CAPACITY: usize = 8;
        let bus = EventBus::new(CAPACITY);
        let mut slow_rx = bus.subscribe_to(Topic::Telemetry);

        for _ in 0..100 {
            let _ = bus.publish_to(Topic::Telemetry, pose_event("flood"));
        }

        let result = slow_rx.recv().await;
        assert!(
            matches!(result, Err(broadcast::error::RecvError::Lagged(_))),
            "expected Lagged error, got: {result:?}"
        );
    }
}
