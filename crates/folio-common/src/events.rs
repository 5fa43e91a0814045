use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::types::{BackgroundEffect, ThemeState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    ThemeChanged(ThemeState),
    PreferencesReloaded,
    ConfigReloaded,
    EffectSwitched {
        from: Option<BackgroundEffect>,
        to: BackgroundEffect,
    },
    VideoFallback,
    Shutdown,
    #[serde(other)]
    Unknown,
}

#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: Event) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.sender.receiver_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AccentColor, ThemeMode};

    #[tokio::test]
    async fn publish_and_receive() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(Event::PreferencesReloaded);

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, Event::PreferencesReloaded));
    }

    #[tokio::test]
    async fn multiple_subscribers() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(Event::Shutdown);

        assert!(matches!(rx1.recv().await.unwrap(), Event::Shutdown));
        assert!(matches!(rx2.recv().await.unwrap(), Event::Shutdown));
    }

    #[tokio::test]
    async fn theme_changed_carries_snapshot() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();
        let state = ThemeState {
            mode: ThemeMode::Dark,
            accent_color: AccentColor::Pink,
            background_effect: BackgroundEffect::Live,
        };

        bus.publish(Event::ThemeChanged(state));

        match rx.recv().await.unwrap() {
            Event::ThemeChanged(got) => assert_eq!(got, state),
            other => panic!("expected ThemeChanged, got {other:?}"),
        }
    }

    #[test]
    fn publish_returns_zero_with_no_subscribers() {
        let bus = EventBus::new(16);
        assert_eq!(bus.publish(Event::Shutdown), 0);
    }

    #[test]
    fn clones_share_one_channel() {
        let bus = EventBus::new(16);
        let other = bus.clone();
        let _rx = other.subscribe();
        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(bus.publish(Event::ConfigReloaded), 1);
    }

    #[test]
    fn effect_switched_serializes_with_tag() {
        let json = serde_json::to_string(&Event::EffectSwitched {
            from: None,
            to: BackgroundEffect::Waves,
        })
        .unwrap();
        assert!(json.contains("\"type\":\"EffectSwitched\""));
        assert!(json.contains("\"waves\""));
    }

    #[test]
    fn unknown_event_deserializes() {
        let json = r#"{"type":"SomethingNew","data":null}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert!(matches!(event, Event::Unknown));
    }
}
