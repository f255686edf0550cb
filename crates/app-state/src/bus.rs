//! Subscription bus for style consumers
//!
//! Consumers register either a callback ([`StyleSubscriber`]) that runs
//! synchronously inside `publish`, or a channel whose receiver is drained on
//! the consumer's next render pass. Events are delivered at most once, in
//! publish order, to the subscribers registered at the time of delivery;
//! there is no replay for late subscribers.
//!
//! Publishing from inside a callback is allowed. The nested events are
//! queued and delivered after the current event has reached every
//! subscriber, so all subscribers observe the same order.

use crate::transition::ColorFrame;
use app_ui::theme::ThemeKey;
use app_ui::tokens::Breakpoint;
use parking_lot::{Mutex, RwLock};
use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Identifier of a bus subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConsumerId(u64);

static NEXT_CONSUMER_ID: AtomicU64 = AtomicU64::new(1);

impl ConsumerId {
    /// Allocate a process-unique id
    pub fn next() -> Self {
        Self(NEXT_CONSUMER_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw id value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConsumerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "consumer-{}", self.0)
    }
}

/// Events delivered to style consumers
#[derive(Debug, Clone, PartialEq)]
pub enum StyleEvent {
    /// The viewport crossed into a different breakpoint
    BreakpointChanged {
        /// Breakpoint before the resize
        previous: Breakpoint,
        /// Breakpoint after the resize
        current: Breakpoint,
        /// Width that triggered the change
        width: f32,
    },
    /// The active theme key changed
    ThemeChanged {
        /// Previously active theme
        previous: ThemeKey,
        /// Newly active theme
        current: ThemeKey,
    },
    /// Interpolated colors of a running transition
    Frame(Arc<ColorFrame>),
}

impl StyleEvent {
    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            StyleEvent::BreakpointChanged { .. } => "breakpoint_changed",
            StyleEvent::ThemeChanged { .. } => "theme_changed",
            StyleEvent::Frame(_) => "frame",
        }
    }
}

/// Receives style events synchronously
#[cfg_attr(test, mockall::automock)]
pub trait StyleSubscriber: Send + Sync {
    /// Called once per delivered event
    fn on_event(&self, event: &StyleEvent);
}

impl<F> StyleSubscriber for F
where
    F: Fn(&StyleEvent) + Send + Sync,
{
    fn on_event(&self, event: &StyleEvent) {
        self(event)
    }
}

#[derive(Clone)]
enum Delivery {
    Callback(Arc<dyn StyleSubscriber>),
    Channel(mpsc::UnboundedSender<StyleEvent>),
}

/// Fan-out of style events to registered consumers
pub struct SubscriptionBus {
    subscribers: RwLock<Vec<(ConsumerId, Delivery)>>,
    pending: Mutex<VecDeque<StyleEvent>>,
    dispatching: AtomicBool,
}

impl SubscriptionBus {
    /// Create a bus with no subscribers
    pub fn new() -> Self {
        Self {
            subscribers: RwLock::new(Vec::new()),
            pending: Mutex::new(VecDeque::new()),
            dispatching: AtomicBool::new(false),
        }
    }

    /// Register a callback subscriber, replacing any subscriber with the same id
    pub fn subscribe<S>(&self, id: ConsumerId, subscriber: S)
    where
        S: StyleSubscriber + 'static,
    {
        self.subscribe_shared(id, Arc::new(subscriber));
    }

    /// Register a shared callback subscriber
    pub fn subscribe_shared(&self, id: ConsumerId, subscriber: Arc<dyn StyleSubscriber>) {
        self.insert(id, Delivery::Callback(subscriber));
    }

    /// Register a channel subscriber and return its receiving end
    pub fn subscribe_channel(&self, id: ConsumerId) -> mpsc::UnboundedReceiver<StyleEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.insert(id, Delivery::Channel(tx));
        rx
    }

    fn insert(&self, id: ConsumerId, delivery: Delivery) {
        let mut subscribers = self.subscribers.write();
        subscribers.retain(|(existing, _)| *existing != id);
        subscribers.push((id, delivery));
        tracing::trace!(consumer = %id, total = subscribers.len(), "subscribed");
    }

    /// Remove a subscriber; returns whether it was registered
    pub fn unsubscribe(&self, id: ConsumerId) -> bool {
        let mut subscribers = self.subscribers.write();
        let before = subscribers.len();
        subscribers.retain(|(existing, _)| *existing != id);
        before != subscribers.len()
    }

    /// Number of registered subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }

    /// Deliver one event to every subscriber
    pub fn publish(&self, event: StyleEvent) {
        self.publish_all([event]);
    }

    /// Deliver events in order to every subscriber
    pub fn publish_all(&self, events: impl IntoIterator<Item = StyleEvent>) {
        self.pending.lock().extend(events);

        loop {
            if self.dispatching.swap(true, Ordering::AcqRel) {
                // an outer publish on this timeline drains the queue
                return;
            }
            {
                // released even if a subscriber panics mid-delivery
                let _dispatch = DispatchGuard(&self.dispatching);
                loop {
                    let next = self.pending.lock().pop_front();
                    match next {
                        Some(event) => self.deliver(&event),
                        None => break,
                    }
                }
            }
            if self.pending.lock().is_empty() {
                return;
            }
        }
    }

    fn deliver(&self, event: &StyleEvent) {
        let targets = self.subscribers.read().clone();
        let mut closed = Vec::new();

        for (id, delivery) in &targets {
            match delivery {
                Delivery::Callback(subscriber) => subscriber.on_event(event),
                Delivery::Channel(tx) => {
                    if tx.send(event.clone()).is_err() {
                        closed.push(*id);
                    }
                }
            }
        }

        if !closed.is_empty() {
            tracing::warn!(
                count = closed.len(),
                event = event.kind(),
                "dropping subscribers with closed channels"
            );
            self.subscribers
                .write()
                .retain(|(id, _)| !closed.contains(id));
        }
    }
}

/// Clears the dispatching flag when delivery ends, including by unwinding
struct DispatchGuard<'a>(&'a AtomicBool);

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for SubscriptionBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SubscriptionBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionBus")
            .field("subscribers", &self.subscriber_count())
            .field("pending", &self.pending.lock().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theme_changed(previous: &str, current: &str) -> StyleEvent {
        StyleEvent::ThemeChanged {
            previous: ThemeKey::from(previous),
            current: ThemeKey::from(current),
        }
    }

    fn recorder() -> (Arc<Mutex<Vec<StyleEvent>>>, impl Fn(&StyleEvent) + Send + Sync) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        (log, move |event: &StyleEvent| sink.lock().push(event.clone()))
    }

    #[test]
    fn test_publish_reaches_all_subscribers_in_order() {
        let bus = SubscriptionBus::new();
        let (first, first_sink) = recorder();
        let (second, second_sink) = recorder();
        bus.subscribe(ConsumerId::next(), first_sink);
        bus.subscribe(ConsumerId::next(), second_sink);

        bus.publish(theme_changed("light", "dark"));
        bus.publish(theme_changed("dark", "light"));

        let expected = vec![theme_changed("light", "dark"), theme_changed("dark", "light")];
        assert_eq!(*first.lock(), expected);
        assert_eq!(*second.lock(), expected);
    }

    #[test]
    fn test_mock_subscriber_called_once_per_event() {
        let bus = SubscriptionBus::new();
        let mut mock = MockStyleSubscriber::new();
        mock.expect_on_event()
            .withf(|event| matches!(event, StyleEvent::ThemeChanged { .. }))
            .times(2)
            .return_const(());
        bus.subscribe(ConsumerId::next(), mock);

        bus.publish(theme_changed("light", "dark"));
        bus.publish(theme_changed("dark", "light"));
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let bus = SubscriptionBus::new();
        let (log, sink) = recorder();
        let id = ConsumerId::next();
        bus.subscribe(id, sink);

        bus.publish(theme_changed("light", "dark"));
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.publish(theme_changed("dark", "light"));

        assert_eq!(log.lock().len(), 1);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_resubscribe_replaces() {
        let bus = SubscriptionBus::new();
        let (old, old_sink) = recorder();
        let (new, new_sink) = recorder();
        let id = ConsumerId::next();
        bus.subscribe(id, old_sink);
        bus.subscribe(id, new_sink);

        bus.publish(theme_changed("light", "dark"));
        assert!(old.lock().is_empty());
        assert_eq!(new.lock().len(), 1);
        assert_eq!(bus.subscriber_count(), 1);
    }

    #[test]
    fn test_late_subscriber_gets_no_replay() {
        let bus = SubscriptionBus::new();
        bus.publish(theme_changed("light", "dark"));

        let (log, sink) = recorder();
        bus.subscribe(ConsumerId::next(), sink);
        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_reentrant_publish_preserves_order() {
        let bus = Arc::new(SubscriptionBus::new());

        // the first subscriber reacts to a theme change by publishing another event
        let inner = bus.clone();
        bus.subscribe(ConsumerId::next(), move |event: &StyleEvent| {
            if let StyleEvent::ThemeChanged { current, .. } = event {
                if current.as_str() == "dark" {
                    inner.publish(theme_changed("dark", "light"));
                }
            }
        });
        let (log, sink) = recorder();
        bus.subscribe(ConsumerId::next(), sink);

        bus.publish(theme_changed("light", "dark"));

        assert_eq!(
            *log.lock(),
            vec![theme_changed("light", "dark"), theme_changed("dark", "light")]
        );
    }

    #[test]
    fn test_panicking_subscriber_does_not_stall_the_bus() {
        let bus = SubscriptionBus::new();
        let (log, sink) = recorder();
        bus.subscribe(ConsumerId::next(), sink);
        let faulty = ConsumerId::next();
        bus.subscribe(faulty, |event: &StyleEvent| {
            if let StyleEvent::ThemeChanged { current, .. } = event {
                if current.as_str() == "dark" {
                    panic!("subscriber failed");
                }
            }
        });

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            bus.publish(theme_changed("light", "dark"));
        }));
        assert!(outcome.is_err());

        bus.publish(theme_changed("dark", "light"));
        assert_eq!(
            *log.lock(),
            vec![theme_changed("light", "dark"), theme_changed("dark", "light")]
        );
        assert!(bus.unsubscribe(faulty));
    }

    #[tokio::test]
    async fn test_channel_subscriber_receives_deferred() {
        let bus = SubscriptionBus::new();
        let mut rx = bus.subscribe_channel(ConsumerId::next());

        bus.publish_all([theme_changed("light", "dark"), theme_changed("dark", "light")]);

        assert_eq!(rx.recv().await, Some(theme_changed("light", "dark")));
        assert_eq!(rx.recv().await, Some(theme_changed("dark", "light")));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_closed_channel_is_pruned() {
        let bus = SubscriptionBus::new();
        let rx = bus.subscribe_channel(ConsumerId::next());
        let mut live = bus.subscribe_channel(ConsumerId::next());
        assert_eq!(bus.subscriber_count(), 2);

        drop(rx);
        bus.publish(theme_changed("light", "dark"));

        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(live.recv().await, Some(theme_changed("light", "dark")));
    }

    #[test]
    fn test_consumer_ids_are_unique() {
        let a = ConsumerId::next();
        let b = ConsumerId::next();
        assert_ne!(a, b);
        assert!(b.value() > a.value());
    }
}
