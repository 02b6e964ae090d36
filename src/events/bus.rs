use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use serde_json::Value;
use smallvec::SmallVec;

/// A message handed to one subscriber.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery<S> {
    pub subscriber: S,
    pub channel: String,
    pub payload: Value,
}

/// In-process publish/subscribe bus.
///
/// Publishing only queues; [`drain`](Self::drain) fans queued messages out
/// to the channel's subscribers in publish order, each subscriber in the
/// order it subscribed. Messages published while a drain's deliveries are
/// being handled go out on the next drain.
#[derive(Debug)]
pub struct EventBus<S> {
    subscriptions: FxHashMap<String, SmallVec<[S; 4]>>,
    queue: VecDeque<(String, Value)>,
}

impl<S> Default for EventBus<S> {
    fn default() -> Self {
        Self {
            subscriptions: FxHashMap::default(),
            queue: VecDeque::new(),
        }
    }
}

impl<S: Copy + PartialEq + std::fmt::Debug> EventBus<S> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes `subscriber` to `channel`. Subscribing twice is a no-op.
    pub fn subscribe(&mut self, channel: &str, subscriber: S) {
        let subscribers = self.subscriptions.entry(channel.to_owned()).or_default();
        if !subscribers.contains(&subscriber) {
            subscribers.push(subscriber);
        }
    }

    /// Removes `subscriber` from every channel.
    pub fn unsubscribe_all(&mut self, subscriber: S) {
        self.subscriptions.retain(|_, subscribers| {
            subscribers.retain(|s| *s != subscriber);
            !subscribers.is_empty()
        });
    }

    /// Queues `payload` on `channel`.
    pub fn publish(&mut self, channel: &str, payload: Value) {
        self.queue.push_back((channel.to_owned(), payload));
    }

    /// Publishes as a remote emitter would: object payloads get a
    /// `timestamp` field (ms since epoch) unless they carry one already.
    pub fn emit_stamped(&mut self, channel: &str, mut payload: Value, now_ms: f64) {
        if let Value::Object(map) = &mut payload {
            map.entry("timestamp").or_insert_with(|| Value::from(now_ms));
        }
        self.publish(channel, payload);
    }

    /// Takes every queued message and expands it into per-subscriber
    /// deliveries. Messages on channels nobody listens to are dropped.
    pub fn drain(&mut self) -> Vec<Delivery<S>> {
        let mut deliveries = Vec::new();
        for (channel, payload) in std::mem::take(&mut self.queue) {
            let Some(subscribers) = self.subscriptions.get(&channel) else {
                log::trace!("No subscribers on '{channel}', dropping message");
                continue;
            };
            deliveries.extend(subscribers.iter().map(|&subscriber| Delivery {
                subscriber,
                channel: channel.clone(),
                payload: payload.clone(),
            }));
        }
        deliveries
    }
}
