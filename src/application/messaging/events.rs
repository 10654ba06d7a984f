//! Event bus - Subscriptions from event modules to platform events

use uuid::Uuid;

use crate::domain::entities::{BotContext, EventHandler};

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe
pub type SubscriptionId = Uuid;

struct Subscription {
    id: SubscriptionId,
    event: String,
    handler: EventHandler,
}

/// Listeners keyed by platform event name, called in subscription order
#[derive(Default)]
pub struct EventBus {
    subscriptions: Vec<Subscription>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a handler to every firing of `event`
    pub fn subscribe(&mut self, event: impl Into<String>, handler: EventHandler) -> SubscriptionId {
        let id = Uuid::new_v4();
        self.subscriptions.push(Subscription {
            id,
            event: event.into(),
            handler,
        });
        id
    }

    /// Remove a subscription; returns false if it was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    /// Forward an event to its listeners, returning how many ran.
    ///
    /// A failing listener is logged and does not stop the others.
    pub fn emit(&self, ctx: &BotContext, event: &str, args: &[serde_json::Value]) -> usize {
        let mut called = 0;
        for subscription in self.subscriptions.iter().filter(|s| s.event == event) {
            called += 1;
            if let Err(e) = (subscription.handler)(ctx, args) {
                tracing::warn!("Event listener for '{}' failed: {}", event, e);
            }
        }
        if called == 0 {
            tracing::debug!("No listener for event '{}'", event);
        }
        called
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.subscriptions.iter().filter(|s| s.event == event).count()
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}
