//! Message handling - Event subscriptions and console input parsing

pub mod events;
pub mod parser;

pub use events::{EventBus, SubscriptionId};
pub use parser::InputParser;
