// Use cases layer: the live feed core and the match workflows around it.

pub mod dispatcher;
pub mod feed;
pub mod ids;
pub mod lifecycle;
pub mod matches;
pub mod registry;
#[cfg(test)]
pub(crate) mod test_support;

pub use dispatcher::{BroadcastOutcome, Dispatcher};
pub use feed::MatchFeed;
pub use lifecycle::{ConnectionState, LifecycleSettings, StreamFrame, StreamLifecycle, Subscription};
pub use matches::{MatchAdmin, NewGoal, NewMatch};
pub use registry::{SubscriberHandle, SubscriberId, SubscriberRegistry};
