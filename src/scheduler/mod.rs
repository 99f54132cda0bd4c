//! Action scheduling: the queue, action valuation and the catch-up tick.

pub mod logic;
pub mod queue;
pub mod valuation;

pub use logic::{max_repeats, Scheduler, TickContext};
pub use queue::{ActionQueue, QueueItem};
pub use valuation::EffectiveAction;
