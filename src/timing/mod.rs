pub mod triggers;

pub use triggers::{Trigger, Triggers, next_trigger};
