use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// Which periodic trigger fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Advance the snake one cell
    Move,
    /// One second of play elapsed
    Clock,
}

/// The movement and clock intervals of one game session.
///
/// Dropping the value cancels both.
pub struct Triggers {
    movement: Interval,
    clock: Interval,
}

impl Triggers {
    /// Start a fresh pair. Each first fires one full period from now.
    pub fn start(move_every: Duration, clock_every: Duration) -> Self {
        let now = Instant::now();

        let mut movement = interval_at(now + move_every, move_every);
        movement.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut clock = interval_at(now + clock_every, clock_every);
        clock.set_missed_tick_behavior(MissedTickBehavior::Delay);

        Self { movement, clock }
    }

    /// Wait for the next trigger; `Move` wins a tie.
    pub async fn next(&mut self) -> Trigger {
        tokio::select! {
            biased;
            _ = self.movement.tick() => Trigger::Move,
            _ = self.clock.tick() => Trigger::Clock,
        }
    }
}

/// Wait on an optional pair; never resolves when there is none.
pub async fn next_trigger(triggers: &mut Option<Triggers>) -> Trigger {
    match triggers {
        Some(triggers) => triggers.next().await,
        None => std::future::pending().await,
    }
}
