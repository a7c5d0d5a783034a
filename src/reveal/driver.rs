// src/reveal/driver.rs
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use rand::Rng;
use tokio::time::{self, Instant, MissedTickBehavior};

use super::{RevealEvent, RevealScheduler};

/// Ticks `scheduler` once per `period` until its session completes or is
/// cancelled, handing every event to `on_event`.
///
/// `cancel` is checked before each tick; once set, the active session is
/// cancelled and no further events are delivered. Returns the final value
/// when the session completed.
pub async fn drive<R, F>(
    scheduler: &mut RevealScheduler<R>,
    period: Duration,
    cancel: &AtomicBool,
    mut on_event: F,
) -> Option<String>
where
    R: Rng,
    F: FnMut(&RevealEvent),
{
    let period = period.max(Duration::from_millis(1));
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        if cancel.load(Ordering::SeqCst) {
            if let Some(handle) = scheduler.active_handle() {
                scheduler.cancel(handle);
            }
            return None;
        }

        let event = scheduler.tick()?;
        on_event(&event);
        if let RevealEvent::Completed(value) = event {
            return Some(value);
        }
    }
}
