//! Reminder scheduler.
//!
//! The scheduler is a polled state machine, like the rest of the core: it
//! has no internal thread and the caller invokes [`ReminderScheduler::tick`]
//! with the current wall-clock time. [`run`] wraps it in a tokio interval
//! for long-running shells.
//!
//! Dedup keys are `profileId|medId|YYYY-MM-DD|HH:MM`, held in memory for
//! the life of the process. That yields at most one notification per
//! medicine per scheduled minute, as long as the polling interval does not
//! skip past a whole minute (keep it at 60 seconds or less). A restart
//! within the scheduled minute may notify again; that is accepted.

use std::collections::HashSet;
use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use tokio::time::MissedTickBehavior;

use crate::model::{Document, TimeOfDay};
use crate::recurrence::is_due;
use crate::storage::Store;

/// Default polling interval. Must stay at or below one minute.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(20);

/// Notification sink. Emission is fire-and-forget: an implementation with
/// no capability (or no permission) simply does nothing.
pub trait Notify {
    fn notify(&self, title: &str, body: &str);
}

/// A notifier without a delivery capability.
pub struct NoopNotifier;

impl Notify for NoopNotifier {
    fn notify(&self, _title: &str, _body: &str) {}
}

/// Deduplicating reminder engine. Process-scoped: the notified set resets
/// on restart.
#[derive(Debug, Default)]
pub struct ReminderScheduler {
    notified: HashSet<String>,
}

impl ReminderScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn dedup_key(profile_id: &str, med_id: &str, now: NaiveDateTime, minute: TimeOfDay) -> String {
        format!(
            "{}|{}|{}|{}",
            profile_id,
            med_id,
            now.date().format("%Y-%m-%d"),
            minute
        )
    }

    /// One reminder sweep over a freshly loaded document.
    ///
    /// Resolves the active profile (none: no-op), then notifies once for
    /// every medicine scheduled for the current minute and due today.
    /// Returns the number of notifications emitted.
    pub fn tick<N: Notify>(&mut self, doc: &Document, now: NaiveDateTime, notifier: &N) -> usize {
        let Some(profile) = doc.active_profile() else {
            return 0;
        };

        let minute = TimeOfDay::from_time(now.time());
        let today = now.date();
        let mut emitted = 0;

        for med in &profile.medicines {
            if med.time != minute || !is_due(med, today) {
                continue;
            }
            let key = Self::dedup_key(&profile.id, &med.id, now, minute);
            if !self.notified.insert(key) {
                continue;
            }
            notifier.notify(
                &format!("MediCycle: {}", med.name),
                &format!("{} \u{2022} {}", med.dosage, med.food.label()),
            );
            emitted += 1;
        }
        emitted
    }

    /// Forget all dedup state (used by tests and by shells that reload).
    pub fn reset(&mut self) {
        self.notified.clear();
    }
}

/// Drive the scheduler on a fixed interval until the caller drops the
/// future (e.g. via `select!` against a shutdown signal).
///
/// Re-reads the store on every tick so mutations between ticks are picked
/// up; the document is never cached across ticks.
pub async fn run<N: Notify>(
    store: &Store,
    scheduler: &mut ReminderScheduler,
    notifier: &N,
    every: Duration,
) {
    let mut interval = tokio::time::interval(every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        interval.tick().await;
        let doc = store.load();
        scheduler.tick(&doc, Local::now().naive_local(), notifier);
    }
}
