//! Reminder scheduler commands.
//!
//! `run` drives the polling loop until ctrl-c. The console notifier stands
//! in for a desktop notification capability; a GUI shell would provide its
//! own [`Notify`] implementation.

use std::time::Duration;

use chrono::Local;
use clap::Subcommand;
use medicycle_core::reminder;
use medicycle_core::{Config, Notify, ReminderScheduler, Store};

#[derive(Subcommand)]
pub enum RemindAction {
    /// Poll for due reminders until interrupted
    Run {
        /// Polling interval in seconds (max 60); defaults to the
        /// configured value
        #[arg(long)]
        interval: Option<u64>,
    },
    /// Perform a single reminder sweep and exit
    Once,
}

struct ConsoleNotifier;

impl Notify for ConsoleNotifier {
    fn notify(&self, title: &str, body: &str) {
        println!("[notify] {title}: {body}");
    }
}

pub fn run(action: RemindAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let mut scheduler = ReminderScheduler::new();

    match action {
        RemindAction::Run { interval } => {
            let config = Config::load();
            if !config.reminders.enabled {
                return Err("reminders are disabled; enable them in the configuration".into());
            }
            let every = match interval {
                Some(secs) if secs == 0 || secs > 60 => {
                    return Err("interval must be between 1 and 60 seconds".into());
                }
                Some(secs) => Duration::from_secs(secs),
                None => config.reminders.poll_interval(),
            };

            println!("Polling every {}s, ctrl-c to stop", every.as_secs());
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(async {
                tokio::select! {
                    _ = reminder::run(&store, &mut scheduler, &ConsoleNotifier, every) => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
            });
            println!("Stopped");
        }
        RemindAction::Once => {
            let doc = store.load();
            let emitted = scheduler.tick(&doc, Local::now().naive_local(), &ConsoleNotifier);
            println!("{emitted} notification(s) emitted");
        }
    }

    Ok(())
}
