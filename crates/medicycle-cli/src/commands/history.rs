//! Dose history, most recent first.

use clap::Subcommand;
use medicycle_core::{ledger, Store};

use super::require_active;

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List taken doses for the active profile
    List {
        /// Limit the number of entries shown
        #[arg(long)]
        limit: Option<usize>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: HistoryAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let mut doc = store.load();
    let profile_id = require_active(&store, &mut doc)?;

    match action {
        HistoryAction::List { limit, json } => {
            let mut entries = ledger::history_for(&doc, &profile_id);
            if let Some(limit) = limit {
                entries.truncate(limit);
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else if entries.is_empty() {
                println!("No history yet");
            } else {
                for h in entries {
                    println!(
                        "{}  {} {} \u{2022} {}",
                        h.time_taken.format("%Y-%m-%d %H:%M"),
                        h.med_name,
                        h.dosage,
                        h.time_taken.to_rfc3339()
                    );
                }
            }
        }
    }

    Ok(())
}
