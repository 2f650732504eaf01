//! Today view: due medicines and dose recording.

use chrono::Local;
use clap::Subcommand;
use medicycle_core::{ledger, Store};

use super::require_active;

#[derive(Subcommand)]
pub enum TodayAction {
    /// List medicines due today, with taken status
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Record a dose as taken now
    Take {
        /// Medicine id
        id: String,
    },
}

pub fn run(action: TodayAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let mut doc = store.load();
    let profile_id = require_active(&store, &mut doc)?;
    let today = Local::now().date_naive();

    match action {
        TodayAction::List { json } => {
            let profile = doc
                .profile(&profile_id)
                .expect("active profile was just resolved");
            let status = ledger::today_status(&doc, profile, today);
            if json {
                #[derive(serde::Serialize)]
                struct Row<'a> {
                    id: &'a str,
                    name: &'a str,
                    dosage: &'a str,
                    time: String,
                    taken: bool,
                }
                let rows: Vec<Row> = status
                    .iter()
                    .map(|e| Row {
                        id: &e.medicine.id,
                        name: &e.medicine.name,
                        dosage: &e.medicine.dosage,
                        time: e.medicine.time.to_string(),
                        taken: e.taken,
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else if status.is_empty() {
                println!("No medicines scheduled for today");
            } else {
                for e in &status {
                    let badge = if e.taken { " [taken]" } else { "" };
                    println!(
                        "{}  {} {} at {} ({}){}",
                        e.medicine.id,
                        e.medicine.name,
                        e.medicine.dosage,
                        e.medicine.time,
                        e.medicine.food.label(),
                        badge
                    );
                }
            }
        }
        TodayAction::Take { id } => {
            // The ledger itself is append-only and would happily take two
            // entries; the refusal lives here, like the disabled button in
            // the original UI.
            if ledger::was_taken_on(&doc, &profile_id, &id, today) {
                return Err("already marked taken today".into());
            }
            let entry = ledger::record_taken(&mut doc, &profile_id, &id, Local::now())?;
            store.save(&doc)?;
            println!("Marked {} taken at {}", entry.med_name, entry.time_taken);
        }
    }

    Ok(())
}
