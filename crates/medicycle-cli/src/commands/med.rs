//! Medicine management commands for the active profile.

use clap::Subcommand;
use medicycle_core::{Cycle, DayOfWeek, FoodTiming, Medicine, Store, TimeOfDay};

use super::require_active;

#[derive(Subcommand)]
pub enum MedAction {
    /// Add a medicine
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        dosage: String,
        /// Time of day, HH:MM (24h)
        #[arg(long)]
        time: TimeOfDay,
        /// before or after food
        #[arg(long, default_value = "before")]
        food: FoodTiming,
        /// daily, weekly or monthly
        #[arg(long, default_value = "daily")]
        cycle: String,
        /// Day of month (1-31), for monthly cycles
        #[arg(long)]
        month_day: Option<u8>,
        /// Comma-separated weekday names, for weekly cycles
        #[arg(long)]
        week_days: Option<String>,
    },
    /// Edit a medicine (only the given fields change)
    Edit {
        /// Medicine id
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        dosage: Option<String>,
        #[arg(long)]
        time: Option<TimeOfDay>,
        #[arg(long)]
        food: Option<FoodTiming>,
        #[arg(long)]
        cycle: Option<String>,
        #[arg(long)]
        month_day: Option<u8>,
        #[arg(long)]
        week_days: Option<String>,
    },
    /// Remove a medicine
    Remove {
        /// Medicine id
        id: String,
    },
    /// List all medicines of the active profile
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn parse_cycle(
    cycle: &str,
    month_day: Option<u8>,
    week_days: Option<&str>,
) -> Result<Cycle, Box<dyn std::error::Error>> {
    match cycle.to_ascii_lowercase().as_str() {
        "daily" => Ok(Cycle::Daily),
        "monthly" => {
            let month_day = month_day.ok_or("monthly cycle requires --month-day")?;
            Ok(Cycle::Monthly { month_day })
        }
        "weekly" => {
            let raw = week_days.ok_or("weekly cycle requires --week-days")?;
            let days = raw
                .split(',')
                .map(|d| d.trim().parse::<DayOfWeek>())
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Cycle::Weekly { week_days: days })
        }
        other => Err(format!("unknown cycle '{other}', expected daily, weekly or monthly").into()),
    }
}

pub fn run(action: MedAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let mut doc = store.load();
    let profile_id = require_active(&store, &mut doc)?;

    match action {
        MedAction::Add {
            name,
            dosage,
            time,
            food,
            cycle,
            month_day,
            week_days,
        } => {
            let cycle = parse_cycle(&cycle, month_day, week_days.as_deref())?;
            let med = Medicine::new(name, dosage, time, food, cycle);
            med.validate()?;
            let id = med.id.clone();
            doc.profile_mut(&profile_id)
                .expect("active profile was just resolved")
                .medicines
                .push(med);
            store.save(&doc)?;
            println!("Added medicine {id}");
        }
        MedAction::Edit {
            id,
            name,
            dosage,
            time,
            food,
            cycle,
            month_day,
            week_days,
        } => {
            let new_cycle = match cycle {
                Some(c) => Some(parse_cycle(&c, month_day, week_days.as_deref())?),
                None => None,
            };
            let profile = doc
                .profile_mut(&profile_id)
                .expect("active profile was just resolved");
            let med = profile
                .medicine_mut(&id)
                .ok_or_else(|| format!("medicine '{id}' not found"))?;
            if let Some(name) = name {
                med.name = name;
            }
            if let Some(dosage) = dosage {
                med.dosage = dosage;
            }
            if let Some(time) = time {
                med.time = time;
            }
            if let Some(food) = food {
                med.food = food;
            }
            if let Some(cycle) = new_cycle {
                med.cycle = cycle;
            }
            med.validate()?;
            store.save(&doc)?;
            println!("Updated medicine {id}");
        }
        MedAction::Remove { id } => {
            let profile = doc
                .profile_mut(&profile_id)
                .expect("active profile was just resolved");
            if !profile.remove_medicine(&id) {
                return Err(format!("medicine '{id}' not found").into());
            }
            store.save(&doc)?;
            println!("Removed medicine {id}");
        }
        MedAction::List { json } => {
            let profile = doc
                .profile(&profile_id)
                .expect("active profile was just resolved");
            if json {
                println!("{}", serde_json::to_string_pretty(&profile.medicines)?);
            } else if profile.medicines.is_empty() {
                println!("No medicines added yet");
            } else {
                for m in &profile.medicines {
                    println!(
                        "{}  {} {} at {} ({}) \u{2022} {}",
                        m.id,
                        m.name,
                        m.dosage,
                        m.time,
                        m.food.label(),
                        m.cycle_label()
                    );
                }
            }
        }
    }

    Ok(())
}
