//! Configuration management.

use clap::Subcommand;
use medicycle_core::{Config, Theme};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the current configuration as JSON
    Show,
    /// Get or set the theme (dark/light)
    Theme {
        /// New theme; omit to print the current one
        value: Option<Theme>,
    },
    /// Get or set the reminder polling interval in seconds (max 60)
    Interval {
        /// New interval; omit to print the current one
        secs: Option<u64>,
    },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load();

    match action {
        ConfigAction::Show => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::Theme { value } => match value {
            Some(theme) => {
                config.ui.theme = theme;
                config.save()?;
                println!("Theme set to {theme}");
            }
            None => println!("{}", config.ui.theme),
        },
        ConfigAction::Interval { secs } => match secs {
            Some(secs) => {
                if secs == 0 || secs > 60 {
                    return Err("interval must be between 1 and 60 seconds".into());
                }
                config.reminders.interval_secs = secs;
                config.save()?;
                println!("Reminder interval set to {secs}s");
            }
            None => println!("{}", config.reminders.interval_secs),
        },
    }

    Ok(())
}
