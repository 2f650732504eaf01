use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "medicycle", version, about = "MediCycle CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Profile management
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Medicine management for the active profile
    Med {
        #[command(subcommand)]
        action: commands::med::MedAction,
    },
    /// Today's due medicines
    Today {
        #[command(subcommand)]
        action: commands::today::TodayAction,
    },
    /// Dose history
    History {
        #[command(subcommand)]
        action: commands::history::HistoryAction,
    },
    /// Data export and import
    Data {
        #[command(subcommand)]
        action: commands::data::DataAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Reminder scheduler
    Remind {
        #[command(subcommand)]
        action: commands::remind::RemindAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Profile { action } => commands::profile::run(action),
        Commands::Med { action } => commands::med::run(action),
        Commands::Today { action } => commands::today::run(action),
        Commands::History { action } => commands::history::run(action),
        Commands::Data { action } => commands::data::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Remind { action } => commands::remind::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
