//! Data export and import.
//!
//! Import wholesale-replaces the persisted document and clears the
//! verified-profile marker; there is no merge and no migration.

use std::path::PathBuf;

use clap::Subcommand;
use medicycle_core::Store;

#[derive(Subcommand)]
pub enum DataAction {
    /// Export the full document as pretty-printed JSON
    Export {
        /// Write to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Replace all data with the contents of a JSON file
    Import {
        /// Path to a previously exported file
        file: PathBuf,
        /// Confirm replacing the current data
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: DataAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;

    match action {
        DataAction::Export { out } => {
            let json = store.export_json()?;
            match out {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("Exported to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        DataAction::Import { file, yes } => {
            if !yes {
                return Err("import replaces all current data; pass --yes to confirm".into());
            }
            let raw = std::fs::read_to_string(&file)?;
            let doc = store.import_json(&raw)?;
            println!(
                "Imported {} profile(s), {} history entr(ies)",
                doc.profiles.len(),
                doc.history.len()
            );
        }
    }

    Ok(())
}
