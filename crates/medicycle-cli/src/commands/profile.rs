//! Profile management commands.
//!
//! Opening a profile enforces the passkey gate with the verified
//! short-circuit: a profile that already passed the check this session
//! opens without `--passkey`.

use clap::Subcommand;
use medicycle_core::{AccessGuard, Profile, Store};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Create a new profile and open it
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        age: String,
        #[arg(long)]
        passkey: String,
    },
    /// List all profiles
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Open a profile (requires --passkey unless already verified)
    Open {
        /// Profile id
        id: String,
        #[arg(long)]
        passkey: Option<String>,
    },
    /// Close the active profile and clear verification
    Close,
    /// Delete a profile and all its history
    Delete {
        /// Profile id
        id: String,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: ProfileAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;

    match action {
        ProfileAction::Create { name, age, passkey } => {
            let mut doc = store.load();
            let profile = Profile::new(name, age, passkey);
            let id = profile.id.clone();
            doc.profiles.push(profile);
            doc.current_profile_id = Some(id.clone());
            store.save(&doc)?;
            // The creator just chose the passkey; no need to ask for it.
            AccessGuard::new(&store).grant(&id)?;
            println!("Created and opened profile {id}");
        }
        ProfileAction::List { json } => {
            let doc = store.load();
            if json {
                #[derive(serde::Serialize)]
                struct Row<'a> {
                    id: &'a str,
                    name: &'a str,
                    age: &'a str,
                    medicines: usize,
                }
                let rows: Vec<Row> = doc
                    .profiles
                    .iter()
                    .map(|p| Row {
                        id: &p.id,
                        name: &p.name,
                        age: &p.age,
                        medicines: p.medicines.len(),
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else if doc.profiles.is_empty() {
                println!("No profiles yet");
            } else {
                let active = doc.current_profile_id.as_deref();
                for p in &doc.profiles {
                    let marker = if active == Some(p.id.as_str()) { "*" } else { " " };
                    println!("{} {}  {} (age {})", marker, p.id, p.name, p.age);
                }
            }
        }
        ProfileAction::Open { id, passkey } => {
            let mut doc = store.load();
            let guard = AccessGuard::new(&store);
            {
                let profile = doc
                    .profile(&id)
                    .ok_or_else(|| format!("profile '{id}' not found"))?;
                if !guard.is_verified(&id) {
                    let passkey =
                        passkey.ok_or("passkey required: pass --passkey for this profile")?;
                    guard.unlock(profile, &passkey)?;
                }
            }
            doc.current_profile_id = Some(id.clone());
            store.save(&doc)?;
            println!("Opened profile {id}");
        }
        ProfileAction::Close => {
            let mut doc = store.load();
            doc.current_profile_id = None;
            store.save(&doc)?;
            AccessGuard::new(&store).reset();
            println!("Closed");
        }
        ProfileAction::Delete { id, yes } => {
            if !yes {
                return Err("deletion removes the profile and all its history; pass --yes to confirm".into());
            }
            let mut doc = store.load();
            if !doc.remove_profile(&id) {
                return Err(format!("profile '{id}' not found").into());
            }
            store.save(&doc)?;
            let guard = AccessGuard::new(&store);
            if guard.is_verified(&id) {
                guard.reset();
            }
            println!("Deleted profile {id}");
        }
    }

    Ok(())
}
