pub mod config;
pub mod data;
pub mod history;
pub mod med;
pub mod profile;
pub mod remind;
pub mod today;

use medicycle_core::{Document, Store};

/// Resolve the active profile id, self-healing a dangling
/// `currentProfileId` by clearing it and saving the document back.
pub fn require_active(
    store: &Store,
    doc: &mut Document,
) -> Result<String, Box<dyn std::error::Error>> {
    if doc.heal_current_profile() {
        store.save(doc)?;
    }
    doc.current_profile_id
        .clone()
        .ok_or_else(|| "no active profile; open one with 'medicycle profile open'".into())
}
