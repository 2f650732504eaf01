//! Dose ledger: the append-only history of taken doses.
//!
//! The ledger is a log, not a set. [`record_taken`] never deduplicates;
//! recording twice on the same day yields two entries. Callers that want
//! "only once per day" (the today view) check [`was_taken_on`] first.

use chrono::{DateTime, Local, NaiveDate};

use crate::error::CoreError;
use crate::model::{Document, HistoryEntry, Medicine, Profile};
use crate::recurrence::is_due;

/// True iff the ledger holds an entry for this profile and medicine whose
/// timestamp falls on `date` in local time.
pub fn was_taken_on(doc: &Document, profile_id: &str, med_id: &str, date: NaiveDate) -> bool {
    doc.history.iter().any(|h| {
        h.profile_id == profile_id && h.med_id == med_id && h.time_taken.date_naive() == date
    })
}

/// Append a taken-dose entry with a snapshot of the medicine's current name
/// and dosage. At-least-once semantics: no uniqueness constraint.
pub fn record_taken(
    doc: &mut Document,
    profile_id: &str,
    med_id: &str,
    now: DateTime<Local>,
) -> Result<HistoryEntry, CoreError> {
    let profile = doc
        .profile(profile_id)
        .ok_or_else(|| CoreError::ProfileNotFound(profile_id.into()))?;
    let med = profile
        .medicine(med_id)
        .ok_or_else(|| CoreError::MedicineNotFound(med_id.into()))?;

    let entry = HistoryEntry {
        profile_id: profile.id.clone(),
        med_id: med.id.clone(),
        med_name: med.name.clone(),
        dosage: med.dosage.clone(),
        time_taken: now,
    };
    doc.history.push(entry.clone());
    Ok(entry)
}

/// All entries for a profile, most recent first.
pub fn history_for<'a>(doc: &'a Document, profile_id: &str) -> Vec<&'a HistoryEntry> {
    let mut entries: Vec<&HistoryEntry> = doc
        .history
        .iter()
        .filter(|h| h.profile_id == profile_id)
        .collect();
    entries.sort_by(|a, b| b.time_taken.cmp(&a.time_taken));
    entries
}

/// A due medicine paired with its taken flag, for the today view.
#[derive(Debug, Clone, Copy)]
pub struct TodayEntry<'a> {
    pub medicine: &'a Medicine,
    pub taken: bool,
}

/// Medicines due on `date` for `profile`, each with whether a dose has
/// already been recorded that day.
pub fn today_status<'a>(
    doc: &'a Document,
    profile: &'a Profile,
    date: NaiveDate,
) -> Vec<TodayEntry<'a>> {
    profile
        .medicines
        .iter()
        .filter(|m| is_due(m, date))
        .map(|m| TodayEntry {
            medicine: m,
            taken: was_taken_on(doc, &profile.id, &m.id, date),
        })
        .collect()
}
