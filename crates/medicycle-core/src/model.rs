//! Persisted data model.
//!
//! The wire format is camelCase JSON, byte-compatible with exported
//! MediCycle data files, so a previously exported document imports cleanly.
//! Everything hangs off [`Document`]: the single root record that is loaded
//! wholesale on every read and replaced wholesale on every write.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Generate an opaque prefixed id, e.g. `med_5d1f...`.
pub fn new_id(prefix: &str) -> String {
    format!("{}_{}", prefix, uuid::Uuid::new_v4().simple())
}

/// A time of day with minute resolution, `"HH:MM"` (24h) on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
}

impl TimeOfDay {
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    /// Truncate a clock time to its scheduling minute.
    pub fn from_time(time: NaiveTime) -> Self {
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || format!("invalid time '{}', expected HH:MM (24h)", s);
        let (h, m) = s.split_once(':').ok_or_else(bad)?;
        let hour: u8 = h.parse().map_err(|_| bad())?;
        let minute: u8 = m.parse().map_err(|_| bad())?;
        Self::new(hour, minute).ok_or_else(bad)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(t: TimeOfDay) -> Self {
        t.to_string()
    }
}

/// Weekday, full English name on the wire (`"Sunday"` .. `"Saturday"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    /// Weekday of a calendar date.
    pub fn of(date: NaiveDate) -> Self {
        date.weekday().into()
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Sunday => "Sunday",
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
        }
    }
}

impl From<chrono::Weekday> for DayOfWeek {
    fn from(w: chrono::Weekday) -> Self {
        match w {
            chrono::Weekday::Sun => Self::Sunday,
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DayOfWeek {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sunday" => Ok(Self::Sunday),
            "monday" => Ok(Self::Monday),
            "tuesday" => Ok(Self::Tuesday),
            "wednesday" => Ok(Self::Wednesday),
            "thursday" => Ok(Self::Thursday),
            "friday" => Ok(Self::Friday),
            "saturday" => Ok(Self::Saturday),
            _ => Err(format!("unknown weekday '{}'", s)),
        }
    }
}

/// Whether a dose is taken before or after food.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodTiming {
    #[default]
    Before,
    After,
}

impl FoodTiming {
    pub fn label(self) -> &'static str {
        match self {
            Self::Before => "Before Food",
            Self::After => "After Food",
        }
    }
}

impl FromStr for FoodTiming {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "before" => Ok(Self::Before),
            "after" => Ok(Self::After),
            _ => Err(format!("expected 'before' or 'after', got '{}'", s)),
        }
    }
}

/// Recurrence schedule, internally tagged on the `cycle` field.
///
/// An unrecognized cycle value decodes to [`Cycle::Unknown`] instead of
/// failing the whole document; it evaluates as never due.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cycle", rename_all = "lowercase")]
pub enum Cycle {
    Daily,
    Weekly {
        #[serde(rename = "weekDays")]
        week_days: Vec<DayOfWeek>,
    },
    Monthly {
        #[serde(rename = "monthDay")]
        month_day: u8,
    },
    #[serde(other)]
    Unknown,
}

/// A registered medicine, owned exclusively by its profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medicine {
    pub id: String,
    pub name: String,
    pub dosage: String,
    pub time: TimeOfDay,
    #[serde(default)]
    pub food: FoodTiming,
    #[serde(flatten)]
    pub cycle: Cycle,
}

impl Medicine {
    pub fn new(
        name: impl Into<String>,
        dosage: impl Into<String>,
        time: TimeOfDay,
        food: FoodTiming,
        cycle: Cycle,
    ) -> Self {
        Self {
            id: new_id("med"),
            name: name.into(),
            dosage: dosage.into(),
            time,
            food,
            cycle,
        }
    }

    /// Invariants: weekly needs at least one weekday, monthly a day in 1-31.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.cycle {
            Cycle::Weekly { week_days } if week_days.is_empty() => {
                Err(ValidationError::EmptyWeekDays)
            }
            Cycle::Monthly { month_day } if !(1..=31).contains(month_day) => {
                Err(ValidationError::MonthDayOutOfRange(*month_day))
            }
            _ => Ok(()),
        }
    }

    /// Human-readable cycle description for lists and notifications.
    pub fn cycle_label(&self) -> String {
        match &self.cycle {
            Cycle::Daily => "Daily".into(),
            Cycle::Monthly { month_day } => format!("Monthly on {}", month_day),
            Cycle::Weekly { week_days } => {
                let days: Vec<&str> = week_days.iter().map(|d| d.name()).collect();
                format!("Weekly on {}", days.join(", "))
            }
            Cycle::Unknown => String::new(),
        }
    }
}

/// A user profile. Deleting one cascades to its history entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub age: String,
    pub passkey: String,
    #[serde(default)]
    pub medicines: Vec<Medicine>,
}

impl Profile {
    pub fn new(
        name: impl Into<String>,
        age: impl Into<String>,
        passkey: impl Into<String>,
    ) -> Self {
        Self {
            id: new_id("profile"),
            name: name.into(),
            age: age.into(),
            passkey: passkey.into(),
            medicines: Vec::new(),
        }
    }

    pub fn medicine(&self, id: &str) -> Option<&Medicine> {
        self.medicines.iter().find(|m| m.id == id)
    }

    pub fn medicine_mut(&mut self, id: &str) -> Option<&mut Medicine> {
        self.medicines.iter_mut().find(|m| m.id == id)
    }

    /// Remove a medicine by id. Returns false if it was not present.
    pub fn remove_medicine(&mut self, id: &str) -> bool {
        let before = self.medicines.len();
        self.medicines.retain(|m| m.id != id);
        self.medicines.len() != before
    }
}

/// One taken-dose event. Name and dosage are snapshots taken at write time
/// so history survives later edits or deletion of the medicine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub profile_id: String,
    pub med_id: String,
    pub med_name: String,
    pub dosage: String,
    #[serde(rename = "timeTakenISO")]
    pub time_taken: DateTime<Local>,
}

/// The persisted root record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub profiles: Vec<Profile>,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    #[serde(default)]
    pub current_profile_id: Option<String>,
}

impl Document {
    pub fn profile(&self, id: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    pub fn profile_mut(&mut self, id: &str) -> Option<&mut Profile> {
        self.profiles.iter_mut().find(|p| p.id == id)
    }

    /// The profile `currentProfileId` points at, if any.
    pub fn active_profile(&self) -> Option<&Profile> {
        self.current_profile_id
            .as_deref()
            .and_then(|id| self.profile(id))
    }

    /// Remove a profile, cascading deletion of its history entries and
    /// clearing `currentProfileId` if it pointed at the removed profile.
    /// Returns false if no such profile existed.
    pub fn remove_profile(&mut self, id: &str) -> bool {
        let before = self.profiles.len();
        self.profiles.retain(|p| p.id != id);
        if self.profiles.len() == before {
            return false;
        }
        self.history.retain(|h| h.profile_id != id);
        if self.current_profile_id.as_deref() == Some(id) {
            self.current_profile_id = None;
        }
        true
    }

    /// Clear a dangling `currentProfileId`. Returns true if the document
    /// changed and should be saved back.
    pub fn heal_current_profile(&mut self) -> bool {
        match self.current_profile_id.as_deref() {
            Some(id) if self.profile(id).is_none() => {
                self.current_profile_id = None;
                true
            }
            _ => false,
        }
    }
}
