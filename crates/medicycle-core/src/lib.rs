//! # MediCycle Core Library
//!
//! This library provides the core business logic for MediCycle, a personal
//! medication tracker. All operations are available via a standalone CLI
//! binary; a GUI shell would be a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Model**: strongly-typed document (profiles, medicines, dose history)
//!   with a wire format compatible with exported MediCycle JSON files
//! - **Recurrence**: pure evaluation of daily/weekly/monthly schedules
//! - **Ledger**: append-only log of taken doses
//! - **Reminder**: a polled scheduler that notifies at most once per
//!   (profile, medicine, date, minute)
//! - **Access**: passkey gate with a single verified-profile slot
//! - **Storage**: JSON document store plus TOML configuration
//!
//! ## Key Components
//!
//! - [`Document`]: the persisted root record
//! - [`ReminderScheduler`]: the deduplicating reminder engine
//! - [`Store`]: document persistence (load on read, replace on write)
//! - [`AccessGuard`]: passkey verification state machine

pub mod access;
pub mod error;
pub mod ledger;
pub mod model;
pub mod recurrence;
pub mod reminder;
pub mod storage;

pub use access::AccessGuard;
pub use error::{AccessError, ConfigError, CoreError, ImportError, StoreError, ValidationError};
pub use ledger::TodayEntry;
pub use model::{Cycle, DayOfWeek, Document, FoodTiming, HistoryEntry, Medicine, Profile, TimeOfDay};
pub use recurrence::is_due;
pub use reminder::{Notify, ReminderScheduler};
pub use storage::{data_dir, Config, Store, Theme};
