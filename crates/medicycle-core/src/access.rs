//! Profile access guard.
//!
//! A profile is either Locked or Verified. Presenting the exact passkey
//! verifies it; logout, profile switch, profile deletion and bulk import
//! all drop back to Locked. There is a single verified slot (not one per
//! profile): verifying a different profile overwrites the marker, so the
//! previous profile is locked again on next access in a fresh session.
//!
//! No hashing, no rate limiting, no lockout. A wrong passkey is reported
//! to the caller and nothing changes.

use crate::error::AccessError;
use crate::model::Profile;
use crate::storage::Store;

/// Passkey gate over the store's verified-profile marker.
pub struct AccessGuard<'a> {
    store: &'a Store,
}

impl<'a> AccessGuard<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Whether this profile passed the passkey check this session.
    pub fn is_verified(&self, profile_id: &str) -> bool {
        self.store.verified_profile().as_deref() == Some(profile_id)
    }

    /// Verify a profile by exact passkey match. Success stores the marker,
    /// overwriting any previously verified profile.
    pub fn unlock(&self, profile: &Profile, passkey: &str) -> Result<(), AccessError> {
        if passkey != profile.passkey {
            return Err(AccessError::WrongPasskey);
        }
        self.store.set_verified_profile(&profile.id)?;
        Ok(())
    }

    /// Mark a profile verified without a passkey check. Used right after
    /// profile creation, where the creator knows the passkey they just set.
    pub fn grant(&self, profile_id: &str) -> Result<(), AccessError> {
        self.store.set_verified_profile(profile_id)?;
        Ok(())
    }

    /// Drop all verification state (logout, switch, delete, import).
    pub fn reset(&self) {
        self.store.clear_verified_profile();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Store, Profile) {
        let dir = TempDir::new().unwrap();
        let store = Store::at(dir.path());
        let profile = Profile::new("Ann", "40", "secret");
        (dir, store, profile)
    }

    #[test]
    fn wrong_passkey_leaves_profile_locked() {
        let (_dir, store, profile) = setup();
        let guard = AccessGuard::new(&store);

        let err = guard.unlock(&profile, "nope").unwrap_err();
        assert!(matches!(err, AccessError::WrongPasskey));
        assert!(!guard.is_verified(&profile.id));

        // No lockout: retrying with the right passkey works.
        guard.unlock(&profile, "secret").unwrap();
        assert!(guard.is_verified(&profile.id));
    }

    #[test]
    fn verified_short_circuits_reentry() {
        let (_dir, store, profile) = setup();
        let guard = AccessGuard::new(&store);

        guard.unlock(&profile, "secret").unwrap();
        // Re-entry within the same persisted session needs no passkey.
        assert!(guard.is_verified(&profile.id));
    }

    #[test]
    fn single_slot_overwrites_previous_verification() {
        let (_dir, store, first) = setup();
        let second = Profile::new("Bob", "35", "other");
        let guard = AccessGuard::new(&store);

        guard.unlock(&first, "secret").unwrap();
        guard.unlock(&second, "other").unwrap();

        assert!(guard.is_verified(&second.id));
        assert!(!guard.is_verified(&first.id));
    }

    #[test]
    fn reset_locks_everything() {
        let (_dir, store, profile) = setup();
        let guard = AccessGuard::new(&store);

        guard.unlock(&profile, "secret").unwrap();
        guard.reset();
        assert!(!guard.is_verified(&profile.id));
    }

    #[test]
    fn grant_verifies_without_passkey() {
        let (_dir, store, profile) = setup();
        let guard = AccessGuard::new(&store);

        guard.grant(&profile.id).unwrap();
        assert!(guard.is_verified(&profile.id));
    }
}
