use std::sync::Mutex;

use async_trait::async_trait;

use crate::models::{MatchRecord, Profile, Role};
use crate::services::store::{ProfileStore, StoreError};

/// In-process profile store.
///
/// Keeps profiles in insertion order, which is what `fetch_by_role` returns
/// and therefore the tie-break order ranking preserves. Backs the test suite
/// and small demo deployments; same atomicity contract as the Postgres store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    profiles: Mutex<Vec<Profile>>,
    matches: Mutex<Vec<MatchRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, profile: Profile) {
        self.profiles.lock().unwrap().push(profile);
    }

    /// Snapshot of all persisted match records, in insertion order.
    pub fn recorded_matches(&self) -> Vec<MatchRecord> {
        self.matches.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn fetch_by_id(&self, id: i64) -> Result<Profile, StoreError> {
        self.profiles
            .lock()
            .unwrap()
            .iter()
            .find(|profile| profile.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("profile {}", id)))
    }

    async fn fetch_by_role(&self, role: Role) -> Result<Vec<Profile>, StoreError> {
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .filter(|profile| profile.role() == role)
            .cloned()
            .collect())
    }

    async fn persist_match_batch(
        &self,
        seeker_id: i64,
        company_ids: &[i64],
    ) -> Result<(), StoreError> {
        let created_at = chrono::Utc::now();
        let batch: Vec<MatchRecord> = company_ids
            .iter()
            .map(|&company_id| MatchRecord {
                seeker_id,
                company_id,
                created_at,
            })
            .collect();

        // Single extend under the lock keeps the batch all-or-nothing.
        self.matches.lock().unwrap().extend(batch);
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
