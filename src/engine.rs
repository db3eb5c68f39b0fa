use std::sync::Arc;

use thiserror::Error;

use crate::core::{MatchObserver, RankOutcome, Ranker, RankingPolicy, ScoreError, TracingObserver};
use crate::models::Role;
use crate::services::{ProfileStore, StoreError};

/// Errors surfaced by the matching operations.
#[derive(Debug, Error)]
pub enum MatchError {
    /// Subject profile absent, or present with the wrong role for the
    /// requested operation.
    #[error("not found: {0}")]
    NotFound(String),

    /// Profile store failure; match-record batches are never partially
    /// applied.
    #[error("persistence failure: {0}")]
    Persistence(#[source] StoreError),

    /// An answer outside the valid range reached the scorer.
    #[error("validation failure: {0}")]
    Validation(#[from] ScoreError),
}

impl From<StoreError> for MatchError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => MatchError::NotFound(what),
            other => MatchError::Persistence(other),
        }
    }
}

/// The matching engine: ranks a subject against the opposite-side population
/// and, on the seeker side, records the outcome.
///
/// One engine is shared across requests. Each invocation is synchronous and
/// independent; concurrent runs for the same subject each persist their own
/// batch (no deduplication, no mutual exclusion).
pub struct MatchEngine {
    store: Arc<dyn ProfileStore>,
    ranker: Ranker,
    observer: Arc<dyn MatchObserver>,
}

impl MatchEngine {
    pub fn new(store: Arc<dyn ProfileStore>, policy: RankingPolicy) -> Self {
        Self::with_observer(store, policy, Arc::new(TracingObserver))
    }

    pub fn with_observer(
        store: Arc<dyn ProfileStore>,
        policy: RankingPolicy,
        observer: Arc<dyn MatchObserver>,
    ) -> Self {
        Self {
            store,
            ranker: Ranker::new(policy),
            observer,
        }
    }

    /// Rank all companies for a seeker and persist the surviving pairs as one
    /// match-record batch, in ranked order.
    pub async fn seeker_matches(&self, seeker_id: i64) -> Result<RankOutcome, MatchError> {
        let seeker = self.fetch_subject(seeker_id, Role::Seeker).await?;
        let companies = self.store.fetch_by_role(Role::Company).await?;

        let outcome = self
            .ranker
            .rank_for_seeker(&seeker, companies, self.observer.as_ref())?;

        let company_ids: Vec<i64> = outcome.matches.iter().map(|m| m.profile.id).collect();
        if !company_ids.is_empty() {
            self.store
                .persist_match_batch(seeker_id, &company_ids)
                .await?;
            self.observer.batch_persisted(seeker_id, company_ids.len());
        }

        tracing::info!(
            seeker_id,
            returned = outcome.matches.len(),
            total_candidates = outcome.total_candidates,
            "seeker ranking complete"
        );

        Ok(outcome)
    }

    /// Rank all seekers for a company. No persistence side effect; repeated
    /// calls over unchanged data return identical output.
    pub async fn company_matches(&self, company_id: i64) -> Result<RankOutcome, MatchError> {
        let company = self.fetch_subject(company_id, Role::Company).await?;
        let seekers = self.store.fetch_by_role(Role::Seeker).await?;

        let outcome = self
            .ranker
            .rank_for_company(&company, seekers, self.observer.as_ref())?;

        tracing::info!(
            company_id,
            returned = outcome.matches.len(),
            total_candidates = outcome.total_candidates,
            "company ranking complete"
        );

        Ok(outcome)
    }

    pub async fn store_healthy(&self) -> bool {
        self.store.health_check().await.is_ok()
    }

    async fn fetch_subject(
        &self,
        id: i64,
        expected_role: Role,
    ) -> Result<crate::models::Profile, MatchError> {
        let profile = self.store.fetch_by_id(id).await?;
        if profile.role() != expected_role {
            return Err(MatchError::NotFound(format!(
                "no {} profile with id {}",
                expected_role, id
            )));
        }
        Ok(profile)
    }
}
