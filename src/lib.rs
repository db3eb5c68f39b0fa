//! MBTI Match - compatibility scoring and ranking service
//!
//! Matches two populations of profiles (seekers and companies) by a
//! 4-letter personality trait code plus five bounded questionnaire answers.
//! The core scores every opposite-side candidate for a subject, sorts and
//! cuts the results per role-specific policy, and records seeker-side
//! outcomes as durable match records.

pub mod config;
pub mod core;
pub mod engine;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{aggregate, score_answer, PairScore, RankOutcome, Ranker, RankingPolicy};
pub use crate::engine::{MatchEngine, MatchError};
pub use crate::models::{AnswerSet, MatchRecord, Profile, Role, TraitCode};
pub use crate::services::{MemoryStore, PostgresStore, ProfileStore};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        assert_eq!(score_answer(2, 4).unwrap(), 50);
        assert_eq!(RankingPolicy::default().seeker_limit, 10);
    }
}
