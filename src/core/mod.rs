// Core algorithm exports
pub mod aggregate;
pub mod observer;
pub mod ranker;
pub mod scoring;

pub use aggregate::{aggregate, PairScore};
pub use observer::{MatchObserver, NoopObserver, TracingObserver};
pub use ranker::{RankOutcome, RankedMatch, Ranker, RankingPolicy};
pub use scoring::{score_answer, ScoreError, MAX_ANSWER, MAX_SCORE, MIN_ANSWER};
