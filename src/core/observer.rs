use crate::core::aggregate::PairScore;

/// Observability hook for the ranking pipeline.
///
/// Invoked at two defined points: after each candidate's pair score is
/// computed, and after a match-record batch is committed. Implementations
/// must not influence control flow; both methods default to no-ops.
pub trait MatchObserver: Send + Sync {
    fn candidate_scored(&self, subject_id: i64, candidate_id: i64, score: &PairScore) {
        let _ = (subject_id, candidate_id, score);
    }

    fn batch_persisted(&self, seeker_id: i64, record_count: usize) {
        let _ = (seeker_id, record_count);
    }
}

/// Default observer: forwards both events to `tracing` at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl MatchObserver for TracingObserver {
    fn candidate_scored(&self, subject_id: i64, candidate_id: i64, score: &PairScore) {
        tracing::debug!(
            subject_id,
            candidate_id,
            percentage_score = score.percentage_score,
            question_count = score.question_count,
            mbti_match = score.mbti_match,
            "candidate scored"
        );
    }

    fn batch_persisted(&self, seeker_id: i64, record_count: usize) {
        tracing::debug!(seeker_id, record_count, "match record batch persisted");
    }
}

/// Observer that records nothing. Useful in benchmarks and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl MatchObserver for NoopObserver {}
