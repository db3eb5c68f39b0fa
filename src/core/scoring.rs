use thiserror::Error;

/// Lowest and highest valid questionnaire answer.
pub const MIN_ANSWER: u8 = 1;
pub const MAX_ANSWER: u8 = 5;

/// Score awarded for an exact answer match.
pub const MAX_SCORE: u8 = 100;

/// Score lost per point of difference between ideal and actual.
const SCORE_STEP: u8 = 25;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("answer {value} outside allowed range 1..=5")]
pub struct ScoreError {
    pub value: u8,
}

/// Similarity score (0-100) for one (ideal, actual) answer pair.
///
/// Linear falloff: each point of difference costs 25, and a difference of 4
/// or more scores 0. With the current `[1,5]` range the `>= 4` branch only
/// fires at exactly 4; it is kept as a boundary in case the range widens.
///
/// Values outside `[1,5]` are rejected rather than clamped.
pub fn score_answer(ideal: u8, actual: u8) -> Result<u8, ScoreError> {
    for value in [ideal, actual] {
        if !(MIN_ANSWER..=MAX_ANSWER).contains(&value) {
            return Err(ScoreError { value });
        }
    }

    let difference = ideal.abs_diff(actual);
    if difference >= 4 {
        Ok(0)
    } else {
        Ok(MAX_SCORE - SCORE_STEP * difference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_falls_off_linearly() {
        assert_eq!(score_answer(1, 1), Ok(100));
        assert_eq!(score_answer(1, 2), Ok(75));
        assert_eq!(score_answer(1, 3), Ok(50));
        assert_eq!(score_answer(1, 4), Ok(25));
        assert_eq!(score_answer(1, 5), Ok(0));
    }

    #[test]
    fn score_is_symmetric() {
        for ideal in MIN_ANSWER..=MAX_ANSWER {
            for actual in MIN_ANSWER..=MAX_ANSWER {
                assert_eq!(score_answer(ideal, actual), score_answer(actual, ideal));
            }
        }
    }

    #[test]
    fn identical_answers_score_full() {
        for value in MIN_ANSWER..=MAX_ANSWER {
            assert_eq!(score_answer(value, value), Ok(100));
        }
    }

    #[test]
    fn out_of_range_answers_are_rejected() {
        assert_eq!(score_answer(0, 3), Err(ScoreError { value: 0 }));
        assert_eq!(score_answer(3, 6), Err(ScoreError { value: 6 }));
        assert_eq!(score_answer(200, 1), Err(ScoreError { value: 200 }));
    }
}
