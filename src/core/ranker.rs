use crate::core::aggregate::{aggregate, PairScore};
use crate::core::observer::MatchObserver;
use crate::core::scoring::ScoreError;
use crate::models::Profile;

/// Cut points for the two ranking policies.
#[derive(Debug, Clone, Copy)]
pub struct RankingPolicy {
    /// Result count for seeker-side ranking.
    pub seeker_limit: usize,
    /// Per-group result count (trait-matched and non-matched) for
    /// company-side ranking.
    pub company_group_limit: usize,
}

impl Default for RankingPolicy {
    fn default() -> Self {
        Self {
            seeker_limit: 10,
            company_group_limit: 5,
        }
    }
}

/// One ranked counterpart: the candidate profile plus its pair score.
#[derive(Debug, Clone)]
pub struct RankedMatch {
    pub profile: Profile,
    pub score: PairScore,
}

/// Result of one ranking run.
#[derive(Debug, Clone)]
pub struct RankOutcome {
    pub matches: Vec<RankedMatch>,
    pub total_candidates: usize,
}

/// Ranking engine: scores a subject against an opposite-side population and
/// applies the role-specific ordering and cut policy.
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    policy: RankingPolicy,
}

impl Ranker {
    pub fn new(policy: RankingPolicy) -> Self {
        Self { policy }
    }

    /// Rank all companies for a seeker.
    ///
    /// Every candidate is kept, including zero-overlap ones at score 0.
    /// Ordering is descending by percentage score; the sort is stable and no
    /// secondary key is applied, so ties keep the candidate iteration order.
    pub fn rank_for_seeker(
        &self,
        seeker: &Profile,
        companies: Vec<Profile>,
        observer: &dyn MatchObserver,
    ) -> Result<RankOutcome, ScoreError> {
        let total_candidates = companies.len();

        let mut matches = Vec::with_capacity(total_candidates);
        for company in companies {
            let score = aggregate(&company, seeker)?;
            observer.candidate_scored(seeker.id, company.id, &score);
            matches.push(RankedMatch {
                profile: company,
                score,
            });
        }

        sort_descending(&mut matches);
        matches.truncate(self.policy.seeker_limit);

        Ok(RankOutcome {
            matches,
            total_candidates,
        })
    }

    /// Rank all seekers for a company.
    ///
    /// Unlike the seeker side, candidates with no overlapping answered
    /// questions are discarded. Survivors are partitioned by trait match;
    /// each group is sorted independently and cut to the group limit, and
    /// trait-matched candidates always precede non-matched ones regardless
    /// of score.
    pub fn rank_for_company(
        &self,
        company: &Profile,
        seekers: Vec<Profile>,
        observer: &dyn MatchObserver,
    ) -> Result<RankOutcome, ScoreError> {
        let total_candidates = seekers.len();

        let mut matched = Vec::new();
        let mut unmatched = Vec::new();
        for seeker in seekers {
            let score = aggregate(company, &seeker)?;
            observer.candidate_scored(company.id, seeker.id, &score);

            if score.question_count == 0 {
                continue;
            }

            let entry = RankedMatch {
                profile: seeker,
                score,
            };
            if score.mbti_match {
                matched.push(entry);
            } else {
                unmatched.push(entry);
            }
        }

        sort_descending(&mut matched);
        sort_descending(&mut unmatched);
        matched.truncate(self.policy.company_group_limit);
        unmatched.truncate(self.policy.company_group_limit);

        let mut matches = matched;
        matches.append(&mut unmatched);

        Ok(RankOutcome {
            matches,
            total_candidates,
        })
    }
}

/// Stable descending sort by percentage score; equal scores keep the order
/// the store returned the candidates in.
fn sort_descending(matches: &mut [RankedMatch]) {
    matches.sort_by(|a, b| {
        b.score
            .percentage_score
            .partial_cmp(&a.score.percentage_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::observer::NoopObserver;
    use crate::models::{AnswerSet, TraitCode};

    fn code(s: &str) -> Option<TraitCode> {
        Some(TraitCode::parse(s).unwrap())
    }

    fn seeker(id: i64, mbti: Option<TraitCode>, answers: AnswerSet) -> Profile {
        Profile::seeker(id, format!("seeker{}", id), format!("s{}@example.com", id), mbti, answers)
    }

    fn company(id: i64, mbti: Option<TraitCode>, answers: AnswerSet) -> Profile {
        Profile::company(id, format!("company{}", id), format!("c{}@example.com", id), mbti, answers)
    }

    /// Company whose ideal answers put it `distance` points away from a
    /// seeker answering all 5s.
    fn company_at_distance(id: i64, distance: u8) -> Profile {
        company(id, code("INTJ"), AnswerSet::full([5 - distance; 5]))
    }

    #[test]
    fn seeker_ranking_sorts_descending_and_cuts_at_limit() {
        let ranker = Ranker::default();
        let subject = seeker(100, code("INTJ"), AnswerSet::full([5; 5]));

        // 12 companies, scores 100, 75, 50, 25, 0 cycling.
        let companies: Vec<Profile> = (0..12)
            .map(|i| company_at_distance(i, (i % 5) as u8))
            .collect();

        let outcome = ranker
            .rank_for_seeker(&subject, companies, &NoopObserver)
            .unwrap();

        assert_eq!(outcome.total_candidates, 12);
        assert_eq!(outcome.matches.len(), 10);
        for pair in outcome.matches.windows(2) {
            assert!(pair[0].score.percentage_score >= pair[1].score.percentage_score);
        }
        assert_eq!(outcome.matches[0].score.percentage_score, 100.0);
    }

    #[test]
    fn seeker_ranking_ties_keep_store_order() {
        let ranker = Ranker::default();
        let subject = seeker(100, None, AnswerSet::full([3; 5]));

        // All candidates score identically; order must survive the sort.
        let companies: Vec<Profile> = (1..=4)
            .map(|i| company(i, None, AnswerSet::full([3; 5])))
            .collect();

        let outcome = ranker
            .rank_for_seeker(&subject, companies, &NoopObserver)
            .unwrap();

        let ids: Vec<i64> = outcome.matches.iter().map(|m| m.profile.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn seeker_ranking_keeps_zero_overlap_candidates() {
        let ranker = Ranker::default();
        let subject = seeker(100, code("INTJ"), AnswerSet::full([5; 5]));

        let companies = vec![
            company(1, code("INTJ"), AnswerSet::empty()),
            company(2, code("INTJ"), AnswerSet::full([5; 5])),
        ];

        let outcome = ranker
            .rank_for_seeker(&subject, companies, &NoopObserver)
            .unwrap();

        assert_eq!(outcome.matches.len(), 2);
        assert_eq!(outcome.matches[0].profile.id, 2);
        assert_eq!(outcome.matches[1].profile.id, 1);
        assert_eq!(outcome.matches[1].score.question_count, 0);
        assert_eq!(outcome.matches[1].score.percentage_score, 0.0);
    }

    #[test]
    fn seeker_ranking_of_empty_population_is_empty() {
        let ranker = Ranker::default();
        let subject = seeker(100, code("INTJ"), AnswerSet::full([5; 5]));

        let outcome = ranker
            .rank_for_seeker(&subject, Vec::new(), &NoopObserver)
            .unwrap();

        assert!(outcome.matches.is_empty());
        assert_eq!(outcome.total_candidates, 0);
    }

    #[test]
    fn company_ranking_discards_zero_overlap_candidates() {
        let ranker = Ranker::default();
        let subject = company(100, code("INTJ"), AnswerSet::full([5; 5]));

        let seekers = vec![
            seeker(1, code("INTJ"), AnswerSet::empty()),
            seeker(2, code("INTJ"), AnswerSet::full([5; 5])),
        ];

        let outcome = ranker
            .rank_for_company(&subject, seekers, &NoopObserver)
            .unwrap();

        assert_eq!(outcome.total_candidates, 2);
        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.matches[0].profile.id, 2);
    }

    #[test]
    fn company_ranking_puts_trait_matches_first_regardless_of_score() {
        let ranker = Ranker::default();
        let subject = company(100, code("INTJ"), AnswerSet::full([5; 5]));

        // Six trait-matched seekers with low scores, six non-matched with
        // high scores.
        let mut seekers = Vec::new();
        for i in 0..6 {
            // Difference 3 on every question: 25%.
            seekers.push(seeker(i, code("INTJ"), AnswerSet::full([2; 5])));
        }
        for i in 6..12 {
            seekers.push(seeker(i, code("ESFP"), AnswerSet::full([5; 5])));
        }

        let outcome = ranker
            .rank_for_company(&subject, seekers, &NoopObserver)
            .unwrap();

        assert_eq!(outcome.matches.len(), 10);
        for entry in &outcome.matches[..5] {
            assert!(entry.score.mbti_match);
            assert_eq!(entry.score.percentage_score, 25.0);
        }
        for entry in &outcome.matches[5..] {
            assert!(!entry.score.mbti_match);
            assert_eq!(entry.score.percentage_score, 100.0);
        }
    }

    #[test]
    fn company_ranking_returns_partial_groups_without_padding() {
        let ranker = Ranker::default();
        let subject = company(100, code("INTJ"), AnswerSet::full([4; 5]));

        let seekers = vec![
            seeker(1, code("INTJ"), AnswerSet::full([4; 5])),
            seeker(2, code("ESFP"), AnswerSet::full([4; 5])),
            seeker(3, code("ESFP"), AnswerSet::full([2; 5])),
        ];

        let outcome = ranker
            .rank_for_company(&subject, seekers, &NoopObserver)
            .unwrap();

        assert_eq!(outcome.matches.len(), 3);
        assert_eq!(outcome.matches[0].profile.id, 1);
        // Non-matched group sorted descending among themselves.
        assert_eq!(outcome.matches[1].profile.id, 2);
        assert_eq!(outcome.matches[2].profile.id, 3);
    }

    #[test]
    fn custom_policy_limits_are_honored() {
        let ranker = Ranker::new(RankingPolicy {
            seeker_limit: 3,
            company_group_limit: 1,
        });
        let subject = seeker(100, code("INTJ"), AnswerSet::full([5; 5]));

        let companies: Vec<Profile> = (0..8).map(|i| company_at_distance(i, 0)).collect();
        let outcome = ranker
            .rank_for_seeker(&subject, companies, &NoopObserver)
            .unwrap();
        assert_eq!(outcome.matches.len(), 3);
    }
}
