use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of questionnaire slots carried by every profile.
pub const ANSWER_COUNT: usize = 5;

/// Profile role. Mutually exclusive and immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Seeker,
    Company,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Seeker => "seeker",
            Role::Company => "company",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid trait code {0:?}: expected 4 characters drawn from E/I, S/N, T/F, J/P")]
pub struct TraitCodeError(pub String);

/// 4-letter personality classification (e.g. "INTJ").
///
/// Each position has a two-letter alphabet; comparison is exact string
/// equality, case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TraitCode(String);

const POSITION_ALPHABET: [[char; 2]; 4] = [['E', 'I'], ['S', 'N'], ['T', 'F'], ['J', 'P']];

impl TraitCode {
    pub fn parse(code: &str) -> Result<Self, TraitCodeError> {
        let chars: Vec<char> = code.chars().collect();
        if chars.len() != POSITION_ALPHABET.len() {
            return Err(TraitCodeError(code.to_string()));
        }
        for (ch, allowed) in chars.iter().zip(POSITION_ALPHABET.iter()) {
            if !allowed.contains(ch) {
                return Err(TraitCodeError(code.to_string()));
            }
        }
        Ok(Self(code.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TraitCode {
    type Error = TraitCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TraitCode> for String {
    fn from(code: TraitCode) -> Self {
        code.0
    }
}

impl std::fmt::Display for TraitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Five independently-optional questionnaire answers.
///
/// Slots are unset until answered; the container does not enforce the
/// `[1,5]` value range, the answer scorer does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSet([Option<u8>; ANSWER_COUNT]);

impl AnswerSet {
    pub fn new(slots: [Option<u8>; ANSWER_COUNT]) -> Self {
        Self(slots)
    }

    /// All five slots answered.
    pub fn full(values: [u8; ANSWER_COUNT]) -> Self {
        Self(values.map(Some))
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: usize) -> Option<u8> {
        self.0.get(slot).copied().flatten()
    }

    pub fn answered_count(&self) -> usize {
        self.0.iter().filter(|slot| slot.is_some()).count()
    }
}

/// Role-specific profile payload.
///
/// Companies carry the ideal side of a pairing (preferred trait and ideal
/// answers); seekers carry the actual, self-reported side. The aggregator
/// treats both positionally through the accessors on [`Profile`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum RoleDetails {
    Seeker {
        #[serde(default)]
        mbti: Option<TraitCode>,
        #[serde(default)]
        answers: AnswerSet,
    },
    Company {
        #[serde(rename = "preferredMbti", default)]
        preferred_mbti: Option<TraitCode>,
        #[serde(default)]
        answers: AnswerSet,
    },
}

/// A seeker or company profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(flatten)]
    pub details: RoleDetails,
}

impl Profile {
    pub fn seeker(
        id: i64,
        username: impl Into<String>,
        email: impl Into<String>,
        mbti: Option<TraitCode>,
        answers: AnswerSet,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
            details: RoleDetails::Seeker { mbti, answers },
        }
    }

    pub fn company(
        id: i64,
        username: impl Into<String>,
        email: impl Into<String>,
        preferred_mbti: Option<TraitCode>,
        answers: AnswerSet,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
            details: RoleDetails::Company {
                preferred_mbti,
                answers,
            },
        }
    }

    pub fn role(&self) -> Role {
        match self.details {
            RoleDetails::Seeker { .. } => Role::Seeker,
            RoleDetails::Company { .. } => Role::Company,
        }
    }

    /// The profile's trait code: self-reported for seekers, preferred for
    /// companies. Unset is a valid incomplete-profile state.
    pub fn trait_code(&self) -> Option<&TraitCode> {
        match &self.details {
            RoleDetails::Seeker { mbti, .. } => mbti.as_ref(),
            RoleDetails::Company { preferred_mbti, .. } => preferred_mbti.as_ref(),
        }
    }

    pub fn answers(&self) -> &AnswerSet {
        match &self.details {
            RoleDetails::Seeker { answers, .. } => answers,
            RoleDetails::Company { answers, .. } => answers,
        }
    }
}

/// Persisted outcome of one seeker-side ranking run. Append-only; re-running
/// a ranking produces new rows even when a pair repeats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub seeker_id: i64,
    pub company_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trait_code_accepts_valid_codes() {
        for code in ["INTJ", "ESFP", "ENTP", "ISFJ"] {
            assert_eq!(TraitCode::parse(code).unwrap().as_str(), code);
        }
    }

    #[test]
    fn trait_code_rejects_bad_length_and_alphabet() {
        assert!(TraitCode::parse("INT").is_err());
        assert!(TraitCode::parse("INTJX").is_err());
        assert!(TraitCode::parse("XNTJ").is_err());
        // Lowercase is not in the alphabet; comparison is case-sensitive.
        assert!(TraitCode::parse("intj").is_err());
    }

    #[test]
    fn answer_set_tracks_unset_slots() {
        let answers = AnswerSet::new([Some(3), None, Some(5), None, None]);
        assert_eq!(answers.get(0), Some(3));
        assert_eq!(answers.get(1), None);
        assert_eq!(answers.answered_count(), 2);
        assert_eq!(AnswerSet::full([1, 2, 3, 4, 5]).answered_count(), 5);
    }

    #[test]
    fn profile_accessors_follow_role() {
        let code = TraitCode::parse("INTJ").unwrap();
        let seeker = Profile::seeker(
            1,
            "alice",
            "alice@example.com",
            Some(code.clone()),
            AnswerSet::empty(),
        );
        let company = Profile::company(
            2,
            "acme",
            "hr@acme.com",
            Some(code.clone()),
            AnswerSet::full([3; 5]),
        );

        assert_eq!(seeker.role(), Role::Seeker);
        assert_eq!(company.role(), Role::Company);
        assert_eq!(seeker.trait_code(), Some(&code));
        assert_eq!(company.trait_code(), Some(&code));
        assert_eq!(company.answers().answered_count(), 5);
    }

    #[test]
    fn profile_serializes_with_role_tag() {
        let profile = Profile::company(
            7,
            "acme",
            "hr@acme.com",
            Some(TraitCode::parse("ENTP").unwrap()),
            AnswerSet::full([5, 4, 3, 2, 1]),
        );

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["role"], "company");
        assert_eq!(json["preferredMbti"], "ENTP");

        let back: Profile = serde_json::from_value(json).unwrap();
        assert_eq!(back.role(), Role::Company);
        assert_eq!(back.answers().get(0), Some(5));
    }
}
