use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body for both ranking endpoints: the subject profile to rank for.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchQueryRequest {
    #[validate(range(min = 1))]
    #[serde(alias = "profile_id", rename = "profileId")]
    pub profile_id: i64,
}
