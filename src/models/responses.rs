use serde::{Deserialize, Serialize};

/// One ranked company for a seeker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeekerMatchEntry {
    #[serde(rename = "companyId")]
    pub company_id: i64,
    #[serde(rename = "companyName")]
    pub company_name: String,
    #[serde(rename = "preferredMbti")]
    pub preferred_mbti: Option<String>,
    #[serde(rename = "mbtiMatch")]
    pub mbti_match: bool,
    #[serde(rename = "percentageScore")]
    pub percentage_score: f64,
    #[serde(rename = "questionCount")]
    pub question_count: u32,
}

/// Response for the seeker-side ranking endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeekerMatchesResponse {
    pub matches: Vec<SeekerMatchEntry>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// One ranked seeker for a company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyMatchEntry {
    pub username: String,
    pub email: String,
    pub mbti: Option<String>,
    #[serde(rename = "mbtiMatch")]
    pub mbti_match: bool,
    #[serde(rename = "percentageScore")]
    pub percentage_score: f64,
    #[serde(rename = "questionCount")]
    pub question_count: u32,
}

/// Response for the company-side ranking endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyMatchesResponse {
    pub matches: Vec<CompanyMatchEntry>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
