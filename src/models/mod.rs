// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AnswerSet, MatchRecord, Profile, Role, RoleDetails, TraitCode, TraitCodeError, ANSWER_COUNT,
};
pub use requests::MatchQueryRequest;
pub use responses::{
    CompanyMatchEntry, CompanyMatchesResponse, ErrorResponse, HealthResponse, SeekerMatchEntry,
    SeekerMatchesResponse,
};
