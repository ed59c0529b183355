//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// One entry of `GET /api/participants`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub session_id: String,
    pub name: String,
    /// RFC 3339 (JST)
    pub connected_at: String,
}

/// Response body of `GET /api/participants`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantListDto {
    pub count: usize,
    pub participants: Vec<ParticipantDto>,
}
