//! HTTP API DTOs.

use serde::{Deserialize, Serialize};

/// Response of `POST /upload`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponseDto {
    pub file_name: String,
}

/// Error body of HTTP endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponseDto {
    pub error: String,
}

/// Entry of `GET /api/presence`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub connection_id: String,
    pub name: String,
    /// RFC 3339
    pub joined_at: String,
}
