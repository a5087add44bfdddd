//! HTTP endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartError},
    http::StatusCode,
    response::Html,
};

use crate::{
    infrastructure::dto::http::{ErrorResponseDto, ParticipantDto, UploadResponseDto},
    ui::state::AppState,
};

/// Multipart field carrying the uploaded file.
const FILE_FIELD: &str = "file";

const INDEX_HTML: &str = include_str!("../assets/index.html");

type ErrorResponse = (StatusCode, Json<ErrorResponseDto>);

fn error_response(status: StatusCode, error: impl Into<String>) -> ErrorResponse {
    (
        status,
        Json(ErrorResponseDto {
            error: error.into(),
        }),
    )
}

fn multipart_error(e: MultipartError) -> ErrorResponse {
    tracing::warn!("Rejected upload: {}", e.body_text());
    error_response(e.status(), e.body_text())
}

/// The browser client
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Current presence, ordered by connection id
pub async fn get_presence(State(state): State<Arc<AppState>>) -> Json<Vec<ParticipantDto>> {
    let participants = state.get_presence_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(participants.into_iter().map(ParticipantDto::from).collect())
}

/// Store the multipart `file` field and return its generated name.
///
/// Nobody is notified here; the uploader announces the file over its channel.
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponseDto>, ErrorResponse> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let original_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(multipart_error)?;

        return match state
            .upload_file_usecase
            .execute(&original_name, &bytes)
            .await
        {
            Ok(name) => Ok(Json(UploadResponseDto {
                file_name: name.into_string(),
            })),
            Err(e) => Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                e.to_string(),
            )),
        };
    }

    Err(error_response(StatusCode::BAD_REQUEST, "No file uploaded."))
}
