//! File upload over the relay's HTTP endpoint.

use std::path::Path;

use irori_server::infrastructure::dto::http::{ErrorResponseDto, UploadResponseDto};
use reqwest::{
    Client, Url,
    multipart::{Form, Part},
};

use crate::error::ClientError;

/// Upload the file at `path` and return the name the relay stored it under.
///
/// The relay only stores the file; announcing it to the room is up to the
/// caller.
pub async fn upload_file(
    client: &Client,
    upload_url: Url,
    path: &Path,
) -> Result<String, ClientError> {
    let bytes = tokio::fs::read(path).await?;
    let original_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload")
        .to_string();
    tracing::debug!("Uploading '{}' ({} bytes)", original_name, bytes.len());

    let form = Form::new().part("file", Part::bytes(bytes).file_name(original_name));
    let response = client
        .post(upload_url)
        .multipart(form)
        .send()
        .await
        .map_err(|e| ClientError::UploadFailed(e.to_string()))?;

    let status = response.status();
    if status.is_success() {
        let body: UploadResponseDto = response
            .json()
            .await
            .map_err(|e| ClientError::UploadFailed(e.to_string()))?;
        return Ok(body.file_name);
    }

    let reason = match response.json::<ErrorResponseDto>().await {
        Ok(body) => format!("{} ({})", body.error, status),
        Err(_) => status.to_string(),
    };
    Err(ClientError::UploadFailed(reason))
}
