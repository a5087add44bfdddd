//! Deriving the relay's HTTP endpoints from its WebSocket URL.

use reqwest::Url;

use crate::error::ClientError;

/// HTTP base URL of the relay serving `ws_url`.
///
/// `ws://host:port/ws` becomes `http://host:port`, `wss://` becomes `https://`.
pub fn http_base_url(ws_url: &str) -> Result<Url, ClientError> {
    let invalid = |reason: &str| ClientError::InvalidUrl(ws_url.to_string(), reason.to_string());

    let mut url = Url::parse(ws_url).map_err(|e| invalid(&e.to_string()))?;
    let scheme = match url.scheme() {
        "ws" | "http" => "http",
        "wss" | "https" => "https",
        other => return Err(invalid(&format!("unsupported scheme '{}'", other))),
    };
    url.set_scheme(scheme)
        .map_err(|_| invalid("cannot switch to an HTTP scheme"))?;
    url.set_path("/");
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

/// URL of the upload endpoint.
pub fn upload_url(base: &Url) -> Result<Url, ClientError> {
    base.join("upload")
        .map_err(|e| ClientError::InvalidUrl(base.to_string(), e.to_string()))
}

/// URL an uploaded file is served from.
pub fn file_url(base: &Url, file_name: &str) -> String {
    match base.join("uploads/").and_then(|dir| dir.join(file_name)) {
        Ok(url) => url.to_string(),
        Err(_) => format!("{}uploads/{}", base, file_name),
    }
}
