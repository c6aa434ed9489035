use crate::error::{DsgenError, Result};

pub async fn check_response_status(response: reqwest::Response) -> Result<reqwest::Response> {
    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        tracing::error!(
            status = %status,
            error = %error_text,
            "Generate request failed"
        );
        return Err(DsgenError::Request {
            status: status.as_u16(),
        });
    }
    Ok(response)
}

/// Transport-level failures: nothing came back from the server.
pub fn network_error(error: reqwest::Error) -> DsgenError {
    let reason = if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_connect() {
        format!("could not connect: {}", error)
    } else {
        error.to_string()
    };
    tracing::error!(error = %error, "Generate request did not complete");
    DsgenError::Network(reason)
}
