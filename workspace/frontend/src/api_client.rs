pub mod climate;
pub mod location;

use common::{ApiError, ApiResult};
use gloo_net::http::{Request, Response};
use serde::Serialize;

use crate::settings;

fn api_url(endpoint: &str) -> String {
    settings::get_settings().api_url(endpoint)
}

/// Raw HTTP outcome; turning it into a typed result is done by the `common` decoders.
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

async fn read_response(
    method: &str,
    endpoint: &str,
    response: Result<Response, gloo_net::Error>,
) -> ApiResult<RawResponse> {
    let response = response.map_err(|e| {
        let err = ApiError::Transport(e.to_string());
        log::error!("{} {} - {}", method, endpoint, err);
        err
    })?;

    let status = response.status();
    if !response.ok() {
        log::warn!("{} {} - Non-OK response: {}", method, endpoint, status);
    }

    log::trace!("{} {} - Response received, reading body", method, endpoint);
    let body = response.text().await.map_err(|e| {
        let err = ApiError::Transport(format!("Failed to read response body: {}", e));
        log::error!("{} {} - {}", method, endpoint, err);
        err
    })?;

    Ok(RawResponse { status, body })
}

/// Common GET request handler
pub async fn get(endpoint: &str, query: &[(&str, String)]) -> ApiResult<RawResponse> {
    let url = api_url(endpoint);
    log::debug!("GET request to: {} {:?}", url, query);

    let response = Request::get(&url)
        .query(query.iter().map(|(k, v)| (*k, v.as_str())))
        .send()
        .await;
    read_response("GET", endpoint, response).await
}

/// Common POST request handler
pub async fn post<B>(endpoint: &str, body: &B) -> ApiResult<RawResponse>
where
    B: Serialize,
{
    let url = api_url(endpoint);
    log::debug!("POST request to: {}", url);

    let request = Request::post(&url).json(body).map_err(|e| {
        let err = ApiError::InvalidRequest(format!("Failed to serialize request: {}", e));
        log::error!("POST {} - {}", endpoint, err);
        err
    })?;
    read_response("POST", endpoint, request.send().await).await
}
