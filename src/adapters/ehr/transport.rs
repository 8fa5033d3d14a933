//! Shared HTTP transport for provider clients
//!
//! Wraps a `reqwest::Client` bound to one provider base URL. Every call is
//! logged, and every failure (network error, non-2xx status or an
//! undecodable body) is reported as a failed [`ApiResponse`] instead of an
//! `Err`. Nothing is retried.

use crate::config::HttpConfig;
use crate::domain::{ApiResponse, EhrError, ProviderKind, Result};
use crate::{log_api_error, log_api_request, log_api_response};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// HTTP transport bound to a provider base URL
#[derive(Debug, Clone)]
pub struct HttpTransport {
    provider: ProviderKind,
    base_url: String,
    client: Client,
    accept: &'static str,
    content_type: &'static str,
    authorization: Option<String>,
}

impl HttpTransport {
    /// Builds a transport
    ///
    /// # Arguments
    ///
    /// * `provider` - Provider the transport talks to (used in logs)
    /// * `base_url` - Root every request path is joined onto
    /// * `accept` / `content_type` - Media types sent with every request
    /// * `http` - Timeout settings
    ///
    /// # Errors
    ///
    /// Returns [`EhrError::Configuration`] if the base URL is not an
    /// http(s) URL or the HTTP client cannot be built.
    pub fn new(
        provider: ProviderKind,
        base_url: impl Into<String>,
        accept: &'static str,
        content_type: &'static str,
        http: &HttpConfig,
    ) -> Result<Self> {
        let base_url = base_url.into();
        let parsed = Url::parse(&base_url).map_err(|e| {
            EhrError::Configuration(format!(
                "Invalid {} base URL '{base_url}': {e}",
                provider.display_name()
            ))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(EhrError::Configuration(format!(
                "{} base URL must use http or https: {base_url}",
                provider.display_name()
            )));
        }

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(http.timeout_seconds))
            .connect_timeout(Duration::from_secs(http.connect_timeout_seconds))
            .build()
            .map_err(|e| {
                EhrError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            provider,
            base_url,
            client,
            accept,
            content_type,
            authorization: None,
        })
    }

    /// Sets the `Authorization` header value sent with every request
    pub fn set_authorization(&mut self, value: impl Into<String>) {
        self.authorization = Some(value.into());
    }

    pub fn remove_authorization(&mut self) {
        self.authorization = None;
    }

    pub fn has_authorization(&self) -> bool {
        self.authorization.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn provider(&self) -> ProviderKind {
        self.provider
    }

    /// Joins a path onto the base URL with exactly one slash between them
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Sends a request and decodes the JSON response body into `T`
    ///
    /// A 2xx reply without a body succeeds with no data.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> ApiResponse<T> {
        let url = self.url(path);
        let response = match self.send(method, &url, query, body).await {
            Ok(response) => response,
            Err(failure) => return failure,
        };

        let status = response.status();
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                let error = format!("Failed to read response body: {e}");
                log_api_error!(self.provider, Some(status.as_u16()), url, error);
                return ApiResponse::failure(error, Some(status.as_u16()));
            }
        };

        // 204, or a server answering with `Prefer: return=minimal`
        if status == StatusCode::NO_CONTENT || bytes.iter().all(u8::is_ascii_whitespace) {
            return ApiResponse::empty().with_status(status.as_u16());
        }

        match serde_json::from_slice::<T>(&bytes) {
            Ok(data) => ApiResponse::ok(data).with_status(status.as_u16()),
            Err(e) => {
                let error = format!("Invalid response body: {e}");
                log_api_error!(self.provider, Some(status.as_u16()), url, error);
                ApiResponse::failure(error, Some(status.as_u16()))
            }
        }
    }

    /// Sends a request whose response body is ignored (DELETE, status updates)
    pub async fn request_no_content(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> ApiResponse<()> {
        let url = self.url(path);
        match self.send(method, &url, &[], body).await {
            Ok(response) => ApiResponse::empty().with_status(response.status().as_u16()),
            Err(failure) => failure,
        }
    }

    async fn send<T>(
        &self,
        method: Method,
        url: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> std::result::Result<Response, ApiResponse<T>> {
        log_api_request!(self.provider, method, url);

        let mut request = self
            .client
            .request(method, url)
            .header(ACCEPT, self.accept);

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(ref auth) = self.authorization {
            request = request.header(AUTHORIZATION, auth);
        }
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, self.content_type).json(body);
        }

        let response = request.send().await.map_err(|e| {
            let error = e.to_string();
            log_api_error!(self.provider, None::<u16>, url, error);
            ApiResponse::failure(error, None)
        })?;

        let status = response.status();
        log_api_response!(self.provider, status.as_u16(), url);

        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let error = failure_message(status, &text);
        log_api_error!(self.provider, Some(status.as_u16()), url, error);
        Err(ApiResponse::failure(error, Some(status.as_u16())))
    }
}

/// Error message for a non-success response
///
/// Prefers a message from the body (`message`, `detail`, `error`, or a FHIR
/// OperationOutcome diagnostic) over a generic status line.
/// `/<collection>/<id>` with the id percent-encoded as one path segment
pub fn resource_path(collection: &str, id: &str) -> String {
    format!("/{collection}/{}", urlencoding::encode(id))
}

fn failure_message(status: StatusCode, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        for key in ["message", "detail", "error"] {
            if let Some(message) = json.get(key).and_then(Value::as_str) {
                return message.to_string();
            }
        }
        if let Some(diagnostics) = json
            .pointer("/issue/0/diagnostics")
            .and_then(Value::as_str)
        {
            return diagnostics.to_string();
        }
    }
    format!("Request failed with status code {}", status.as_u16())
}
