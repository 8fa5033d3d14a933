//! Response envelopes and pagination
//!
//! Every provider resource call reports its outcome as an [`ApiResponse`]
//! instead of an `Err`, so callers check [`ApiResponse::is_success`] (or
//! convert with [`ApiResponse::into_result`]) for each call.

use super::errors::EhrError;
use super::result::Result;
use serde::{Deserialize, Serialize};

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_LIMIT: u32 = 20;

/// Outcome of a provider resource call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub message: String,
    /// HTTP status of the provider response, when one was received
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying data
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: "Request successful".to_string(),
            status: None,
        }
    }

    /// Successful response with no body (e.g. DELETE)
    pub fn empty() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            message: "Request successful".to_string(),
            status: None,
        }
    }

    /// Failed response
    pub fn failure(error: impl Into<String>, status: Option<u16>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: "Request failed".to_string(),
            status,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Maps the payload, keeping the envelope
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            success: self.success,
            data: self.data.map(f),
            error: self.error,
            message: self.message,
            status: self.status,
        }
    }

    /// Maps the payload with a fallible conversion
    ///
    /// Failed responses pass through untouched; a conversion error on a
    /// successful response is returned as `Err`.
    pub fn try_map<U>(self, f: impl FnOnce(T) -> Result<U>) -> Result<ApiResponse<U>> {
        let data = match self.data {
            Some(data) => Some(f(data)?),
            None => None,
        };
        Ok(ApiResponse {
            success: self.success,
            data,
            error: self.error,
            message: self.message,
            status: self.status,
        })
    }

    /// Converts into a `Result`, turning a failed response into
    /// [`EhrError::Transport`]
    ///
    /// A successful response without a body yields `Ok(None)`.
    pub fn into_result(self) -> Result<Option<T>> {
        if self.success {
            Ok(self.data)
        } else {
            Err(EhrError::Transport {
                status: self.status,
                message: self
                    .error
                    .unwrap_or_else(|| "An error occurred".to_string()),
            })
        }
    }
}

/// 1-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    /// Zero-based record offset: `(page - 1) * limit`
    ///
    /// Page 0 is treated as page 1.
    pub fn offset(&self) -> u32 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_next: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_prev: Option<bool>,
}

impl<T> Page<T> {
    /// Builds a page and derives the page-count and navigation flags
    pub fn new(data: Vec<T>, total: u64, pagination: Pagination) -> Self {
        let limit = pagination.limit.max(1) as u64;
        let total_pages = total.div_ceil(limit) as u32;
        let page = pagination.page.max(1);
        Self {
            data,
            total,
            page,
            limit: pagination.limit,
            total_pages,
            has_next: Some(page < total_pages),
            has_prev: Some(page > 1),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}
