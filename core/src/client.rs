//! Stateless HTTP request builder and response parser for the FAQ API.
//!
//! # Design
//! `FaqClient` holds only a `base_url` and carries no mutable state between
//! calls. Each endpoint is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip, keeping the core
//! deterministic and free of I/O.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{DuplicateQuery, FaqPage, FaqPatch, FaqRecord, ListMeta, PreviousStatus, StatusFilter};

/// `{ "data": ... }` wrapper used by every record-carrying response.
#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct ListEnvelope {
    #[serde(default)]
    data: Option<Vec<FaqRecord>>,
    #[serde(default)]
    meta: Option<ListMeta>,
}

#[derive(Deserialize)]
struct DuplicateAnswer {
    exists: bool,
}

/// Synchronous, stateless client for the FAQ API.
#[derive(Debug, Clone)]
pub struct FaqClient {
    base_url: String,
}

impl FaqClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_page(&self, page: u32, limit: u32, filter: StatusFilter) -> HttpRequest {
        let mut path = format!("{}/faqs?page={page}&limit={limit}", self.base_url);
        if let Some(status) = filter.query_value() {
            path.push_str("&status=");
            path.push_str(status);
        }
        bare(HttpMethod::Get, path)
    }

    pub fn build_get_faq(&self, id: &str) -> HttpRequest {
        bare(HttpMethod::Get, format!("{}/faqs/{id}", self.base_url))
    }

    pub fn build_check_duplicate(&self, question: &str, exclude_id: Option<&str>) -> Result<HttpRequest, ApiError> {
        let query = DuplicateQuery {
            question: question.to_string(),
            exclude_id: exclude_id.map(str::to_string),
        };
        with_json(HttpMethod::Post, format!("{}/faqs/check-duplicate", self.base_url), &query)
    }

    pub fn build_create_faq(&self, record: &FaqRecord) -> Result<HttpRequest, ApiError> {
        let body = FaqRecord {
            id: None,
            ..record.clone()
        };
        with_json(HttpMethod::Post, format!("{}/faqs", self.base_url), &body)
    }

    pub fn build_update_faq(&self, id: &str, record: &FaqRecord) -> Result<HttpRequest, ApiError> {
        with_json(HttpMethod::Put, format!("{}/faqs/{id}", self.base_url), record)
    }

    pub fn build_delete_faq(&self, id: &str) -> HttpRequest {
        bare(HttpMethod::Delete, format!("{}/faqs/{id}", self.base_url))
    }

    /// Flip the status server-side. The request carries no body.
    pub fn build_toggle_status(&self, id: &str) -> HttpRequest {
        bare(HttpMethod::Patch, format!("{}/faqs/{id}", self.base_url))
    }

    /// A missing `data` is treated as an empty page.
    pub fn parse_list_page(&self, response: HttpResponse) -> Result<FaqPage, ApiError> {
        check_status(&response, &[200])?;
        let envelope: ListEnvelope = decode(&response.body)?;
        Ok(FaqPage::from_parts(envelope.data.unwrap_or_default(), envelope.meta))
    }

    pub fn parse_get_faq(&self, response: HttpResponse) -> Result<FaqRecord, ApiError> {
        check_status(&response, &[200])?;
        decode::<Envelope<FaqRecord>>(&response.body).map(|e| e.data)
    }

    pub fn parse_check_duplicate(&self, response: HttpResponse) -> Result<bool, ApiError> {
        check_status(&response, &[200])?;
        decode::<DuplicateAnswer>(&response.body).map(|a| a.exists)
    }

    pub fn parse_create_faq(&self, response: HttpResponse) -> Result<FaqRecord, ApiError> {
        check_status(&response, &[200, 201])?;
        decode::<Envelope<FaqRecord>>(&response.body).map(|e| e.data)
    }

    pub fn parse_update_faq(&self, response: HttpResponse) -> Result<FaqPatch, ApiError> {
        check_status(&response, &[200])?;
        decode::<Envelope<FaqPatch>>(&response.body).map(|e| e.data)
    }

    /// Any 2xx counts; the body is ignored.
    pub fn parse_delete_faq(&self, response: HttpResponse) -> Result<(), ApiError> {
        if response.is_success() {
            return Ok(());
        }
        check_status(&response, &[])
    }

    /// Returns the status the record had *before* the toggle.
    pub fn parse_toggle_status(&self, response: HttpResponse) -> Result<bool, ApiError> {
        check_status(&response, &[200])?;
        decode::<Envelope<PreviousStatus>>(&response.body).map(|e| e.data.status)
    }
}

fn bare(method: HttpMethod, path: String) -> HttpRequest {
    HttpRequest {
        method,
        path,
        headers: Vec::new(),
        body: None,
    }
}

fn with_json<T: Serialize>(method: HttpMethod, path: String, payload: &T) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(payload).map_err(|e| ApiError::Serialization(e.to_string()))?;
    Ok(HttpRequest {
        method,
        path,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: &[u16]) -> Result<(), ApiError> {
    if expected.contains(&response.status) {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound {
            body: response.body.clone(),
        });
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}
