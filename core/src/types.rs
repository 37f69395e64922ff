//! Domain DTOs for the FAQ API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! the live integration test catches schema drift. The backend is document
//! shaped, so the record id travels as `_id` on the wire.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 20;

fn default_status() -> bool {
    true
}

/// A single FAQ entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FaqRecord {
    #[serde(
        rename = "_id",
        alias = "id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    pub question: String,
    pub answer: String,
    #[serde(default = "default_status")]
    pub status: bool,
}

impl FaqRecord {
    /// An unsaved, active record.
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id: None,
            question: question.into(),
            answer: answer.into(),
            status: true,
        }
    }

    pub fn status_label(&self) -> &'static str {
        if self.status {
            "active"
        } else {
            "inactive"
        }
    }

    /// Overwrite the fields present in `patch`, keeping the rest.
    pub fn merge(&mut self, patch: FaqPatch) {
        if let Some(id) = patch.id {
            self.id = Some(id);
        }
        if let Some(question) = patch.question {
            self.question = question;
        }
        if let Some(answer) = patch.answer {
            self.answer = answer;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

/// A partial record, as returned by the update endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FaqPatch {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub status: Option<bool>,
}

/// Status restriction applied to a list request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    Total,
    Active,
    Inactive,
}

impl StatusFilter {
    /// Query value for `status=`, `None` when unrestricted.
    pub fn query_value(self) -> Option<&'static str> {
        match self {
            StatusFilter::Total => None,
            StatusFilter::Active => Some("active"),
            StatusFilter::Inactive => Some("inactive"),
        }
    }

    pub fn matches(self, record: &FaqRecord) -> bool {
        match self {
            StatusFilter::Total => true,
            StatusFilter::Active => record.status,
            StatusFilter::Inactive => !record.status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.query_value().unwrap_or("total"))
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "total" => Ok(StatusFilter::Total),
            "active" => Ok(StatusFilter::Active),
            "inactive" => Ok(StatusFilter::Inactive),
            other => Err(format!("unknown status filter: {other}")),
        }
    }
}

/// Dataset-wide record counts reported alongside a page of results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateCounts {
    pub total: u64,
    pub active: u64,
    pub inactive: u64,
}

/// Pagination metadata on a list response. Every field may be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ListMeta {
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub active: Option<u64>,
    #[serde(default)]
    pub inactive: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u32>,
}

/// One page of records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqPage {
    pub items: Vec<FaqRecord>,
    pub counts: AggregateCounts,
    pub total_pages: u32,
}

impl FaqPage {
    /// Missing counts default to 0, missing page count to 1.
    pub fn from_parts(items: Vec<FaqRecord>, meta: Option<ListMeta>) -> Self {
        let meta = meta.unwrap_or_default();
        Self {
            items,
            counts: AggregateCounts {
                total: meta.total.unwrap_or(0),
                active: meta.active.unwrap_or(0),
                inactive: meta.inactive.unwrap_or(0),
            },
            total_pages: meta.total_pages.unwrap_or(1),
        }
    }
}

/// Body of the duplicate-check request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateQuery {
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_id: Option<String>,
}

/// Response of the toggle endpoint: the status *before* the flip.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreviousStatus {
    pub status: bool,
}
