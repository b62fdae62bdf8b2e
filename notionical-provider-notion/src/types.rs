//! Notion API types.
//!
//! Only the parts of the page object this provider reads are modelled.
//! Unknown fields are ignored and unknown property types deserialize as
//! [`PropertyValue::Other`].

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Query Types
// =============================================================================

/// Body of `POST /v1/databases/{id}/query`
#[derive(Debug, Default, Serialize)]
pub struct QueryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

/// One page of database query results
#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    pub results: Vec<PageObject>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Error body returned by the Notion API
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

// =============================================================================
// Page Types
// =============================================================================

/// A page as returned in query results.
///
/// The API may return partial objects that only carry an id. Those lack
/// `url` and `properties`.
#[derive(Debug, Clone, Deserialize)]
pub struct PageObject {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub last_edited_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub properties: Option<HashMap<String, PropertyValue>>,
}

/// A page with its complete field set
#[derive(Debug, Clone)]
pub struct FullPage {
    pub id: String,
    pub url: String,
    pub last_edited_time: Option<DateTime<Utc>>,
    pub properties: HashMap<String, PropertyValue>,
}

impl PageObject {
    /// The full page, or `None` for a partial object
    pub fn into_full(self) -> Option<FullPage> {
        let PageObject {
            id,
            url,
            last_edited_time,
            properties,
        } = self;

        Some(FullPage {
            id,
            url: url?,
            last_edited_time,
            properties: properties?,
        })
    }
}

// =============================================================================
// Property Types
// =============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title { title: Vec<RichText> },
    RichText { rich_text: Vec<RichText> },
    Select { select: Option<SelectOption> },
    Date { date: Option<DateValue> },
    #[serde(other)]
    Other,
}

impl PropertyValue {
    /// Notion's name for this property type
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Title { .. } => "title",
            Self::RichText { .. } => "rich_text",
            Self::Select { .. } => "select",
            Self::Date { .. } => "date",
            Self::Other => "other",
        }
    }
}

/// One run of rich text. Only the plain text is kept.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RichText {
    pub plain_text: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SelectOption {
    pub name: String,
}

/// Value of a date property.
///
/// `start` and `end` are either `YYYY-MM-DD` or an ISO 8601 date-time.
/// `end` is inclusive for date-only ranges.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DateValue {
    pub start: String,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub time_zone: Option<String>,
}
