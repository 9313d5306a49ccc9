//! Type definitions for webserver
//!
//! Request payload, access code record and the stored horoscope document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{HoroscopeVariant, PipelineState};

/// Request payload of the horoscope endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInput {
    pub name: String,
    pub dob: String,
    pub code: String,
    /// Defaults to the basic variant when the field is omitted.
    #[serde(default)]
    pub horoscope_type: HoroscopeVariant,
}

/// One-per-customer access code as kept in the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessCode {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used: Option<DateTime<Utc>>,
}

/// Stored record of one generated horoscope
///
/// The pipeline output is flattened into the record, so the stored JSON
/// carries the input fields, the generated sections and the token totals
/// at the top level next to the bookkeeping fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoroscopeDocument {
    #[serde(flatten)]
    pub state: PipelineState,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
}
