//! Records exchanged with the Logibooks backend.
//!
//! Field names follow the backend's camelCase JSON contract. Optional
//! fields default instead of failing so partially populated records from
//! older backends still decode.

use crate::error::CoreError;
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Parcel counts keyed by check-status code, in backend order.
pub type ParcelsByCheckStatus = IndexMap<String, i64>;

/// Newtype for register identifiers.
///
/// Register IDs are positive database keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegisterId(i64);

impl RegisterId {
    /// Create a new `RegisterId`.
    ///
    /// # Errors
    /// Returns error if the ID is not positive.
    pub fn new(id: i64) -> Result<Self, CoreError> {
        if id > 0 {
            Ok(Self(id))
        } else {
            Err(CoreError::Validation(format!(
                "invalid register ID: must be positive, got {id}"
            )))
        }
    }

    /// Get the inner value.
    #[must_use]
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RegisterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A parcel row as returned by `GET /parcels`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParcelView {
    /// Parcel ID
    pub id: i64,
    /// Owning register
    #[serde(default)]
    pub register_id: i64,
    /// Raw check-status code
    #[serde(default)]
    pub check_status: Option<i32>,
    /// Same code under the name some endpoints use
    #[serde(default)]
    pub check_status_id: Option<i32>,
    /// Shipment/parcel number printed on the label
    #[serde(default)]
    pub parcel_number: Option<String>,
    /// Declared FEACN (TN VED) code
    #[serde(default)]
    pub tn_ved: Option<String>,
    /// Product description
    #[serde(default)]
    pub product_name: Option<String>,
}

impl ParcelView {
    /// The parcel's check-status code, whichever field carried it.
    #[must_use]
    pub fn status_code(&self) -> Option<i32> {
        self.check_status.or(self.check_status_id)
    }
}

/// A register row as returned by `GET /registers`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterView {
    /// Register ID
    pub id: i64,
    /// Uploaded file name
    #[serde(default)]
    pub file_name: Option<String>,
    /// Deal number assigned by the customs broker
    #[serde(default)]
    pub deal_number: Option<String>,
    /// Register date
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Total parcels in the register
    #[serde(default)]
    pub parcels_total: i64,
    /// Parcel counts per check status
    #[serde(default)]
    pub parcels_by_check_status: Option<ParcelsByCheckStatus>,
    /// Aggregate check status of the register
    #[serde(default)]
    pub check_status_id: Option<i32>,
}

/// Entry of the backend check-status dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckStatus {
    /// Status code
    pub id: i32,
    /// Title configured on the backend
    pub title: String,
}

/// Country classifier entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CountryCode {
    /// Row ID
    pub id: i64,
    /// ISO 3166-1 numeric code
    pub iso_numeric: i32,
    /// ISO 3166-1 alpha-2 code
    pub iso_alpha2: String,
    /// Short Russian name
    pub name_ru_short: String,
    /// Short English name
    pub name_en_short: String,
}

/// FEACN (TN VED) classifier node as returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeacnCodeDto {
    /// Row ID
    pub id: i64,
    /// Ten-digit code, possibly shorter for group nodes
    pub code: String,
    /// Code in the classifier's display notation
    pub code_ex: String,
    /// Node description
    pub name: String,
    /// Normalized description used for search
    pub normalized: String,
    /// Parent node, `None` for roots
    pub parent_id: Option<i64>,
}

/// Stop/key word with the FEACN codes it is associated with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyWord {
    /// Row ID
    #[serde(default)]
    pub id: i64,
    /// Word or phrase; missing is treated as empty
    #[serde(default, deserialize_with = "string_or_empty")]
    pub word: String,
    /// Associated codes; missing or non-array is treated as empty
    #[serde(default, deserialize_with = "codes_or_empty")]
    pub feacn_codes: Vec<String>,
}

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        _ => String::new(),
    })
}

fn codes_or_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(s) => Some(s),
                serde_json::Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// Persistable filter state of the parcels list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParcelsFilter {
    /// Parcel number search
    pub parcel_number: String,
    /// Check-status filter
    pub check_status: Option<i32>,
    /// FEACN code search
    pub tn_ved: String,
    /// Current page (1-based)
    pub page: u32,
    /// Rows per page
    pub items_per_page: u32,
}

impl Default for ParcelsFilter {
    fn default() -> Self {
        Self {
            parcel_number: String::new(),
            check_status: None,
            tn_ved: String::new(),
            page: 1,
            items_per_page: 100,
        }
    }
}

/// Persistable filter state of the registers list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistersFilter {
    /// Free-text search
    pub search: String,
    /// Current page (1-based)
    pub page: u32,
    /// Rows per page
    pub items_per_page: u32,
}

impl Default for RegistersFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            page: 1,
            items_per_page: 10,
        }
    }
}
