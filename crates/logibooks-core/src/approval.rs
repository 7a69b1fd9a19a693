//! Parcel approval mode used by the approve hotkey and settings screens.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// How a parcel gets approved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum ParcelApprovalMode {
    /// Plain approval
    #[default]
    SimpleApprove,
    /// Approval with excise
    ApproveWithExcise,
    /// Approval with notification
    ApproveWithNotification,
}

impl ParcelApprovalMode {
    /// All members in declaration order.
    pub const ALL: [Self; 3] = [
        Self::SimpleApprove,
        Self::ApproveWithExcise,
        Self::ApproveWithNotification,
    ];

    /// Member name as persisted by the backend.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SimpleApprove => "SimpleApprove",
            Self::ApproveWithExcise => "ApproveWithExcise",
            Self::ApproveWithNotification => "ApproveWithNotification",
        }
    }

    /// Look up a member by exact name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.as_str() == name)
    }

    /// Coerce a persisted value into a mode.
    ///
    /// Legacy booleans map `true` to `ApproveWithExcise` and `false` to
    /// `SimpleApprove`. Member names map to themselves. Everything else,
    /// including null, falls back to `SimpleApprove`.
    #[must_use]
    pub fn normalize(value: &Value) -> Self {
        match value {
            Value::Bool(true) => Self::ApproveWithExcise,
            Value::String(name) => Self::from_name(name).unwrap_or_default(),
            _ => Self::SimpleApprove,
        }
    }

    /// Same as [`normalize`](Self::normalize) for an optional value.
    #[must_use]
    pub fn normalize_opt(value: Option<&Value>) -> Self {
        value.map_or_else(Self::default, Self::normalize)
    }
}

impl fmt::Display for ParcelApprovalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ParcelApprovalMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::normalize(&value))
    }
}
