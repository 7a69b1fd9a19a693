//! Logibooks Core - domain layer of the Logibooks customs-declaration client.
//!
//! This crate interprets what the backend sends: check-status codes, approval
//! modes, parcel counts, key words and FEACN classifier nodes. Everything here
//! is pure and total; network and state live in `logibooks-client`.
//!
//! # Modules
//!
//! - [`check_status`] - Band-based classification and labels for status codes
//! - [`approval`] - `ParcelApprovalMode` with legacy-value normalization
//! - [`format`] - ru-RU number formatting
//! - [`tooltip`] - Per-status parcel count tooltips
//! - [`keywords`] - Key word search matching
//! - [`feacn`] - Lazy-loading FEACN tree nodes
//! - [`guards`] - Derived validation-action guards
//! - [`types`] - Backend records and persistable filters
//! - [`config`] - Layered client configuration
//! - [`error`] - Central error types using thiserror
//!
//! # Example
//!
//! ```rust
//! use logibooks_core::{build_tooltip, has_issues, RegisterView};
//!
//! assert!(has_issues(Some(101)));
//!
//! let register: RegisterView =
//!     serde_json::from_str(r#"{"id": 1, "parcelsByCheckStatus": {"101": 1500}}"#).unwrap();
//! assert_eq!(build_tooltip(&register), "Есть вопросы: 1\u{a0}500");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod approval;
pub mod check_status;
pub mod config;
pub mod error;
pub mod feacn;
pub mod format;
pub mod guards;
pub mod keywords;
pub mod tooltip;
pub mod types;

// Re-export commonly used types
pub use approval::ParcelApprovalMode;
pub use check_status::{
    classify, has_issues, is_approved_with_excise, status_label, CheckStatusCategory,
    CheckStatusCode,
};
pub use config::{ClientConfig, RuntimeConfig};
pub use error::{ConfigError, ConfigResult, CoreError, Result};
pub use feacn::{to_tree_nodes, FeacnTreeNode};
pub use format::format_count;
pub use guards::{CheckStatusSource, ValidationGuards};
pub use tooltip::{build_tooltip, HasParcelsByCheckStatus};
pub use types::{
    CheckStatus, CountryCode, FeacnCodeDto, KeyWord, ParcelView, ParcelsByCheckStatus,
    ParcelsFilter, RegisterId, RegisterView, RegistersFilter,
};
