//! Logibooks Client - backend access and client-side state for Logibooks.
//!
//! This crate wraps the Logibooks REST API behind a [`Transport`] seam and
//! exposes stores with observable loading and error state.
//!
//! # Features
//!
//! - **Async resources**: `Idle → Loading → Success | Failed`, with stale
//!   responses from overlapping loads discarded
//! - **Stores**: check-status dictionary, country classifier, registers
//! - **UI state persistence**: best-effort JSON slices keyed by store id
//! - **Explicit context**: session, drawer flag and stores in one object
//!
//! # Example
//!
//! ```rust,no_run
//! use logibooks_client::{AppContext, HttpTransport, UiStatePersistence};
//! use logibooks_core::ClientConfig;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::load_with_env()?;
//! let transport = Arc::new(HttpTransport::new(config.clone())?);
//! let ctx = AppContext::new(config, transport, UiStatePersistence::in_memory());
//!
//! ctx.check_statuses().load().await;
//! if let Some(err) = ctx.check_statuses().statuses().error() {
//!     eprintln!("could not load statuses: {err}");
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod context;
pub mod error;
pub mod navigation;
pub mod persistence;
pub mod resource;
pub mod stores;
pub mod transport;

// Re-export commonly used types
pub use context::{AppContext, Session};
pub use error::{ClientError, Result};
pub use navigation::{open_parcel, parcels_path, Navigator};
pub use persistence::{FileStorage, KeyValueStorage, MemoryStorage, UiStatePersistence};
pub use resource::{AsyncResource, Phase, ResourceState};
pub use stores::{CheckStatusStore, CountryCodesStore, RegistersStore};
pub use transport::{get_as, HttpTransport, Transport};
