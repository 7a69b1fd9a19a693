//! Backend check-status dictionary.

use crate::resource::{AsyncResource, Phase};
use crate::transport::{get_as, Transport};
use logibooks_core::{status_label, CheckStatus};
use std::sync::Arc;

/// Path of the status dictionary endpoint.
pub const CHECK_STATUSES_PATH: &str = "checkstatuses";

/// Store for the list of check statuses and their backend titles.
pub struct CheckStatusStore {
    transport: Arc<dyn Transport>,
    statuses: AsyncResource<Vec<CheckStatus>>,
}

impl CheckStatusStore {
    /// Create an idle store.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            statuses: AsyncResource::new("check_statuses", Vec::new()),
        }
    }

    /// The underlying resource.
    #[must_use]
    pub fn statuses(&self) -> &AsyncResource<Vec<CheckStatus>> {
        &self.statuses
    }

    /// Fetch the dictionary. Failures land in `statuses().error()`.
    pub async fn load(&self) -> bool {
        self.statuses
            .load(|| get_as(self.transport.as_ref(), CHECK_STATUSES_PATH))
            .await
    }

    /// Fetch once; later calls are no-ops until the store is reset.
    pub async fn ensure_loaded(&self) {
        if self.statuses.phase() == Phase::Idle {
            self.load().await;
        }
    }

    /// Backend title for `code`, or the built-in label if it is not listed.
    #[must_use]
    pub fn get_title(&self, code: Option<i32>) -> String {
        code.and_then(|c| {
            self.statuses
                .value()
                .into_iter()
                .find(|status| status.id == c)
                .map(|status| status.title)
        })
        .unwrap_or_else(|| status_label(code, false))
    }
}
