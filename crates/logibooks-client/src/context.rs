//! Application context shared by every screen of the client.
//!
//! Created once at startup and passed explicitly. Holds the signed-in
//! session, the navigation drawer flag and the stores. Signing out resets
//! all of it.

use crate::error::Result;
use crate::persistence::UiStatePersistence;
use crate::stores::registers::REGISTERS_STORE_ID;
use crate::stores::{CheckStatusStore, CountryCodesStore, RegistersStore};
use crate::transport::Transport;
use logibooks_core::ClientConfig;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

/// Identifier under which the parcels list filter is persisted.
pub const PARCELS_STORE_ID: &str = "parcels";

/// Role name granting administrative screens.
pub const ADMIN_ROLE: &str = "administrator";

/// Signed-in user as returned by the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// User ID
    pub id: i64,
    /// Login e-mail
    pub email: String,
    /// Display name
    #[serde(default)]
    pub display_name: String,
    /// Assigned roles
    #[serde(default)]
    pub roles: Vec<String>,
    /// Bearer token for later requests
    #[serde(default)]
    pub token: Option<String>,
}

/// Explicitly constructed application state.
pub struct AppContext {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    persistence: UiStatePersistence,
    session: RwLock<Option<Session>>,
    drawer_visible: AtomicBool,
    check_statuses: CheckStatusStore,
    country_codes: CountryCodesStore,
    registers: RegistersStore,
}

impl AppContext {
    /// Build the context and its stores.
    pub fn new(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        persistence: UiStatePersistence,
    ) -> Self {
        tracing::info!("Initializing Logibooks context for {}", config.api_url);
        Self {
            check_statuses: CheckStatusStore::new(Arc::clone(&transport)),
            country_codes: CountryCodesStore::new(Arc::clone(&transport)),
            registers: RegistersStore::new(Arc::clone(&transport), persistence.clone()),
            config,
            transport,
            persistence,
            session: RwLock::new(None),
            drawer_visible: AtomicBool::new(true),
        }
    }

    /// Resolved configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// UI state persistence.
    #[must_use]
    pub fn persistence(&self) -> &UiStatePersistence {
        &self.persistence
    }

    /// Check-status dictionary store.
    #[must_use]
    pub fn check_statuses(&self) -> &CheckStatusStore {
        &self.check_statuses
    }

    /// Country classifier store.
    #[must_use]
    pub fn country_codes(&self) -> &CountryCodesStore {
        &self.country_codes
    }

    /// Registers store.
    #[must_use]
    pub fn registers(&self) -> &RegistersStore {
        &self.registers
    }

    /// Start a session and forward its token to the transport.
    pub fn sign_in(&self, session: Session) {
        tracing::info!("Signed in as {}", session.email);
        self.transport.set_token(session.token.clone());
        *self
            .session
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(session);
    }

    /// End the session: drop credentials, loaded data and persisted filters.
    ///
    /// # Errors
    /// Returns error if a persisted filter cannot be removed. In-memory state
    /// is reset before that happens.
    pub fn sign_out(&self) -> Result<()> {
        let previous = self
            .session
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .take();
        if let Some(session) = previous {
            tracing::info!("Signed out {}", session.email);
        }
        self.transport.set_token(None);
        self.drawer_visible.store(true, Ordering::Relaxed);

        self.check_statuses.statuses().reset();
        self.country_codes.countries().reset();
        self.registers.registers().reset();
        self.registers.current().reset();
        self.registers.reset_filter();

        self.persistence.clear(PARCELS_STORE_ID)?;
        self.persistence.clear(REGISTERS_STORE_ID)?;
        Ok(())
    }

    /// Current session, if signed in.
    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.session
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Whether a user is signed in.
    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.session
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .is_some()
    }

    /// Whether the signed-in user has `role`.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.session
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .as_ref()
            .is_some_and(|s| s.roles.iter().any(|r| r == role))
    }

    /// Whether the signed-in user is an administrator.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.has_role(ADMIN_ROLE)
    }

    /// Whether the navigation drawer is shown.
    #[must_use]
    pub fn drawer_visible(&self) -> bool {
        self.drawer_visible.load(Ordering::Relaxed)
    }

    /// Show or hide the navigation drawer.
    pub fn set_drawer_visible(&self, visible: bool) {
        self.drawer_visible.store(visible, Ordering::Relaxed);
    }

    /// Flip the navigation drawer, returning the new state.
    pub fn toggle_drawer(&self) -> bool {
        !self.drawer_visible.fetch_xor(true, Ordering::Relaxed)
    }
}
