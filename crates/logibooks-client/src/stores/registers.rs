//! Registers list and the currently opened register.

use crate::error::Result;
use crate::persistence::UiStatePersistence;
use crate::resource::AsyncResource;
use crate::transport::{get_as, Transport};
use logibooks_core::{RegisterId, RegisterView, RegistersFilter};
use std::sync::{Arc, RwLock};

/// Path of the registers endpoint.
pub const REGISTERS_PATH: &str = "registers";

/// Identifier under which the list filter is persisted.
pub const REGISTERS_STORE_ID: &str = "registers";

/// Store for registers.
pub struct RegistersStore {
    transport: Arc<dyn Transport>,
    persistence: UiStatePersistence,
    registers: AsyncResource<Vec<RegisterView>>,
    current: AsyncResource<Option<RegisterView>>,
    filter: RwLock<RegistersFilter>,
}

impl RegistersStore {
    /// Create an idle store, restoring the persisted list filter.
    pub fn new(transport: Arc<dyn Transport>, persistence: UiStatePersistence) -> Self {
        let filter = persistence.hydrate(REGISTERS_STORE_ID);
        Self {
            transport,
            persistence,
            registers: AsyncResource::new("registers", Vec::new()),
            current: AsyncResource::new("register", None),
            filter: RwLock::new(filter),
        }
    }

    /// The list resource.
    #[must_use]
    pub fn registers(&self) -> &AsyncResource<Vec<RegisterView>> {
        &self.registers
    }

    /// The singleton resource for the opened register.
    #[must_use]
    pub fn current(&self) -> &AsyncResource<Option<RegisterView>> {
        &self.current
    }

    /// Fetch all registers. Failures land in `registers().error()`.
    pub async fn load(&self) -> bool {
        self.registers
            .load(|| get_as(self.transport.as_ref(), REGISTERS_PATH))
            .await
    }

    /// Fetch one register into [`current`](Self::current).
    pub async fn get_by_id(&self, id: RegisterId) -> bool {
        let path = format!("{REGISTERS_PATH}/{id}");
        self.current
            .load(|| async move {
                let register: RegisterView = get_as(self.transport.as_ref(), &path).await?;
                Ok(Some(register))
            })
            .await
    }

    /// Current list filter.
    #[must_use]
    pub fn filter(&self) -> RegistersFilter {
        self.filter
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Replace the list filter and persist it.
    ///
    /// # Errors
    /// Returns error if the filter cannot be persisted; the in-memory filter
    /// is updated regardless.
    pub fn set_filter(&self, filter: RegistersFilter) -> Result<()> {
        *self
            .filter
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = filter.clone();
        self.persistence.persist(REGISTERS_STORE_ID, &filter)
    }

    /// Restore the default list filter in memory.
    ///
    /// The persisted copy is left alone; clear it through the persistence
    /// layer when it should go too.
    pub fn reset_filter(&self) {
        *self
            .filter
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = RegistersFilter::default();
    }

    /// Registers matching the filter search, on the filter's page.
    ///
    /// Search is a case-insensitive substring match on file name and deal
    /// number. Pages are 1-based; page 0 is treated as page 1.
    #[must_use]
    pub fn visible(&self) -> Vec<RegisterView> {
        let filter = self.filter();
        let needle = filter.search.trim().to_lowercase();
        let per_page = filter.items_per_page.max(1) as usize;
        let skip = (filter.page.max(1) as usize - 1) * per_page;

        self.registers
            .value()
            .into_iter()
            .filter(|r| {
                needle.is_empty()
                    || [&r.file_name, &r.deal_number].into_iter().any(|field| {
                        field
                            .as_deref()
                            .is_some_and(|v| v.to_lowercase().contains(&needle))
                    })
            })
            .skip(skip)
            .take(per_page)
            .collect()
    }
}
