//! Validation-action guards derived from a parcel's check status.
//!
//! Guards are pull-based: every read goes back to the source record, so a
//! guard is never stale relative to the record at the time it is read.

use crate::check_status::is_approved_with_excise;
use crate::types::ParcelView;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, RwLock};

/// Anything that can report a parcel's current check status.
pub trait CheckStatusSource {
    /// Current raw check-status code.
    fn check_status(&self) -> Option<i32>;
}

impl CheckStatusSource for ParcelView {
    fn check_status(&self) -> Option<i32> {
        self.status_code()
    }
}

impl<T: CheckStatusSource + ?Sized> CheckStatusSource for &T {
    fn check_status(&self) -> Option<i32> {
        (**self).check_status()
    }
}

impl<T: CheckStatusSource> CheckStatusSource for Rc<RefCell<T>> {
    fn check_status(&self) -> Option<i32> {
        self.borrow().check_status()
    }
}

impl<T: CheckStatusSource> CheckStatusSource for Arc<RwLock<T>> {
    fn check_status(&self) -> Option<i32> {
        // A poisoned lock still holds the last written record.
        match self.read() {
            Ok(guard) => guard.check_status(),
            Err(poisoned) => poisoned.into_inner().check_status(),
        }
    }
}

/// Derived guard signals for a parcel edit form.
#[derive(Debug, Clone)]
pub struct ValidationGuards<S> {
    source: S,
}

impl<S: CheckStatusSource> ValidationGuards<S> {
    /// Derive guards from a record source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Whether the parcel is currently approved with excise.
    #[must_use]
    pub fn is_approved_with_excise_status(&self) -> bool {
        is_approved_with_excise(self.source.check_status())
    }

    /// Whether validation actions must be disabled.
    ///
    /// Currently the same as the excise-approval flag.
    #[must_use]
    pub fn are_validation_actions_disabled(&self) -> bool {
        self.is_approved_with_excise_status()
    }

    /// Borrow the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }
}
