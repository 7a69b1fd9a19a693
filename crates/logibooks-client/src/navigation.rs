//! Jumping from an event (hotkey, notification) to a parcel in its register.

use logibooks_core::{ParcelsFilter, RegisterId};

/// Router collaborator: performs the actual navigation.
pub trait Navigator {
    /// Navigate to `path`.
    fn push(&mut self, path: &str);
}

/// List URL of a register's parcels.
#[must_use]
pub fn parcels_path(register_id: RegisterId) -> String {
    format!("/registers/{register_id}/parcels")
}

/// Filter the parcels list by `parcel_number` and navigate to it.
pub fn open_parcel<N>(
    filter: &mut ParcelsFilter,
    navigator: &mut N,
    parcel_number: &str,
    register_id: RegisterId,
) where
    N: Navigator + ?Sized,
{
    filter.parcel_number = parcel_number.to_string();
    let path = parcels_path(register_id);
    tracing::debug!("opening parcel {parcel_number} at {path}");
    navigator.push(&path);
}
