//! Concrete stores built on [`AsyncResource`](crate::resource::AsyncResource).
//!
//! Each store owns its resources and a transport handle. Mutating calls go
//! straight to the backend and leave loaded values alone; call `load()`
//! again to observe their effect.

pub mod check_statuses;
pub mod country_codes;
pub mod registers;

pub use check_statuses::CheckStatusStore;
pub use country_codes::CountryCodesStore;
pub use registers::RegistersStore;
