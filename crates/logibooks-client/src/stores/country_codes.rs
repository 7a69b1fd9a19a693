//! Country classifier store.

use crate::error::Result;
use crate::resource::AsyncResource;
use crate::transport::{get_as, Transport};
use logibooks_core::CountryCode;
use std::sync::Arc;

/// Path of the country list endpoint.
pub const COUNTRIES_PATH: &str = "countries";

/// Path that asks the backend to refresh the classifier from its source.
pub const COUNTRIES_UPDATE_PATH: &str = "countries/update";

/// Store for the country classifier.
pub struct CountryCodesStore {
    transport: Arc<dyn Transport>,
    countries: AsyncResource<Vec<CountryCode>>,
}

impl CountryCodesStore {
    /// Create an idle store.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            countries: AsyncResource::new("country_codes", Vec::new()),
        }
    }

    /// The underlying resource.
    #[must_use]
    pub fn countries(&self) -> &AsyncResource<Vec<CountryCode>> {
        &self.countries
    }

    /// Fetch the classifier. Failures land in `countries().error()`.
    pub async fn load(&self) -> bool {
        self.countries
            .load(|| get_as(self.transport.as_ref(), COUNTRIES_PATH))
            .await
    }

    /// Ask the backend to refresh the classifier.
    ///
    /// Loaded countries are left untouched; call [`load`](Self::load) afterwards.
    ///
    /// # Errors
    /// Returns the transport error.
    pub async fn update(&self) -> Result<()> {
        self.transport
            .post_json(COUNTRIES_UPDATE_PATH, None)
            .await
            .map(|_| ())
            .inspect_err(|err| tracing::warn!("country classifier update failed: {err}"))
    }

    /// Short Russian name for an ISO numeric code, or the code itself.
    #[must_use]
    pub fn short_name(&self, iso_numeric: i32) -> String {
        self.countries
            .value()
            .into_iter()
            .find(|c| c.iso_numeric == iso_numeric)
            .map_or_else(|| iso_numeric.to_string(), |c| c.name_ru_short)
    }

    /// ISO alpha-2 code for an ISO numeric code.
    #[must_use]
    pub fn alpha2(&self, iso_numeric: i32) -> Option<String> {
        self.countries
            .value()
            .into_iter()
            .find(|c| c.iso_numeric == iso_numeric)
            .map(|c| c.iso_alpha2)
    }
}
