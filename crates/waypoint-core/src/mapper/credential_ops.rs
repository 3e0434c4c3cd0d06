//! Credential operations for the Mapper.

use super::Mapper;
use crate::{error::Result, models::Credentials, params::SetCredentials};

impl Mapper {
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.get()
    }

    /// True iff a key exists for either provider.
    pub fn has_credentials(&self) -> bool {
        self.credentials.has_valid()
    }

    /// Merges `params` over the stored credentials and persists them.
    ///
    /// # Errors
    ///
    /// Returns `MapperError::Credential` if the selected provider ends up
    /// without a key. Stored credentials are unchanged in that case.
    pub async fn set_credentials(&mut self, params: SetCredentials) -> Result<()> {
        let merged = params.merge_into(self.credentials.get());
        self.credentials.set(merged).await
    }

    pub async fn clear_credentials(&mut self) -> Result<()> {
        self.credentials.clear().await
    }
}
