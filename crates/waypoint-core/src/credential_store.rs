//! Credential store: the single owner of API key material.

use log::{info, warn};

use crate::{
    error::{MapperError, Result},
    models::{Credentials, Provider},
    storage::{Store, CREDENTIALS_KEY},
};

/// Cached credentials plus the one-shot "relay unreachable" warning flag.
///
/// Both are process-scoped and reset whenever the credentials are replaced
/// or cleared.
#[derive(Debug)]
pub struct CredentialStore {
    store: Store,
    cached: Option<Credentials>,
    relay_warning_shown: bool,
}

impl CredentialStore {
    /// Loads persisted credentials. Malformed data is discarded and treated
    /// as "no credentials".
    pub async fn load(store: Store) -> Result<Self> {
        let cached = store
            .load_json_or_discard::<Credentials>(CREDENTIALS_KEY)
            .await?;
        Ok(Self {
            store,
            cached,
            relay_warning_shown: false,
        })
    }

    /// Validates and persists new credentials.
    ///
    /// # Errors
    ///
    /// Returns `MapperError::Credential` if the active provider has no
    /// non-empty key.
    pub async fn set(&mut self, credentials: Credentials) -> Result<()> {
        let credentials = credentials.normalized();
        if credentials.active_key().is_none() {
            return Err(MapperError::credential(format!(
                "Please enter your {} API key",
                credentials.provider.display_name()
            )));
        }

        self.store.save_json(CREDENTIALS_KEY, &credentials).await?;
        info!(
            "Stored credentials for provider {}",
            credentials.provider.as_str()
        );
        self.cached = Some(credentials);
        self.relay_warning_shown = false;
        Ok(())
    }

    /// Returns the last persisted credentials.
    pub fn get(&self) -> Option<&Credentials> {
        self.cached.as_ref()
    }

    /// Removes stored credentials.
    pub async fn clear(&mut self) -> Result<()> {
        self.store.remove(CREDENTIALS_KEY).await?;
        self.cached = None;
        self.relay_warning_shown = false;
        Ok(())
    }

    /// True iff a key exists for either provider.
    pub fn has_valid(&self) -> bool {
        self.cached.as_ref().is_some_and(Credentials::has_any_key)
    }

    /// The active provider and its key, if that key is present.
    pub fn active_key(&self) -> Option<(Provider, &str)> {
        self.cached.as_ref().and_then(Credentials::active_key)
    }

    /// Records that the relay could not be reached. Returns `true` only the
    /// first time since the credentials were last replaced, and logs an
    /// explanation at that point.
    pub fn note_relay_unreachable(&mut self) -> bool {
        if self.relay_warning_shown {
            return false;
        }
        warn!(
            "The model relay is not reachable. Vendor APIs must be called through \
             the local relay: start it with `wp relay` and retry."
        );
        self.relay_warning_shown = true;
        true
    }
}
