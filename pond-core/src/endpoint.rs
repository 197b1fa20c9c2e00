//! The saved prediction endpoint URL.

use crate::store::{KeyValueStore, ENDPOINT_KEY};
use log::{info, warn};

/// URL used until the user saves their own.
pub const DEFAULT_ENDPOINT: &str = "http://192.168.111.178:5000/predict";

/// Persisted prediction endpoint URL.
pub struct EndpointConfig<S> {
    store: S,
    url: String,
}

impl<S: KeyValueStore> EndpointConfig<S> {
    /// Read the saved URL, falling back to [`DEFAULT_ENDPOINT`].
    pub fn load(store: S) -> Self {
        let url = match store.get_item(ENDPOINT_KEY) {
            Ok(Some(saved)) if !saved.trim().is_empty() => saved,
            Ok(_) => DEFAULT_ENDPOINT.to_string(),
            Err(e) => {
                warn!("Error loading API URL: {}", e);
                DEFAULT_ENDPOINT.to_string()
            }
        };
        Self { store, url }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Replace the URL and persist it. The in-memory value changes even if
    /// the write fails.
    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
        match self.store.set_item(ENDPOINT_KEY, &self.url) {
            Ok(()) => info!("API URL updated to {}", self.url),
            Err(e) => warn!("Error saving API URL: {}", e),
        }
    }
}
