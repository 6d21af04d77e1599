//! Typed access to the two persisted preferences
//!
//! - `locationData`: the last confirmed coordinate, `{ lat, lon }`
//! - `userSettings`: `{ darkmode }`, created with `darkmode: false` on first read

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::Coordinate;
use crate::store::PreferenceStore;
use crate::{NightSkyError, Result};

pub const LOCATION_KEY: &str = "locationData";
pub const SETTINGS_KEY: &str = "userSettings";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    pub darkmode: bool,
}

/// Preferences over an injected key-value store
pub struct Preferences<S> {
    store: S,
}

impl<S: PreferenceStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.store.get(key).await? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| NightSkyError::store(format!("malformed '{key}': {e}"))),
            None => Ok(None),
        }
    }

    async fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)
            .map_err(|e| NightSkyError::store(format!("failed to encode '{key}': {e}")))?;
        self.store.set(key, value).await
    }

    /// Last confirmed coordinate, if one was saved
    pub async fn location(&self) -> Result<Option<Coordinate>> {
        self.read(LOCATION_KEY).await
    }

    /// Persist a confirmed coordinate
    pub async fn save_location(&self, coordinate: &Coordinate) -> Result<()> {
        info!("Saving location {}", coordinate.format_coordinates());
        self.write(LOCATION_KEY, coordinate).await
    }

    /// Current settings; writes the defaults on first use
    pub async fn settings(&self) -> Result<UserSettings> {
        if let Some(settings) = self.read(SETTINGS_KEY).await? {
            return Ok(settings);
        }

        debug!("No user settings stored, creating defaults");
        let settings = UserSettings::default();
        self.write(SETTINGS_KEY, &settings).await?;
        Ok(settings)
    }

    pub async fn set_dark_mode(&self, darkmode: bool) -> Result<UserSettings> {
        let mut settings = self.settings().await?;
        settings.darkmode = darkmode;
        self.write(SETTINGS_KEY, &settings).await?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    #[tokio::test]
    async fn test_settings_created_on_first_read() {
        let prefs = Preferences::new(MemoryStore::new());
        assert_eq!(prefs.store().get(SETTINGS_KEY).await.unwrap(), None);

        let settings = prefs.settings().await.unwrap();
        assert!(!settings.darkmode);
        assert_eq!(
            prefs.store().get(SETTINGS_KEY).await.unwrap(),
            Some(json!({ "darkmode": false }))
        );
    }

    #[tokio::test]
    async fn test_toggle_dark_mode() {
        let prefs = Preferences::new(MemoryStore::new());
        assert!(prefs.set_dark_mode(true).await.unwrap().darkmode);
        assert!(prefs.settings().await.unwrap().darkmode);
        assert!(!prefs.set_dark_mode(false).await.unwrap().darkmode);
    }

    #[tokio::test]
    async fn test_location_round_trip() {
        let prefs = Preferences::new(MemoryStore::new());
        assert_eq!(prefs.location().await.unwrap(), None);

        prefs
            .save_location(&Coordinate::new(64.8, -147.7))
            .await
            .unwrap();
        assert_eq!(
            prefs.store().get(LOCATION_KEY).await.unwrap(),
            Some(json!({ "lat": 64.8, "lon": -147.7 }))
        );
        assert_eq!(
            prefs.location().await.unwrap(),
            Some(Coordinate::new(64.8, -147.7))
        );
    }

    #[tokio::test]
    async fn test_malformed_value_is_store_error() {
        let store = MemoryStore::new();
        store.set(LOCATION_KEY, json!("garbage")).await.unwrap();

        let prefs = Preferences::new(store);
        assert!(matches!(
            prefs.location().await,
            Err(NightSkyError::Store { .. })
        ));
    }
}
