//! Thread-safe settings caching with arc-swap for lock-free reads.

use crate::loader::ConfigLoader;
use crate::schema::PlotSettings;
use arc_swap::ArcSwap;
use fnplot_common::Result;
use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::warn;

/// Thread-safe settings cache using arc-swap for lock-free reads.
pub struct ConfigCache {
    settings: ArcSwap<PlotSettings>,
}

impl ConfigCache {
    /// Creates a new cache holding the given settings.
    pub fn new(settings: PlotSettings) -> Self {
        Self {
            settings: ArcSwap::from_pointee(settings),
        }
    }

    /// Seeds a cache from [`ConfigLoader::load_with`].
    ///
    /// Settings that fail to load or validate are reported and replaced by
    /// the defaults, so plots can always be created.
    pub fn load_with<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        match ConfigLoader::load_with(lookup) {
            Ok(settings) => Self::new(settings),
            Err(e) => {
                warn!(error = %e, "Failed to load plot settings, using defaults");
                Self::default()
            }
        }
    }

    /// Gets the current settings.
    pub fn get(&self) -> Arc<PlotSettings> {
        self.settings.load_full()
    }

    /// Validates and then replaces the settings atomically.
    pub fn update(&self, settings: PlotSettings) -> Result<()> {
        settings.validate()?;
        self.settings.store(Arc::new(settings));
        Ok(())
    }
}

impl Default for ConfigCache {
    fn default() -> Self {
        Self::new(PlotSettings::default())
    }
}

static GLOBAL: Lazy<ConfigCache> = Lazy::new(|| ConfigCache::load_with(|var| std::env::var(var).ok()));

/// Settings that newly constructed plots use as their defaults.
pub fn current() -> Arc<PlotSettings> {
    GLOBAL.get()
}

/// Publishes new process-wide defaults. Existing plots keep the settings
/// they were created with.
pub fn install(settings: PlotSettings) -> Result<()> {
    GLOBAL.update(settings)?;
    tracing::debug!("installed new default plot settings");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_replaces_snapshot() {
        let cache = ConfigCache::default();
        let before = cache.get();

        let mut settings = PlotSettings::default();
        settings.window.width = 1280;
        cache.update(settings).unwrap();

        assert_eq!(before.window.width, 800);
        assert_eq!(cache.get().window.width, 1280);
    }

    #[test]
    fn test_load_with_applies_environment() {
        let cache = ConfigCache::load_with(|var| (var == "FNPLOT_WINDOW_WIDTH").then(|| "1280".to_string()));
        assert_eq!(cache.get().window.width, 1280);
    }

    #[test]
    fn test_load_with_falls_back_to_defaults() {
        let cache = ConfigCache::load_with(|var| (var == "FNPLOT_WINDOW_WIDTH").then(|| "wide".to_string()));
        assert_eq!(*cache.get(), PlotSettings::default());
    }

    #[test]
    fn test_update_rejects_invalid_settings() {
        let cache = ConfigCache::default();
        let mut settings = PlotSettings::default();
        settings.appearance.background = "white".to_string();

        assert!(cache.update(settings).is_err());
        assert_eq!(cache.get().appearance.background, "#FFFFFF");
    }
}
