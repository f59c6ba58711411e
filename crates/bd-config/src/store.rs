//! Atomic configuration snapshots.

use std::sync::{Arc, RwLock};

use crate::RenderConfig;

/// Snapshot store for hot-swapping configuration between renders.
///
/// A render takes a [`snapshot`](Self::snapshot) once and uses that `Arc`
/// for its whole duration; [`swap`](Self::swap) installs a new
/// configuration atomically without affecting renders already in flight.
#[derive(Debug)]
pub struct ConfigStore {
    inner: RwLock<Arc<RenderConfig>>,
}

impl ConfigStore {
    /// Create a store holding the given configuration.
    #[must_use]
    pub fn new(config: RenderConfig) -> Self {
        Self {
            inner: RwLock::new(Arc::new(config)),
        }
    }

    /// The current configuration snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<RenderConfig> {
        Arc::clone(&self.inner.read().expect("config store lock poisoned"))
    }

    /// Atomically replace the configuration.
    pub fn swap(&self, config: RenderConfig) {
        *self.inner.write().expect("config store lock poisoned") = Arc::new(config);
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(RenderConfig::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snapshot_survives_swap() {
        let store = ConfigStore::new(RenderConfig::builtin());
        let before = store.snapshot();

        let replacement = RenderConfig::from_value(json!({
            "theme": {"x": "y"},
            "templates": {"paragraph": {"default": {"tag": "p", "isContentLayer": true}}}
        }))
        .unwrap();
        store.swap(replacement);

        // The old snapshot is untouched; new snapshots see the swap.
        assert!(before.templates.contains_key("header"));
        assert!(!store.snapshot().templates.contains_key("header"));
    }
}
