#![forbid(unsafe_code)]

//! Store configuration.

/// Configuration for a [`Store`](crate::Store) or [`FormStore`](crate::FormStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Name attached to every log event emitted by the store.
    pub label: String,
    /// Emit `tracing` events for state changes and subscriptions.
    pub enable_logging: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            label: String::from("store"),
            enable_logging: true,
        }
    }
}

impl StoreConfig {
    /// Create a default config with the given label.
    #[must_use]
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    /// Set the log label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Enable or disable logging.
    #[must_use]
    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.enable_logging = enabled;
        self
    }
}
