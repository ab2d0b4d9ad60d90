//! Application state shared by request handlers.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::AppConfig;

/// Shared application state.
///
/// Cloned into every handler invocation, so it only holds `Arc`s and
/// `Copy` data.
///
/// # Example
///
/// ```rust
/// use beacon_web::{AppConfig, AppState};
///
/// let state = AppState::new(AppConfig::for_testing());
/// assert!(state.is_testing());
/// ```
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    config: Arc<AppConfig>,

    /// When the state was created.
    started_at: Instant,
}

impl AppState {
    /// Creates a new AppState with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
            started_at: Instant::now(),
        }
    }

    /// Returns a reference to the configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns whether the application runs in testing mode.
    pub fn is_testing(&self) -> bool {
        self.config.testing
    }

    /// Returns how long ago the state was created.
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}
