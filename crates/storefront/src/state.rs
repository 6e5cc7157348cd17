//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::services::{
    Authenticator, ContactSubmitter, InFlight, PasswordHashAuthenticator,
    SimulatedContactSubmitter,
};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// configuration and the injected services.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    submitter: Arc<dyn ContactSubmitter>,
    authenticator: Arc<dyn Authenticator>,
    in_flight: Arc<InFlight>,
}

impl AppState {
    /// Create the state with the default services built from `config`.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let submitter = Arc::new(SimulatedContactSubmitter::new(config.contact_submit_delay));
        let authenticator = Arc::new(PasswordHashAuthenticator::new(
            config.admin.clone(),
            config.login_submit_delay,
        ));
        Self::with_services(config, submitter, authenticator)
    }

    /// Create the state with explicit services.
    #[must_use]
    pub fn with_services(
        config: StorefrontConfig,
        submitter: Arc<dyn ContactSubmitter>,
        authenticator: Arc<dyn Authenticator>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                submitter,
                authenticator,
                in_flight: Arc::new(InFlight::new()),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Service that delivers contact messages.
    #[must_use]
    pub fn submitter(&self) -> &dyn ContactSubmitter {
        self.inner.submitter.as_ref()
    }

    /// Service that checks admin credentials.
    #[must_use]
    pub fn authenticator(&self) -> &dyn Authenticator {
        self.inner.authenticator.as_ref()
    }

    /// Registry of pending form submissions.
    #[must_use]
    pub fn in_flight(&self) -> &Arc<InFlight> {
        &self.inner.in_flight
    }
}
