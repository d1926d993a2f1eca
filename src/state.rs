//! Application state traits for dependency injection
//!
//! Handlers are generic over these traits so the same router serves the
//! production `AppState` and test states with stub collaborators.

use crate::config::Config;
use crate::crypto::SymmetricCipher;
use crate::service::{Clock, RedirectService};

/// Trait for application state that provides the redirect service.
pub trait HasRedirect: Clone + Send + Sync + 'static {
    /// The cipher primitive type
    type Cipher: SymmetricCipher + 'static;
    /// The clock type
    type Clock: Clock + 'static;

    /// Get the application configuration
    fn config(&self) -> &Config;

    /// Get the redirect service
    fn redirect_service(&self) -> &RedirectService<Self::Cipher, Self::Clock>;

    /// Whether the service can serve traffic
    fn check_ready(&self) -> bool {
        self.redirect_service().is_configured()
    }
}
