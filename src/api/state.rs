//! Application state for the Ponto Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{PolicyConfig, PolicyLoader};

/// Shared application state.
///
/// Holds the validated policy every request is calculated against.
#[derive(Clone)]
pub struct AppState {
    /// The loaded policy.
    policy: Arc<PolicyConfig>,
}

impl AppState {
    /// Creates a new application state from a loaded policy.
    pub fn new(loader: PolicyLoader) -> Self {
        Self {
            policy: Arc::new(loader.into_policy()),
        }
    }

    /// Returns a reference to the policy.
    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    /// Returns a shared handle to the policy, for work moved off the
    /// async runtime.
    pub fn policy_handle(&self) -> Arc<PolicyConfig> {
        Arc::clone(&self.policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_policy_handle_shares_policy() {
        let loader = PolicyLoader::load("./config/default").unwrap();
        let state = AppState::new(loader);

        let handle = state.policy_handle();
        assert_eq!(handle.as_ref(), state.policy());
    }
}
