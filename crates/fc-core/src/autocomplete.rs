//! Address autocomplete with stale-response rejection
//!
//! Every lookup is issued a token from a monotonic counter. A response is
//! applied only if its token is still the latest one issued, so a slow
//! answer to an earlier keystroke can never overwrite a newer one.

use crate::backend::{Backend, MIN_QUERY_LEN};
use crate::CoreResult;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Suggestion list shared by concurrent lookups
#[derive(Debug, Default)]
pub struct Autocomplete {
    latest: AtomicU64,
    suggestions: Mutex<Vec<String>>,
}

impl Autocomplete {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new lookup; any earlier token becomes stale.
    pub fn issue(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_latest(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::SeqCst) == token.0
    }

    /// Apply `results` if `token` is still current. Returns whether they
    /// were applied.
    pub fn accept(&self, token: RequestToken, results: Vec<String>) -> bool {
        let mut current = match self.suggestions.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        // Checked under the lock so a newer accept cannot interleave
        if !self.is_latest(token) {
            debug!("Discarding stale suggestions for request {}", token.0);
            return false;
        }
        *current = results;
        true
    }

    pub fn suggestions(&self) -> Vec<String> {
        match self.suggestions.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Hide the list, e.g. after a suggestion is picked. Outstanding
    /// lookups become stale.
    pub fn dismiss(&self) {
        let token = self.issue();
        self.accept(token, Vec::new());
    }

    /// Handle a keystroke: short input clears the list without calling the
    /// backend, anything longer is looked up and applied if still current.
    pub async fn on_input(&self, backend: &dyn Backend, query: &str) -> CoreResult<bool> {
        let token = self.issue();
        if query.chars().count() < MIN_QUERY_LEN {
            return Ok(self.accept(token, Vec::new()));
        }
        match backend.address_suggestions(query).await {
            Ok(results) => Ok(self.accept(token, results)),
            Err(e) => {
                // Leave no list from an older query on screen
                self.accept(token, Vec::new());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::tests::{CountingBackend, FailingBackend};
    use crate::backend::MockBackend;
    use crate::config::LatencyConfig;

    #[test]
    fn test_tokens_increase() {
        let autocomplete = Autocomplete::new();
        let first = autocomplete.issue();
        let second = autocomplete.issue();
        assert!(second > first);
        assert!(!autocomplete.is_latest(first));
        assert!(autocomplete.is_latest(second));
    }

    #[test]
    fn test_late_response_is_discarded() {
        let autocomplete = Autocomplete::new();
        let slow = autocomplete.issue();
        let fast = autocomplete.issue();

        assert!(autocomplete.accept(fast, vec!["newer".to_string()]));
        assert!(!autocomplete.accept(slow, vec!["older".to_string()]));
        assert_eq!(autocomplete.suggestions(), vec!["newer"]);
    }

    #[test]
    fn test_dismiss_invalidates_outstanding() {
        let autocomplete = Autocomplete::new();
        let pending = autocomplete.issue();
        autocomplete.dismiss();
        assert!(!autocomplete.accept(pending, vec!["x".to_string()]));
        assert!(autocomplete.suggestions().is_empty());
    }

    #[tokio::test]
    async fn test_short_input_skips_backend() {
        let backend = CountingBackend::default();
        let autocomplete = Autocomplete::new();

        autocomplete.on_input(&backend, "Oak").await.unwrap();
        assert_eq!(autocomplete.suggestions().len(), 5);

        autocomplete.on_input(&backend, "Oa").await.unwrap();
        assert!(autocomplete.suggestions().is_empty());
        assert_eq!(backend.suggestion_calls(), 1);
    }

    #[tokio::test]
    async fn test_failed_lookup_clears_list() {
        let autocomplete = Autocomplete::new();
        autocomplete
            .on_input(&CountingBackend::default(), "Oak")
            .await
            .unwrap();
        assert_eq!(autocomplete.suggestions().len(), 5);

        let err = autocomplete.on_input(&FailingBackend, "Oakl").await.unwrap_err();
        assert!(err.is_transport());
        assert!(autocomplete.suggestions().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_lookups_keep_latest() {
        // Real latency so both lookups are in flight at once
        let backend = MockBackend::new(LatencyConfig::default());
        let autocomplete = Autocomplete::new();

        let (first, second) = tokio::join!(
            autocomplete.on_input(&backend, "Oak"),
            autocomplete.on_input(&backend, "Oakl"),
        );
        // Only the second keystroke may land
        assert!(!first.unwrap());
        assert!(second.unwrap());
        assert!(autocomplete.suggestions()[0].starts_with("Oakl "));
    }
}
