//! Collection-unique slug resolution.

use async_trait::async_trait;

use crate::core::DocumentStore;
use crate::error::StorageResult;

use super::{SlugOptions, slugify_with};

/// Capability for probing whether a slug candidate is already taken.
///
/// Injected into [`unique_slug`] so the resolver stays independent of any
/// particular backend and can be mocked in tests. Errors from `exists` are
/// propagated to the caller unchanged — the resolver does not retry or log.
#[async_trait]
pub trait SlugExistence: Send + Sync {
    /// Returns `true` if `candidate` is already bound to a document.
    async fn exists(&self, candidate: &str) -> StorageResult<bool>;
}

/// Resolves a collection-unique slug for a title.
///
/// Computes the base slug, then appends `-1`, `-2`, … until the probe reports
/// an unused candidate. Termination is guaranteed under a single writer; two
/// concurrent writers can still race to the same candidate, which the store
/// rejects at commit time (callers regenerate with a suffix and retry).
///
/// # Examples
///
/// ```ignore
/// let slug = unique_slug("Annual Report", &probe, &SlugOptions::default()).await?;
/// // "annual-report", or "annual-report-1" if the base is taken
/// ```
pub async fn unique_slug(
    title: &str,
    probe: &dyn SlugExistence,
    options: &SlugOptions,
) -> StorageResult<String> {
    let base = slugify_with(title, options);

    if !probe.exists(&base).await? {
        return Ok(base);
    }

    let mut counter: u64 = 1;
    loop {
        let candidate = format!("{}-{}", base, counter);
        if !probe.exists(&candidate).await? {
            return Ok(candidate);
        }
        counter += 1;
    }
}

/// Store-backed [`SlugExistence`] scoped to one collection.
///
/// `exclude_id` carries the document being renamed so an update does not
/// collide with its own current slug.
pub struct SlugScope<'a, S: DocumentStore + ?Sized> {
    store: &'a S,
    collection: &'a str,
    exclude_id: Option<&'a str>,
}

impl<'a, S: DocumentStore + ?Sized> SlugScope<'a, S> {
    /// Scope for a create: no document is excluded.
    pub fn for_create(store: &'a S, collection: &'a str) -> Self {
        Self {
            store,
            collection,
            exclude_id: None,
        }
    }

    /// Scope for an update: the renamed document's own slug does not count
    /// as a collision.
    pub fn for_update(store: &'a S, collection: &'a str, exclude_id: &'a str) -> Self {
        Self {
            store,
            collection,
            exclude_id: Some(exclude_id),
        }
    }
}

#[async_trait]
impl<S: DocumentStore + ?Sized> SlugExistence for SlugScope<'_, S> {
    async fn exists(&self, candidate: &str) -> StorageResult<bool> {
        self.store
            .slug_exists(self.collection, candidate, self.exclude_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BackendError, StorageError};
    use parking_lot::Mutex;

    /// Probe backed by a fixed set of taken slugs.
    struct FixedProbe {
        taken: Vec<&'static str>,
        calls: Mutex<Vec<String>>,
    }

    impl FixedProbe {
        fn new(taken: &[&'static str]) -> Self {
            Self {
                taken: taken.to_vec(),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SlugExistence for FixedProbe {
        async fn exists(&self, candidate: &str) -> StorageResult<bool> {
            self.calls.lock().push(candidate.to_string());
            Ok(self.taken.contains(&candidate))
        }
    }

    /// Probe that always fails, for error propagation tests.
    struct FailingProbe;

    #[async_trait]
    impl SlugExistence for FailingProbe {
        async fn exists(&self, _candidate: &str) -> StorageResult<bool> {
            Err(StorageError::Backend(BackendError::internal(
                "mock",
                "store unavailable",
            )))
        }
    }

    #[tokio::test]
    async fn test_base_slug_unused() {
        let probe = FixedProbe::new(&[]);
        let slug = unique_slug("Annual Report", &probe, &SlugOptions::default())
            .await
            .unwrap();
        assert_eq!(slug, "annual-report");
    }

    #[tokio::test]
    async fn test_first_suffix_when_base_taken() {
        let probe = FixedProbe::new(&["annual-report"]);
        let slug = unique_slug("Annual Report", &probe, &SlugOptions::default())
            .await
            .unwrap();
        assert_eq!(slug, "annual-report-1");
    }

    #[tokio::test]
    async fn test_counter_increments_past_taken_suffixes() {
        let probe = FixedProbe::new(&["annual-report", "annual-report-1", "annual-report-2"]);
        let slug = unique_slug("Annual Report", &probe, &SlugOptions::default())
            .await
            .unwrap();
        assert_eq!(slug, "annual-report-3");
    }

    #[tokio::test]
    async fn test_probe_called_in_order() {
        let probe = FixedProbe::new(&["annual-report"]);
        unique_slug("Annual Report", &probe, &SlugOptions::default())
            .await
            .unwrap();
        let calls = probe.calls.lock();
        assert_eq!(*calls, vec!["annual-report", "annual-report-1"]);
    }

    #[tokio::test]
    async fn test_probe_error_propagates() {
        let result = unique_slug("Annual Report", &FailingProbe, &SlugOptions::default()).await;
        assert!(matches!(result, Err(StorageError::Backend(_))));
    }
}
