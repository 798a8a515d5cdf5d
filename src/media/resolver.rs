//! Media Resolver
//!
//! Per-reference state machine: classify the reference, optionally enrich it
//! through a [`MetadataFetcher`] with bounded retries, cache the finished
//! descriptor and notify an observer.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::error::{MediaError, Result};
use crate::media::classify::{classify, classify_as, Classification};
use crate::media::observer::ObserverSlot;
use crate::media::{FetchError, MediaDescriptor, MediaKind, MetadataFetcher, ResolveObserver};
use crate::registry::MediaCache;

/// Default lifetime of a cached descriptor.
pub const DEFAULT_DESCRIPTOR_TTL: Duration = Duration::from_secs(4 * 60 * 60);

// == Phase ==
/// Where a resolver is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unparsed,
    Classified,
    Enriching,
    Resolved,
    Failed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Unparsed => "unparsed",
            Phase::Classified => "classified",
            Phase::Enriching => "enriching",
            Phase::Resolved => "resolved",
            Phase::Failed => "failed",
        };
        f.write_str(name)
    }
}

// == Resolve Failure ==
/// Why a resolution ended in [`Phase::Failed`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveFailure {
    /// Every allowed attempt failed
    #[error("gave up after {attempts} attempts: {last_error}")]
    Exhausted { attempts: u32, last_error: FetchError },

    /// An attempt failed in a way retrying cannot fix
    #[error("attempt {attempts} failed permanently: {error}")]
    NotRetryable { attempts: u32, error: FetchError },

    /// The policy allows no fetch attempts at all
    #[error("no fetch attempts allowed")]
    NoAttempts,
}

impl ResolveFailure {
    pub fn attempts(&self) -> u32 {
        match self {
            ResolveFailure::Exhausted { attempts, .. }
            | ResolveFailure::NotRetryable { attempts, .. } => *attempts,
            ResolveFailure::NoAttempts => 0,
        }
    }
}

// == Retry Policy ==
/// Bounds on the enrichment loop, fixed when the resolver is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of fetch attempts per resolution
    pub max_attempts: u32,
    /// Whether failed attempts are retried at all
    pub retry: bool,
    /// Pause between attempts
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry: true,
            backoff: Duration::from_millis(250),
        }
    }
}

// == Resolver State ==
/// Everything a resolver knows about its current reference.
#[derive(Debug, Clone)]
pub struct ResolverState {
    pub reference: String,
    pub descriptor: MediaDescriptor,
    /// Fetch attempts made for this reference
    pub attempt_count: u32,
    pub retry_requested: bool,
    pub phase: Phase,
    pub failure: Option<ResolveFailure>,
}

impl ResolverState {
    fn unparsed(reference: String, retry_requested: bool) -> Self {
        Self {
            descriptor: MediaDescriptor::unclassified(reference.clone()),
            reference,
            attempt_count: 0,
            retry_requested,
            phase: Phase::Unparsed,
            failure: None,
        }
    }

    /// Decides whether a failed attempt is followed by another one.
    fn should_retry(&self, max_attempts: u32, error: &FetchError) -> bool {
        self.retry_requested && self.attempt_count < max_attempts && error.is_retryable()
    }
}

// == Resolver ==
/// Turns one raw reference at a time into a cached [`MediaDescriptor`].
///
/// Dropping a resolver (or the future of an in-flight resolution) abandons
/// it: the pending fetch is cancelled and nothing is cached or notified.
pub struct Resolver {
    state: ResolverState,
    resolved: Option<Arc<MediaDescriptor>>,
    fetcher: Arc<dyn MetadataFetcher>,
    cache: MediaCache,
    observer: ObserverSlot,
    policy: RetryPolicy,
    ttl: Duration,
}

impl Resolver {
    pub fn new(fetcher: Arc<dyn MetadataFetcher>, cache: MediaCache) -> Self {
        let policy = RetryPolicy::default();
        Self {
            state: ResolverState::unparsed(String::new(), policy.retry),
            resolved: None,
            fetcher,
            cache,
            observer: ObserverSlot::default(),
            policy,
            ttl: DEFAULT_DESCRIPTOR_TTL,
        }
    }

    /// Attaches an observer. Only a weak reference is kept.
    pub fn with_observer<O: ResolveObserver + 'static>(mut self, observer: &Arc<O>) -> Self {
        self.observer = ObserverSlot::new(observer);
        self
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self.state.retry_requested = policy.retry;
        self
    }

    /// Sets how long resolved descriptors stay in the cache.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    // == Accessors ==
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn state(&self) -> &ResolverState {
        &self.state
    }

    pub fn descriptor(&self) -> &MediaDescriptor {
        &self.state.descriptor
    }

    pub fn attempt_count(&self) -> u32 {
        self.state.attempt_count
    }

    pub fn failure(&self) -> Option<&ResolveFailure> {
        self.state.failure.as_ref()
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    // == Parse ==
    /// Classifies `reference` without any I/O.
    ///
    /// Surrounding whitespace is not part of the reference.
    pub fn parse(&mut self, reference: impl Into<String>) -> &MediaDescriptor {
        let reference: String = reference.into();
        let reference = reference.trim().to_string();
        let classification = classify(&reference);
        self.classified(reference, classification)
    }

    /// Classifies `reference` as a caller-supplied media kind.
    pub fn parse_with_kind(
        &mut self,
        reference: impl Into<String>,
        kind: MediaKind,
    ) -> &MediaDescriptor {
        let reference: String = reference.into();
        let reference = reference.trim().to_string();
        let classification = classify_as(&reference, kind);
        self.classified(reference, classification)
    }

    fn classified(
        &mut self,
        reference: String,
        classification: Classification,
    ) -> &MediaDescriptor {
        if !classification.is_recognized() {
            debug!(reference = %reference, "Reference matched no known media shape");
        }

        self.resolved = None;
        self.state = ResolverState::unparsed(reference, self.policy.retry);
        self.state.descriptor = classification.into_descriptor(&self.state.reference);
        self.state.phase = Phase::Classified;
        &self.state.descriptor
    }

    /// Returns a live cached descriptor for the classified reference.
    pub async fn lookup_cached(&self) -> Option<Arc<MediaDescriptor>> {
        if self.state.phase == Phase::Unparsed {
            return None;
        }
        self.cache.get(self.state.descriptor.cache_key()).await
    }

    // == Retrieve ==
    /// Classifies and enriches `reference`, then caches the result.
    pub async fn parse_and_retrieve(
        &mut self,
        reference: impl Into<String>,
    ) -> std::result::Result<Arc<MediaDescriptor>, ResolveFailure> {
        self.set_reference_and_retrieve(reference, true).await
    }

    /// Runs the full resolution for `reference`.
    ///
    /// With `retrieve` false no lookup is made and the classified descriptor
    /// is cached as-is.
    pub async fn set_reference_and_retrieve(
        &mut self,
        reference: impl Into<String>,
        retrieve: bool,
    ) -> std::result::Result<Arc<MediaDescriptor>, ResolveFailure> {
        self.parse(reference);

        if retrieve && self.state.descriptor.video_kind.is_provider() {
            self.enrich().await?;
        }

        Ok(self.finish().await)
    }

    async fn enrich(&mut self) -> std::result::Result<(), ResolveFailure> {
        self.state.phase = Phase::Enriching;

        loop {
            if self.state.attempt_count >= self.policy.max_attempts {
                return Err(self.fail(ResolveFailure::NoAttempts));
            }
            self.state.attempt_count += 1;
            let attempt = self.state.attempt_count;

            match self.fetcher.fetch(&self.state.descriptor).await {
                Ok(enrichment) => {
                    debug!(reference = %self.state.reference, attempt, "Enrichment succeeded");
                    self.state.descriptor.photo_url = Some(enrichment.photo_url);
                    self.state.descriptor.photo_ratio = enrichment.photo_ratio;
                    return Ok(());
                }
                Err(error) if self.state.should_retry(self.policy.max_attempts, &error) => {
                    warn!(
                        reference = %self.state.reference,
                        attempt,
                        max_attempts = self.policy.max_attempts,
                        error = %error,
                        "Enrichment attempt failed, retrying"
                    );
                    if !self.policy.backoff.is_zero() {
                        tokio::time::sleep(self.policy.backoff).await;
                    }
                }
                Err(error) => {
                    let failure = if error.is_retryable() {
                        ResolveFailure::Exhausted {
                            attempts: attempt,
                            last_error: error,
                        }
                    } else {
                        ResolveFailure::NotRetryable {
                            attempts: attempt,
                            error,
                        }
                    };
                    return Err(self.fail(failure));
                }
            }
        }
    }

    fn fail(&mut self, failure: ResolveFailure) -> ResolveFailure {
        warn!(reference = %self.state.reference, error = %failure, "Resolution failed");
        self.state.phase = Phase::Failed;
        self.state.failure = Some(failure.clone());
        self.observer.notify_failed(&self.state.reference, &failure);
        failure
    }

    async fn finish(&mut self) -> Arc<MediaDescriptor> {
        self.state.phase = Phase::Resolved;
        let descriptor = Arc::new(self.state.descriptor.clone());
        self.resolved = Some(Arc::clone(&descriptor));

        self.cache
            .store_for(descriptor.cache_key(), Arc::clone(&descriptor), self.ttl)
            .await;
        info!(
            key = descriptor.cache_key(),
            kind = ?descriptor.media_kind,
            provider = ?descriptor.video_kind,
            "Resolved media descriptor"
        );

        self.observer.notify_ready(&descriptor);
        descriptor
    }

    // == Store In Memory ==
    /// Writes the resolved descriptor into the shared cache again.
    ///
    /// Fails with [`MediaError::InvalidStoreCall`] before resolution has
    /// completed; the cache is left untouched in that case.
    pub async fn store_in_memory(&self) -> Result<()> {
        let descriptor = match (&self.resolved, self.state.phase) {
            (Some(descriptor), Phase::Resolved) => Arc::clone(descriptor),
            (_, phase) => return Err(MediaError::InvalidStoreCall(phase)),
        };

        let key = descriptor.cache_key().to_string();
        self.cache.store_for(key, descriptor, self.ttl).await;
        Ok(())
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("state", &self.state)
            .field("observer", &self.observer)
            .field("policy", &self.policy)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::SharedCache;
    use crate::media::{Enrichment, VideoKind};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};

    const YOUTUBE: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

    /// Fails with `error` until the `succeed_on`-th call.
    struct ScriptedFetcher {
        calls: AtomicU32,
        succeed_on: Option<u32>,
        error: FetchError,
    }

    impl ScriptedFetcher {
        fn succeeding_on(attempt: u32) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicU32::new(0),
                succeed_on: Some(attempt),
                error: FetchError::Timeout,
            })
        }

        fn always_failing(error: FetchError) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicU32::new(0),
                succeed_on: None,
                error,
            })
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl MetadataFetcher for ScriptedFetcher {
        async fn fetch(
            &self,
            _descriptor: &MediaDescriptor,
        ) -> std::result::Result<Enrichment, FetchError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            match self.succeed_on {
                Some(n) if call >= n => Ok(Enrichment {
                    photo_url: "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg".to_string(),
                    photo_ratio: Some(0.75),
                }),
                _ => Err(self.error.clone()),
            }
        }
    }

    #[derive(Default)]
    struct RecordingObserver {
        ready: Mutex<Vec<MediaDescriptor>>,
        failed: Mutex<Vec<ResolveFailure>>,
    }

    impl ResolveObserver for RecordingObserver {
        fn on_descriptor_ready(&self, descriptor: &MediaDescriptor) {
            self.ready.lock().push(descriptor.clone());
        }

        fn on_resolution_failed(&self, _reference: &str, failure: &ResolveFailure) {
            self.failed.lock().push(failure.clone());
        }
    }

    fn fast_policy() -> RetryPolicy {
        RetryPolicy {
            backoff: Duration::ZERO,
            ..RetryPolicy::default()
        }
    }

    fn resolver(fetcher: Arc<ScriptedFetcher>, cache: &MediaCache) -> Resolver {
        Resolver::new(fetcher, cache.clone()).with_policy(fast_policy())
    }

    #[test]
    fn test_new_resolver_is_unparsed() {
        let r = resolver(ScriptedFetcher::succeeding_on(1), &SharedCache::new(10));
        assert_eq!(r.phase(), Phase::Unparsed);
        assert_eq!(r.attempt_count(), 0);
        assert!(r.state().retry_requested);
    }

    #[test]
    fn test_parse_classifies_without_fetching() {
        let fetcher = ScriptedFetcher::succeeding_on(1);
        let mut r = resolver(fetcher.clone(), &SharedCache::new(10));

        let descriptor = r.parse(YOUTUBE);

        assert_eq!(descriptor.video_kind, VideoKind::Youtube);
        assert_eq!(descriptor.media_id.as_deref(), Some("dQw4w9WgXcQ"));
        assert_eq!(r.phase(), Phase::Classified);
        assert_eq!(fetcher.calls(), 0);
    }

    #[test]
    fn test_parse_unrecognized_reference() {
        let mut r = resolver(ScriptedFetcher::succeeding_on(1), &SharedCache::new(10));

        let descriptor = r.parse("https://example.com/page");

        assert_eq!(descriptor.media_kind, MediaKind::Other);
        assert_eq!(descriptor.video_kind, VideoKind::Other);
        assert_eq!(r.phase(), Phase::Classified);
    }

    #[test]
    fn test_parse_with_kind() {
        let mut r = resolver(ScriptedFetcher::succeeding_on(1), &SharedCache::new(10));

        let descriptor = r.parse_with_kind("https://example.com/stream", MediaKind::Audio);

        assert_eq!(descriptor.media_kind, MediaKind::Audio);
    }

    #[tokio::test]
    async fn test_success_on_kth_attempt() {
        let cache = SharedCache::new(10);
        let fetcher = ScriptedFetcher::succeeding_on(2);
        let observer = Arc::new(RecordingObserver::default());
        let mut r = resolver(fetcher.clone(), &cache).with_observer(&observer);

        let descriptor = r.parse_and_retrieve(YOUTUBE).await.unwrap();

        assert_eq!(r.phase(), Phase::Resolved);
        assert_eq!(r.attempt_count(), 2);
        assert_eq!(fetcher.calls(), 2);
        assert_eq!(descriptor.photo_ratio, Some(0.75));
        assert_eq!(cache.count().await, 1);
        assert_eq!(cache.get("dQw4w9WgXcQ").await.as_deref(), Some(&*descriptor));
        assert_eq!(observer.ready.lock().len(), 1);
        assert!(observer.failed.lock().is_empty());
    }

    #[tokio::test]
    async fn test_exhausts_retries_without_caching() {
        let cache = SharedCache::new(10);
        let fetcher = ScriptedFetcher::always_failing(FetchError::Timeout);
        let observer = Arc::new(RecordingObserver::default());
        let mut r = resolver(fetcher.clone(), &cache).with_observer(&observer);

        let failure = r.parse_and_retrieve(YOUTUBE).await.unwrap_err();

        assert_eq!(
            failure,
            ResolveFailure::Exhausted {
                attempts: 3,
                last_error: FetchError::Timeout
            }
        );
        assert_eq!(r.phase(), Phase::Failed);
        assert_eq!(fetcher.calls(), 3);
        assert_eq!(cache.count().await, 0);
        assert!(observer.ready.lock().is_empty());
        assert_eq!(observer.failed.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_non_retryable_error_fails_immediately() {
        let fetcher = ScriptedFetcher::always_failing(FetchError::Status(404));
        let mut r = resolver(fetcher.clone(), &SharedCache::new(10));

        let failure = r.parse_and_retrieve(YOUTUBE).await.unwrap_err();

        assert!(matches!(failure, ResolveFailure::NotRetryable { attempts: 1, .. }));
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn test_retry_disabled_makes_single_attempt() {
        let fetcher = ScriptedFetcher::always_failing(FetchError::Timeout);
        let policy = RetryPolicy {
            retry: false,
            ..fast_policy()
        };
        let mut r = Resolver::new(fetcher.clone(), SharedCache::new(10)).with_policy(policy);

        let failure = r.parse_and_retrieve(YOUTUBE).await.unwrap_err();

        assert_eq!(failure.attempts(), 1);
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn test_custom_max_attempts() {
        let fetcher = ScriptedFetcher::always_failing(FetchError::Transport("reset".to_string()));
        let policy = RetryPolicy {
            max_attempts: 5,
            ..fast_policy()
        };
        let mut r = Resolver::new(fetcher.clone(), SharedCache::new(10)).with_policy(policy);

        r.parse_and_retrieve(YOUTUBE).await.unwrap_err();

        assert_eq!(fetcher.calls(), 5);
    }

    #[tokio::test]
    async fn test_zero_max_attempts_never_fetches() {
        let cache = SharedCache::new(10);
        let fetcher = ScriptedFetcher::always_failing(FetchError::Timeout);
        let observer = Arc::new(RecordingObserver::default());
        let policy = RetryPolicy {
            max_attempts: 0,
            ..fast_policy()
        };
        let mut r = Resolver::new(fetcher.clone(), cache.clone())
            .with_policy(policy)
            .with_observer(&observer);

        let failure = r.parse_and_retrieve(YOUTUBE).await.unwrap_err();

        assert_eq!(failure, ResolveFailure::NoAttempts);
        assert_eq!(failure.attempts(), 0);
        assert_eq!(fetcher.calls(), 0);
        assert_eq!(r.attempt_count(), 0);
        assert_eq!(r.phase(), Phase::Failed);
        assert_eq!(cache.count().await, 0);
        assert_eq!(observer.failed.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_abandoned_resolution_stores_and_notifies_nothing() {
        struct StalledFetcher;

        #[async_trait]
        impl MetadataFetcher for StalledFetcher {
            async fn fetch(
                &self,
                _descriptor: &MediaDescriptor,
            ) -> std::result::Result<Enrichment, FetchError> {
                std::future::pending().await
            }
        }

        let cache = SharedCache::new(10);
        let observer = Arc::new(RecordingObserver::default());
        let mut r = Resolver::new(Arc::new(StalledFetcher), cache.clone())
            .with_policy(fast_policy())
            .with_observer(&observer);

        let outcome =
            tokio::time::timeout(Duration::from_millis(20), r.parse_and_retrieve(YOUTUBE)).await;

        assert!(outcome.is_err());
        assert_eq!(r.phase(), Phase::Enriching);
        assert_eq!(cache.count().await, 0);
        assert!(observer.ready.lock().is_empty());
        assert!(observer.failed.lock().is_empty());
    }

    #[tokio::test]
    async fn test_without_retrieve_skips_enrichment() {
        let cache = SharedCache::new(10);
        let fetcher = ScriptedFetcher::always_failing(FetchError::Timeout);
        let mut r = resolver(fetcher.clone(), &cache);

        let descriptor = r.set_reference_and_retrieve(YOUTUBE, false).await.unwrap();

        assert_eq!(fetcher.calls(), 0);
        assert!(descriptor.photo_url.is_none());
        assert_eq!(r.phase(), Phase::Resolved);
        assert!(cache.contains("dQw4w9WgXcQ").await);
    }

    #[tokio::test]
    async fn test_non_provider_reference_resolves_without_fetch() {
        let cache = SharedCache::new(10);
        let fetcher = ScriptedFetcher::always_failing(FetchError::Timeout);
        let mut r = resolver(fetcher.clone(), &cache);

        let descriptor = r.parse_and_retrieve("https://cdn.example.com/a.png").await.unwrap();

        assert_eq!(fetcher.calls(), 0);
        assert_eq!(descriptor.media_kind, MediaKind::Photo);
        // No media id: cached under the original URL
        assert!(cache.contains("https://cdn.example.com/a.png").await);
    }

    #[tokio::test]
    async fn test_surrounding_whitespace_is_not_part_of_the_key() {
        let cache = SharedCache::new(10);
        let mut r = resolver(ScriptedFetcher::succeeding_on(1), &cache);

        let descriptor = r
            .parse_and_retrieve("  https://cdn.example.com/a.png\n")
            .await
            .unwrap();

        assert_eq!(r.state().reference, "https://cdn.example.com/a.png");
        assert_eq!(descriptor.original_url, "https://cdn.example.com/a.png");
        assert_eq!(
            descriptor.photo_url.as_deref(),
            Some("https://cdn.example.com/a.png")
        );
        assert!(cache.contains("https://cdn.example.com/a.png").await);
    }

    #[test]
    fn test_parse_with_kind_trims_reference() {
        let mut r = resolver(ScriptedFetcher::succeeding_on(1), &SharedCache::new(10));

        let descriptor = r.parse_with_kind("\thttps://example.com/stream ", MediaKind::Audio);

        assert_eq!(descriptor.original_url, "https://example.com/stream");
        assert_eq!(descriptor.cache_key(), "https://example.com/stream");
    }

    #[tokio::test]
    async fn test_store_in_memory_before_resolution() {
        let cache = SharedCache::new(10);
        let mut r = resolver(ScriptedFetcher::succeeding_on(1), &cache);

        assert!(matches!(
            r.store_in_memory().await,
            Err(MediaError::InvalidStoreCall(Phase::Unparsed))
        ));

        r.parse(YOUTUBE);
        assert!(matches!(
            r.store_in_memory().await,
            Err(MediaError::InvalidStoreCall(Phase::Classified))
        ));
        assert_eq!(cache.count().await, 0);
    }

    #[tokio::test]
    async fn test_store_in_memory_after_failure() {
        let cache = SharedCache::new(10);
        let mut r = resolver(ScriptedFetcher::always_failing(FetchError::Timeout), &cache);

        r.parse_and_retrieve(YOUTUBE).await.unwrap_err();

        assert!(matches!(
            r.store_in_memory().await,
            Err(MediaError::InvalidStoreCall(Phase::Failed))
        ));
        assert_eq!(cache.count().await, 0);
    }

    #[tokio::test]
    async fn test_store_in_memory_restores_removed_entry() {
        let cache = SharedCache::new(10);
        let mut r = resolver(ScriptedFetcher::succeeding_on(1), &cache);

        r.parse_and_retrieve(YOUTUBE).await.unwrap();
        assert_eq!(cache.remove_all().await, 1);
        r.store_in_memory().await.unwrap();

        assert!(cache.contains("dQw4w9WgXcQ").await);
    }

    #[tokio::test]
    async fn test_dropped_observer_is_ignored() {
        let observer = Arc::new(RecordingObserver::default());
        let mut r = resolver(ScriptedFetcher::succeeding_on(1), &SharedCache::new(10))
            .with_observer(&observer);
        drop(observer);

        assert!(r.parse_and_retrieve(YOUTUBE).await.is_ok());
    }

    #[tokio::test]
    async fn test_zero_ttl_descriptor_is_not_served() {
        let cache = SharedCache::new(10);
        let mut r = resolver(ScriptedFetcher::succeeding_on(1), &cache).with_ttl(Duration::ZERO);

        r.parse_and_retrieve(YOUTUBE).await.unwrap();

        assert!(r.lookup_cached().await.is_none());
    }

    #[tokio::test]
    async fn test_lookup_cached_after_parse() {
        let cache = SharedCache::new(10);
        let mut first = resolver(ScriptedFetcher::succeeding_on(1), &cache);
        first.parse_and_retrieve(YOUTUBE).await.unwrap();

        let fetcher = ScriptedFetcher::succeeding_on(1);
        let mut second = resolver(fetcher.clone(), &cache);
        assert!(second.lookup_cached().await.is_none());
        second.parse("https://youtu.be/dQw4w9WgXcQ");

        let cached = second.lookup_cached().await.unwrap();
        assert_eq!(cached.photo_ratio, Some(0.75));
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_reparse_resets_state() {
        let fetcher = ScriptedFetcher::always_failing(FetchError::Timeout);
        let mut r = resolver(fetcher, &SharedCache::new(10));
        r.parse_and_retrieve(YOUTUBE).await.unwrap_err();

        r.parse("https://cdn.example.com/a.gif");

        assert_eq!(r.phase(), Phase::Classified);
        assert_eq!(r.attempt_count(), 0);
        assert!(r.failure().is_none());
    }
}
