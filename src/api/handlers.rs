//! API Handlers
//!
//! HTTP request handlers for each media service endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::config::Config;
use crate::error::{MediaError, Result};
use crate::media::{MetadataFetcher, Resolver, RetryPolicy, DEFAULT_DESCRIPTOR_TTL};
use crate::models::{
    DeleteResponse, DescriptorResponse, HealthResponse, PrefixQuery, ReclaimResponse,
    ResolveRequest, StatsResponse,
};
use crate::registry::MediaCache;

/// Application state shared across all handlers.
///
/// Holds the shared descriptor cache and what every per-request resolver is
/// built from.
#[derive(Clone)]
pub struct AppState {
    pub cache: MediaCache,
    pub fetcher: Arc<dyn MetadataFetcher>,
    pub policy: RetryPolicy,
    pub ttl: Duration,
}

impl AppState {
    /// Creates a new AppState with default retry policy and TTL.
    pub fn new(cache: MediaCache, fetcher: Arc<dyn MetadataFetcher>) -> Self {
        Self {
            cache,
            fetcher,
            policy: RetryPolicy::default(),
            ttl: DEFAULT_DESCRIPTOR_TTL,
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(
        config: &Config,
        cache: MediaCache,
        fetcher: Arc<dyn MetadataFetcher>,
    ) -> Self {
        Self {
            cache,
            fetcher,
            policy: config.retry_policy(),
            ttl: config.descriptor_ttl(),
        }
    }

    /// Builds a fresh resolver for one request.
    pub fn resolver(&self) -> Resolver {
        Resolver::new(Arc::clone(&self.fetcher), self.cache.clone())
            .with_policy(self.policy)
            .with_ttl(self.ttl)
    }
}

/// Handler for POST /resolve
///
/// Serves a live cached descriptor when one exists, otherwise resolves the
/// reference and caches the result.
pub async fn resolve_handler(
    State(state): State<AppState>,
    Json(req): Json<ResolveRequest>,
) -> Result<Json<DescriptorResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(MediaError::InvalidRequest(error_msg));
    }

    let reference = req.url.trim();
    let mut resolver = state.resolver();
    resolver.parse(reference);

    if let Some(cached) = resolver.lookup_cached().await {
        // A descriptor cached without retrieval lacks provider metadata
        let complete =
            !req.retrieve || cached.photo_url.is_some() || !cached.video_kind.is_provider();
        if complete {
            return Ok(Json(DescriptorResponse::new(&cached, true)));
        }
    }

    let descriptor = resolver
        .set_reference_and_retrieve(reference, req.retrieve)
        .await?;

    Ok(Json(DescriptorResponse::new(&descriptor, false)))
}

/// Handler for GET /media/:key
pub async fn get_media_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DescriptorResponse>> {
    let descriptor = state
        .cache
        .get(&key)
        .await
        .ok_or(MediaError::NotFound(key))?;

    Ok(Json(DescriptorResponse::new(&descriptor, true)))
}

/// Handler for DELETE /media/:key
pub async fn delete_media_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    if !state.cache.remove(&key).await {
        return Err(MediaError::NotFound(key));
    }

    Ok(Json(DeleteResponse::new(format!("key '{}'", key), 1)))
}

/// Handler for DELETE /media
///
/// Removes every entry under `?prefix=`, or the whole cache without one.
pub async fn clear_media_handler(
    State(state): State<AppState>,
    Query(query): Query<PrefixQuery>,
) -> Json<DeleteResponse> {
    match query.prefix {
        Some(prefix) => {
            let removed = state.cache.remove_all_with_prefix(&prefix).await;
            Json(DeleteResponse::new(format!("prefix '{}'", prefix), removed))
        }
        None => {
            let removed = state.cache.remove_all().await;
            Json(DeleteResponse::new("all keys", removed))
        }
    }
}

/// Handler for POST /reclaim
pub async fn reclaim_handler(State(state): State<AppState>) -> Json<ReclaimResponse> {
    let report = state.cache.reclaim().await;
    let remaining = state.cache.count().await;

    Json(ReclaimResponse::new(report, remaining))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.stats().await;
    let capacity = state.cache.capacity().await;

    Json(StatsResponse::new(&stats, capacity))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
