//! API Handlers
//!
//! HTTP request handlers for each cache service endpoint.

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::debug;

use crate::cache::SharedCache;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    GetResponse, HealthResponse, SetRequest, SetResponse, SizeResponse, StatsResponse,
};

/// Application state shared across all handlers.
///
/// The cache handle is cheap to clone and serializes every call internally,
/// so handlers never hold the lock across an await point.
#[derive(Clone)]
pub struct AppState {
    pub cache: SharedCache<String, String>,
}

impl AppState {
    pub fn new(cache: SharedCache<String, String>) -> Self {
        Self { cache }
    }

    /// Creates a new AppState from configuration.
    ///
    /// # Errors
    /// Fails if the configured capacity is zero.
    pub fn from_config(config: &Config) -> Result<Self> {
        SharedCache::new(config.capacity).map(Self::new)
    }
}

/// Handler for PUT /set
///
/// Stores a key-value pair with an optional TTL in milliseconds.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let ttl = req.ttl();
    state.cache.set(req.key.clone(), req.value, ttl);
    debug!(key = %req.key, ttl_ms = ttl.as_millis() as u64, "set");

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /get/:key
///
/// Absent and expired keys both answer 404.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    match state.cache.get(&key) {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for GET /size
pub async fn size_handler(State(state): State<AppState>) -> Json<SizeResponse> {
    Json(SizeResponse {
        size: state.cache.len(),
        capacity: state.cache.capacity(),
    })
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
