//! API Handlers
//!
//! HTTP request handlers for each cache gateway endpoint. Each handler is a
//! thin translation onto one [`CacheDriver`] operation.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::codec::AnyPacker;
use crate::config::Config;
use crate::driver::{CacheDriver, RedisDriver};
use crate::error::{CacheError, Result};
use crate::models::{
    ClearResponse, DeleteManyRequest, DeleteManyResponse, DeleteResponse, ExistsResponse,
    FetchResponse, GetManyRequest, GetManyResponse, HealthResponse, SetManyRequest,
    SetManyResponse, SetRequest, SetResponse, StatsResponse,
};
use crate::store::{MemoryStore, StoreClient};

/// Gateway driver type: any store, codec picked at runtime
pub type GatewayDriver = RedisDriver<AnyPacker>;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub driver: Arc<GatewayDriver>,
    /// Set when the in-process store backs the driver
    pub memory: Option<MemoryStore>,
}

impl AppState {
    pub fn new(driver: GatewayDriver, memory: Option<MemoryStore>) -> Self {
        Self {
            driver: Arc::new(driver),
            memory,
        }
    }

    /// State backed by a fresh in-process store.
    pub fn in_memory(config: &Config) -> Self {
        let store = MemoryStore::new(config.max_entries);
        let driver = Self::build_driver(Arc::new(store.clone()), config);
        Self::new(driver, Some(store))
    }

    /// Builds state from configuration, connecting to Redis when `redis_url` is set.
    pub async fn from_config(config: &Config) -> Result<Self> {
        match &config.redis_url {
            None => Ok(Self::in_memory(config)),
            Some(url) => Self::connect_redis(url, config).await,
        }
    }

    #[cfg(feature = "redis")]
    async fn connect_redis(url: &str, config: &Config) -> Result<Self> {
        let store = crate::store::RedisStore::connect(url).await?;
        tracing::info!("Connected to Redis store");
        Ok(Self::new(Self::build_driver(Arc::new(store), config), None))
    }

    #[cfg(not(feature = "redis"))]
    async fn connect_redis(_url: &str, _config: &Config) -> Result<Self> {
        Err(CacheError::Connection(
            "REDIS_URL is set but the crate was built without the `redis` feature".to_string(),
        ))
    }

    fn build_driver(store: Arc<dyn StoreClient>, config: &Config) -> GatewayDriver {
        RedisDriver::new(store, AnyPacker::new(config.codec), &config.prefix)
            .with_scan_count(config.scan_count)
    }
}

/// Handler for PUT /cache
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidArgument(error_msg));
    }

    let stored = state.driver.set(&req.key, &req.value, req.ttl).await?;
    Ok(Json(SetResponse::new(req.key, stored)))
}

/// Handler for GET /cache/:key
pub async fn fetch_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<FetchResponse>> {
    let (found, value) = state.driver.fetch(&key, Value::Null).await?;
    Ok(Json(FetchResponse::new(key, found, value)))
}

/// Handler for DELETE /cache/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let deleted = state.driver.delete(&key).await?;
    Ok(Json(DeleteResponse::new(key, deleted)))
}

/// Handler for GET /cache/:key/exists
pub async fn exists_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<ExistsResponse>> {
    let exists = state.driver.has(&key).await?;
    Ok(Json(ExistsResponse { key, exists }))
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Result<Json<ClearResponse>> {
    let cleared = state.driver.clear().await?;
    Ok(Json(ClearResponse {
        prefix: state.driver.keys().prefix().to_string(),
        cleared,
    }))
}

/// Handler for POST /batch/get
pub async fn get_many_handler(
    State(state): State<AppState>,
    Json(req): Json<GetManyRequest>,
) -> Result<Json<GetManyResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidArgument(error_msg));
    }

    let values = state.driver.get_multiple(&req.keys, req.default).await?;
    Ok(Json(GetManyResponse { values }))
}

/// Handler for PUT /batch
pub async fn set_many_handler(
    State(state): State<AppState>,
    Json(req): Json<SetManyRequest>,
) -> Result<Json<SetManyResponse>> {
    let ttl = req.ttl;
    let entries = req.into_entries()?;

    let report = state.driver.set_multiple(entries, ttl).await?;
    Ok(Json(SetManyResponse::from(report)))
}

/// Handler for POST /batch/delete
pub async fn delete_many_handler(
    State(state): State<AppState>,
    Json(req): Json<DeleteManyRequest>,
) -> Result<Json<DeleteManyResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidArgument(error_msg));
    }

    let deleted = state.driver.delete_multiple(&req.keys).await?;
    Ok(Json(DeleteManyResponse {
        requested: req.keys.len(),
        deleted,
    }))
}

/// Handler for GET /stats
///
/// Only the in-process store keeps statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let store = state.memory.as_ref().ok_or_else(|| {
        CacheError::NotFound(format!(
            "statistics are not kept by the {} store",
            state.driver.store().name()
        ))
    })?;

    Ok(Json(StatsResponse::from(store.stats().await)))
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(
        state.driver.store().name(),
        state.driver.packer().kind().to_string(),
    ))
}
