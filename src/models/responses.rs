//! Response DTOs for the cache gateway API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::driver::BatchWriteReport;
use crate::store::StoreStats;

/// Response body for `PUT /cache`
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    pub key: String,
    /// Store acknowledgement
    pub stored: bool,
}

impl SetResponse {
    pub fn new(key: impl Into<String>, stored: bool) -> Self {
        Self {
            key: key.into(),
            stored,
        }
    }
}

/// Response body for `GET /cache/:key`
///
/// `found` separates a stored `null` from an absent key.
#[derive(Debug, Clone, Serialize)]
pub struct FetchResponse {
    pub key: String,
    pub found: bool,
    pub value: Value,
}

impl FetchResponse {
    pub fn new(key: impl Into<String>, found: bool, value: Value) -> Self {
        Self {
            key: key.into(),
            found,
            value,
        }
    }
}

/// Response body for `DELETE /cache/:key`
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub key: String,
    pub deleted: bool,
}

impl DeleteResponse {
    pub fn new(key: impl Into<String>, deleted: bool) -> Self {
        Self {
            key: key.into(),
            deleted,
        }
    }
}

/// Response body for `GET /cache/:key/exists`
#[derive(Debug, Clone, Serialize)]
pub struct ExistsResponse {
    pub key: String,
    pub exists: bool,
}

/// Response body for `POST /batch/get`
#[derive(Debug, Clone, Serialize)]
pub struct GetManyResponse {
    pub values: HashMap<String, Value>,
}

/// Response body for `PUT /batch`
#[derive(Debug, Clone, Serialize)]
pub struct SetManyResponse {
    /// True only when every key was stored
    pub success: bool,
    #[serde(flatten)]
    pub report: BatchWriteReport,
}

impl From<BatchWriteReport> for SetManyResponse {
    fn from(report: BatchWriteReport) -> Self {
        Self {
            success: report.is_success(),
            report,
        }
    }
}

/// Response body for `POST /batch/delete`
#[derive(Debug, Clone, Serialize)]
pub struct DeleteManyResponse {
    pub requested: usize,
    pub deleted: bool,
}

/// Response body for `DELETE /cache`
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub prefix: String,
    pub cleared: bool,
}

/// Response body for `GET /stats`
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub total_entries: usize,
    /// hits / (hits + misses)
    pub hit_rate: f64,
}

impl From<StoreStats> for StatsResponse {
    fn from(stats: StoreStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for `GET /health`
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Store backend name
    pub store: String,
    /// Value codec name
    pub codec: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy(store: impl Into<String>, codec: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            store: store.into(),
            codec: codec.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::WriteOutcome;

    #[test]
    fn test_fetch_response_serialize() {
        let resp = FetchResponse::new("k", false, Value::Null);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json, serde_json::json!({"key": "k", "found": false, "value": null}));
    }

    #[test]
    fn test_set_many_response_flattens_report() {
        let mut report = BatchWriteReport::default();
        report.push("a".to_string(), WriteOutcome::Stored);
        report.push("b".to_string(), WriteOutcome::Rejected);

        let json = serde_json::to_value(SetManyResponse::from(report)).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["writes"][1]["status"], "rejected");
    }

    #[test]
    fn test_stats_response_from_store_stats() {
        let stats = StoreStats {
            hits: 80,
            misses: 20,
            evictions: 5,
            expirations: 2,
            total_entries: 100,
        };
        let resp = StatsResponse::from(stats);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
        assert_eq!(resp.expirations, 2);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy("memory", "json");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("memory"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("Something went wrong"));
    }
}
