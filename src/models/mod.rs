//! Request and Response models for the cache gateway API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{DeleteManyRequest, GetManyRequest, SetManyRequest, SetRequest, MAX_KEY_LENGTH};
pub use responses::{
    ClearResponse, DeleteManyResponse, DeleteResponse, ErrorResponse, ExistsResponse,
    FetchResponse, GetManyResponse, HealthResponse, SetManyResponse, SetResponse, StatsResponse,
};
