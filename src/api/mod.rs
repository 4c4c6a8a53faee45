//! API Module
//!
//! HTTP handlers and routing for the cache gateway REST API.
//!
//! # Endpoints
//! - `PUT /cache` - Store a value
//! - `DELETE /cache` - Clear the configured namespace
//! - `GET /cache/:key` - Fetch a value with its presence flag
//! - `DELETE /cache/:key` - Delete a key
//! - `GET /cache/:key/exists` - Check presence
//! - `POST /batch/get` - Read many keys
//! - `PUT /batch` - Store a key/value mapping
//! - `POST /batch/delete` - Delete many keys
//! - `GET /stats` - In-process store statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
