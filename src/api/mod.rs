//! API Module
//!
//! HTTP handlers and routing for the media service.
//!
//! # Endpoints
//! - `POST /resolve` - Resolve a media reference
//! - `GET /media/:key` - Retrieve a cached descriptor
//! - `DELETE /media/:key` - Delete a cached descriptor
//! - `DELETE /media` - Delete descriptors by prefix (or all)
//! - `POST /reclaim` - Reclaim expired and surplus entries
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
