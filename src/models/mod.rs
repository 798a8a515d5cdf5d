//! Request and Response models for the media API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{PrefixQuery, ResolveRequest};
pub use responses::{
    DeleteResponse, DescriptorResponse, HealthResponse, ReclaimResponse, StatsResponse,
};
