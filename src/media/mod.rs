//! Media Module
//!
//! Classification, enrichment and resolution of raw media references.

mod classify;
mod descriptor;
mod fetch;
mod observer;
mod resolver;


pub use classify::{classify, classify_as, Classification};
pub use descriptor::{MediaDescriptor, MediaKind, VideoKind};
pub use fetch::{Enrichment, FetchError, MetadataFetcher, OEmbedFetcher};
pub use observer::ResolveObserver;
pub use resolver::{
    Phase, ResolveFailure, Resolver, ResolverState, RetryPolicy, DEFAULT_DESCRIPTOR_TTL,
};
