//! Background Tasks Module
//!
//! Contains background tasks that run periodically during service operation.
//!
//! # Tasks
//! - Reclaim: drops expired descriptors and trims the cache to capacity

mod reclaim;

pub use reclaim::spawn_reclaim_task;
