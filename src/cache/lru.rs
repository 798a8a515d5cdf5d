//! Access Order Module
//!
//! Tracks the recency of every key so reclamation can evict least recently
//! used entries first.

use std::collections::{BTreeMap, HashMap};

// == Access Order ==
/// Orders keys by their last access.
///
/// Each touch stamps the key with a monotonically increasing tick. Ticks are
/// unique, so two keys accessed within the same clock instant still have a
/// deterministic eviction order: the one touched first goes first.
#[derive(Debug, Default)]
pub struct AccessOrder {
    /// Tick -> key, oldest first
    by_tick: BTreeMap<u64, String>,
    /// Key -> its current tick
    ticks: HashMap<String, u64>,
    /// Next tick to hand out
    clock: u64,
}

impl AccessOrder {
    // == Constructor ==
    /// Creates a new empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as the most recently used.
    pub fn touch(&mut self, key: &str) {
        let tick = self.clock;
        self.clock += 1;

        if let Some(previous) = self.ticks.insert(key.to_string(), tick) {
            self.by_tick.remove(&previous);
        }
        self.by_tick.insert(tick, key.to_string());
    }

    // == Remove ==
    /// Stops tracking a key. No-op for unknown keys.
    pub fn remove(&mut self, key: &str) {
        if let Some(tick) = self.ticks.remove(key) {
            self.by_tick.remove(&tick);
        }
    }

    // == Pop Oldest ==
    /// Returns and forgets the least recently used key.
    pub fn pop_oldest(&mut self) -> Option<String> {
        let (_, key) = self.by_tick.pop_first()?;
        self.ticks.remove(&key);
        Some(key)
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    pub fn peek_oldest(&self) -> Option<&str> {
        self.by_tick.values().next().map(String::as_str)
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.by_tick.clear();
        self.ticks.clear();
    }

    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Checks if a key is being tracked.
    pub fn contains(&self, key: &str) -> bool {
        self.ticks.contains_key(key)
    }
}
