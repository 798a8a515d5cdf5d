//! Resolution Observers
//!
//! Callbacks a resolver fires when it reaches a terminal state.

use std::sync::{Arc, Weak};

use tracing::debug;

use crate::media::{MediaDescriptor, ResolveFailure};

/// Receives the outcome of a resolution.
pub trait ResolveObserver: Send + Sync {
    /// Called once when the descriptor is complete and cached.
    fn on_descriptor_ready(&self, descriptor: &MediaDescriptor);

    /// Called once when resolution gave up.
    fn on_resolution_failed(&self, _reference: &str, _failure: &ResolveFailure) {}
}

// == Observer Slot ==
/// Weakly held observer that may be dropped before the resolver finishes.
///
/// Notifying a dropped observer is a no-op.
#[derive(Default)]
pub(crate) struct ObserverSlot {
    observer: Option<Weak<dyn ResolveObserver>>,
}

impl ObserverSlot {
    pub(crate) fn new<O: ResolveObserver + 'static>(observer: &Arc<O>) -> Self {
        let observer: Arc<dyn ResolveObserver> = observer.clone();
        Self {
            observer: Some(Arc::downgrade(&observer)),
        }
    }

    pub(crate) fn notify_ready(&self, descriptor: &MediaDescriptor) {
        match self.upgrade() {
            Some(observer) => observer.on_descriptor_ready(descriptor),
            None => debug!(
                key = descriptor.cache_key(),
                "No live observer for resolved descriptor"
            ),
        }
    }

    pub(crate) fn notify_failed(&self, reference: &str, failure: &ResolveFailure) {
        match self.upgrade() {
            Some(observer) => observer.on_resolution_failed(reference, failure),
            None => debug!(reference, "No live observer for failed resolution"),
        }
    }

    fn upgrade(&self) -> Option<Arc<dyn ResolveObserver>> {
        self.observer.as_ref().and_then(Weak::upgrade)
    }
}

impl std::fmt::Debug for ObserverSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverSlot")
            .field("attached", &self.observer.is_some())
            .field("alive", &self.upgrade().is_some())
            .finish()
    }
}
