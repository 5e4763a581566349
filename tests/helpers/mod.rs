//! Shared test doubles for the listener's two collaborators
//!
//! `MockSource` plays the configuration event source: scripted PID listings,
//! subscriber bookkeeping, and an `emit` helper that delivers an event to
//! every subscriber the way the facility would. `MockPublisher` records every
//! publish and retract so tests can assert exact call counts.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use confmark::{
    ConfigEvent, ConfigEventListener, ConfigSource, EventKind, MarkerHandle, MarkerPublisher,
    PublishError, SourceError, SubscriptionHandle,
};

/// In-memory configuration source with scripted PID listings
#[derive(Default)]
pub struct MockSource {
    pids: Mutex<Vec<String>>,
    fail_listing: AtomicBool,
    listeners: Mutex<HashMap<u64, Arc<dyn ConfigEventListener>>>,
    next_subscription: AtomicU64,
    list_calls: AtomicUsize,
    unsubscribe_calls: AtomicUsize,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pids(pids: &[&str]) -> Self {
        let source = Self::new();
        source.set_pids(pids);
        source
    }

    /// Replace the PID listing returned by `list_all`
    pub fn set_pids(&self, pids: &[&str]) {
        *self.pids.lock().unwrap() = pids.iter().map(|p| p.to_string()).collect();
    }

    /// Script `list_all` to fail until cleared
    pub fn set_failing(&self, failing: bool) {
        self.fail_listing.store(failing, Ordering::SeqCst);
    }

    /// Deliver an event to every subscribed listener
    pub fn emit(&self, pid: &str, kind: EventKind) {
        let listeners: Vec<Arc<dyn ConfigEventListener>> =
            self.listeners.lock().unwrap().values().cloned().collect();
        let event = ConfigEvent::new(pid, kind);
        for listener in listeners {
            listener.on_event(&event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.lock().unwrap().len()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn unsubscribe_calls(&self) -> usize {
        self.unsubscribe_calls.load(Ordering::SeqCst)
    }
}

impl ConfigSource for MockSource {
    fn subscribe(&self, listener: Arc<dyn ConfigEventListener>) -> SubscriptionHandle {
        let id = self.next_subscription.fetch_add(1, Ordering::SeqCst);
        self.listeners.lock().unwrap().insert(id, listener);
        SubscriptionHandle::new(id)
    }

    fn unsubscribe(&self, handle: SubscriptionHandle) {
        self.unsubscribe_calls.fetch_add(1, Ordering::SeqCst);
        self.listeners.lock().unwrap().remove(&handle.raw());
    }

    fn list_all(&self) -> Result<Vec<String>, SourceError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_listing.load(Ordering::SeqCst) {
            return Err(SourceError::Unavailable("scripted listing failure".to_string()));
        }
        Ok(self.pids.lock().unwrap().clone())
    }
}

/// Marker publisher that records every publish and retract
#[derive(Default)]
pub struct MockPublisher {
    live: Mutex<HashMap<u64, (String, HashMap<String, String>)>>,
    publish_calls: AtomicUsize,
    retract_calls: AtomicUsize,
    fail_publish: AtomicBool,
    fail_retract: AtomicBool,
    next_handle: AtomicU64,
}

impl MockPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script `publish` to fail until cleared
    pub fn set_fail_publish(&self, failing: bool) {
        self.fail_publish.store(failing, Ordering::SeqCst);
    }

    /// Script `retract` to fail until cleared
    pub fn set_fail_retract(&self, failing: bool) {
        self.fail_retract.store(failing, Ordering::SeqCst);
    }

    pub fn publish_calls(&self) -> usize {
        self.publish_calls.load(Ordering::SeqCst)
    }

    pub fn retract_calls(&self) -> usize {
        self.retract_calls.load(Ordering::SeqCst)
    }

    /// PIDs of markers published and not yet retracted, sorted
    pub fn live_pids(&self) -> Vec<String> {
        let mut pids: Vec<String> = self
            .live
            .lock()
            .unwrap()
            .values()
            .map(|(pid, _)| pid.clone())
            .collect();
        pids.sort();
        pids
    }

    /// Properties a live marker was published with
    pub fn properties_for(&self, pid: &str) -> Option<HashMap<String, String>> {
        self.live
            .lock()
            .unwrap()
            .values()
            .find(|(live_pid, _)| live_pid == pid)
            .map(|(_, properties)| properties.clone())
    }
}

impl MarkerPublisher for MockPublisher {
    fn publish(
        &self,
        pid: &str,
        properties: &HashMap<String, String>,
    ) -> Result<MarkerHandle, PublishError> {
        self.publish_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_publish.load(Ordering::SeqCst) {
            return Err(PublishError::Publish {
                pid: pid.to_string(),
                reason: "scripted publish failure".to_string(),
            });
        }

        let raw = self.next_handle.fetch_add(1, Ordering::SeqCst);
        self.live
            .lock()
            .unwrap()
            .insert(raw, (pid.to_string(), properties.clone()));
        Ok(MarkerHandle::new(raw))
    }

    fn retract(&self, handle: MarkerHandle) -> Result<(), PublishError> {
        self.retract_calls.fetch_add(1, Ordering::SeqCst);
        let removed = self.live.lock().unwrap().remove(&handle.raw());
        if removed.is_none() {
            return Err(PublishError::Retract {
                handle,
                reason: "unknown handle".to_string(),
            });
        }
        if self.fail_retract.load(Ordering::SeqCst) {
            return Err(PublishError::Retract {
                handle,
                reason: "scripted retract failure".to_string(),
            });
        }
        Ok(())
    }
}
