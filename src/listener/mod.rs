//! Required configuration listener
//!
//! The reconciliation and lifecycle engine. On start it subscribes to the
//! configuration event source and reconciles the marker registry against the
//! source's current PID list; thereafter incremental updates arrive as
//! events. Event delivery happens on source-owned threads and may overlap
//! caller-invoked lifecycle operations, so every registry-mutating path
//! serializes on one lock: the registry holds externally-owned handles whose
//! creation and destruction must never race.

mod restart;

use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError, RwLock, RwLockReadGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::ListenerSettings;
use crate::constants::LISTENER_ID_PREFIX;
use crate::filter::{Classification, FilterSet};
use crate::marker::RequiredConfigMarker;
use crate::models::{ConfigEvent, EventKind, ListenerState, ListenerStatus};
use crate::publisher::MarkerPublisher;
use crate::registry::MarkerRegistry;
use crate::source::{ConfigEventListener, ConfigSource, SubscriptionHandle};

use restart::RestartGate;

/// State guarded by the lifecycle lock
struct Lifecycle {
    state: ListenerState,
    subscription: Option<SubscriptionHandle>,
    registry: MarkerRegistry,
    start_time: Option<DateTime<Utc>>,
    stop_time: Option<DateTime<Utc>>,
}

/// Watches the configuration source and keeps the marker registry in step
/// with the PIDs it admits
///
/// Wrap the listener in an [`Arc`] so it can hand itself to the source as an
/// event callback on [`start`](Self::start).
pub struct RequiredConfigListener {
    source: Arc<dyn ConfigSource>,
    publisher: Arc<dyn MarkerPublisher>,
    filters: RwLock<FilterSet>,
    lifecycle: Mutex<Lifecycle>,
    listener_id: OnceLock<String>,
    restart_delay: Duration,
    restart_gate: RestartGate,
}

impl RequiredConfigListener {
    /// Create a listener from already-parsed settings and its collaborators
    pub fn new(
        settings: ListenerSettings,
        source: Arc<dyn ConfigSource>,
        publisher: Arc<dyn MarkerPublisher>,
    ) -> Self {
        let filters = FilterSet::from_patterns(&settings.allow_patterns, &settings.deny_patterns);
        let restart_delay = settings.restart_delay();

        let listener_id = OnceLock::new();
        if let Some(id) = settings.listener_id.filter(|id| !id.is_empty()) {
            let _ = listener_id.set(id);
        }

        Self {
            source,
            publisher,
            filters: RwLock::new(filters),
            lifecycle: Mutex::new(Lifecycle {
                state: ListenerState::Stopped,
                subscription: None,
                registry: MarkerRegistry::new(),
                start_time: None,
                stop_time: None,
            }),
            listener_id,
            restart_delay,
            restart_gate: RestartGate::new(),
        }
    }

    fn lifecycle(&self) -> MutexGuard<'_, Lifecycle> {
        self.lifecycle.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn filters_read(&self) -> RwLockReadGuard<'_, FilterSet> {
        self.filters.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start the listener: subscribe for events and reconcile existing
    /// entries
    ///
    /// A no-op when the listener is already running.
    pub fn start(self: &Arc<Self>) {
        let mut lifecycle = self.lifecycle();
        if lifecycle.state == ListenerState::Running {
            warn!("Listener '{}' is already running - ignoring start", self.listener_id());
            return;
        }

        info!("Starting listener '{}'", self.listener_id());
        lifecycle.start_time = Some(Utc::now());

        let callback: Arc<dyn ConfigEventListener> = self.clone();
        lifecycle.subscription = Some(self.source.subscribe(callback));
        lifecycle.state = ListenerState::Running;

        self.reconcile_locked(&mut lifecycle);
    }

    /// Stop the listener: retract every marker and drop the subscription
    ///
    /// A no-op when the listener is already stopped.
    pub fn stop(&self) {
        let mut lifecycle = self.lifecycle();
        if lifecycle.state == ListenerState::Stopped {
            debug!("Listener '{}' is already stopped - ignoring stop", self.listener_id());
            return;
        }

        info!("Stopping listener '{}'", self.listener_id());
        for pid in lifecycle.registry.pids() {
            self.retract_locked(&mut lifecycle, &pid);
        }

        if let Some(subscription) = lifecycle.subscription.take() {
            self.source.unsubscribe(subscription);
        }

        lifecycle.stop_time = Some(Utc::now());
        lifecycle.state = ListenerState::Stopped;
    }

    /// Restart the listener: stop, wait out the restart delay, start again
    ///
    /// The delay is a blocking wait on the calling thread. If
    /// [`interrupt_restart`](Self::interrupt_restart) fires during the wait
    /// the restart is abandoned and the listener stays stopped.
    pub fn restart(self: &Arc<Self>) {
        self.stop();

        if !self.restart_gate.wait(self.restart_delay) {
            warn!(
                "Restart was interrupted - listener '{}' will not be restarted",
                self.listener_id()
            );
            return;
        }

        self.start();
    }

    /// Interrupt an in-flight restart delay, leaving the listener stopped
    pub fn interrupt_restart(&self) {
        self.restart_gate.interrupt();
    }

    /// Recompute the registry from the source's authoritative PID list
    ///
    /// Admitted PIDs without a marker are registered. A listing failure
    /// means no PIDs this pass; it is logged and not retried.
    pub fn reconcile(&self) {
        let mut lifecycle = self.lifecycle();
        self.reconcile_locked(&mut lifecycle);
    }

    fn reconcile_locked(&self, lifecycle: &mut Lifecycle) {
        let pids = match self.source.list_all() {
            Ok(pids) => pids,
            Err(err) => {
                error!("Failed to list configuration entries - skipping this reconciliation pass: {}", err);
                return;
            }
        };

        for pid in pids {
            if self.filters_read().classify(&pid) == Classification::Accept {
                self.register_locked(lifecycle, &pid);
            }
        }
    }

    fn register_locked(&self, lifecycle: &mut Lifecycle, pid: &str) {
        if lifecycle.registry.contains(pid) {
            return;
        }

        let marker = match RequiredConfigMarker::new(pid) {
            Ok(marker) => marker,
            Err(err) => {
                error!("Refusing to publish capability marker: {}", err);
                return;
            }
        };

        info!("Publishing capability marker for PID '{}'", pid);
        match self.publisher.publish(marker.pid(), &marker.properties()) {
            Ok(handle) => {
                lifecycle.registry.insert(pid, handle);
            }
            Err(err) => warn!("Capability marker publication failed: {}", err),
        }
    }

    fn retract_locked(&self, lifecycle: &mut Lifecycle, pid: &str) {
        let Some(handle) = lifecycle.registry.remove(pid) else {
            return;
        };

        info!("Retracting capability marker for PID '{}'", pid);
        if let Err(err) = self.publisher.retract(handle) {
            // The entry stays removed; the handle may already be invalid
            warn!("Capability marker retraction failed for PID '{}': {}", pid, err);
        }
    }

    /// Unique identifier of this listener
    ///
    /// Generated on first use when no fixed id was configured; stable
    /// thereafter.
    pub fn listener_id(&self) -> &str {
        self.listener_id
            .get_or_init(|| format!("{}-{}", LISTENER_ID_PREFIX, Uuid::new_v4()))
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle().state == ListenerState::Running
    }

    pub fn state(&self) -> ListenerState {
        self.lifecycle().state
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.lifecycle().start_time
    }

    pub fn stop_time(&self) -> Option<DateTime<Utc>> {
        self.lifecycle().stop_time
    }

    /// The configured allow pattern strings
    pub fn allow_patterns(&self) -> Vec<String> {
        self.filters_read().allow_patterns()
    }

    /// The configured deny pattern strings
    pub fn deny_patterns(&self) -> Vec<String> {
        self.filters_read().deny_patterns()
    }

    /// Replace the allow rule set; uncompilable patterns are dropped with a
    /// warning
    pub fn set_allow_patterns(&self, patterns: &[String]) {
        self.filters
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .set_allow_patterns(patterns);
    }

    /// Replace the deny rule set; uncompilable patterns are dropped with a
    /// warning
    pub fn set_deny_patterns(&self, patterns: &[String]) {
        self.filters
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .set_deny_patterns(patterns);
    }

    /// PIDs with a currently published capability marker, sorted
    pub fn registered_pids(&self) -> Vec<String> {
        self.lifecycle().registry.pids()
    }

    /// Snapshot of the listener's observable state for management adapters
    pub fn status(&self) -> ListenerStatus {
        let lifecycle = self.lifecycle();
        let filters = self.filters_read();
        ListenerStatus {
            listener_id: self.listener_id().to_string(),
            state: lifecycle.state,
            start_time: lifecycle.start_time,
            stop_time: lifecycle.stop_time,
            allow_patterns: filters.allow_patterns(),
            deny_patterns: filters.deny_patterns(),
            registered_pids: lifecycle.registry.pids(),
        }
    }
}

impl ConfigEventListener for RequiredConfigListener {
    fn on_event(&self, event: &ConfigEvent) {
        match event.kind {
            EventKind::Updated => {
                // Classification gates admission once; an already-registered
                // PID is not re-evaluated against current rules
                if self.filters_read().classify(&event.pid) == Classification::Reject {
                    debug!("Ignoring update for rejected PID '{}'", event.pid);
                    return;
                }
                let mut lifecycle = self.lifecycle();
                self.register_locked(&mut lifecycle, &event.pid);
            }
            EventKind::Deleted => {
                let mut lifecycle = self.lifecycle();
                self.retract_locked(&mut lifecycle, &event.pid);
            }
            EventKind::LocationChanged => {
                debug!("Ignoring location change event for PID '{}'", event.pid);
            }
            EventKind::Other(raw) => {
                warn!(
                    "Ignoring unexpected configuration event type '{}' for PID '{}'",
                    raw, event.pid
                );
            }
        }
    }
}
