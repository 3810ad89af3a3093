//! Lifecycle controller - maps host lifecycle events to session
//! acquire/release decisions
//!
//! Acquisition timing depends on the host platform:
//!
//! - Multi-window hosts never guarantee that a visible-but-inactive window
//!   reaches `Stopped`, so the session is acquired on `Started` and held
//!   through `Paused` until `Stopped` arrives.
//! - Legacy hosts may never deliver `Stopped` at all, so acquisition waits
//!   until `Resumed` and the session is released at the first `Paused`.
//!
//! Acquire and release are both idempotent: overlapping lifecycle events
//! can legitimately request either twice.

use crate::engine::{EngineProvider, NullChrome, SystemChrome};
use crate::observer::StateSink;
use crate::policy::{DataSaver, QualityPolicy};
use crate::session::PlaybackSession;
use crate::source::PlaybackQueue;
use crate::types::{ControllerConfig, LifecycleEvent, PlaybackSnapshot, SessionId};
use std::sync::Arc;
use tracing::{debug, error};

/// Drives session lifetime from host lifecycle events
pub struct LifecycleController {
    config: ControllerConfig,
    provider: Box<dyn EngineProvider>,
    policy: Box<dyn QualityPolicy>,
    chrome: Box<dyn SystemChrome>,
    sink: Option<Arc<dyn StateSink>>,
    session: Option<PlaybackSession>,
    snapshot: PlaybackSnapshot,
    phase: Option<LifecycleEvent>,
}

impl LifecycleController {
    /// Create a controller with the default data-saver policy and no chrome
    pub fn new(config: ControllerConfig, provider: Box<dyn EngineProvider>) -> Self {
        Self {
            config,
            provider,
            policy: Box::new(DataSaver),
            chrome: Box::new(NullChrome),
            sink: None,
            session: None,
            snapshot: PlaybackSnapshot::default(),
            phase: None,
        }
    }

    /// Swap the quality policy
    pub fn with_policy(mut self, policy: Box<dyn QualityPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Attach the host chrome collaborator
    pub fn with_chrome(mut self, chrome: Box<dyn SystemChrome>) -> Self {
        self.chrome = chrome;
        self
    }

    /// Attach a host-facing playback state sink
    pub fn with_state_sink(mut self, sink: Arc<dyn StateSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Dispatch one host lifecycle event.
    ///
    /// Acquire failures are reported through the logging collaborator and
    /// never propagated; the host retries by delivering further lifecycle
    /// events, not by inspecting a return value.
    pub fn handle_event(&mut self, event: LifecycleEvent) {
        debug!(event = %event, "Lifecycle event");
        self.phase = Some(event);

        let multi_window = self.config.platform.supports_multi_window;
        match event {
            LifecycleEvent::Created => {}
            LifecycleEvent::Started => {
                if multi_window {
                    self.acquire();
                }
            }
            LifecycleEvent::Resumed => {
                self.chrome.hide();
                if !multi_window || self.session.is_none() {
                    self.acquire();
                }
            }
            LifecycleEvent::Paused => {
                if !multi_window {
                    self.release();
                }
            }
            LifecycleEvent::Stopped => {
                if multi_window {
                    self.release();
                }
            }
        }
    }

    /// Whether a session is currently live
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Id of the live session, if any
    pub fn session_id(&self) -> Option<SessionId> {
        self.session.as_ref().map(|s| s.id())
    }

    /// The snapshot that will seed the next acquisition
    pub fn snapshot(&self) -> &PlaybackSnapshot {
        &self.snapshot
    }

    /// Last lifecycle event seen
    pub fn phase(&self) -> Option<LifecycleEvent> {
        self.phase
    }

    fn acquire(&mut self) {
        if self.session.is_some() {
            debug!("Session already active, acquire skipped");
            return;
        }

        let constraint = self.policy.constraint();
        debug!(policy = self.policy.name(), "Applying quality policy");

        let queue = match PlaybackQueue::from_specs(&self.config.sources) {
            Ok(queue) => queue,
            Err(e) => {
                error!(error = %e, "Queue assembly failed, session not acquired");
                return;
            }
        };

        match PlaybackSession::open(
            self.provider.as_ref(),
            queue,
            constraint,
            &self.snapshot,
            self.sink.clone(),
        ) {
            Ok(session) => self.session = Some(session),
            Err(e) => error!(error = %e, "Session acquisition failed"),
        }
    }

    fn release(&mut self) {
        match self.session.take() {
            Some(session) => self.snapshot = session.close(),
            None => debug!("No active session, release skipped"),
        }
    }
}
