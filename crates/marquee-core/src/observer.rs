//! Playback state observation
//!
//! The monitor translates raw engine codes into [`PlaybackState`] values,
//! records one observability event per transition, and forwards the state
//! outward. It is a side-effecting sink only; acquire/release decisions
//! stay with the lifecycle controller.

use crate::engine::EngineObserver;
use crate::types::{EngineStateCode, PlaybackState, SessionId};
use std::sync::Arc;
use tracing::{info, warn};

/// Host-facing sink for translated playback states
pub trait StateSink: Send + Sync {
    fn on_playback_state(&self, state: PlaybackState);
}

/// The observer a session registers with its engine handle
pub struct StateMonitor {
    session: SessionId,
    sink: Option<Arc<dyn StateSink>>,
}

impl StateMonitor {
    pub fn new(session: SessionId, sink: Option<Arc<dyn StateSink>>) -> Self {
        Self { session, sink }
    }
}

impl EngineObserver for StateMonitor {
    fn on_state_changed(&self, code: EngineStateCode) {
        let state = PlaybackState::from_code(code);
        match state {
            PlaybackState::Unknown => {
                warn!(session = %self.session, code = code.0, "Unrecognized engine state code");
            }
            _ => {
                info!(session = %self.session, state = %state, "Playback state changed");
            }
        }
        if let Some(sink) = &self.sink {
            sink.on_playback_state(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingSink(Mutex<Vec<PlaybackState>>);

    impl StateSink for RecordingSink {
        fn on_playback_state(&self, state: PlaybackState) {
            self.0.lock().unwrap().push(state);
        }
    }

    #[test]
    fn test_monitor_forwards_translated_states() {
        let sink = Arc::new(RecordingSink(Mutex::new(Vec::new())));
        let monitor = StateMonitor::new(SessionId::new(), Some(sink.clone()));

        monitor.on_state_changed(EngineStateCode::BUFFERING);
        monitor.on_state_changed(EngineStateCode::READY);
        monitor.on_state_changed(EngineStateCode(42));

        let seen = sink.0.lock().unwrap().clone();
        assert_eq!(
            seen,
            vec![
                PlaybackState::Buffering,
                PlaybackState::Ready,
                PlaybackState::Unknown
            ]
        );
    }

    #[test]
    fn test_monitor_tolerates_missing_sink() {
        let monitor = StateMonitor::new(SessionId::new(), None);
        monitor.on_state_changed(EngineStateCode::ENDED);
        monitor.on_state_changed(EngineStateCode(-7));
    }
}
