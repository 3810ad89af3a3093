//! Scriptable in-memory engine for tests and headless scenario runs
//!
//! [`SimulatedProvider`] hands out [`SimulatedEngine`] handles that record
//! every call into a shared log, so ordering contracts (snapshot applied
//! before prepare, observer deregistered before release) can be asserted
//! from the outside. Construction failures and raw state-code delivery are
//! scriptable. Interior mutability stands in for the real engine's own
//! thread safety; the library itself stays lock-free.

use crate::engine::{EngineObserver, EngineProvider, PlaybackEngine};
use crate::error::{Error, Result};
use crate::policy::TrackConstraint;
use crate::source::PlaybackQueue;
use crate::types::EngineStateCode;
use serde::Serialize;
use std::sync::{Arc, Mutex};

/// One recorded engine call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum EngineCall {
    Create,
    Load { uris: Vec<String> },
    SeekTo { queue_index: usize, position_ms: u64 },
    SetPlayWhenReady { play_when_ready: bool },
    RegisterObserver,
    Prepare,
    DeregisterObserver,
    Release,
}

#[derive(Default)]
struct EngineState {
    position_ms: u64,
    queue_index: usize,
    play_when_ready: bool,
    observer: Option<Arc<dyn EngineObserver>>,
    loaded: Vec<String>,
    prepared: bool,
    released: bool,
    fail_prepare: bool,
}

#[derive(Default)]
struct ProviderState {
    fail_next_create: bool,
    fail_next_prepare: bool,
    engines: Vec<Arc<Mutex<EngineState>>>,
}

/// Handle onto a simulated engine, valid even after the controller has
/// taken ownership of the engine itself
#[derive(Clone)]
pub struct SimEngineHandle {
    state: Arc<Mutex<EngineState>>,
}

impl SimEngineHandle {
    /// Advance the simulated playback position
    pub fn set_position(&self, queue_index: usize, position_ms: u64) {
        let mut state = self.state.lock().unwrap();
        state.queue_index = queue_index;
        state.position_ms = position_ms;
    }

    /// Flip the simulated play intent, as a user pause/resume would
    pub fn set_play_when_ready(&self, play_when_ready: bool) {
        self.state.lock().unwrap().play_when_ready = play_when_ready;
    }

    /// Deliver a raw state code to the registered observer, if any.
    /// Returns whether an observer received it.
    pub fn deliver_state(&self, code: EngineStateCode) -> bool {
        let observer = self.state.lock().unwrap().observer.clone();
        match observer {
            Some(observer) => {
                observer.on_state_changed(code);
                true
            }
            None => false,
        }
    }

    pub fn is_released(&self) -> bool {
        self.state.lock().unwrap().released
    }

    pub fn is_prepared(&self) -> bool {
        self.state.lock().unwrap().prepared
    }

    pub fn play_when_ready(&self) -> bool {
        self.state.lock().unwrap().play_when_ready
    }

    /// URIs loaded into the engine, in queue order
    pub fn loaded_uris(&self) -> Vec<String> {
        self.state.lock().unwrap().loaded.clone()
    }
}

/// Factory for simulated engines, shared with the test or CLI driver
#[derive(Clone, Default)]
pub struct SimulatedProvider {
    inner: Arc<Mutex<ProviderState>>,
    log: Arc<Mutex<Vec<EngineCall>>>,
}

impl SimulatedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `create` call fail with a construction error
    pub fn fail_next_create(&self) {
        self.inner.lock().unwrap().fail_next_create = true;
    }

    /// Make the next constructed engine fail its `prepare` call
    pub fn fail_next_prepare(&self) {
        self.inner.lock().unwrap().fail_next_prepare = true;
    }

    /// Every call recorded so far, across all engines
    pub fn calls(&self) -> Vec<EngineCall> {
        self.log.lock().unwrap().clone()
    }

    /// Number of engines constructed and not yet released
    pub fn live_engines(&self) -> usize {
        self.inner
            .lock()
            .unwrap()
            .engines
            .iter()
            .filter(|e| !e.lock().unwrap().released)
            .count()
    }

    /// Total engines ever constructed
    pub fn total_engines(&self) -> usize {
        self.inner.lock().unwrap().engines.len()
    }

    /// Handle onto the most recently constructed engine
    pub fn last_engine(&self) -> Option<SimEngineHandle> {
        self.inner
            .lock()
            .unwrap()
            .engines
            .last()
            .map(|state| SimEngineHandle {
                state: state.clone(),
            })
    }

    fn record(&self, call: EngineCall) {
        self.log.lock().unwrap().push(call);
    }
}

impl EngineProvider for SimulatedProvider {
    fn create(&self, _constraint: &TrackConstraint) -> Result<Box<dyn PlaybackEngine>> {
        self.record(EngineCall::Create);

        let mut inner = self.inner.lock().unwrap();
        if inner.fail_next_create {
            inner.fail_next_create = false;
            return Err(Error::EngineConstruction(
                "simulated construction failure".into(),
            ));
        }

        let state = Arc::new(Mutex::new(EngineState {
            fail_prepare: std::mem::take(&mut inner.fail_next_prepare),
            ..EngineState::default()
        }));
        inner.engines.push(state.clone());

        Ok(Box::new(SimulatedEngine {
            state,
            log: self.log.clone(),
        }))
    }
}

/// In-memory engine recording every call
pub struct SimulatedEngine {
    state: Arc<Mutex<EngineState>>,
    log: Arc<Mutex<Vec<EngineCall>>>,
}

impl SimulatedEngine {
    fn record(&self, call: EngineCall) {
        self.log.lock().unwrap().push(call);
    }
}

impl PlaybackEngine for SimulatedEngine {
    fn load(&mut self, queue: &PlaybackQueue) -> Result<()> {
        let uris: Vec<String> = queue.iter().map(|s| s.uri.to_string()).collect();
        self.record(EngineCall::Load { uris: uris.clone() });
        self.state.lock().unwrap().loaded = uris;
        Ok(())
    }

    fn seek_to(&mut self, queue_index: usize, position_ms: u64) -> Result<()> {
        self.record(EngineCall::SeekTo {
            queue_index,
            position_ms,
        });
        let mut state = self.state.lock().unwrap();
        state.queue_index = queue_index;
        state.position_ms = position_ms;
        Ok(())
    }

    fn set_play_when_ready(&mut self, play_when_ready: bool) -> Result<()> {
        self.record(EngineCall::SetPlayWhenReady { play_when_ready });
        self.state.lock().unwrap().play_when_ready = play_when_ready;
        Ok(())
    }

    fn prepare(&mut self) -> Result<()> {
        self.record(EngineCall::Prepare);
        let mut state = self.state.lock().unwrap();
        if state.fail_prepare {
            state.fail_prepare = false;
            return Err(Error::engine("prepare", "simulated prepare failure"));
        }
        state.prepared = true;
        Ok(())
    }

    fn position_ms(&self) -> u64 {
        self.state.lock().unwrap().position_ms
    }

    fn queue_index(&self) -> usize {
        self.state.lock().unwrap().queue_index
    }

    fn play_when_ready(&self) -> bool {
        self.state.lock().unwrap().play_when_ready
    }

    fn register_observer(&mut self, observer: Arc<dyn EngineObserver>) {
        self.record(EngineCall::RegisterObserver);
        self.state.lock().unwrap().observer = Some(observer);
    }

    fn deregister_observer(&mut self) {
        self.record(EngineCall::DeregisterObserver);
        self.state.lock().unwrap().observer = None;
    }

    fn release(&mut self) {
        self.record(EngineCall::Release);
        self.state.lock().unwrap().released = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SourceSpec;

    fn queue() -> PlaybackQueue {
        PlaybackQueue::from_specs(&[SourceSpec::new("https://example.com/a.mp4")]).unwrap()
    }

    #[test]
    fn test_calls_are_recorded_in_order() {
        let provider = SimulatedProvider::new();
        let mut engine = provider.create(&TrackConstraint::sd()).unwrap();
        engine.load(&queue()).unwrap();
        engine.seek_to(0, 500).unwrap();
        engine.prepare().unwrap();
        engine.release();

        let calls = provider.calls();
        assert_eq!(calls[0], EngineCall::Create);
        assert!(matches!(calls[1], EngineCall::Load { .. }));
        assert_eq!(
            calls[2],
            EngineCall::SeekTo {
                queue_index: 0,
                position_ms: 500
            }
        );
        assert_eq!(calls[3], EngineCall::Prepare);
        assert_eq!(calls[4], EngineCall::Release);
        assert_eq!(provider.live_engines(), 0);
    }

    #[test]
    fn test_fail_next_create_is_one_shot() {
        let provider = SimulatedProvider::new();
        provider.fail_next_create();
        assert!(provider.create(&TrackConstraint::default()).is_err());
        assert!(provider.create(&TrackConstraint::default()).is_ok());
        assert_eq!(provider.live_engines(), 1);
    }

    #[test]
    fn test_deliver_state_requires_observer() {
        let provider = SimulatedProvider::new();
        let _engine = provider.create(&TrackConstraint::default()).unwrap();
        let handle = provider.last_engine().unwrap();
        assert!(!handle.deliver_state(EngineStateCode::READY));
    }
}
