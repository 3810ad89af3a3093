//! Playback session - one live acquisition of the engine
//!
//! A session owns the engine handle, the queue built for this acquisition,
//! and the constraint applied to it; the registered state monitor travels
//! with the engine handle. Opening follows a strict order: construct the engine with the
//! constraint, load the queue, apply the saved snapshot, register the
//! observer, then signal prepare - the snapshot must land before prepare so
//! the engine resumes exactly where playback left off. Closing captures the
//! snapshot first, then deregisters the observer, then releases the handle.

use crate::engine::{EngineProvider, PlaybackEngine};
use crate::error::Result;
use crate::observer::{StateMonitor, StateSink};
use crate::policy::TrackConstraint;
use crate::source::PlaybackQueue;
use crate::types::{PlaybackSnapshot, SessionId};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

/// One live playback session. The registered [`StateMonitor`] is held by
/// the engine handle from `register_observer` until `close` deregisters it.
pub struct PlaybackSession {
    id: SessionId,
    engine: Box<dyn PlaybackEngine>,
    queue: PlaybackQueue,
    constraint: TrackConstraint,
}

impl PlaybackSession {
    /// Acquire an engine and bring it to the prepared state.
    ///
    /// On any failure the partially initialized handle is torn down in
    /// order (deregister, then release) and no session is returned.
    pub fn open(
        provider: &dyn EngineProvider,
        queue: PlaybackQueue,
        constraint: TrackConstraint,
        snapshot: &PlaybackSnapshot,
        sink: Option<Arc<dyn StateSink>>,
    ) -> Result<Self> {
        let id = SessionId::new();
        let mut engine = provider.create(&constraint)?;
        let monitor = Arc::new(StateMonitor::new(id, sink));

        let wired = (|| -> Result<()> {
            engine.load(&queue)?;
            engine.seek_to(snapshot.queue_index, snapshot.position_ms)?;
            engine.set_play_when_ready(snapshot.play_when_ready)?;
            engine.register_observer(monitor);
            engine.prepare()?;
            Ok(())
        })();

        if let Err(e) = wired {
            debug!(session = %id, "Tearing down partially initialized engine");
            engine.deregister_observer();
            engine.release();
            return Err(e);
        }

        info!(
            session = %id,
            items = queue.len(),
            queue_index = snapshot.queue_index,
            position_ms = snapshot.position_ms,
            play_when_ready = snapshot.play_when_ready,
            "Session opened"
        );

        Ok(Self {
            id,
            engine,
            queue,
            constraint,
        })
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn queue(&self) -> &PlaybackQueue {
        &self.queue
    }

    pub fn constraint(&self) -> &TrackConstraint {
        &self.constraint
    }

    /// Capture live playback state and release the engine.
    ///
    /// The snapshot is read before any teardown, and the observer is
    /// deregistered before the handle is released.
    pub fn close(mut self) -> PlaybackSnapshot {
        let snapshot = PlaybackSnapshot {
            position_ms: self.engine.position_ms(),
            queue_index: self.engine.queue_index(),
            play_when_ready: self.engine.play_when_ready(),
            captured_at: Some(Utc::now()),
        };

        self.engine.deregister_observer();
        self.engine.release();

        info!(
            session = %self.id,
            position_ms = snapshot.position_ms,
            queue_index = snapshot.queue_index,
            play_when_ready = snapshot.play_when_ready,
            "Session closed"
        );

        snapshot
    }
}
