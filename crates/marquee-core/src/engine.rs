//! External collaborator seams
//!
//! The adaptive-streaming engine, its construction, and the host's system
//! chrome are consumed through these traits; the library never implements
//! the real thing. [`crate::sim`] provides a scriptable engine for tests
//! and headless scenario runs.

use crate::error::Result;
use crate::policy::TrackConstraint;
use crate::source::PlaybackQueue;
use crate::types::EngineStateCode;
use std::sync::Arc;

/// Receives asynchronous state-change notifications from the engine.
///
/// Callbacks are delivered serially on the host's callback surface and must
/// not block.
pub trait EngineObserver: Send + Sync {
    fn on_state_changed(&self, code: EngineStateCode);
}

/// One live playback-engine handle.
///
/// A [`crate::session::PlaybackSession`] owns exactly one of these for its
/// whole lifetime. After [`PlaybackEngine::release`] the handle is dead and
/// any in-flight prepare or buffering work is discarded with it.
pub trait PlaybackEngine: Send {
    /// Replace the engine's queue with the given items, in order
    fn load(&mut self, queue: &PlaybackQueue) -> Result<()>;

    /// Seek to a position within a queue item
    fn seek_to(&mut self, queue_index: usize, position_ms: u64) -> Result<()>;

    /// Set whether playback should start as soon as the engine is ready
    fn set_play_when_ready(&mut self, play_when_ready: bool) -> Result<()>;

    /// Start acquiring the resources needed for playback
    fn prepare(&mut self) -> Result<()>;

    /// Current playback position in milliseconds
    fn position_ms(&self) -> u64;

    /// Index of the queue item currently playing
    fn queue_index(&self) -> usize;

    /// Current play intent
    fn play_when_ready(&self) -> bool;

    /// Register the single state observer for this handle
    fn register_observer(&mut self, observer: Arc<dyn EngineObserver>);

    /// Drop the registered observer. No-op when none is registered.
    fn deregister_observer(&mut self);

    /// Release the underlying engine resources
    fn release(&mut self);
}

/// Constructs engine handles configured with a track constraint
pub trait EngineProvider: Send + Sync {
    fn create(&self, constraint: &TrackConstraint) -> Result<Box<dyn PlaybackEngine>>;
}

/// Host system-chrome collaborator. Fire-and-forget; no return contract.
pub trait SystemChrome: Send + Sync {
    fn hide(&self);
}

/// Chrome collaborator for hosts without any chrome to hide
#[derive(Debug, Default, Clone, Copy)]
pub struct NullChrome;

impl SystemChrome for NullChrome {
    fn hide(&self) {}
}
