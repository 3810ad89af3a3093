//! Marquee Core - Playback Lifecycle Library
//!
//! This crate keeps an adaptive-streaming playback engine correctly
//! acquired and released in step with a host-driven visibility lifecycle:
//! - Lifecycle-to-session mapping with platform-dependent timing
//! - Playback position/selection carried across release-reacquire cycles
//! - Queue assembly from mixed progressive and manifest-based sources
//! - Bandwidth-saving track quality policy
//! - Engine state observation with per-transition observability events
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Marquee Core                             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐           │
//! │  │    Queue     │  │   Quality    │  │   Snapshot   │           │
//! │  │   Builder    │  │    Policy    │  │              │           │
//! │  └──────┬───────┘  └──────┬───────┘  └──────┬───────┘           │
//! │         │                 │                 │                   │
//! │         └─────────────────┼─────────────────┘                   │
//! │                           │                                     │
//! │                    ┌──────┴──────┐       ┌──────────────┐       │
//! │                    │  Playback   │──────►│    State     │       │
//! │                    │   Session   │       │   Monitor    │       │
//! │                    └──────┬──────┘       └──────────────┘       │
//! │                           │                                     │
//! │                    ┌──────┴──────┐                              │
//! │                    │  Lifecycle  │◄──── host lifecycle events   │
//! │                    │ Controller  │                              │
//! │                    └─────────────┘                              │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine itself (buffering, decoding, network adaptation) is an
//! external collaborator behind [`engine::PlaybackEngine`]; the crate only
//! decides what to call on it and when.

pub mod controller;
pub mod engine;
pub mod error;
pub mod observer;
pub mod policy;
pub mod session;
pub mod sim;
pub mod source;
pub mod types;

pub use controller::LifecycleController;
pub use engine::{EngineObserver, EngineProvider, NullChrome, PlaybackEngine, SystemChrome};
pub use error::{Error, Result};
pub use observer::{StateMonitor, StateSink};
pub use policy::{DataSaver, QualityPolicy, TrackConstraint, Unrestricted};
pub use session::PlaybackSession;
pub use sim::{EngineCall, SimEngineHandle, SimulatedEngine, SimulatedProvider};
pub use source::{MediaFormat, MediaSource, MimeType, PlaybackQueue};
pub use types::*;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library with default configuration
pub fn init() {
    tracing::info!(version = VERSION, "Marquee Core initialized");
}
