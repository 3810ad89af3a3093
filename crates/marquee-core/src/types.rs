//! Core types for Marquee

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::source::MimeType;

/// Unique identifier for a playback session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Video resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns quality tier name
    pub fn quality_name(&self) -> &'static str {
        match self.height {
            0..=240 => "240p",
            241..=360 => "360p",
            361..=480 => "480p",
            481..=720 => "720p",
            721..=1080 => "1080p",
            1081..=1440 => "1440p",
            _ => "4K",
        }
    }

    /// Common resolutions
    pub const SD_480P: Resolution = Resolution { width: 854, height: 480 };
    pub const HD_720P: Resolution = Resolution { width: 1280, height: 720 };
    pub const FHD_1080P: Resolution = Resolution { width: 1920, height: 1080 };
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Raw playback-state code as reported by the engine callback surface.
///
/// Codes 1 through 4 are the engine's documented states; anything else is
/// forwarded as [`PlaybackState::Unknown`] rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EngineStateCode(pub i32);

impl EngineStateCode {
    pub const IDLE: EngineStateCode = EngineStateCode(1);
    pub const BUFFERING: EngineStateCode = EngineStateCode(2);
    pub const READY: EngineStateCode = EngineStateCode(3);
    pub const ENDED: EngineStateCode = EngineStateCode(4);
}

/// Host-facing playback states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// Engine instantiated but not yet prepared
    Idle,
    /// Not enough data buffered to play from the current position
    Buffering,
    /// Playable from the current position
    Ready,
    /// Playback reached the end of the queue
    Ended,
    /// Engine reported a code outside the known enumeration
    Unknown,
}

impl PlaybackState {
    /// Map a raw engine code to a playback state
    pub fn from_code(code: EngineStateCode) -> Self {
        match code {
            EngineStateCode::IDLE => PlaybackState::Idle,
            EngineStateCode::BUFFERING => PlaybackState::Buffering,
            EngineStateCode::READY => PlaybackState::Ready,
            EngineStateCode::ENDED => PlaybackState::Ended,
            _ => PlaybackState::Unknown,
        }
    }
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaybackState::Idle => write!(f, "idle"),
            PlaybackState::Buffering => write!(f, "buffering"),
            PlaybackState::Ready => write!(f, "ready"),
            PlaybackState::Ended => write!(f, "ended"),
            PlaybackState::Unknown => write!(f, "unknown"),
        }
    }
}

/// Host lifecycle events, delivered serially by the outer runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleEvent {
    Created,
    Started,
    Resumed,
    Paused,
    Stopped,
}

impl std::fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LifecycleEvent::Created => write!(f, "created"),
            LifecycleEvent::Started => write!(f, "started"),
            LifecycleEvent::Resumed => write!(f, "resumed"),
            LifecycleEvent::Paused => write!(f, "paused"),
            LifecycleEvent::Stopped => write!(f, "stopped"),
        }
    }
}

/// Platform capabilities reported by the host shell.
///
/// `supports_multi_window` is true when the host guarantees a `Stopped`
/// transition even while the window stays visible (split/multi-window
/// shells). It decides whether sessions are acquired on `Started` and
/// released on `Stopped`, or acquired on `Resumed` and released on
/// `Paused`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformInfo {
    pub supports_multi_window: bool,
}

impl PlatformInfo {
    /// Host with reliable `Stopped` delivery under multi-window
    pub fn multi_window() -> Self {
        Self {
            supports_multi_window: true,
        }
    }

    /// Host where `Stopped` may never be delivered
    pub fn legacy() -> Self {
        Self {
            supports_multi_window: false,
        }
    }
}

impl Default for PlatformInfo {
    fn default() -> Self {
        Self::multi_window()
    }
}

/// Saved playback state carried across a release/acquire cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    /// Playback position within the current queue item, in milliseconds
    pub position_ms: u64,
    /// Index of the queue item being played
    pub queue_index: usize,
    /// Whether playback should start as soon as the engine is ready
    pub play_when_ready: bool,
    /// When the snapshot was captured from a live engine
    pub captured_at: Option<DateTime<Utc>>,
}

impl Default for PlaybackSnapshot {
    fn default() -> Self {
        Self {
            position_ms: 0,
            queue_index: 0,
            play_when_ready: true,
            captured_at: None,
        }
    }
}

/// A configured media source location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
    pub uri: String,
    /// Format hint, mandatory when the URI carries no recognizable suffix
    #[serde(default)]
    pub mime: Option<MimeType>,
}

impl SourceSpec {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            mime: None,
        }
    }

    pub fn with_mime(uri: impl Into<String>, mime: MimeType) -> Self {
        Self {
            uri: uri.into(),
            mime: Some(mime),
        }
    }
}

/// Lifecycle controller configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    #[serde(default)]
    pub platform: PlatformInfo,
    pub sources: Vec<SourceSpec>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_engine_codes() {
        assert_eq!(
            PlaybackState::from_code(EngineStateCode::IDLE),
            PlaybackState::Idle
        );
        assert_eq!(
            PlaybackState::from_code(EngineStateCode::BUFFERING),
            PlaybackState::Buffering
        );
        assert_eq!(
            PlaybackState::from_code(EngineStateCode::READY),
            PlaybackState::Ready
        );
        assert_eq!(
            PlaybackState::from_code(EngineStateCode::ENDED),
            PlaybackState::Ended
        );
    }

    #[test]
    fn test_unrecognized_engine_code_maps_to_unknown() {
        assert_eq!(
            PlaybackState::from_code(EngineStateCode(0)),
            PlaybackState::Unknown
        );
        assert_eq!(
            PlaybackState::from_code(EngineStateCode(99)),
            PlaybackState::Unknown
        );
        assert_eq!(
            PlaybackState::from_code(EngineStateCode(-1)),
            PlaybackState::Unknown
        );
    }

    #[test]
    fn test_snapshot_defaults() {
        let snapshot = PlaybackSnapshot::default();
        assert_eq!(snapshot.position_ms, 0);
        assert_eq!(snapshot.queue_index, 0);
        assert!(snapshot.play_when_ready);
        assert!(snapshot.captured_at.is_none());
    }

    #[test]
    fn test_resolution_quality_name() {
        assert_eq!(Resolution::SD_480P.quality_name(), "480p");
        assert_eq!(Resolution::HD_720P.quality_name(), "720p");
        assert_eq!(Resolution::FHD_1080P.quality_name(), "1080p");
    }
}
