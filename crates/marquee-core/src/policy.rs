//! Track quality policy
//!
//! A policy produces the track-selection constraint handed to the engine at
//! construction time. Policies are stateless and recomputed on every session
//! acquire, so a host can swap one in without touching the session code.

use crate::types::Resolution;
use serde::{Deserialize, Serialize};

/// Constraint applied to engine track selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrackConstraint {
    /// Upper bound on selected video resolution
    pub max_resolution: Option<Resolution>,
    /// Upper bound on selected track bandwidth, bits per second
    pub max_bitrate: Option<u64>,
}

impl TrackConstraint {
    /// No bounds; the engine picks freely
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// Cap selection at standard definition
    pub fn sd() -> Self {
        Self {
            max_resolution: Some(Resolution::SD_480P),
            max_bitrate: None,
        }
    }
}

/// Quality policy trait
pub trait QualityPolicy: Send + Sync {
    /// Produce the constraint for the next session
    fn constraint(&self) -> TrackConstraint;

    /// Get policy name
    fn name(&self) -> &'static str;
}

/// Default policy: trade peak quality for user data savings by capping
/// selected tracks at standard definition.
#[derive(Debug, Default, Clone, Copy)]
pub struct DataSaver;

impl QualityPolicy for DataSaver {
    fn constraint(&self) -> TrackConstraint {
        TrackConstraint::sd()
    }

    fn name(&self) -> &'static str {
        "data-saver"
    }
}

/// Pass-through policy with no bounds
#[derive(Debug, Default, Clone, Copy)]
pub struct Unrestricted;

impl QualityPolicy for Unrestricted {
    fn constraint(&self) -> TrackConstraint {
        TrackConstraint::unrestricted()
    }

    fn name(&self) -> &'static str {
        "unrestricted"
    }
}
