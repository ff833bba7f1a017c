use serde::{Deserialize, Serialize};

/// Lifecycle state of a tween.
///
/// `Created → Running ⇄ Paused → {Completed | Stopped}`. The two terminal
/// states are never left; a fresh `animate()` call builds a new instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationState {
    /// Built but not yet started
    Created,
    /// Advancing on every tick
    Running,
    /// Frozen; elapsed time is held until resumed
    Paused,
    /// Reached the end; completion callback has fired
    Completed,
    /// Cancelled; completion callback never fires
    Stopped,
}

impl AnimationState {
    /// Get the name of this state
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Completed => "completed",
            Self::Stopped => "stopped",
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Stopped)
    }

    #[inline]
    pub fn can_start(&self) -> bool {
        matches!(self, Self::Created)
    }

    #[inline]
    pub fn can_pause(&self) -> bool {
        matches!(self, Self::Running)
    }

    #[inline]
    pub fn can_resume(&self) -> bool {
        matches!(self, Self::Paused)
    }

    #[inline]
    pub fn can_stop(&self) -> bool {
        !self.is_terminal()
    }
}
