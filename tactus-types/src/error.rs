//! Error and outcome types for the performer.
//!
//! Rejected data is never fatal: out-of-range events error at the boundary
//! and stale/overflowing slice writes degrade to dropped data, reported via
//! [`WriteOutcome`] rather than an error.

/// Errors surfaced at the performer's API boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum PerformError {
    /// Pitch index outside the key alphabet.
    InvalidPitch { pitch: u8, alphabet: usize },
    /// Note interval with `start > stop` or a negative start.
    InvalidWindow { start_secs: f64, stop_secs: f64 },
    /// Slice whose width does not match the alphabet.
    SliceShape { got: usize, want: usize },
    /// `start()` while the playback thread is already running.
    AlreadyRunning,
    /// Lifecycle call that needs a running playback thread.
    NotRunning,
    /// Interval-mode call on a slice-fed performer, or vice versa.
    FeedMismatch,
}

impl std::fmt::Display for PerformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPitch { pitch, alphabet } => {
                write!(f, "pitch {} outside alphabet of {} keys", pitch, alphabet)
            }
            Self::InvalidWindow {
                start_secs,
                stop_secs,
            } => write!(f, "invalid note window {}..{}", start_secs, stop_secs),
            Self::SliceShape { got, want } => {
                write!(f, "slice has width {}, expected {}", got, want)
            }
            Self::AlreadyRunning => write!(f, "performer is already running"),
            Self::NotRunning => write!(f, "performer is not running"),
            Self::FeedMismatch => write!(f, "operation does not match the performer's feed mode"),
        }
    }
}

impl std::error::Error for PerformError {}

/// Result of a slice write. Rejections are expected during normal operation
/// (producer lookahead racing a fast consumer) and leave the buffer intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Stored in the buffer.
    Written,
    /// Index already consumed; dropped.
    Stale,
    /// Index beyond the buffer's lookahead capacity; dropped.
    TooFarAhead,
}

impl WriteOutcome {
    pub fn accepted(self) -> bool {
        matches!(self, Self::Written)
    }
}
