//! Feedback messages from the playback thread to its handle.

use crate::Pitch;

/// Progress reports emitted by the playback thread. The handle drains these
/// non-blockingly; missing a message never affects playback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PerformFeedback {
    /// Slice cursor position after a `read_and_advance`.
    Head(u64),
    /// A voice transition was performed. `released` fired strictly before
    /// `pressed`.
    VoiceChange {
        released: Option<Pitch>,
        pressed: Option<Pitch>,
    },
    /// The playback thread exited; any sounding pitch has been released.
    Stopped,
}
