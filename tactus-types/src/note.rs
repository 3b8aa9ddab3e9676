use serde::{Deserialize, Serialize};

use crate::Pitch;

/// A discrete note interval: press at `start_secs`, release at `stop_secs`,
/// both measured from the performer's start epoch. Immutable once created.
///
/// Invariants (checked at the enqueue boundary, not here):
/// `0 <= pitch < alphabet len` and `0 <= start_secs <= stop_secs`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoteEvent {
    pub start_secs: f64,
    pub stop_secs: f64,
    pub pitch: Pitch,
}

impl NoteEvent {
    pub fn new(start_secs: f64, stop_secs: f64, pitch: Pitch) -> Self {
        Self {
            start_secs,
            stop_secs,
            pitch,
        }
    }

    pub fn duration_secs(&self) -> f64 {
        self.stop_secs - self.start_secs
    }
}
