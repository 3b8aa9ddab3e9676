use serde::{Deserialize, Serialize};

use crate::{KeyAlphabet, VoicePolicy};

/// Settings a performer is constructed with. Defaults mirror the original
/// performer: sixteenth-note resolution, a thousand-slice lookahead window,
/// and 90 BPM until the feed says otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformSettings {
    pub alphabet: KeyAlphabet,
    /// Scheduler steps per beat (4 = sixteenth notes).
    pub beat_divisions: u32,
    /// Slice ring capacity, in slices.
    pub buffer_size: usize,
    /// Tempo assumed for slices that never carried one, in BPM.
    pub default_tempo: f32,
    pub policy: VoicePolicy,
}

impl Default for PerformSettings {
    fn default() -> Self {
        Self {
            alphabet: KeyAlphabet::default(),
            beat_divisions: 4,
            buffer_size: 1000,
            default_tempo: 90.0,
            policy: VoicePolicy::default(),
        }
    }
}
