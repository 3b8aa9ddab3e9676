//! # tactus-types
//!
//! Shared type definitions for the tactus performer ecosystem.
//! This crate holds the plain data model (pitches, alphabets, note events,
//! slices) consumed by tactus-perform; it carries no threading or timing
//! logic of its own.

pub mod error;
pub mod feedback;
mod note;
mod policy;
mod settings;
mod slice;

pub use error::{PerformError, WriteOutcome};
pub use feedback::PerformFeedback;
pub use note::NoteEvent;
pub use policy::VoicePolicy;
pub use settings::PerformSettings;
pub use slice::Slice;

/// The original performer's key layout: a QWERTY zig-zag spanning C4..C7,
/// one symbol per semitone (37 keys).
pub const DEFAULT_KEYS: &str = "aksldf;g'h[jq2w3er5t6y7ui]z\\xc,v.b/nm";

/// A pitch index: an offset into a [`KeyAlphabet`]. The caller subtracts the
/// base pitch before constructing one, so index 0 is the alphabet's lowest key.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct Pitch(u8);

impl Pitch {
    pub fn new(index: u8) -> Self {
        Self(index)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// The pitch as a slot index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for Pitch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An ordered, fixed-size sequence of logical key symbols. Pitch indices are
/// offsets into it. Owned by a performer for its lifetime.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct KeyAlphabet {
    keys: Vec<char>,
}

impl KeyAlphabet {
    pub fn new(keys: &str) -> Self {
        Self {
            keys: keys.chars().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The key symbol for a pitch, or `None` if the pitch is out of range.
    pub fn symbol(&self, pitch: Pitch) -> Option<char> {
        self.keys.get(pitch.index()).copied()
    }

    pub fn contains(&self, pitch: Pitch) -> bool {
        pitch.index() < self.keys.len()
    }
}

impl Default for KeyAlphabet {
    fn default() -> Self {
        Self::new(DEFAULT_KEYS)
    }
}
