use serde::{Deserialize, Serialize};

use crate::Pitch;

/// A quantized snapshot of which pitches are active at one time step: a
/// fixed-width vector of boolean flags, one per key of the alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slice {
    active: Vec<bool>,
}

impl Slice {
    /// An all-silent slice of the given width.
    pub fn empty(width: usize) -> Self {
        Self {
            active: vec![false; width],
        }
    }

    /// A slice with the given pitches sounding. Out-of-range pitches are
    /// ignored; validation happens at the buffer boundary.
    pub fn with_active(width: usize, pitches: &[Pitch]) -> Self {
        let mut slice = Self::empty(width);
        for &pitch in pitches {
            slice.set(pitch, true);
        }
        slice
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// True when no pitch is active.
    pub fn is_silent(&self) -> bool {
        !self.active.iter().any(|&on| on)
    }

    pub fn is_active(&self, pitch: Pitch) -> bool {
        self.active.get(pitch.index()).copied().unwrap_or(false)
    }

    pub fn set(&mut self, pitch: Pitch, on: bool) {
        if let Some(flag) = self.active.get_mut(pitch.index()) {
            *flag = on;
        }
    }

    /// The topmost active pitch, or `None` when silent.
    pub fn highest_active(&self) -> Option<Pitch> {
        self.active
            .iter()
            .rposition(|&on| on)
            .map(|index| Pitch::new(index as u8))
    }
}
