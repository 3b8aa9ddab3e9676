//! Fixed-capacity circular buffer of piano-roll slices.
//!
//! The producer writes by absolute slice index; the consumer reads at `head`
//! and advances. Bounds checks live here so no caller ever touches the ring
//! arithmetic. The buffer itself is not synchronized; the performer wraps
//! it in the one shared lock.

use tactus_types::{PerformError, Slice, WriteOutcome};

pub struct SliceBuffer {
    slots: Vec<Slice>,
    /// Per-slot tempo in BPM. Written only when a write carries a tempo and
    /// never cleared on read, so the last tempo persists across ring laps.
    tempos: Vec<f32>,
    /// Absolute index of the next slice to consume. Monotonically increasing.
    head: u64,
    width: usize,
}

impl SliceBuffer {
    pub fn new(width: usize, capacity: usize, default_tempo: f32) -> Self {
        Self {
            slots: vec![Slice::empty(width); capacity],
            tempos: vec![default_tempo; capacity],
            head: 0,
            width,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn head(&self) -> u64 {
        self.head
    }

    /// Store the slice for an absolute index. Stale and too-far-ahead writes
    /// are dropped and reported in the outcome; both leave every unconsumed
    /// slot untouched.
    pub fn write(
        &mut self,
        index: u64,
        slice: Slice,
        tempo: Option<f32>,
    ) -> Result<WriteOutcome, PerformError> {
        if slice.len() != self.width {
            return Err(PerformError::SliceShape {
                got: slice.len(),
                want: self.width,
            });
        }
        if index < self.head {
            log::warn!(target: "perform::buffer", "slice {} is in the past (head {}), skipping", index, self.head);
            return Ok(WriteOutcome::Stale);
        }
        if index >= self.head + self.capacity() as u64 {
            log::warn!(target: "perform::buffer", "slice {} is too far in the future (head {}, capacity {}), skipping", index, self.head, self.capacity());
            return Ok(WriteOutcome::TooFarAhead);
        }
        let slot = (index % self.capacity() as u64) as usize;
        self.slots[slot] = slice;
        if let Some(bpm) = tempo {
            self.tempos[slot] = bpm;
        }
        Ok(WriteOutcome::Written)
    }

    /// Take the slice at `head`, clear its slot so a ring lap cannot replay
    /// it, and advance. An unwritten slot yields the empty slice (silence).
    pub fn read_and_advance(&mut self) -> (Slice, f32) {
        let slot = (self.head % self.capacity() as u64) as usize;
        let slice = std::mem::replace(&mut self.slots[slot], Slice::empty(self.width));
        let tempo = self.tempos[slot];
        self.head += 1;
        (slice, tempo)
    }
}
