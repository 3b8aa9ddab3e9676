//! Pending note-interval queue.
//!
//! Arrival-ordered FIFO. The queue imposes no chronological ordering: a
//! producer that wants chronological playback must enqueue in order. Not
//! synchronized on its own; the performer wraps it in the shared lock.

use std::collections::VecDeque;

use tactus_types::{NoteEvent, PerformError};

pub struct NoteQueue {
    pending: VecDeque<NoteEvent>,
    /// A popped event still being performed. Drain waits must not consider
    /// the queue empty while one is outstanding.
    in_flight: bool,
    alphabet_len: usize,
}

impl NoteQueue {
    pub fn new(alphabet_len: usize) -> Self {
        Self {
            pending: VecDeque::new(),
            in_flight: false,
            alphabet_len,
        }
    }

    /// Append an event. Out-of-range pitches and inverted or negative time
    /// windows are rejected at this boundary and never reach the voice.
    pub fn push(&mut self, event: NoteEvent) -> Result<(), PerformError> {
        if event.pitch.index() >= self.alphabet_len {
            return Err(PerformError::InvalidPitch {
                pitch: event.pitch.get(),
                alphabet: self.alphabet_len,
            });
        }
        if event.start_secs < 0.0 || event.stop_secs < event.start_secs {
            return Err(PerformError::InvalidWindow {
                start_secs: event.start_secs,
                stop_secs: event.stop_secs,
            });
        }
        self.pending.push_back(event);
        Ok(())
    }

    /// Pop the earliest-arrived event, marking it in flight until
    /// [`finish_current`](Self::finish_current).
    pub fn pop_front(&mut self) -> Option<NoteEvent> {
        let event = self.pending.pop_front();
        if event.is_some() {
            self.in_flight = true;
        }
        event
    }

    /// Mark the popped event fully performed.
    pub fn finish_current(&mut self) {
        self.in_flight = false;
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Nothing pending and nothing mid-performance.
    pub fn is_drained(&self) -> bool {
        self.pending.is_empty() && !self.in_flight
    }
}
