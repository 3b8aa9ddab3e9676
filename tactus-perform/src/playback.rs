//! Playback worker: the consumer half of a performer.
//!
//! One background thread per performer. It takes pending data from the
//! shared feed, decides the voice transition, actuates it, and paces itself
//! against the wall clock with absolute deadlines. The feed lock is held
//! only around queue/buffer access, never across a wait or a key action.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::Sender;

use tactus_types::{KeyAlphabet, PerformFeedback, Pitch, VoicePolicy};

use crate::actuator::KeyActuator;
use crate::arbitration::{self, transition};
use crate::note_queue::NoteQueue;
use crate::slice_buffer::SliceBuffer;

/// The shared store where a performer's producer and consumer meet.
pub(crate) enum Feed {
    Notes(NoteQueue),
    Slices(SliceBuffer),
}

/// Idle poll while the interval queue is empty.
const IDLE_POLL: Duration = Duration::from_millis(10);

/// Longest uninterruptible sleep. Bounds how long `stop()` can go unobserved
/// while the worker waits on a deadline.
const SLEEP_CHUNK: Duration = Duration::from_millis(5);

pub(crate) struct PlaybackWorker {
    pub(crate) feed: Arc<Mutex<Feed>>,
    pub(crate) running: Arc<AtomicBool>,
    pub(crate) actuator: Box<dyn KeyActuator>,
    pub(crate) alphabet: KeyAlphabet,
    pub(crate) beat_divisions: u32,
    pub(crate) default_tempo: f32,
    pub(crate) policy: VoicePolicy,
    pub(crate) feedback: Sender<PerformFeedback>,
    pub(crate) active: Option<Pitch>,
}

impl PlaybackWorker {
    /// Run until the flag clears, then hand the actuator back so the handle
    /// can reuse it on a later start.
    pub(crate) fn run(mut self) -> Box<dyn KeyActuator> {
        let notes = matches!(&*lock_feed(&self.feed), Feed::Notes(_));
        if notes {
            self.run_notes();
        } else {
            self.run_slices();
        }
        // Stuck-key guard: every exit path silences the voice.
        self.set_voice(None);
        let _ = self.feedback.send(PerformFeedback::Stopped);
        self.actuator
    }

    /// Interval feed: events fire at absolute offsets from the start epoch,
    /// strictly in dequeue order. A producer that enqueues out of
    /// chronological order gets out-of-chronological playback.
    fn run_notes(&mut self) {
        let epoch = Instant::now();
        while self.running.load(Ordering::Relaxed) {
            let next = match &mut *lock_feed(&self.feed) {
                Feed::Notes(queue) => queue.pop_front(),
                Feed::Slices(_) => return,
            };
            let Some(event) = next else {
                thread::sleep(IDLE_POLL);
                continue;
            };

            if self.sleep_until(epoch + Duration::from_secs_f64(event.start_secs)) {
                self.set_voice(Some(event.pitch));
            }
            if self.sleep_until(epoch + Duration::from_secs_f64(event.stop_secs)) {
                self.set_voice(None);
            }

            if let Feed::Notes(queue) = &mut *lock_feed(&self.feed) {
                queue.finish_current();
            }
        }
    }

    /// Slice feed: consume one slice per step, then wait out the inter-slice
    /// interval derived from the tempo that came with it. The deadline is
    /// absolute so late wakeups never accumulate into drift.
    fn run_slices(&mut self) {
        let mut deadline = Instant::now();
        while self.running.load(Ordering::Relaxed) {
            let (slice, tempo, head) = match &mut *lock_feed(&self.feed) {
                Feed::Slices(buffer) => {
                    let (slice, tempo) = buffer.read_and_advance();
                    (slice, tempo, buffer.head())
                }
                Feed::Notes(_) => return,
            };

            let next = arbitration::decide(self.policy, &slice, self.active);
            self.set_voice(next);
            let _ = self.feedback.send(PerformFeedback::Head(head));

            let bpm = if tempo > 0.0 { tempo } else { self.default_tempo };
            if bpm <= 0.0 || self.beat_divisions == 0 {
                log::error!(target: "perform", "unplayable cadence (tempo {}, divisions {}), stopping", bpm, self.beat_divisions);
                return;
            }
            deadline += Duration::from_secs_f64(60.0 / (f64::from(bpm) * f64::from(self.beat_divisions)));
            if !self.sleep_until(deadline) {
                return;
            }
        }
    }

    /// Move the voice to `next`, releasing before pressing so two keys are
    /// never down at once.
    fn set_voice(&mut self, next: Option<Pitch>) {
        let change = transition(self.active, next);
        if change.is_noop() {
            return;
        }
        if let Some(pitch) = change.released {
            if let Some(key) = self.alphabet.symbol(pitch) {
                self.actuator.release(key);
            }
        }
        if let Some(pitch) = change.pressed {
            if let Some(key) = self.alphabet.symbol(pitch) {
                self.actuator.press(key);
            }
        }
        self.active = next;
        let _ = self.feedback.send(PerformFeedback::VoiceChange {
            released: change.released,
            pressed: change.pressed,
        });
    }

    /// Sleep toward an absolute deadline in bounded chunks, bailing out as
    /// soon as the running flag clears. True if the deadline was reached.
    fn sleep_until(&self, deadline: Instant) -> bool {
        loop {
            if !self.running.load(Ordering::Relaxed) {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            thread::sleep((deadline - now).min(SLEEP_CHUNK));
        }
    }
}

/// A poisoned feed lock only means the other side panicked mid-access; the
/// queue/buffer state itself is always left coherent, so keep going.
pub(crate) fn lock_feed(feed: &Mutex<Feed>) -> MutexGuard<'_, Feed> {
    match feed.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
