//! Performer handle: construction, producer access, and lifecycle.
//!
//! The handle owns the shared feed and the playback thread's join handle;
//! the spawned worker owns the actuator and hands it back at join so a
//! stopped performer can start again.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, Sender};

use tactus_types::{
    NoteEvent, PerformError, PerformFeedback, PerformSettings, Slice, WriteOutcome,
};

use crate::actuator::KeyActuator;
use crate::note_queue::NoteQueue;
use crate::playback::{lock_feed, Feed, PlaybackWorker};
use crate::slice_buffer::SliceBuffer;

/// Poll interval for drain waits.
const DRAIN_POLL: Duration = Duration::from_millis(10);

/// A monophonic performer. One producer context and one playback thread;
/// the feed is the only shared state and its lock is never held across a
/// wait or a key action.
pub struct Performer {
    feed: Arc<Mutex<Feed>>,
    running: Arc<AtomicBool>,
    join_handle: Option<JoinHandle<Box<dyn KeyActuator>>>,
    actuator: Option<Box<dyn KeyActuator>>,
    feedback_tx: Sender<PerformFeedback>,
    feedback_rx: Receiver<PerformFeedback>,
    settings: PerformSettings,
}

impl Performer {
    /// A performer fed by discrete note intervals.
    pub fn note_feed(settings: PerformSettings, actuator: Box<dyn KeyActuator>) -> Self {
        let feed = Feed::Notes(NoteQueue::new(settings.alphabet.len()));
        Self::with_feed(settings, actuator, feed)
    }

    /// A performer fed by piano-roll slices.
    pub fn slice_feed(settings: PerformSettings, actuator: Box<dyn KeyActuator>) -> Self {
        let feed = Feed::Slices(SliceBuffer::new(
            settings.alphabet.len(),
            settings.buffer_size,
            settings.default_tempo,
        ));
        Self::with_feed(settings, actuator, feed)
    }

    fn with_feed(settings: PerformSettings, actuator: Box<dyn KeyActuator>, feed: Feed) -> Self {
        let (feedback_tx, feedback_rx) = unbounded();
        Self {
            feed: Arc::new(Mutex::new(feed)),
            running: Arc::new(AtomicBool::new(false)),
            join_handle: None,
            actuator: Some(actuator),
            feedback_tx,
            feedback_rx,
            settings,
        }
    }

    /// Detach a producer-side writer that can live on another thread.
    pub fn writer(&self) -> FeedWriter {
        FeedWriter {
            feed: Arc::clone(&self.feed),
        }
    }

    /// Queue a note interval (interval feed only). Rejected events leave the
    /// queue untouched.
    pub fn enqueue(&self, event: NoteEvent) -> Result<(), PerformError> {
        match &mut *lock_feed(&self.feed) {
            Feed::Notes(queue) => queue.push(event),
            Feed::Slices(_) => Err(PerformError::FeedMismatch),
        }
    }

    /// Store the slice for an absolute index (slice feed only). Stale and
    /// too-far-ahead writes are dropped and reported in the outcome.
    pub fn write_slice(
        &self,
        index: u64,
        slice: Slice,
        tempo: Option<f32>,
    ) -> Result<WriteOutcome, PerformError> {
        match &mut *lock_feed(&self.feed) {
            Feed::Slices(buffer) => buffer.write(index, slice, tempo),
            Feed::Notes(_) => Err(PerformError::FeedMismatch),
        }
    }

    /// Number of events awaiting playback (interval feed only).
    pub fn pending(&self) -> Result<usize, PerformError> {
        match &*lock_feed(&self.feed) {
            Feed::Notes(queue) => Ok(queue.len()),
            Feed::Slices(_) => Err(PerformError::FeedMismatch),
        }
    }

    /// Next slice index to be consumed (slice feed only).
    pub fn head(&self) -> Result<u64, PerformError> {
        match &*lock_feed(&self.feed) {
            Feed::Slices(buffer) => Ok(buffer.head()),
            Feed::Notes(_) => Err(PerformError::FeedMismatch),
        }
    }

    pub fn is_running(&self) -> bool {
        self.join_handle.is_some() && self.running.load(Ordering::Relaxed)
    }

    /// Spawn the playback thread. Erroring while already running keeps the
    /// current playback untouched.
    pub fn start(&mut self) -> Result<(), PerformError> {
        if self.join_handle.is_some() {
            return Err(PerformError::AlreadyRunning);
        }
        let actuator = self.actuator.take().ok_or(PerformError::AlreadyRunning)?;
        self.running.store(true, Ordering::Relaxed);
        let worker = PlaybackWorker {
            feed: Arc::clone(&self.feed),
            running: Arc::clone(&self.running),
            actuator,
            alphabet: self.settings.alphabet.clone(),
            beat_divisions: self.settings.beat_divisions,
            default_tempo: self.settings.default_tempo,
            policy: self.settings.policy,
            feedback: self.feedback_tx.clone(),
            active: None,
        };
        self.join_handle = Some(thread::spawn(move || worker.run()));
        Ok(())
    }

    /// Clear the running flag and join the playback thread. The worker
    /// releases any sounding pitch on its way out. Safe to call from any
    /// state: a second call rejects with `NotRunning` instead of
    /// double-joining.
    pub fn stop(&mut self) -> Result<(), PerformError> {
        let Some(handle) = self.join_handle.take() else {
            return Err(PerformError::NotRunning);
        };
        self.running.store(false, Ordering::Relaxed);
        match handle.join() {
            Ok(actuator) => self.actuator = Some(actuator),
            Err(_) => log::error!(target: "perform", "playback thread panicked"),
        }
        Ok(())
    }

    /// Block until every queued event has been fully performed, then stop.
    /// Interval feed only.
    pub fn wait_for_drain(&mut self) -> Result<(), PerformError> {
        if self.join_handle.is_none() {
            return Err(PerformError::NotRunning);
        }
        loop {
            let drained = match &*lock_feed(&self.feed) {
                Feed::Notes(queue) => queue.is_drained(),
                Feed::Slices(_) => return Err(PerformError::FeedMismatch),
            };
            if drained || !self.running.load(Ordering::Relaxed) {
                break;
            }
            thread::sleep(DRAIN_POLL);
        }
        self.stop()
    }

    /// Block until the consumer has advanced past `final_index`, then stop.
    /// Slice feed only.
    pub fn wait_until(&mut self, final_index: u64) -> Result<(), PerformError> {
        if self.join_handle.is_none() {
            return Err(PerformError::NotRunning);
        }
        loop {
            let head = match &*lock_feed(&self.feed) {
                Feed::Slices(buffer) => buffer.head(),
                Feed::Notes(_) => return Err(PerformError::FeedMismatch),
            };
            if head >= final_index || !self.running.load(Ordering::Relaxed) {
                break;
            }
            thread::sleep(DRAIN_POLL);
        }
        self.stop()
    }

    /// Non-blocking drain of playback progress reports.
    pub fn drain_feedback(&self) -> Vec<PerformFeedback> {
        let mut out = Vec::new();
        while let Ok(msg) = self.feedback_rx.try_recv() {
            out.push(msg);
        }
        out
    }
}

impl Drop for Performer {
    fn drop(&mut self) {
        // Dropping mid-playback must still join the thread and lift the key.
        let _ = self.stop();
    }
}

/// Producer-side writer, detachable onto the producer's own thread. Shares
/// only the feed lock with the consumer; writes never block on its waits.
pub struct FeedWriter {
    feed: Arc<Mutex<Feed>>,
}

impl FeedWriter {
    pub fn enqueue(&self, event: NoteEvent) -> Result<(), PerformError> {
        match &mut *lock_feed(&self.feed) {
            Feed::Notes(queue) => queue.push(event),
            Feed::Slices(_) => Err(PerformError::FeedMismatch),
        }
    }

    pub fn write_slice(
        &self,
        index: u64,
        slice: Slice,
        tempo: Option<f32>,
    ) -> Result<WriteOutcome, PerformError> {
        match &mut *lock_feed(&self.feed) {
            Feed::Slices(buffer) => buffer.write(index, slice, tempo),
            Feed::Notes(_) => Err(PerformError::FeedMismatch),
        }
    }
}
