//! # tactus-perform
//!
//! Real-time monophonic performance of pre-quantized note data. A producer
//! feeds either discrete note intervals or piano-roll slices; a background
//! thread paces itself against the wall clock and plays them one voice at a
//! time through an injected [`KeyActuator`].
//!
//! This crate never installs a logger; it logs through the `log` facade and
//! leaves the sink to the embedding application.

pub mod actuator;
pub mod arbitration;
pub mod config;
pub mod handle;
pub mod note_queue;
pub mod playback;
pub mod slice_buffer;

pub use actuator::{KeyActuator, LogActuator, NullActuator};
pub use config::Config;
pub use handle::{FeedWriter, Performer};
pub use note_queue::NoteQueue;
pub use slice_buffer::SliceBuffer;
