//! Key actuation seam.
//!
//! The performer never talks to an output device directly; it drives a
//! [`KeyActuator`] injected at construction. Implementations must tolerate
//! redundant presses and releases. The arbitration layer avoids sending
//! them, but the contract does not rely on it.

/// Presses and releases one logical key. Fire-and-forget: calls must not
/// block the playback thread.
pub trait KeyActuator: Send {
    fn press(&mut self, key: char);
    fn release(&mut self, key: char);
}

/// Actuator that reports key events through the `log` facade.
#[derive(Debug, Default)]
pub struct LogActuator;

impl KeyActuator for LogActuator {
    fn press(&mut self, key: char) {
        log::debug!(target: "perform::keys", "press {:?}", key);
    }

    fn release(&mut self, key: char) {
        log::debug!(target: "perform::keys", "release {:?}", key);
    }
}

/// Actuator that does nothing. Useful for dry runs and timing measurements.
#[derive(Debug, Default)]
pub struct NullActuator;

impl KeyActuator for NullActuator {
    fn press(&mut self, _key: char) {}

    fn release(&mut self, _key: char) {}
}
