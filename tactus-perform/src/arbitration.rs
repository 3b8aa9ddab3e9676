//! Voice arbitration: which single note a slice should sound.
//!
//! `decide` is pure; the side effects of acting on a decision are derived
//! from the transition it produces, never from the policy itself.

use tactus_types::{Pitch, Slice, VoicePolicy};

/// Choose the pitch to sound for `current`, given the pitch sounding now.
/// Returns `None` when the voice should go silent.
pub fn decide(policy: VoicePolicy, current: &Slice, active: Option<Pitch>) -> Option<Pitch> {
    match policy {
        VoicePolicy::HighestWins => current.highest_active(),
        VoicePolicy::PreferContinuation => match active {
            Some(pitch) if current.is_active(pitch) => Some(pitch),
            _ => current.highest_active(),
        },
    }
}

/// The key actions implied by moving the voice from `active` to `next`.
/// `released` must be executed strictly before `pressed` so that two keys
/// are never down at once on a monophonic output device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub released: Option<Pitch>,
    pub pressed: Option<Pitch>,
}

impl Transition {
    pub fn is_noop(&self) -> bool {
        self.released.is_none() && self.pressed.is_none()
    }
}

/// Derive the release/press pair for a voice change. An unchanged voice
/// produces no actions.
pub fn transition(active: Option<Pitch>, next: Option<Pitch>) -> Transition {
    if active == next {
        Transition {
            released: None,
            pressed: None,
        }
    } else {
        Transition {
            released: active,
            pressed: next,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slice(width: usize, active: &[u8]) -> Slice {
        let pitches: Vec<Pitch> = active.iter().map(|&p| Pitch::new(p)).collect();
        Slice::with_active(width, &pitches)
    }

    #[test]
    fn highest_wins_picks_topmost() {
        let current = slice(8, &[2, 6, 4]);
        assert_eq!(
            decide(VoicePolicy::HighestWins, &current, None),
            Some(Pitch::new(6))
        );
    }

    #[test]
    fn highest_wins_ignores_active_voice() {
        let current = slice(8, &[2, 6]);
        // Even though 2 is sounding and still active, the topmost wins.
        assert_eq!(
            decide(VoicePolicy::HighestWins, &current, Some(Pitch::new(2))),
            Some(Pitch::new(6))
        );
    }

    #[test]
    fn silent_slice_silences_voice() {
        let current = Slice::empty(8);
        for policy in [VoicePolicy::HighestWins, VoicePolicy::PreferContinuation] {
            assert_eq!(decide(policy, &current, Some(Pitch::new(3))), None);
        }
    }

    #[test]
    fn continuation_holds_sounding_note() {
        let current = slice(8, &[2, 6]);
        assert_eq!(
            decide(VoicePolicy::PreferContinuation, &current, Some(Pitch::new(2))),
            Some(Pitch::new(2))
        );
    }

    #[test]
    fn continuation_falls_back_to_topmost() {
        let current = slice(8, &[3, 5]);
        // Sounding note no longer active: steal to the topmost.
        assert_eq!(
            decide(VoicePolicy::PreferContinuation, &current, Some(Pitch::new(1))),
            Some(Pitch::new(5))
        );
        assert_eq!(
            decide(VoicePolicy::PreferContinuation, &current, None),
            Some(Pitch::new(5))
        );
    }

    #[test]
    fn unchanged_voice_is_noop() {
        let t = transition(Some(Pitch::new(4)), Some(Pitch::new(4)));
        assert!(t.is_noop());
        assert!(transition(None, None).is_noop());
    }

    #[test]
    fn voice_change_releases_and_presses() {
        let t = transition(Some(Pitch::new(4)), Some(Pitch::new(7)));
        assert_eq!(t.released, Some(Pitch::new(4)));
        assert_eq!(t.pressed, Some(Pitch::new(7)));
    }

    #[test]
    fn silence_only_releases() {
        let t = transition(Some(Pitch::new(4)), None);
        assert_eq!(t.released, Some(Pitch::new(4)));
        assert_eq!(t.pressed, None);
    }
}
