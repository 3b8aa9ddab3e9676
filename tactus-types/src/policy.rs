use serde::{Deserialize, Serialize};

/// Which note a monophonic voice should sound when a slice offers several.
///
/// `HighestWins` is the default: it is the behavior the original performer
/// shipped. `PreferContinuation` holds a sounding note for as long as the
/// incoming slices keep it active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoicePolicy {
    #[default]
    HighestWins,
    PreferContinuation,
}

impl VoicePolicy {
    /// Parse a config-file spelling of the policy.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "highest_wins" => Some(Self::HighestWins),
            "prefer_continuation" => Some(Self::PreferContinuation),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_names() {
        assert_eq!(VoicePolicy::parse("highest_wins"), Some(VoicePolicy::HighestWins));
        assert_eq!(
            VoicePolicy::parse("prefer_continuation"),
            Some(VoicePolicy::PreferContinuation)
        );
        assert_eq!(VoicePolicy::parse("loudest"), None);
    }
}
