//! Configuration: embedded defaults overlaid by an optional user file.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use tactus_types::{KeyAlphabet, PerformSettings, VoicePolicy};

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    defaults: DefaultsConfig,
}

#[derive(Deserialize, Default)]
struct DefaultsConfig {
    tempo: Option<f32>,
    beat_divisions: Option<u32>,
    buffer_size: Option<usize>,
    policy: Option<String>,
    keys: Option<String>,
}

pub struct Config {
    defaults: DefaultsConfig,
}

impl Config {
    /// Load the embedded defaults, overlaid by the user's config if present.
    /// A malformed or unreadable user file is ignored with a warning.
    pub fn load() -> Self {
        Self::load_from(user_config_path().as_deref())
    }

    fn load_from(user_path: Option<&Path>) -> Self {
        let mut base: ConfigFile =
            toml::from_str(DEFAULT_CONFIG).expect("Failed to parse embedded config.toml");

        if let Some(path) = user_path {
            if path.exists() {
                match std::fs::read_to_string(path) {
                    Ok(contents) => match toml::from_str::<ConfigFile>(&contents) {
                        Ok(user) => merge_defaults(&mut base.defaults, user.defaults),
                        Err(e) => {
                            log::warn!(target: "config", "ignoring malformed config {}: {}", path.display(), e)
                        }
                    },
                    Err(e) => {
                        log::warn!(target: "config", "could not read config {}: {}", path.display(), e)
                    }
                }
            }
        }

        Config {
            defaults: base.defaults,
        }
    }

    /// Resolve settings, falling back field-wise on unusable values.
    pub fn settings(&self) -> PerformSettings {
        let fallback = PerformSettings::default();
        PerformSettings {
            alphabet: self
                .defaults
                .keys
                .as_deref()
                .filter(|keys| !keys.is_empty())
                .map(KeyAlphabet::new)
                .unwrap_or(fallback.alphabet),
            beat_divisions: self
                .defaults
                .beat_divisions
                .filter(|&divisions| divisions > 0)
                .unwrap_or(fallback.beat_divisions),
            buffer_size: self
                .defaults
                .buffer_size
                .filter(|&size| size > 0)
                .unwrap_or(fallback.buffer_size),
            default_tempo: self
                .defaults
                .tempo
                .filter(|&bpm| bpm > 0.0)
                .unwrap_or(fallback.default_tempo),
            policy: self
                .defaults
                .policy
                .as_deref()
                .and_then(VoicePolicy::parse)
                .unwrap_or(fallback.policy),
        }
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tactus").join("config.toml"))
}

fn merge_defaults(base: &mut DefaultsConfig, user: DefaultsConfig) {
    if user.tempo.is_some() {
        base.tempo = user.tempo;
    }
    if user.beat_divisions.is_some() {
        base.beat_divisions = user.beat_divisions;
    }
    if user.buffer_size.is_some() {
        base.buffer_size = user.buffer_size;
    }
    if user.policy.is_some() {
        base.policy = user.policy;
    }
    if user.keys.is_some() {
        base.keys = user.keys;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn embedded_defaults_match_the_original_performer() {
        let settings = Config::load_from(None).settings();
        assert_eq!(settings.beat_divisions, 4);
        assert_eq!(settings.buffer_size, 1000);
        assert_eq!(settings.default_tempo, 90.0);
        assert_eq!(settings.policy, VoicePolicy::HighestWins);
        assert_eq!(settings.alphabet.len(), 37);
    }

    #[test]
    fn user_file_overrides_a_subset() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[defaults]\ntempo = 120.0\npolicy = \"prefer_continuation\""
        )
        .unwrap();

        let settings = Config::load_from(Some(file.path())).settings();
        assert_eq!(settings.default_tempo, 120.0);
        assert_eq!(settings.policy, VoicePolicy::PreferContinuation);
        // Untouched fields keep the embedded defaults.
        assert_eq!(settings.buffer_size, 1000);
    }

    #[test]
    fn malformed_user_file_is_ignored() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "defaults = not toml").unwrap();

        let settings = Config::load_from(Some(file.path())).settings();
        assert_eq!(settings.default_tempo, 90.0);
    }

    #[test]
    fn unusable_values_fall_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[defaults]\ntempo = -3.0\nbeat_divisions = 0\nkeys = \"\"\npolicy = \"loudest\""
        )
        .unwrap();

        let settings = Config::load_from(Some(file.path())).settings();
        assert_eq!(settings.default_tempo, 90.0);
        assert_eq!(settings.beat_divisions, 4);
        assert_eq!(settings.alphabet.len(), 37);
        assert_eq!(settings.policy, VoicePolicy::HighestWins);
    }
}
