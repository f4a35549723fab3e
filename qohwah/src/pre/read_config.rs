use crate::error::{PersistError, PersistResult};
use crate::pre::read_text::read_text;
use std::fmt;
use std::path::Path;

pub const DEFAULT_MENU_TOGGLE_KEY: &str = "F5";
pub const DEFAULT_MANUAL_DECREMENT_KEY: &str = "F6";

const MENU_TOGGLE_PREFIX: &str = "triggerkey";
const AUTO_DECREMENT_PREFIX: &str = "autodecreasewinsondeath";
const MANUAL_DECREMENT_PREFIX: &str = "manualdecreasekey";

/// Key is the name of a keyboard key as used by the host, e.g. `F5`. Names are compared
/// case-insensitively, which is why they are stored upper case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key(String);

impl Key {
    pub fn new(name: &str) -> Key {
        Key(name.trim().to_uppercase())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// * `menu_toggle_key` - Key that shows or hides the race menu
/// * `manual_win_decrement_key` - Key that removes one win from the counter
/// * `auto_decrement_wins_on_death` - Whether dying during a race costs one win
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub menu_toggle_key: Key,
    pub manual_win_decrement_key: Key,
    pub auto_decrement_wins_on_death: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            menu_toggle_key: Key::new(DEFAULT_MENU_TOGGLE_KEY),
            manual_win_decrement_key: Key::new(DEFAULT_MANUAL_DECREMENT_KEY),
            auto_decrement_wins_on_death: true,
        }
    }
}

/// parse_config decodes the `Key=Value` lines of a config file. Keys are matched by
/// case-insensitive prefix, unknown lines and unusable values leave the defaults untouched.
pub fn parse_config(content: &str) -> Config {
    let mut config = Config::default();

    for line in content.lines() {
        let (key, val) = match line.split_once('=') {
            Some((key, val)) => (key.trim().to_lowercase(), val.trim()),
            None => continue,
        };

        if key.starts_with(MENU_TOGGLE_PREFIX) {
            if !val.is_empty() {
                config.menu_toggle_key = Key::new(val);
            }
        } else if key.starts_with(AUTO_DECREMENT_PREFIX) {
            if let Some(flag) = parse_flag(val) {
                config.auto_decrement_wins_on_death = flag;
            }
        } else if key.starts_with(MANUAL_DECREMENT_PREFIX) && !val.is_empty() {
            config.manual_win_decrement_key = Key::new(val);
        }
    }

    config
}

fn parse_flag(val: &str) -> Option<bool> {
    match val.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub fn try_read_config(filepath: &Path) -> PersistResult<Config> {
    let content = read_text(filepath)?;
    Ok(parse_config(&content))
}

/// read_config reads the config file on a best-effort basis, any failure results in the default
/// config.
pub fn read_config(filepath: &Path) -> Config {
    match try_read_config(filepath) {
        Ok(config) => {
            tracing::info!(
                path = %filepath.display(),
                menu_toggle_key = %config.menu_toggle_key,
                manual_win_decrement_key = %config.manual_win_decrement_key,
                auto_decrement_wins_on_death = config.auto_decrement_wins_on_death,
                "Loaded config"
            );
            config
        }
        Err(PersistError::Missing(_)) => {
            tracing::info!(path = %filepath.display(), "No config file found, using defaults");
            Config::default()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read config file, using defaults");
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_empty() {
        assert_eq!(parse_config(""), Config::default());
    }

    #[test]
    fn test_parse_config_all_keys() {
        let config = parse_config(
            "TriggerKey=F9\nAutoDecreaseWinsOnDeath=false\nManualDecreaseKey=numpad0\n",
        );

        assert_eq!(config.menu_toggle_key, Key::new("F9"));
        assert_eq!(config.manual_win_decrement_key, Key::new("NumPad0"));
        assert!(!config.auto_decrement_wins_on_death);
    }

    #[test]
    fn test_parse_config_case_insensitive_prefix() {
        let config = parse_config(
            "triggerkey = f7\r\nAUTODECREASEWINSONDEATHENABLED=No\r\nmanualdecreasekeyname=End\r\n",
        );

        assert_eq!(config.menu_toggle_key.name(), "F7");
        assert_eq!(config.manual_win_decrement_key.name(), "END");
        assert!(!config.auto_decrement_wins_on_death);
    }

    #[test]
    fn test_parse_config_ignores_unknown_and_bad_values() {
        let config = parse_config(
            "# comment\nVehicle=Sultan\nTriggerKey=\nAutoDecreaseWinsOnDeath=maybe\nnonsense\n",
        );

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_read_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = read_config(&dir.path().join("QohwahConfig.ini"));

        assert_eq!(config.menu_toggle_key.name(), DEFAULT_MENU_TOGGLE_KEY);
        assert!(config.auto_decrement_wins_on_death);
    }

    #[test]
    fn test_key_display() {
        assert_eq!(Key::new(" f5 ").to_string(), "F5");
    }

    #[test]
    fn test_read_config_with_bom_and_invalid_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let filepath = dir.path().join("QohwahConfig.ini");
        std::fs::write(
            &filepath,
            b"\xef\xbb\xbfTriggerKey=F9\r\n# \xe9\r\nManualDecreaseKey=F10\r\n",
        )
        .unwrap();

        let config = read_config(&filepath);
        assert_eq!(config.menu_toggle_key.name(), "F9");
        assert_eq!(config.manual_win_decrement_key.name(), "F10");
    }
}
