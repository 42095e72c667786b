use crate::{command::Command, key::KeySequence};
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
/// Application's key mappings
pub struct KeymapConfig {
    #[serde(default)]
    pub keymaps: Vec<Keymap>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Keymap {
    pub key_sequence: KeySequence,
    pub command: Command,
}

fn keymap(key_sequence: &str, command: Command) -> Keymap {
    Keymap {
        key_sequence: key_sequence
            .parse()
            .unwrap_or_else(|err| panic!("invalid default key sequence {key_sequence}: {err:#}")),
        command,
    }
}

impl Default for KeymapConfig {
    fn default() -> Self {
        KeymapConfig {
            keymaps: vec![
                keymap("q", Command::Quit),
                keymap("C-c", Command::Quit),
                keymap("?", Command::OpenCommandHelp),
                keymap("esc", Command::ClosePopup),
                keymap("l", Command::NextPlaylist),
                keymap("right", Command::NextPlaylist),
                keymap("h", Command::PreviousPlaylist),
                keymap("left", Command::PreviousPlaylist),
                keymap("j", Command::SelectNext),
                keymap("down", Command::SelectNext),
                keymap("C-n", Command::SelectNext),
                keymap("k", Command::SelectPrevious),
                keymap("up", Command::SelectPrevious),
                keymap("C-p", Command::SelectPrevious),
                keymap("enter", Command::ChooseSelected),
                keymap("space", Command::ToggleCategory),
                keymap("tab", Command::NextCategoryFilter),
                keymap("backtab", Command::PreviousCategoryFilter),
                keymap("a", Command::ClearCategoryFilter),
                keymap("m", Command::CycleSortMode),
                keymap("g c", Command::CarouselView),
                keymap("g f", Command::CategoryView),
                keymap("g a", Command::AlphabeticalView),
                keymap("T", Command::ToggleTheme),
                keymap("r", Command::Refresh),
                keymap("o", Command::OpenPlayer),
                keymap("x", Command::ClosePlayer),
            ],
        }
    }
}

impl KeymapConfig {
    pub fn new(path: &std::path::Path) -> Result<Self> {
        let mut config = Self::default();
        config.parse_config_file(path)?;
        Ok(config)
    }

    /// parses a list of keymaps from a config file in `path` folder
    /// and merges them into the current keymaps.
    ///
    /// A user-defined keymap overrides the default keymap with the same key sequence.
    pub fn parse_config_file(&mut self, path: &std::path::Path) -> Result<()> {
        let file_path = path.join(super::KEYMAP_CONFIG_FILE);
        match std::fs::read_to_string(&file_path) {
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No keymap config file found at {}", file_path.display());
            }
            Err(err) => return Err(err.into()),
            Ok(content) => self.merge(toml::from_str::<Self>(&content)?.keymaps),
        }
        Ok(())
    }

    fn merge(&mut self, keymaps: Vec<Keymap>) {
        self.keymaps
            .retain(|k| !keymaps.iter().any(|u| u.key_sequence == k.key_sequence));
        self.keymaps.extend(keymaps);
    }

    /// finds all keymaps whose key sequence has `prefix` as a prefix
    pub fn find_matched_prefix_keymaps(&self, prefix: &KeySequence) -> Vec<&Keymap> {
        self.keymaps
            .iter()
            .filter(|keymap| prefix.is_prefix(&keymap.key_sequence))
            .collect()
    }

    /// finds a command from a mapped key sequence
    pub fn find_command_from_key_sequence(&self, key_sequence: &KeySequence) -> Option<Command> {
        self.keymaps
            .iter()
            .find(|keymap| keymap.key_sequence == *key_sequence)
            .map(|keymap| keymap.command)
    }
}
