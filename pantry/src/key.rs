use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Key represents a key received from user's input
pub enum Key {
    Unknown,
    None(KeyCode),
    Ctrl(KeyCode),
    Alt(KeyCode),
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
/// `KeySequence` represents a combination of pressed keys
pub struct KeySequence {
    pub keys: Vec<Key>,
}

/// keys referred to by name in keymap configs
const NAMED_KEYS: [(&str, KeyCode); 14] = [
    ("enter", KeyCode::Enter),
    ("space", KeyCode::Char(' ')),
    ("tab", KeyCode::Tab),
    ("backtab", KeyCode::BackTab),
    ("backspace", KeyCode::Backspace),
    ("esc", KeyCode::Esc),
    ("left", KeyCode::Left),
    ("right", KeyCode::Right),
    ("up", KeyCode::Up),
    ("down", KeyCode::Down),
    ("home", KeyCode::Home),
    ("end", KeyCode::End),
    ("page_up", KeyCode::PageUp),
    ("page_down", KeyCode::PageDown),
];

fn parse_key_code(s: &str) -> Option<KeyCode> {
    if let Some((_, code)) = NAMED_KEYS.iter().find(|(name, _)| *name == s) {
        return Some(*code);
    }
    if let Some(n) = s.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
        return (1..=12).contains(&n).then_some(KeyCode::F(n));
    }

    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c != ' ' => Some(KeyCode::Char(c)),
        _ => None,
    }
}

fn key_code_to_string(k: KeyCode) -> String {
    if let Some((name, _)) = NAMED_KEYS.iter().find(|(_, code)| *code == k) {
        return (*name).to_string();
    }
    match k {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::F(n) => format!("f{n}"),
        k => format!("{k:?}").to_lowercase(),
    }
}

impl FromStr for Key {
    type Err = anyhow::Error;

    /// parses a key from its string representation,
    /// `C-<key>` for ctrl-<key> and `M-<key>` for alt-<key>
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s.split_once('-') {
            Some(("C", code)) if !code.is_empty() => parse_key_code(code).map(Key::Ctrl),
            Some(("M", code)) if !code.is_empty() => parse_key_code(code).map(Key::Alt),
            _ => parse_key_code(s).map(Key::None),
        };
        key.ok_or_else(|| anyhow::anyhow!("unknown key {s}"))
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Key::Ctrl(k) => write!(f, "C-{}", key_code_to_string(k)),
            Key::Alt(k) => write!(f, "M-{}", key_code_to_string(k)),
            Key::None(k) => write!(f, "{}", key_code_to_string(k)),
            Key::Unknown => write!(f, "unknown key"),
        }
    }
}

impl From<KeyEvent> for Key {
    fn from(event: KeyEvent) -> Self {
        let mut modifiers = event.modifiers;
        // the key code of a shifted key already represents the with-SHIFT character
        if modifiers.contains(KeyModifiers::SHIFT) {
            modifiers.remove(KeyModifiers::SHIFT);
        }

        match modifiers {
            KeyModifiers::NONE => Key::None(event.code),
            KeyModifiers::ALT => Key::Alt(event.code),
            KeyModifiers::CONTROL => Key::Ctrl(event.code),
            _ => Key::Unknown,
        }
    }
}

impl KeySequence {
    /// checks if a key sequence is a prefix of `other` key sequence
    #[must_use]
    pub fn is_prefix(&self, other: &Self) -> bool {
        other.keys.starts_with(&self.keys)
    }
}

impl FromStr for KeySequence {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let keys = s
            .split(' ')
            .map(str::parse::<Key>)
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Self { keys })
    }
}

impl std::fmt::Display for KeySequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            self.keys
                .iter()
                .map(std::string::ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        )
    }
}

impl<'de> serde::de::Deserialize<'de> for KeySequence {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|err| {
            serde::de::Error::custom(format!("failed to parse key sequence {s}: {err:#}"))
        })
    }
}
