use anyhow::Result;
use ratatui::{
    style::{self, Modifier, Style},
    text::Span,
};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
/// Application theme configurations, one theme for each of the dark and the light mode
pub struct ThemeConfig {
    pub dark: Theme,
    pub light: Theme,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Theme {
    pub palette: Palette,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,

    pub accent: Color,
    pub title: Color,
    pub highlight: Color,
    pub muted: Color,
    pub error: Color,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub color: style::Color,
}

impl<'de> serde::de::Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid color {hex}")))
    }
}

impl Color {
    /// parses a `#rrggbb` color
    fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self {
            color: style::Color::Rgb(channel(0)?, channel(2)?, channel(4)?),
        })
    }

    const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            color: style::Color::Rgb(r, g, b),
        }
    }
}

impl ThemeConfig {
    pub fn new(path: &std::path::Path) -> Result<Self> {
        let file_path = path.join(super::THEME_CONFIG_FILE);
        match std::fs::read_to_string(&file_path) {
            Ok(content) => Ok(toml::from_str::<Self>(&content)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No theme config file found at {}", file_path.display());
                Ok(Self::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    #[must_use]
    pub fn theme(&self, dark_mode: bool) -> &Theme {
        if dark_mode {
            &self.dark
        } else {
            &self.light
        }
    }
}

impl Theme {
    pub fn app_style(&self) -> Style {
        Style::default()
            .bg(self.palette.background.color)
            .fg(self.palette.foreground.color)
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.palette.title.color)
            .add_modifier(Modifier::BOLD)
    }

    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.palette.accent.color)
    }

    pub fn comment_style(&self) -> Style {
        Style::default().fg(self.palette.muted.color)
    }

    pub fn error_style(&self) -> Style {
        Style::default()
            .fg(self.palette.error.color)
            .add_modifier(Modifier::BOLD)
    }

    /// style of the item the user is acting on
    pub fn current_active_style(&self) -> Style {
        Style::default()
            .fg(self.palette.accent.color)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selection_style(&self) -> Style {
        Style::default()
            .bg(self.palette.selection_bg.color)
            .fg(self.palette.selection_fg.color)
            .add_modifier(Modifier::BOLD)
    }

    pub fn chip_style(&self, active: bool) -> Style {
        if active {
            Style::default()
                .bg(self.palette.accent.color)
                .fg(self.palette.background.color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.palette.highlight.color)
        }
    }

    pub fn block_title_with_style<'a, S>(&self, content: S) -> Span<'a>
    where
        S: Into<String>,
    {
        Span::styled(content.into(), self.title_style())
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            dark: Theme {
                palette: Palette {
                    background: Color::rgb(0x17, 0x17, 0x17),
                    foreground: Color::rgb(0xf5, 0xf5, 0xf5),
                    selection_bg: Color::rgb(0x26, 0x26, 0x26),
                    selection_fg: Color::rgb(0x86, 0xef, 0xac),
                    accent: Color::rgb(0x4a, 0xde, 0x80),
                    title: Color::rgb(0xfa, 0xfa, 0xfa),
                    highlight: Color::rgb(0xfd, 0xe0, 0x47),
                    muted: Color::rgb(0x73, 0x73, 0x73),
                    error: Color::rgb(0xf8, 0x71, 0x71),
                },
            },
            light: Theme {
                palette: Palette {
                    background: Color::rgb(0xfa, 0xfa, 0xf9),
                    foreground: Color::rgb(0x1c, 0x19, 0x17),
                    selection_bg: Color::rgb(0xe7, 0xe5, 0xe4),
                    selection_fg: Color::rgb(0x16, 0x65, 0x34),
                    accent: Color::rgb(0x16, 0xa3, 0x4a),
                    title: Color::rgb(0x0c, 0x0a, 0x09),
                    highlight: Color::rgb(0xb4, 0x53, 0x09),
                    muted: Color::rgb(0x78, 0x71, 0x6c),
                    error: Color::rgb(0xdc, 0x26, 0x26),
                },
            },
        }
    }
}
