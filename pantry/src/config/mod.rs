mod keymap;
mod theme;

const DEFAULT_CONFIG_FOLDER: &str = ".config/pantry";
const DEFAULT_CACHE_FOLDER: &str = ".cache/pantry";
const APP_CONFIG_FILE: &str = "app.toml";
const THEME_CONFIG_FILE: &str = "theme.toml";
const KEYMAP_CONFIG_FILE: &str = "keymap.toml";

use anyhow::{anyhow, Result};
use config_parser2::{config_parser_impl, ConfigParse, ConfigParser};
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    sync::OnceLock,
    time::Duration,
};

pub use keymap::{Keymap, KeymapConfig};
pub use theme::{Theme, ThemeConfig};

use crate::view::SortMode;

static CONFIGS: OnceLock<Configs> = OnceLock::new();

#[derive(Debug)]
pub struct Configs {
    pub app_config: AppConfig,
    pub keymap_config: KeymapConfig,
    pub theme_config: ThemeConfig,
    pub cache_folder: PathBuf,
}

impl Configs {
    pub fn new(config_folder: &Path, cache_folder: &Path) -> Result<Self> {
        Ok(Self {
            app_config: AppConfig::new(config_folder)?,
            keymap_config: KeymapConfig::new(config_folder)?,
            theme_config: ThemeConfig::new(config_folder)?,
            cache_folder: cache_folder.to_path_buf(),
        })
    }
}

#[derive(Debug, Deserialize, Serialize, ConfigParse)]
/// Application configurations
pub struct AppConfig {
    /// catalog user whose public playlists are displayed
    pub user_id: String,

    /// URL of the playlist function
    pub function_url: String,
    /// key sent as the `apikey` and bearer authorization headers of function requests
    pub function_api_key: Option<String>,

    /// command used to open a player URL, defaults to the platform's opener
    pub open_command: Option<OpenCommand>,

    pub default_mode: SortMode,
    pub dark_mode: bool,

    // duration configs
    pub app_refresh_duration_in_ms: u64,
    pub stale_time_in_secs: u64,

    pub max_retries: usize,

    // layout configs
    pub border_type: BorderType,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum BorderType {
    Hidden,
    Plain,
    Rounded,
    Double,
    Thick,
}
config_parser_impl!(BorderType);
config_parser_impl!(SortMode);

#[derive(Debug, Deserialize, Serialize, ConfigParse, Clone)]
/// An external program that opens URLs, e.g. a browser
pub struct OpenCommand {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl OpenCommand {
    fn program(command: &str) -> Self {
        Self {
            command: command.to_string(),
            args: Vec::new(),
        }
    }

    /// opens `url`, failing with the program's stderr if it exits unsuccessfully
    pub fn open(&self, url: &str) -> Result<()> {
        let output = std::process::Command::new(&self.command)
            .args(&self.args)
            .arg(url)
            .output()?;

        if !output.status.success() {
            anyhow::bail!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            user_id: String::new(),

            function_url: "http://127.0.0.1:54321/spotify-playlists".to_string(),
            function_api_key: None,

            open_command: None,

            default_mode: SortMode::Carousel,
            dark_mode: true,

            app_refresh_duration_in_ms: 32,
            stale_time_in_secs: 5 * 60,

            max_retries: 2,

            border_type: BorderType::Rounded,
        }
    }
}

impl AppConfig {
    pub fn new(path: &Path) -> Result<Self> {
        let mut config = Self::default();
        if !config.parse_config_file(path)? {
            config.write_config_file(path)?;
        }

        Ok(config)
    }

    // parses configurations from an application config file in `path` folder,
    // then updates the current configurations accordingly.
    // returns false if no config file found and true otherwise
    fn parse_config_file(&mut self, path: &Path) -> Result<bool> {
        let file_path = path.join(APP_CONFIG_FILE);
        match std::fs::read_to_string(file_path) {
            Ok(content) => self
                .parse(toml::from_str::<toml::Value>(&content)?)
                .map(|()| true),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(error) => Err(error.into()),
        }
    }

    fn write_config_file(&self, path: &Path) -> Result<()> {
        toml::to_string_pretty(&self)
            .map_err(From::from)
            .and_then(|content| {
                std::fs::write(path.join(APP_CONFIG_FILE), content).map_err(From::from)
            })
    }

    pub fn stale_time(&self) -> Duration {
        Duration::from_secs(self.stale_time_in_secs)
    }

    pub fn app_refresh_duration(&self) -> Duration {
        Duration::from_millis(self.app_refresh_duration_in_ms)
    }

    /// the command to open a URL with: the configured `open_command`,
    /// or the platform's opener if it can be found in `PATH`
    pub fn opener(&self) -> Result<OpenCommand> {
        if let Some(cmd) = &self.open_command {
            return Ok(cmd.clone());
        }

        let candidates: &[&str] = if cfg!(target_os = "macos") {
            &["open"]
        } else if cfg!(target_os = "windows") {
            &["explorer"]
        } else {
            &["xdg-open", "wslview"]
        };
        candidates
            .iter()
            .find(|c| which::which(c).is_ok())
            .map(|c| OpenCommand::program(c))
            .ok_or_else(|| {
                anyhow!("no opener command found, please set `open_command` in {APP_CONFIG_FILE}")
            })
    }
}

/// gets the application's configuration folder path
pub fn get_config_folder_path() -> Result<PathBuf> {
    match dirs_next::home_dir() {
        Some(home) => Ok(home.join(DEFAULT_CONFIG_FOLDER)),
        None => Err(anyhow!("cannot find the $HOME folder")),
    }
}

/// gets the application's cache folder path
pub fn get_cache_folder_path() -> Result<PathBuf> {
    match dirs_next::home_dir() {
        Some(home) => Ok(home.join(DEFAULT_CACHE_FOLDER)),
        None => Err(anyhow!("cannot find the $HOME folder")),
    }
}

pub fn get_config() -> &'static Configs {
    CONFIGS.get().expect("configs is already initialized")
}

pub fn set_config(configs: Configs) {
    CONFIGS
        .set(configs)
        .expect("configs should be initialized only once");
}
