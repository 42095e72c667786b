mod data;
mod model;
mod ui;

pub use data::*;
pub use model::*;
pub use ui::*;

use crate::config;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

pub type SharedState = Arc<State>;

/// Application's state
#[derive(Debug)]
pub struct State {
    pub data: RwLock<AppData>,
    pub ui: Mutex<UIState>,
}

impl State {
    pub fn new(app_config: &config::AppConfig) -> Self {
        Self {
            data: RwLock::new(AppData::default()),
            ui: Mutex::new(UIState::new(app_config.default_mode, app_config.dark_mode)),
        }
    }
}
