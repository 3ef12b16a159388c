use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    pub calendar: Option<CalendarConfig>,
}

#[derive(Debug, Deserialize)]
pub struct CalendarConfig {
    /// Rows per hour on the day timeline at zoom 1.0.
    pub hour_height:     Option<f32>,
    /// How far down the viewport auto-scroll places its target.
    pub center_fraction: Option<f32>,
    pub cache_capacity:  Option<usize>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let path = config_dir().join("config.toml");
        if path.exists() {
            Ok(toml::from_str(&std::fs::read_to_string(&path)?)?)
        } else {
            Ok(AppConfig::default())
        }
    }

    pub fn hour_height(&self) -> f32 {
        self.calendar
            .as_ref()
            .and_then(|c| c.hour_height)
            .unwrap_or(2.0)
    }

    pub fn center_fraction(&self) -> f32 {
        self.calendar
            .as_ref()
            .and_then(|c| c.center_fraction)
            .unwrap_or(1.0 / 3.0)
    }

    pub fn cache_capacity(&self) -> usize {
        self.calendar
            .as_ref()
            .and_then(|c| c.cache_capacity)
            .unwrap_or(crate::calendar::cache::DEFAULT_CAPACITY)
    }
}

fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("onestep")
}
