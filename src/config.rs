use std::{fs, path::Path};

use serde::Deserialize;

use crate::{Result, convert::Layout, error::CanvasflowError};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// canvas layout config
    #[serde(default)]
    pub layout: LayoutConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    /// horizontal gap between a parent and its children
    pub x_gap: f64,
    /// vertical gap between sibling rows
    pub y_gap: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self { x_gap: 200.0, y_gap: 150.0 }
    }
}

impl Config {
    pub fn create<T: AsRef<Path>>(path: T) -> Result<Self> {
        let data = fs::read_to_string(path.as_ref())?;
        Self::load_from_str(data.as_str())
    }

    pub fn load_from_str(toml_str: &str) -> Result<Self> {
        toml::from_str::<Config>(toml_str).map_err(|e| CanvasflowError::Config(e.to_string()))
    }

    /// layout gaps for the serializer
    pub fn layout(&self) -> Layout {
        Layout {
            x_gap: self.layout.x_gap,
            y_gap: self.layout.y_gap,
        }
    }
}
