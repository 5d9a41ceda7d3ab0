use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::input_config::InputConfig;
use crate::judge_config::JudgeConfig;
use crate::layout_config::LayoutConfig;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct Config {
    pub judge: JudgeConfig,
    pub layout: LayoutConfig,
    pub input: InputConfig,
}

impl Config {
    pub fn validate(&mut self) {
        self.judge.validate();
        self.layout.validate();
        self.input.validate();
    }

    /// Read config from a JSON file.
    pub fn read(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let mut config: Config = serde_json::from_str(&data)?;
        config.validate();
        Ok(config)
    }

    /// Write config to a JSON file.
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
