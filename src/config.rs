// ============================================
// src/config.rs
// 設定ファイル (config.toml) の読み込み
// ============================================

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::Deserialize;

use crate::lang::Lang;
use crate::tracker::DEFAULT_INTERVIEW_PROBABILITY;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 起動時の表示言語
    pub language: Lang,
    /// 保存先 (未指定なら OS 標準のデータディレクトリ)
    pub data_dir: Option<PathBuf>,
    pub interview_probability: f64,
    /// 乱数のシード (指定すると毎回同じ結果になる)
    pub seed: Option<u64>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: Lang::En,
            data_dir: None,
            interview_probability: DEFAULT_INTERVIEW_PROBABILITY,
            seed: None,
            log_level: String::from("info"),
        }
    }
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("jp", "jobwiz", "JOB_WIZ").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// 指定パスから読む。ファイルが無ければデフォルト
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("invalid config: {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let config: Config = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.interview_probability) {
            bail!(
                "interview_probability must be between 0 and 1, got {}",
                self.interview_probability
            );
        }
        Ok(())
    }
}
