//! 翻译配置：TOML 文件 + `CONTENT_FANYI_*` 环境变量覆盖

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::model::data_core::ContentError;
use crate::model::locale::Locale;
use crate::model::skip_set::{SkipSet, DEFAULT_SKIP_FIELDS};
use crate::service::orchestrator::TranslateOptions;

/// 配置常量
pub mod constants {
    pub const DEFAULT_PACE_MS: u64 = 100;
    pub const DEFAULT_CALL_TIMEOUT_MS: u64 = 15_000;
    pub const ENV_PREFIX: &str = "CONTENT_FANYI_";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    pub source_locale: Locale,
    pub target_locale: Locale,
    pub skip_fields: Vec<String>,
    /// 相邻两次远程调用之间的间隔
    pub pace_ms: u64,
    pub call_timeout_ms: u64,
    /// 整次运行的截止时间，不设则不限
    pub deadline_ms: Option<u64>,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            source_locale: Locale::En,
            target_locale: Locale::Fr,
            skip_fields: DEFAULT_SKIP_FIELDS.iter().map(|s| s.to_string()).collect(),
            pace_ms: constants::DEFAULT_PACE_MS,
            call_timeout_ms: constants::DEFAULT_CALL_TIMEOUT_MS,
            deadline_ms: None,
            endpoint: None,
            api_key: None,
        }
    }
}

impl TranslatorConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ContentError> {
        toml::from_str(s).map_err(|e| ContentError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let text = std::fs::read_to_string(path)?;
        let cfg = Self::from_toml_str(&text)?;
        tracing::info!("已加载配置文件: {}", path.display());
        Ok(cfg)
    }

    /// 用进程环境变量覆盖
    pub fn apply_env(&mut self) -> Result<(), ContentError> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// 用给定的查找函数覆盖（`SOURCE`、`TARGET`、`SKIP`、`PACE_MS`、`CALL_TIMEOUT_MS`、
    /// `DEADLINE_MS`、`ENDPOINT`、`API_KEY`，均带 `CONTENT_FANYI_` 前缀）
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<(), ContentError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(&format!("{}{}", constants::ENV_PREFIX, name)).filter(|v| !v.trim().is_empty())
        };
        let parse_ms = |name: &str, raw: String| {
            raw.trim()
                .parse::<u64>()
                .map_err(|_| ContentError::Config(format!("{}{} 不是有效的毫秒数: {}", constants::ENV_PREFIX, name, raw)))
        };

        if let Some(v) = get("SOURCE") {
            self.source_locale = v.parse()?;
        }
        if let Some(v) = get("TARGET") {
            self.target_locale = v.parse()?;
        }
        if let Some(v) = get("SKIP") {
            self.skip_fields = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Some(v) = get("PACE_MS") {
            self.pace_ms = parse_ms("PACE_MS", v)?;
        }
        if let Some(v) = get("CALL_TIMEOUT_MS") {
            self.call_timeout_ms = parse_ms("CALL_TIMEOUT_MS", v)?;
        }
        if let Some(v) = get("DEADLINE_MS") {
            self.deadline_ms = Some(parse_ms("DEADLINE_MS", v)?);
        }
        if let Some(v) = get("ENDPOINT") {
            self.endpoint = Some(v);
        }
        if let Some(v) = get("API_KEY") {
            self.api_key = Some(v);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ContentError> {
        if self.source_locale == self.target_locale {
            return Err(ContentError::Config(format!(
                "源语言与目标语言相同: {}",
                self.source_locale
            )));
        }
        if self.call_timeout_ms == 0 {
            return Err(ContentError::Config("call_timeout_ms 必须大于 0".into()));
        }
        Ok(())
    }

    pub fn skip_set(&self) -> SkipSet {
        self.skip_fields.iter().cloned().collect()
    }

    pub fn options(&self) -> TranslateOptions {
        TranslateOptions {
            skip: self.skip_set(),
            pace: Duration::from_millis(self.pace_ms),
            call_timeout: Duration::from_millis(self.call_timeout_ms),
            deadline: self.deadline_ms.map(Duration::from_millis),
        }
    }
}
