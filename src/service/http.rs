//! HTTP 翻译器：向边缘函数风格的接口提交 `{text, targetLang, sourceLang}`

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::model::data_core::ContentError;
use crate::model::locale::Locale;
use crate::service::config::TranslatorConfig;
use crate::service::translator::{TranslateError, Translator};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TranslateRequestBody<'a> {
    text: &'a str,
    target_lang: Locale,
    source_lang: Locale,
}

pub struct HttpTranslator {
    http: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpTranslator {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>, call_timeout: Duration) -> Result<Self, TranslateError> {
        let http = Client::builder()
            .user_agent(concat!("content_fanyi/", env!("CARGO_PKG_VERSION")))
            .timeout(call_timeout)
            .build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            api_key,
        })
    }

    pub fn from_config(cfg: &TranslatorConfig) -> Result<Self, ContentError> {
        let endpoint = cfg
            .endpoint
            .clone()
            .ok_or_else(|| ContentError::Config("未配置翻译接口地址 endpoint".into()))?;
        Self::new(
            endpoint,
            cfg.api_key.clone(),
            Duration::from_millis(cfg.call_timeout_ms),
        )
        .map_err(|e| ContentError::Config(e.to_string()))
    }
}

/// 从响应体取出译文：`translatedText`、`translation` 或 `data.translatedText`
pub(crate) fn parse_translation(body: &Value) -> Result<String, TranslateError> {
    if let Some(err) = body.get("error").and_then(|v| v.as_str()) {
        return Err(TranslateError::BadResponse(err.to_string()));
    }
    body.get("translatedText")
        .or_else(|| body.get("translation"))
        .or_else(|| body.get("data").and_then(|d| d.get("translatedText")))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| TranslateError::BadResponse("缺少 translatedText 字段".into()))
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(&self, text: &str, target: Locale, source: Locale) -> Result<String, TranslateError> {
        let mut req = self.http.post(&self.endpoint).json(&TranslateRequestBody {
            text,
            target_lang: target,
            source_lang: source,
        });
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TranslateError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let body: Value = resp.json().await?;
        parse_translation(&body)
    }
}
