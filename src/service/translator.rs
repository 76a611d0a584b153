//! 翻译回调接口：(文本, 目标语言, 源语言) → 译文，可能失败

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::locale::Locale;

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("网络请求失败: {0}")]
    Http(#[from] reqwest::Error),
    #[error("翻译接口返回状态 {status}: {body}")]
    Status { status: u16, body: String },
    #[error("翻译响应格式错误: {0}")]
    BadResponse(String),
    #[error("翻译结果为空")]
    EmptyResponse,
    #[error("翻译超时（{0:?}）")]
    Timeout(Duration),
    #[error("{0}")]
    Other(String),
}

#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target: Locale, source: Locale) -> Result<String, TranslateError>;
}

#[async_trait]
impl<T: Translator + ?Sized> Translator for Arc<T> {
    async fn translate(&self, text: &str, target: Locale, source: Locale) -> Result<String, TranslateError> {
        (**self).translate(text, target, source).await
    }
}

/// 把同步闭包包装成翻译器（离线处理、测试替身）
pub struct FnTranslator<F> {
    f: F,
}

impl<F> FnTranslator<F>
where
    F: Fn(&str, Locale, Locale) -> Result<String, TranslateError> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F> Translator for FnTranslator<F>
where
    F: Fn(&str, Locale, Locale) -> Result<String, TranslateError> + Send + Sync,
{
    async fn translate(&self, text: &str, target: Locale, source: Locale) -> Result<String, TranslateError> {
        (self.f)(text, target, source)
    }
}
