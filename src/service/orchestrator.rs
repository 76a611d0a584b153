//! 翻译编排：收集字段 → 逐字段调用翻译器（节流、单字段失败隔离）→ 按路径回写

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{sleep, timeout, Instant};

use crate::model::collector::{collect_fields, TranslatableField};
use crate::model::content_node::ContentNode;
use crate::model::data_core::ContentError;
use crate::model::locale::Locale;
use crate::model::progress::TranslationProgress;
use crate::model::skip_set::SkipSet;
use crate::model::writer::write_at;
use crate::service::config::constants;
use crate::service::translator::{TranslateError, Translator};

#[derive(Debug, Clone)]
pub struct TranslateOptions {
    pub skip: SkipSet,
    /// 相邻两次远程调用之间的固定间隔
    pub pace: Duration,
    pub call_timeout: Duration,
    pub deadline: Option<Duration>,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            skip: SkipSet::default(),
            pace: Duration::from_millis(constants::DEFAULT_PACE_MS),
            call_timeout: Duration::from_millis(constants::DEFAULT_CALL_TIMEOUT_MS),
            deadline: None,
        }
    }
}

/// 协作式取消标记，每个字段开始前检查一次
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Cancelled,
    DeadlineExceeded,
}

#[derive(Debug, Clone)]
pub struct TranslationOutcome {
    /// 与输入形状一致的译文树
    pub tree: ContentNode,
    pub progress: TranslationProgress,
    /// 提前停止的原因；未处理的字段保留原文
    pub stopped: Option<StopReason>,
}

impl TranslationOutcome {
    pub fn is_complete(&self) -> bool {
        self.stopped.is_none() && self.progress.is_finished()
    }
}

pub struct ContentTranslator<T> {
    translator: T,
    options: TranslateOptions,
}

impl<T: Translator> ContentTranslator<T> {
    pub fn new(translator: T, options: TranslateOptions) -> Self {
        Self { translator, options }
    }

    pub fn options(&self) -> &TranslateOptions {
        &self.options
    }

    /// 翻译整棵内容树
    ///
    /// 翻译器的任何失败都只记入 `progress.errors` 并保留原文，不会让调用失败。
    /// 进度回调在每个字段尝试之前调用一次，全部结束后再以 `completed == total` 调用一次。
    pub async fn translate_object<F>(
        &self,
        source: &ContentNode,
        target: Locale,
        source_locale: Locale,
        on_progress: F,
    ) -> Result<TranslationOutcome, ContentError>
    where
        F: FnMut(&TranslationProgress),
    {
        self.translate_object_with_cancel(source, target, source_locale, on_progress, &CancelHandle::new())
            .await
    }

    pub async fn translate_object_with_cancel<F>(
        &self,
        source: &ContentNode,
        target: Locale,
        source_locale: Locale,
        mut on_progress: F,
        cancel: &CancelHandle,
    ) -> Result<TranslationOutcome, ContentError>
    where
        F: FnMut(&TranslationProgress),
    {
        if target == source_locale {
            return Err(ContentError::InvalidRequest(format!(
                "源语言与目标语言相同: {}",
                target
            )));
        }

        let fields = collect_fields(source, &self.options.skip);
        let mut progress = TranslationProgress::new(fields.len());
        // 以源树为底稿，跳过的字段与非字符串叶子原样保留
        let mut tree = source.clone();
        let mut stopped = None;
        let mut called_remote = false;
        let started = Instant::now();

        tracing::info!(
            "开始翻译: {} 个字段, {} → {}",
            fields.len(),
            source_locale,
            target
        );

        for TranslatableField { path, text } in fields {
            if cancel.is_cancelled() {
                tracing::warn!("翻译已取消，剩余 {} 个字段保留原文", progress.total - progress.completed);
                stopped = Some(StopReason::Cancelled);
                break;
            }
            if self.options.deadline.map_or(false, |d| started.elapsed() >= d) {
                tracing::warn!("翻译超过整体截止时间，剩余 {} 个字段保留原文", progress.total - progress.completed);
                stopped = Some(StopReason::DeadlineExceeded);
                break;
            }

            let path_str = path.to_string();
            progress.current_path = path_str.clone();
            on_progress(&progress);

            if text.trim().is_empty() {
                write_at(&mut tree, &path, ContentNode::String(text))?;
                progress.completed += 1;
                continue;
            }

            if called_remote && !self.options.pace.is_zero() {
                sleep(self.options.pace).await;
            }
            called_remote = true;

            let result = self.translate_one(&text, target, source_locale).await;
            let value = match result {
                Ok(translated) => translated,
                Err(e) => {
                    tracing::warn!("字段 {} 翻译失败，保留原文: {}", path_str, e);
                    progress.record_error(path_str, e.to_string());
                    text
                }
            };
            write_at(&mut tree, &path, ContentNode::String(value))?;
            progress.completed += 1;
        }

        on_progress(&progress);

        if progress.has_errors() {
            tracing::warn!(
                "翻译完成: {}/{} 个字段, {} 个失败",
                progress.completed,
                progress.total,
                progress.errors.len()
            );
        } else {
            tracing::info!("翻译完成: {}/{} 个字段", progress.completed, progress.total);
        }

        Ok(TranslationOutcome {
            tree,
            progress,
            stopped,
        })
    }

    /// 单次远程调用，带超时；非空原文得到空白译文也算失败
    async fn translate_one(&self, text: &str, target: Locale, source: Locale) -> Result<String, TranslateError> {
        let translated = timeout(self.options.call_timeout, self.translator.translate(text, target, source))
            .await
            .map_err(|_| TranslateError::Timeout(self.options.call_timeout))??;
        if translated.trim().is_empty() {
            return Err(TranslateError::EmptyResponse);
        }
        Ok(translated)
    }
}
