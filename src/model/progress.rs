//! 翻译进度：单次翻译运行独占的进度记录

use serde::Serialize;

/// 单个字段的翻译失败
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TranslationProgress {
    pub total: usize,
    pub completed: usize,
    pub current_path: String,
    pub errors: Vec<FieldError>,
}

impl TranslationProgress {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn is_finished(&self) -> bool {
        self.completed >= self.total
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// 完成比例，0.0 ~ 1.0；没有字段时视为已完成
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f32 / self.total as f32
        }
    }

    pub(crate) fn record_error(&mut self, path: String, error: String) {
        self.errors.push(FieldError { path, error });
    }
}
