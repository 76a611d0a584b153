//! 内容树翻译库
//!
//! 提取站点内容 JSON 中的可翻译字符串、逐字段调用翻译服务（节流、单字段失败隔离），
//! 并按原结构回写出本地化内容

pub mod model;
pub mod service;
pub mod utils;
pub mod vm;

// 重新导出主要类型
pub use model::collector::{collect_fields, TranslatableField};
pub use model::content_node::{ContentMap, ContentNode, NodeKind};
pub use model::data_core::{ContentDocument, ContentError};
pub use model::field_path::{FieldPath, Segment};
pub use model::locale::Locale;
pub use model::progress::{FieldError, TranslationProgress};
pub use model::skip_set::SkipSet;
pub use model::writer::{value_at, write_at};
pub use service::config::TranslatorConfig;
pub use service::http::HttpTranslator;
pub use service::orchestrator::{CancelHandle, ContentTranslator, StopReason, TranslateOptions, TranslationOutcome};
pub use service::translator::{FnTranslator, TranslateError, Translator};
