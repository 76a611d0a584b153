//! ContentDocument：内容文档的加载、读写与错误类型

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::collector::{collect_fields, TranslatableField};
use crate::model::content_node::ContentNode;
use crate::model::field_path::FieldPath;
use crate::model::skip_set::SkipSet;
use crate::model::writer::{value_at, write_at};
use crate::utils::fs::{read_content_file, write_content_file};

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO失败: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON解析失败: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("字段路径为空")]
    EmptyPath,
    #[error("字段路径格式错误 '{path}': {reason}")]
    MalformedPath { path: String, reason: String },
    #[error("路径 '{path}' 与现有结构冲突: 期望{expected}，实际为{found:?}")]
    ShapeConflict {
        path: String,
        expected: &'static str,
        found: crate::model::content_node::NodeKind,
    },
    #[error("路径 '{path}' 下标 {index} 超出可补齐范围（当前长度 {len}）")]
    IndexOutOfRange { path: String, index: usize, len: usize },
    #[error("请求无效: {0}")]
    InvalidRequest(String),
    #[error("配置错误: {0}")]
    Config(String),
    #[error("状态错误: {0}")]
    State(String),
}

/// 一份内容文档（站点内容 JSON）
#[derive(Debug, Default)]
pub struct ContentDocument {
    pub source_path: Option<PathBuf>,
    pub content: Option<ContentNode>,
}

impl ContentDocument {
    pub fn from_content(content: ContentNode) -> Self {
        Self {
            source_path: None,
            content: Some(content),
        }
    }

    /// 从文件加载内容树
    pub fn load_file(&mut self, p: &Path) -> Result<(), ContentError> {
        let content = read_content_file(p)?;
        self.source_path = Some(p.to_path_buf());
        self.content = Some(content);
        tracing::debug!("已加载内容文档: {}", p.display());
        Ok(())
    }

    pub fn content(&self) -> Result<&ContentNode, ContentError> {
        self.content
            .as_ref()
            .ok_or_else(|| ContentError::State("内容尚未加载".into()))
    }

    /// 按路径读取节点
    pub fn get(&self, path: &str) -> Result<Option<&ContentNode>, ContentError> {
        let path: FieldPath = path.parse()?;
        Ok(value_at(self.content()?, &path))
    }

    /// 按路径写入节点，缺失的中间容器按路径自动创建
    pub fn set(&mut self, path: &str, value: ContentNode) -> Result<(), ContentError> {
        let path: FieldPath = path.parse()?;
        let content = self.content.get_or_insert(ContentNode::Null);
        write_at(content, &path, value)
    }

    /// 列出全部可翻译字段
    pub fn translatable_fields(&self, skip: &SkipSet) -> Result<Vec<TranslatableField>, ContentError> {
        Ok(collect_fields(self.content()?, skip))
    }

    /// 将当前内容保存到指定路径
    pub fn save_to_file(&self, path: &Path) -> Result<(), ContentError> {
        write_content_file(path, self.content()?)?;
        tracing::info!("内容文档已保存到: {}", path.display());
        Ok(())
    }

    /// 保存回原始文件
    pub fn save_to_original_file(&self) -> Result<(), ContentError> {
        let original = self
            .source_path
            .as_ref()
            .ok_or_else(|| ContentError::State("原始文件路径未设置".into()))?;
        self.save_to_file(original)
    }
}
