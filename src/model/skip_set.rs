//! 跳过字段集合：结构性/技术性键名，其值永不送去翻译

use std::collections::HashSet;

/// 默认跳过的键名（标识符、枚举值、机器消费的值）
pub const DEFAULT_SKIP_FIELDS: &[&str] = &["level", "type", "slug", "url", "id", "icon", "date"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipSet {
    keys: HashSet<String>,
}

impl SkipSet {
    pub fn empty() -> Self {
        Self {
            keys: HashSet::new(),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn insert(&mut self, key: impl Into<String>) {
        self.keys.insert(key.into());
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl Default for SkipSet {
    fn default() -> Self {
        DEFAULT_SKIP_FIELDS.iter().copied().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for SkipSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}
