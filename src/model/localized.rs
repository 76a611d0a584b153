//! 多语言列回退：`question_fr` → `question` → `question_en`
//!
//! 站点的 FAQ / 内容记录按语言分列存储，缺少目标语言或值为空时逐级回退。

use crate::model::content_node::{ContentMap, ContentNode};
use crate::model::locale::Locale;

/// 按优先级列出某字段在指定语言下的候选列名
pub fn localized_candidates(base: &str, locale: Locale) -> Vec<String> {
    let mut out = vec![format!("{}_{}", base, locale.code()), base.to_string()];
    if locale != Locale::En {
        out.push(format!("{}_{}", base, Locale::En.code()));
    }
    out
}

/// 取第一个存在且非空白的候选值
pub fn resolve_localized<'a>(row: &'a ContentNode, base: &str, locale: Locale) -> Option<&'a str> {
    let map = row.as_map()?;
    localized_candidates(base, locale).into_iter().find_map(|col| {
        map.get(&col)
            .and_then(|v| v.as_str())
            .filter(|s| !s.trim().is_empty())
    })
}

/// 将一条记录整理为只含基础列名的本地化记录；所有候选都缺失的字段不输出
pub fn localize_row(row: &ContentNode, fields: &[&str], locale: Locale) -> ContentMap {
    let mut out = ContentMap::new();
    for base in fields {
        match resolve_localized(row, base, locale) {
            Some(text) => {
                out.insert(*base, ContentNode::from(text));
            }
            None => tracing::debug!("字段 {} 在 {} 下无可用值", base, locale),
        }
    }
    out
}
