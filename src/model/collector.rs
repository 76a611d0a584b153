//! 字段收集：将内容树展平为有序的 (路径, 文本) 列表，只保留可翻译的字符串叶子

use crate::model::content_node::ContentNode;
use crate::model::field_path::FieldPath;
use crate::model::skip_set::SkipSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatableField {
    pub path: FieldPath,
    pub text: String,
}

/// 深度优先、按插入顺序收集可翻译字段
///
/// 对象中命中跳过集合的键在递归前就被排除，其子树不会产生任何路径；
/// 字符串叶子再按最后一个键名（去掉下标）检查一次。数字、布尔、空值不产出。
pub fn collect_fields(root: &ContentNode, skip: &SkipSet) -> Vec<TranslatableField> {
    let mut out = Vec::new();
    walk(&mut out, root, FieldPath::root(), skip);
    out
}

fn walk(out: &mut Vec<TranslatableField>, node: &ContentNode, path: FieldPath, skip: &SkipSet) {
    match node {
        ContentNode::String(text) => {
            if path.leaf_key().map_or(false, |k| skip.contains(k)) {
                return;
            }
            out.push(TranslatableField {
                path,
                text: text.clone(),
            });
        }
        ContentNode::List(items) => {
            for (idx, child) in items.iter().enumerate() {
                walk(out, child, path.child_index(idx), skip);
            }
        }
        ContentNode::Map(map) => {
            for (key, child) in map.iter() {
                if skip.contains(key) {
                    continue;
                }
                walk(out, child, path.child_key(key), skip);
            }
        }
        ContentNode::Number(_) | ContentNode::Bool(_) | ContentNode::Null => {}
    }
}
