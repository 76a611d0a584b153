//! 按路径回写：沿路径创建缺失的中间容器并写入叶子值

use crate::model::content_node::{ContentMap, ContentNode};
use crate::model::data_core::ContentError;
use crate::model::field_path::{FieldPath, Segment};

/// 按路径读取节点
pub fn value_at<'a>(root: &'a ContentNode, path: &FieldPath) -> Option<&'a ContentNode> {
    let mut cur = root;
    for seg in path.segments() {
        cur = match (seg, cur) {
            (Segment::Key(k), ContentNode::Map(map)) => map.get(k)?,
            (Segment::Index(i), ContentNode::List(items)) => items.get(*i)?,
            _ => return None,
        };
    }
    Some(cur)
}

/// 数组一次最多补齐的 `Null` 占位数
pub const MAX_LIST_PADDING: usize = 4096;

/// 在 `target` 中按路径写入 `value`
///
/// 中间段缺失（或为 `Null`）时按下一段的类型创建容器：下标段建数组，键名段建对象；
/// 数组不足长度时以 `Null` 补齐，补齐数超过 [`MAX_LIST_PADDING`] 时报错。空路径表示替换整棵树。
/// 已存在的标量或类型不符的容器挡在路径上时直接报错，不会悄悄改写结构。
pub fn write_at(target: &mut ContentNode, path: &FieldPath, value: ContentNode) -> Result<(), ContentError> {
    let segments = path.segments();
    let mut cur = target;

    for (depth, seg) in segments.iter().enumerate() {
        if cur.is_null() {
            *cur = match seg {
                Segment::Key(_) => ContentNode::Map(ContentMap::new()),
                Segment::Index(_) => ContentNode::List(Vec::new()),
            };
        }
        cur = match (seg, cur) {
            (Segment::Key(k), ContentNode::Map(map)) => map.entry_or_null(k),
            (Segment::Index(i), ContentNode::List(items)) => {
                if items.len() <= *i {
                    let new_len = i
                        .checked_add(1)
                        .filter(|n| n - items.len() <= MAX_LIST_PADDING);
                    let Some(new_len) = new_len else {
                        let prefix: FieldPath = segments[..=depth].to_vec().into();
                        return Err(ContentError::IndexOutOfRange {
                            path: prefix.to_string(),
                            index: *i,
                            len: items.len(),
                        });
                    };
                    items.resize(new_len, ContentNode::Null);
                }
                &mut items[*i]
            }
            (seg, other) => {
                let prefix: FieldPath = segments[..=depth].to_vec().into();
                return Err(ContentError::ShapeConflict {
                    path: prefix.to_string(),
                    expected: match seg {
                        Segment::Key(_) => "对象",
                        Segment::Index(_) => "数组",
                    },
                    found: other.kind(),
                });
            }
        };
    }

    *cur = value;
    Ok(())
}
