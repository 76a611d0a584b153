//! 内容树（Content Tree）：封闭的标签联合类型，替代无类型的 JSON 递归

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// 节点类型（与具体值解耦，用于形状比较与日志）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Map,
    List,
    String,
    Number,
    Bool,
    Null,
}

/// 内容树节点
///
/// 与 `serde_json::Value` 无损互转；序列化形式就是普通 JSON。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum ContentNode {
    String(String),
    Number(Number),
    Bool(bool),
    Null,
    List(Vec<ContentNode>),
    Map(ContentMap),
}

/// 保持插入顺序的键值表
///
/// 顺序只用于生成确定的字段路径，比较相等时不考虑顺序。
#[derive(Debug, Clone, Default)]
pub struct ContentMap {
    entries: IndexMap<String, ContentNode>,
}

impl ContentMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&ContentNode> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut ContentNode> {
        self.entries.get_mut(key)
    }

    /// 插入或替换；新键追加在末尾，已有键保持原位置
    pub fn insert(&mut self, key: impl Into<String>, value: ContentNode) -> Option<ContentNode> {
        self.entries.insert(key.into(), value)
    }

    /// 取得键对应的可变槽位，不存在时以 `Null` 占位插入
    pub fn entry_or_null(&mut self, key: &str) -> &mut ContentNode {
        self.entries.entry(key.to_string()).or_insert(ContentNode::Null)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContentNode)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }
}

impl PartialEq for ContentMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(k, v)| other.get(k).map_or(false, |o| o == v))
    }
}

impl FromIterator<(String, ContentNode)> for ContentMap {
    fn from_iter<I: IntoIterator<Item = (String, ContentNode)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl PartialEq for ContentNode {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ContentNode::String(a), ContentNode::String(b)) => a == b,
            (ContentNode::Number(a), ContentNode::Number(b)) => a == b,
            (ContentNode::Bool(a), ContentNode::Bool(b)) => a == b,
            (ContentNode::Null, ContentNode::Null) => true,
            (ContentNode::List(a), ContentNode::List(b)) => a == b,
            (ContentNode::Map(a), ContentNode::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl ContentNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            ContentNode::Map(_) => NodeKind::Map,
            ContentNode::List(_) => NodeKind::List,
            ContentNode::String(_) => NodeKind::String,
            ContentNode::Number(_) => NodeKind::Number,
            ContentNode::Bool(_) => NodeKind::Bool,
            ContentNode::Null => NodeKind::Null,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ContentNode::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&ContentMap> {
        match self {
            ContentNode::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ContentNode::Null)
    }

    /// 判断两棵树形状是否一致：相同的键集合、相同的数组长度、相同的叶子类型
    pub fn same_shape(&self, other: &ContentNode) -> bool {
        match (self, other) {
            (ContentNode::List(a), ContentNode::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_shape(y))
            }
            (ContentNode::Map(a), ContentNode::Map(b)) => {
                a.len() == b.len()
                    && a
                        .iter()
                        .all(|(k, v)| b.get(k).map_or(false, |o| v.same_shape(o)))
            }
            (a, b) => a.kind() == b.kind(),
        }
    }
}

impl From<Value> for ContentNode {
    fn from(v: Value) -> Self {
        match v {
            Value::String(s) => ContentNode::String(s),
            Value::Number(n) => ContentNode::Number(n),
            Value::Bool(b) => ContentNode::Bool(b),
            Value::Null => ContentNode::Null,
            Value::Array(arr) => ContentNode::List(arr.into_iter().map(ContentNode::from).collect()),
            Value::Object(obj) => ContentNode::Map(
                obj.into_iter()
                    .map(|(k, v)| (k, ContentNode::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<ContentNode> for Value {
    fn from(node: ContentNode) -> Self {
        match node {
            ContentNode::String(s) => Value::String(s),
            ContentNode::Number(n) => Value::Number(n),
            ContentNode::Bool(b) => Value::Bool(b),
            ContentNode::Null => Value::Null,
            ContentNode::List(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            ContentNode::Map(map) => Value::Object(
                map.entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for ContentNode {
    fn from(s: &str) -> Self {
        ContentNode::String(s.to_string())
    }
}

impl From<String> for ContentNode {
    fn from(s: String) -> Self {
        ContentNode::String(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_round_trip_keeps_key_order() {
        let value = json!({"zeta": 1, "alpha": {"b": "x", "a": [true, null, 2.5]}});
        let node = ContentNode::from(value.clone());

        let keys: Vec<&str> = node.as_map().unwrap().keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha"], "键顺序应与源文档一致");

        let back = Value::from(node);
        assert_eq!(back, value);
        assert_eq!(
            serde_json::to_string(&back).unwrap(),
            r#"{"zeta":1,"alpha":{"b":"x","a":[true,null,2.5]}}"#
        );
    }

    #[test]
    fn test_serde_as_plain_json() {
        let node: ContentNode = serde_json::from_str(r#"{"title": "Hi", "n": 3}"#).unwrap();
        assert_eq!(node.kind(), NodeKind::Map);
        assert_eq!(node.as_map().unwrap().get("title"), Some(&ContentNode::from("Hi")));

        let text = serde_json::to_string(&node).unwrap();
        assert_eq!(text, r#"{"title":"Hi","n":3}"#);
    }

    #[test]
    fn test_map_equality_ignores_order() {
        let a = ContentNode::from(json!({"a": 1, "b": "two"}));
        let b = ContentNode::from(json!({"b": "two", "a": 1}));
        let c = ContentNode::from(json!({"a": 1, "b": "three"}));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut map = ContentMap::new();
        map.insert("first", ContentNode::from("1"));
        map.insert("second", ContentNode::from("2"));
        let old = map.insert("first", ContentNode::from("uno"));

        assert_eq!(old, Some(ContentNode::from("1")));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["first", "second"]);
        assert_eq!(map.get("first").and_then(|n| n.as_str()), Some("uno"));
    }

    #[test]
    fn test_wide_map_conversion() {
        let wide: serde_json::Map<String, Value> = (0..50_000)
            .map(|i| (format!("key_{}", i), Value::String(format!("value {}", i))))
            .collect();
        let value = Value::Object(wide);

        let start = std::time::Instant::now();
        let node = ContentNode::from(value.clone());
        let copy = node.clone();
        assert_eq!(node, copy);
        // 线性复杂度下远低于该阈值
        assert!(start.elapsed() < std::time::Duration::from_secs(2));

        let map = node.as_map().unwrap();
        assert_eq!(map.len(), 50_000);
        assert_eq!(map.keys().nth(49_999), Some("key_49999"));
        assert_eq!(Value::from(node), value);
    }

    #[test]
    fn test_same_shape() {
        let a = ContentNode::from(json!({"t": "x", "l": [1, "y"], "m": {"k": null}}));
        let b = ContentNode::from(json!({"l": [7, "z"], "t": "other", "m": {"k": null}}));
        let shorter = ContentNode::from(json!({"t": "x", "l": [1], "m": {"k": null}}));
        let retyped = ContentNode::from(json!({"t": 1, "l": [1, "y"], "m": {"k": null}}));

        assert!(a.same_shape(&b));
        assert!(!a.same_shape(&shorter));
        assert!(!a.same_shape(&retyped));
    }
}
