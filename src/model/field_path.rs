//! 字段路径：`hero.title`、`items[2].description` 形式的寻址

use std::fmt;
use std::str::FromStr;

use crate::model::data_core::ContentError;

/// 路径段：键名或数组下标
///
/// 段类型由字段收集阶段直接记录，回写时无需再从字符串推断容器类型。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Key(String),
    Index(usize),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn child_key(&self, key: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Key(key.to_string()));
        Self { segments }
    }

    pub fn child_index(&self, idx: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Index(idx));
        Self { segments }
    }

    /// 最后一个键名段（忽略末尾的下标段），`tags[1]` → `tags`
    pub fn leaf_key(&self) -> Option<&str> {
        self.segments.iter().rev().find_map(|s| match s {
            Segment::Key(k) => Some(k.as_str()),
            Segment::Index(_) => None,
        })
    }
}

impl From<Vec<Segment>> for FieldPath {
    fn from(segments: Vec<Segment>) -> Self {
        Self { segments }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            match seg {
                Segment::Key(k) if i == 0 => write!(f, "{}", k)?,
                Segment::Key(k) => write!(f, ".{}", k)?,
                Segment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

impl FromStr for FieldPath {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ContentError::EmptyPath);
        }
        let malformed = |reason: &str| ContentError::MalformedPath {
            path: s.to_string(),
            reason: reason.to_string(),
        };

        let mut segments = Vec::new();
        let mut key = String::new();
        // 上一段是否以 `]` 结束（此后只允许 `.` 或 `[`）
        let mut after_index = false;
        let mut chars = s.chars().peekable();

        while let Some(ch) = chars.next() {
            match ch {
                '.' => {
                    if key.is_empty() && !after_index {
                        return Err(malformed("键名为空"));
                    }
                    if !key.is_empty() {
                        segments.push(Segment::Key(std::mem::take(&mut key)));
                    }
                    after_index = false;
                    match chars.peek() {
                        None => return Err(malformed("路径以 '.' 结尾")),
                        Some('[') => return Err(malformed("'.' 与 '[' 之间键名为空")),
                        Some(_) => {}
                    }
                }
                '[' => {
                    if !key.is_empty() {
                        segments.push(Segment::Key(std::mem::take(&mut key)));
                    }
                    let mut digits = String::new();
                    loop {
                        match chars.next() {
                            Some(']') => break,
                            Some(d) if d.is_ascii_digit() => digits.push(d),
                            Some(_) => return Err(malformed("下标必须是数字")),
                            None => return Err(malformed("缺少 ']'")),
                        }
                    }
                    let idx = digits
                        .parse::<usize>()
                        .map_err(|_| malformed("下标为空或越界"))?;
                    segments.push(Segment::Index(idx));
                    after_index = true;
                }
                ']' => return Err(malformed("多余的 ']'")),
                c => {
                    if after_index {
                        return Err(malformed("下标后缺少 '.'"));
                    }
                    key.push(c);
                }
            }
        }
        if !key.is_empty() {
            segments.push(Segment::Key(key));
        }
        Ok(Self { segments })
    }
}
