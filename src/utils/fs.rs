//! IO helper: safe file read/write for content JSON

use std::{fs::File, io::BufReader, path::Path};

use crate::model::content_node::ContentNode;
use crate::model::data_core::ContentError;

/// 从文件读取内容树
pub fn read_content_file(p: &Path) -> Result<ContentNode, ContentError> {
    let f = File::open(p)?;
    let rdr = BufReader::new(f);
    let v: ContentNode = serde_json::from_reader(rdr)?;
    Ok(v)
}

/// 将内容树保存到文件（格式化输出，保留键顺序）
pub fn write_content_file(p: &Path, value: &ContentNode) -> Result<(), ContentError> {
    let f = File::create(p)?;
    serde_json::to_writer_pretty(f, value)?;
    Ok(())
}
