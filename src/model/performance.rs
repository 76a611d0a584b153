//! 性能基准测试模块
//!
//! 用于测试大型内容树的字段收集与按路径回写的性能

use std::time::Instant;

use serde_json::json;

use crate::model::collector::collect_fields;
use crate::model::content_node::{ContentMap, ContentNode};
use crate::model::skip_set::SkipSet;
use crate::model::writer::write_at;

/// 性能测试结果
#[derive(Debug)]
pub struct PerformanceResult {
    pub operation: String,
    pub duration_ms: u128,
    pub success: bool,
    pub details: String,
}

impl PerformanceResult {
    pub fn new(operation: &str, duration_ms: u128, success: bool, details: &str) -> Self {
        Self {
            operation: operation.to_string(),
            duration_ms,
            success,
            details: details.to_string(),
        }
    }
}

/// 生成大型站点内容树：嵌套的栏目、带跳过字段的条目列表
pub fn generate_large_content(depth: usize, width: usize) -> ContentNode {
    fn create_section(current_depth: usize, max_depth: usize, width: usize) -> ContentNode {
        if current_depth >= max_depth {
            return ContentNode::from("Leaf paragraph");
        }

        let mut map = ContentMap::new();
        for i in 0..width {
            let key = format!("field_{}", i);
            let value = match i % 5 {
                0 => ContentNode::from(format!("Section text {}", i)),
                1 => ContentNode::from(json!(i)),
                2 => ContentNode::from(json!({"slug": format!("section-{}", i), "title": "Title"})),
                3 => ContentNode::from(json!(["first point", "second point", i])),
                _ => create_section(current_depth + 1, max_depth, (width / 2).max(1)),
            };
            map.insert(key, value);
        }
        ContentNode::Map(map)
    }

    let items: Vec<ContentNode> = (0..width * 10)
        .map(|i| {
            ContentNode::from(json!({
                "id": i,
                "name": format!("Course {}", i),
                "level": "Beginner",
                "description": "Understand risk before you trade."
            }))
        })
        .collect();

    let mut root = ContentMap::new();
    root.insert(
        "meta",
        ContentNode::from(json!({"date": "2025-01-09", "title": "Benchmark content"})),
    );
    root.insert("sections", create_section(0, depth, width));
    root.insert("courses", ContentNode::List(items));
    ContentNode::Map(root)
}

/// 测试字段收集性能
pub fn benchmark_collect(content: &ContentNode, skip: &SkipSet) -> PerformanceResult {
    let start = Instant::now();
    let fields = collect_fields(content, skip);
    let duration = start.elapsed();

    PerformanceResult::new(
        "字段收集",
        duration.as_millis(),
        !fields.is_empty(),
        &format!("收集了 {} 个字段", fields.len()),
    )
}

/// 测试按路径回写性能：以空树为底稿重建全部可翻译字段
pub fn benchmark_reassemble(content: &ContentNode, skip: &SkipSet) -> PerformanceResult {
    let fields = collect_fields(content, skip);
    let start = Instant::now();
    let mut out = ContentNode::Null;
    let mut result = Ok(());
    for field in &fields {
        result = write_at(&mut out, &field.path, ContentNode::String(field.text.clone()));
        if result.is_err() {
            break;
        }
    }
    let duration = start.elapsed();

    match result {
        Ok(()) => PerformanceResult::new(
            "路径回写",
            duration.as_millis(),
            true,
            &format!("回写了 {} 个字段", fields.len()),
        ),
        Err(e) => PerformanceResult::new("路径回写", duration.as_millis(), false, &format!("回写失败: {}", e)),
    }
}

/// 运行综合性能测试
pub fn run_performance_suite() -> Vec<PerformanceResult> {
    let mut results = Vec::new();
    let skip = SkipSet::default();

    let test_cases = [
        (3, 10), // 小型：深度3，宽度10
        (4, 20), // 中型：深度4，宽度20
        (5, 30), // 大型：深度5，宽度30
    ];

    for (depth, width) in test_cases {
        tracing::info!("测试规模：深度{}，宽度{}", depth, width);

        let start = Instant::now();
        let content = generate_large_content(depth, width);
        results.push(PerformanceResult::new(
            &format!("数据生成({}x{})", depth, width),
            start.elapsed().as_millis(),
            true,
            &format!("生成了深度{}宽度{}的内容树", depth, width),
        ));

        results.push(benchmark_collect(&content, &skip));
        results.push(benchmark_reassemble(&content, &skip));
    }

    results
}
