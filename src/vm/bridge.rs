//! 状态桥接层：把翻译进度整理成面向用户的状态文本

use crate::model::progress::TranslationProgress;
use crate::service::orchestrator::{StopReason, TranslationOutcome};

// === 常量定义（消除魔法值） ===
pub const STATUS_LOADED: &str = "Content loaded";
pub const STATUS_SAVED: &str = "Translated content saved";
pub const STATUS_CANCELLED: &str = "Translation cancelled; remaining fields kept the original text";
pub const STATUS_DEADLINE: &str = "Translation deadline reached; remaining fields kept the original text";

/// 单行进度：`[3/10 30%] hero.title`
pub fn progress_line(progress: &TranslationProgress) -> String {
    format!(
        "[{}/{} {:.0}%] {}",
        progress.completed,
        progress.total,
        progress.fraction() * 100.0,
        progress.current_path
    )
}

/// 部分失败时给出非阻塞的警告文本
pub fn summarize(progress: &TranslationProgress) -> String {
    let failed = progress.errors.len();
    if failed == 0 {
        format!("All {} fields translated", progress.total)
    } else if failed == progress.total {
        format!(
            "None of the {} fields could be translated; the content was left in the original language",
            progress.total
        )
    } else {
        format!(
            "{} of {} fields failed to translate and were left in the original language",
            failed, progress.total
        )
    }
}

pub fn outcome_status(outcome: &TranslationOutcome) -> String {
    match outcome.stopped {
        Some(StopReason::Cancelled) => STATUS_CANCELLED.to_string(),
        Some(StopReason::DeadlineExceeded) => STATUS_DEADLINE.to_string(),
        None => summarize(&outcome.progress),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::content_node::ContentNode;

    fn progress(total: usize, failed: usize) -> TranslationProgress {
        let mut p = TranslationProgress::new(total);
        p.completed = total;
        for i in 0..failed {
            p.record_error(format!("items[{}]", i), "boom".into());
        }
        p
    }

    #[test]
    fn test_summaries() {
        assert_eq!(summarize(&progress(340, 0)), "All 340 fields translated");
        assert_eq!(
            summarize(&progress(340, 12)),
            "12 of 340 fields failed to translate and were left in the original language"
        );
        assert!(summarize(&progress(3, 3)).starts_with("None of the 3 fields"));
    }

    #[test]
    fn test_progress_line() {
        let mut p = TranslationProgress::new(10);
        p.completed = 2;
        p.current_path = "hero.title".into();
        assert_eq!(progress_line(&p), "[2/10 20%] hero.title");

        let done = TranslationProgress::new(0);
        assert_eq!(progress_line(&done), "[0/0 100%] ");
    }

    #[test]
    fn test_outcome_status_prefers_stop_reason() {
        let outcome = TranslationOutcome {
            tree: ContentNode::Null,
            progress: progress(2, 0),
            stopped: Some(StopReason::Cancelled),
        };
        assert_eq!(outcome_status(&outcome), STATUS_CANCELLED);
    }
}
