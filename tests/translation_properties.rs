//! 端到端性质：形状保持、跳过字段不变、失败回退、进度单调

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use content_fanyi::{
    collect_fields, value_at, ContentDocument, ContentNode, ContentTranslator, FieldPath, FnTranslator, Locale, SkipSet,
    TranslateError, TranslateOptions, TranslationProgress,
};
use serde_json::{json, Value};

fn options(skip: SkipSet) -> TranslateOptions {
    TranslateOptions {
        skip,
        pace: Duration::ZERO,
        ..TranslateOptions::default()
    }
}

fn site_content() -> ContentNode {
    ContentNode::from(json!({
        "hero": {
            "title": "Master the markets",
            "subtitle": "",
            "icon": "chart-line",
            "cta": {"label": "Start now", "url": "/courses"}
        },
        "courses": [
            {"id": 1, "slug": "forex-basics", "title": "Forex basics", "level": "Beginner", "price": 49.5, "featured": true},
            {"id": 2, "slug": "risk", "title": "Risk management", "level": "Advanced", "price": null, "tags": ["risk", "  "]}
        ],
        "type": {"name": "landing", "variants": ["a", "b"]},
        "faq": [["Is trading risky?", "Yes."]],
        "date": "2025-03-01"
    }))
}

fn upper() -> FnTranslator<impl Fn(&str, Locale, Locale) -> Result<String, TranslateError> + Send + Sync> {
    FnTranslator::new(|text: &str, _: Locale, _: Locale| Ok(text.to_uppercase()))
}

#[tokio::test]
async fn shape_is_preserved() {
    let engine = ContentTranslator::new(upper(), options(SkipSet::default()));
    let source = site_content();

    let outcome = engine
        .translate_object(&source, Locale::Fr, Locale::En, |_| {})
        .await
        .unwrap();

    assert!(outcome.tree.same_shape(&source));
    let out = Value::from(outcome.tree);
    assert_eq!(out["hero"]["title"], "MASTER THE MARKETS");
    assert_eq!(out["courses"][1]["tags"], json!(["RISK", "  "]));
    assert_eq!(out["faq"][0], json!(["IS TRADING RISKY?", "YES."]));
    assert_eq!(out["courses"][0]["price"], json!(49.5));
    assert_eq!(out["courses"][0]["featured"], json!(true));
}

#[tokio::test]
async fn skipped_fields_are_untouched() {
    let engine = ContentTranslator::new(upper(), options(SkipSet::default()));
    let source = site_content();

    let outcome = engine
        .translate_object(&source, Locale::De, Locale::En, |_| {})
        .await
        .unwrap();

    for path in ["hero.icon", "hero.cta.url", "courses[0].slug", "courses[1].level", "type", "date"] {
        let path: FieldPath = path.parse().unwrap();
        assert_eq!(value_at(&outcome.tree, &path), value_at(&source, &path), "{} 应保持原值", path);
    }
    // 被跳过键下的整棵子树都不翻译
    assert_eq!(
        Value::from(value_at(&outcome.tree, &FieldPath::root().child_key("type")).unwrap().clone()),
        json!({"name": "landing", "variants": ["a", "b"]})
    );
}

#[tokio::test]
async fn failing_translator_returns_source() {
    let engine = ContentTranslator::new(
        FnTranslator::new(|_: &str, _: Locale, _: Locale| Err(TranslateError::Other("offline".into()))),
        options(SkipSet::default()),
    );
    let source = site_content();

    let outcome = engine
        .translate_object(&source, Locale::Ru, Locale::En, |_| {})
        .await
        .unwrap();

    assert_eq!(outcome.tree, source);
    let non_blank = collect_fields(&source, &SkipSet::default())
        .into_iter()
        .filter(|f| !f.text.trim().is_empty())
        .count();
    assert_eq!(outcome.progress.errors.len(), non_blank);
    assert_eq!(outcome.progress.completed, outcome.progress.total);
}

#[tokio::test]
async fn progress_is_monotonic() {
    let engine = ContentTranslator::new(upper(), options(SkipSet::default()));
    let mut snapshots: Vec<TranslationProgress> = Vec::new();

    engine
        .translate_object(&site_content(), Locale::Es, Locale::En, |p| snapshots.push(p.clone()))
        .await
        .unwrap();

    let total = snapshots[0].total;
    assert!(snapshots.windows(2).all(|w| w[0].completed <= w[1].completed));
    assert_eq!(snapshots.iter().filter(|p| p.completed == total).count(), 1);
    assert_eq!(snapshots.last().unwrap().completed, total);
    assert_eq!(snapshots.len(), total + 1);
}

#[tokio::test]
async fn concurrent_runs_do_not_share_progress() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let engine = ContentTranslator::new(
        FnTranslator::new(move |text: &str, target: Locale, _: Locale| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(format!("{}-{}", target, text))
        }),
        options(SkipSet::default()),
    );
    let source = site_content();

    let (fr, de) = tokio::join!(
        engine.translate_object(&source, Locale::Fr, Locale::En, |_| {}),
        engine.translate_object(&source, Locale::De, Locale::En, |_| {}),
    );
    let (fr, de) = (fr.unwrap(), de.unwrap());

    assert_eq!(fr.progress.total, de.progress.total);
    assert_eq!(fr.progress.completed, fr.progress.total);
    assert_eq!(de.progress.completed, de.progress.total);
    assert_eq!(Value::from(fr.tree)["hero"]["title"], "fr-Master the markets");
    assert_eq!(Value::from(de.tree)["hero"]["title"], "de-Master the markets");
    assert_eq!(calls.load(Ordering::SeqCst), 2 * (fr.progress.total - 2));
}

#[tokio::test]
async fn translated_document_round_trips_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("content.json");
    std::fs::write(&input, serde_json::to_string_pretty(&Value::from(site_content())).unwrap()).unwrap();

    let mut doc = ContentDocument::default();
    doc.load_file(&input).unwrap();

    let engine = ContentTranslator::new(upper(), options(SkipSet::default()));
    let outcome = engine
        .translate_object(doc.content().unwrap(), Locale::Fr, Locale::En, |_| {})
        .await
        .unwrap();

    let output = dir.path().join("content.fr.json");
    ContentDocument::from_content(outcome.tree).save_to_file(&output).unwrap();

    let text = std::fs::read_to_string(&output).unwrap();
    // 键顺序与源文件一致
    assert!(text.find("\"hero\"").unwrap() < text.find("\"courses\"").unwrap());
    assert!(text.find("\"courses\"").unwrap() < text.find("\"date\"").unwrap());

    let mut reloaded = ContentDocument::default();
    reloaded.load_file(&output).unwrap();
    assert_eq!(
        reloaded.get("courses[1].title").unwrap().and_then(|n| n.as_str()),
        Some("RISK MANAGEMENT")
    );
}
