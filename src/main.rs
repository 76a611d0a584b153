//! 程序入口：初始化日志、解析命令行，翻译内容文件

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

use content_fanyi::model::performance::run_performance_suite;
use content_fanyi::vm::bridge::{outcome_status, progress_line, STATUS_LOADED, STATUS_SAVED};
use content_fanyi::{
    CancelHandle, ContentDocument, ContentTranslator, HttpTranslator, Locale, TranslatorConfig,
};

#[derive(Parser, Debug)]
#[command(name = "content_fanyi", version, about = "Translate site content JSON field by field")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 翻译内容文件并写出本地化版本
    Translate(TranslateArgs),
    /// 列出可翻译字段路径
    Fields(FieldsArgs),
    /// 运行收集/回写性能测试
    Bench,
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// TOML 配置文件
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// 覆盖跳过字段（逗号分隔）
    #[arg(long, value_delimiter = ',')]
    skip: Option<Vec<String>>,
}

#[derive(Args, Debug)]
struct TranslateArgs {
    input: PathBuf,
    /// 输出文件，默认 `<输入名>.<目标语言>.json`
    #[arg(short, long)]
    output: Option<PathBuf>,
    #[arg(short, long)]
    target: Option<Locale>,
    #[arg(short, long)]
    source: Option<Locale>,
    #[arg(long)]
    endpoint: Option<String>,
    #[arg(long)]
    pace_ms: Option<u64>,
    #[arg(long)]
    deadline_ms: Option<u64>,
    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Args, Debug)]
struct FieldsArgs {
    input: PathBuf,
    #[command(flatten)]
    config: ConfigArgs,
}

/// 默认值 → 配置文件 → 环境变量 → 命令行
fn load_config(args: &ConfigArgs) -> Result<TranslatorConfig> {
    let mut cfg = match &args.config {
        Some(path) => TranslatorConfig::load(path)
            .with_context(|| format!("读取配置失败: {}", path.display()))?,
        None => TranslatorConfig::default(),
    };
    cfg.apply_env()?;
    if let Some(skip) = &args.skip {
        cfg.skip_fields = skip.clone();
    }
    Ok(cfg)
}

fn load_document(path: &Path) -> Result<ContentDocument> {
    let mut doc = ContentDocument::default();
    doc.load_file(path)
        .with_context(|| format!("加载内容文件失败: {}", path.display()))?;
    tracing::info!("{}: {}", STATUS_LOADED, path.display());
    Ok(doc)
}

async fn run_translate(args: TranslateArgs) -> Result<()> {
    let mut cfg = load_config(&args.config)?;
    if let Some(target) = args.target {
        cfg.target_locale = target;
    }
    if let Some(source) = args.source {
        cfg.source_locale = source;
    }
    if let Some(endpoint) = args.endpoint {
        cfg.endpoint = Some(endpoint);
    }
    if let Some(pace) = args.pace_ms {
        cfg.pace_ms = pace;
    }
    if let Some(deadline) = args.deadline_ms {
        cfg.deadline_ms = Some(deadline);
    }
    cfg.validate()?;

    let doc = load_document(&args.input)?;
    let translator = HttpTranslator::from_config(&cfg)?;
    let engine = ContentTranslator::new(translator, cfg.options());

    let cancel = CancelHandle::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("收到中断信号，当前字段完成后停止");
                cancel.cancel();
            }
        });
    }

    let outcome = engine
        .translate_object_with_cancel(
            doc.content()?,
            cfg.target_locale,
            cfg.source_locale,
            |p| tracing::debug!("{}", progress_line(p)),
            &cancel,
        )
        .await?;

    let status = outcome_status(&outcome);
    if outcome.is_complete() && !outcome.progress.has_errors() {
        tracing::info!("{}", status);
    } else {
        tracing::warn!("{}", status);
        for err in &outcome.progress.errors {
            tracing::warn!("  {}: {}", err.path, err.error);
        }
    }

    let output = args
        .output
        .unwrap_or_else(|| args.input.with_extension(format!("{}.json", cfg.target_locale)));
    ContentDocument::from_content(outcome.tree).save_to_file(&output)?;
    tracing::info!("{}: {}", STATUS_SAVED, output.display());
    Ok(())
}

fn run_fields(args: FieldsArgs) -> Result<()> {
    let cfg = load_config(&args.config)?;
    let doc = load_document(&args.input)?;
    let fields = doc.translatable_fields(&cfg.skip_set())?;
    for field in &fields {
        println!("{}\t{}", field.path, field.text);
    }
    tracing::info!("共 {} 个可翻译字段", fields.len());
    Ok(())
}

fn run_bench() -> Result<()> {
    let results = run_performance_suite();
    let mut failed = 0;
    for r in &results {
        println!("{:<24} {:>6} ms  {}  {}", r.operation, r.duration_ms, if r.success { "ok" } else { "FAIL" }, r.details);
        if !r.success {
            failed += 1;
        }
    }
    if failed > 0 {
        bail!("{} 项性能测试失败", failed);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // 初始化日志输出（RUST_LOG 可覆盖级别）
    let _ = SubscriberBuilder::default()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();

    let cli = Cli::parse();
    match cli.command {
        Command::Translate(args) => run_translate(args).await,
        Command::Fields(args) => run_fields(args),
        Command::Bench => run_bench(),
    }
}
