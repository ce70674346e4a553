//! フィードバック分析CLI
//!
//! NDJSON形式の回答ファイルを読み込み、一括分析してインサイトを表示する。

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use feedlens::{FeedbackAnalysisService, FeedbackResponse, InsightSnapshot};

/// コマンドライン引数
#[derive(Parser)]
#[command(name = "feedlens", about = "Analyze an NDJSON file of feedback responses")]
struct Args {
    /// 入力NDJSONファイルのパス
    input: String,

    /// インサイトをJSONで出力する
    #[arg(long)]
    json: bool,

    /// デバッグログを有効にする
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    tracing::info!("📋 feedlens - feedback analysis engine");

    let mut responses = feedlens::parse_ndjson_file_legacy(&args.input)?;
    tracing::info!("📥 Loaded {} responses from {}", responses.len(), args.input);

    let analyzed = FeedbackAnalysisService::analyze_all(&mut responses);
    let insights = FeedbackAnalysisService::current_insights(&responses);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&insights)?);
    } else {
        print_report(&responses, analyzed, &insights);
    }

    Ok(())
}

/// ログ初期化
fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap();

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .compact(),
    );

    subscriber.try_init()?;

    Ok(())
}

/// 人間向けの分析レポートを表示する
fn print_report(responses: &[FeedbackResponse], analyzed: usize, insights: &InsightSnapshot) {
    println!("🏁 feedlens 分析レポート");
    println!("=========================================");
    println!(
        "📥 読み込み: {}件（うち分析対象 {}件）",
        responses.len(),
        analyzed
    );
    println!(
        "💬 感情分布: positive {:.0}% / neutral {:.0}% / negative {:.0}%",
        insights.overall_sentiment.positive,
        insights.overall_sentiment.neutral,
        insights.overall_sentiment.negative
    );
    println!(
        "🚨 緊急: {}件 / 要対応: {}件",
        insights.urgent_issues, insights.actionable_items
    );
    println!(
        "📈 感情トレンド: {}",
        insights.trend_analysis.sentiment_trend.as_str()
    );

    if !insights.top_categories.is_empty() {
        println!("🏷️ 上位カテゴリ:");
        for category in &insights.top_categories {
            println!(
                "  {} — {}件（最頻: {}）",
                category.category,
                category.count,
                category.dominant_sentiment.as_str()
            );
        }
    }
}
