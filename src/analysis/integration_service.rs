/// 分析統合サービス
///
/// 回答送信ワークフローと分析エンジンを接続するバックグラウンドサービス。
/// 受信した回答を順次分析し、最新のインサイトとあわせて通知する。
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc;

use crate::analysis::{
    FeedbackAnalyzer, FeedbackClassifier, InsightAggregator, InsightSnapshot, ResponseSummary,
};
use crate::models::{FeedbackResponse, ResponseAnalysis};

/// 受信待ちのポーリング間隔（ms）
const INBOX_POLL_INTERVAL_MS: u64 = 50;

/// グローバル分析サービス実行状態
static ANALYSIS_RUNNING: AtomicBool = AtomicBool::new(false);

/// 1回答分の分析通知
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisUpdate {
    /// 通知タイムスタンプ
    pub timestamp: DateTime<Utc>,
    /// 分析結果が付与された回答（分析対象外の場合はanalysis=Noneのまま）
    pub response: FeedbackResponse,
    /// この時点での全体インサイト
    pub insights: InsightSnapshot,
    /// これまでに分析できた回答数
    pub analyzed_count: usize,
    /// 分析所要時間（ms）
    pub analysis_duration_ms: u64,
}

/// フィードバック分析サービス
pub struct FeedbackAnalysisService;

impl FeedbackAnalysisService {
    /// 分析サービスを開始する（グローバル制御）
    ///
    /// すでに実行中の場合はエラーを返す。返されたチャネルから分析通知を
    /// 受け取る。入力チャネルが閉じるかstop()が呼ばれると停止する。
    pub fn start(
        responses: mpsc::UnboundedReceiver<FeedbackResponse>,
    ) -> Result<mpsc::UnboundedReceiver<AnalysisUpdate>, String> {
        if ANALYSIS_RUNNING.load(Ordering::Relaxed) {
            return Err("Feedback analysis service is already running".to_string());
        }

        ANALYSIS_RUNNING.store(true, Ordering::Relaxed);

        let (update_tx, update_rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            Self::run_background_analysis(responses, update_tx).await;
        });

        tracing::info!("📊 Feedback analysis service started");
        Ok(update_rx)
    }

    /// 分析サービスの実行状態を確認
    pub fn is_running() -> bool {
        ANALYSIS_RUNNING.load(Ordering::Relaxed)
    }

    /// 分析サービスを停止
    pub fn stop() {
        ANALYSIS_RUNNING.store(false, Ordering::Relaxed);
        tracing::info!("📊 Feedback analysis service stop requested");
    }

    /// バックグラウンド分析処理
    async fn run_background_analysis(
        mut inbox: mpsc::UnboundedReceiver<FeedbackResponse>,
        update_tx: mpsc::UnboundedSender<AnalysisUpdate>,
    ) {
        let analyzer = FeedbackAnalyzer::new();
        let classifier = FeedbackClassifier::new();
        let aggregator = InsightAggregator::new();
        let mut summaries: Vec<ResponseSummary> = Vec::new();
        let mut analyzed_count = 0;

        tracing::info!("📊 Background feedback analysis started");

        while ANALYSIS_RUNNING.load(Ordering::Relaxed) {
            // 50msごとに停止フラグを確認しながら受信する
            let next = tokio::time::timeout(
                tokio::time::Duration::from_millis(INBOX_POLL_INTERVAL_MS),
                inbox.recv(),
            )
            .await;

            match next {
                Ok(Some(mut response)) => {
                    let start_time = std::time::Instant::now();

                    let analysis = Self::analyze_response(&analyzer, &classifier, &response);
                    response.analysis = analysis;
                    if let Some(summary) = response.summary() {
                        summaries.push(summary);
                        analyzed_count += 1;
                    } else {
                        tracing::debug!(
                            "📊 Response {} has no analyzable text, skipped",
                            response.id
                        );
                    }

                    let update = AnalysisUpdate {
                        timestamp: Utc::now(),
                        insights: aggregator.aggregate(&summaries),
                        analyzed_count,
                        analysis_duration_ms: start_time.elapsed().as_millis() as u64,
                        response,
                    };

                    if update_tx.send(update).is_err() {
                        tracing::warn!("📊 Failed to send analysis update");
                        break;
                    }

                    tracing::debug!("📊 Analyzed response (total analyzed: {})", analyzed_count);
                }
                Ok(None) => {
                    tracing::info!("📊 Response channel closed");
                    break;
                }
                Err(_) => {
                    // タイムアウト。停止フラグの再確認へ
                }
            }
        }

        ANALYSIS_RUNNING.store(false, Ordering::Relaxed);
        tracing::info!(
            "📊 Background feedback analysis stopped ({} responses analyzed)",
            analyzed_count
        );
    }

    /// 1件の回答を分析する
    ///
    /// 分析対象のテキストが無い回答にはNoneを返す。
    pub fn analyze_response(
        analyzer: &FeedbackAnalyzer,
        classifier: &FeedbackClassifier,
        response: &FeedbackResponse,
    ) -> Option<ResponseAnalysis> {
        let text = response.free_text()?;
        let sentiment = analyzer.analyze(&text);
        let categorization = classifier.categorize(&text, &sentiment);

        Some(ResponseAnalysis {
            sentiment,
            categorization,
            analyzed_at: Utc::now(),
        })
    }

    /// 回答の集合を一括分析し、分析できた件数を返す（同期版）
    pub fn analyze_all(responses: &mut [FeedbackResponse]) -> usize {
        let analyzer = FeedbackAnalyzer::new();
        let classifier = FeedbackClassifier::new();
        let mut analyzed = 0;

        for response in responses.iter_mut() {
            let analysis = Self::analyze_response(&analyzer, &classifier, response);
            if analysis.is_some() {
                analyzed += 1;
            }
            response.analysis = analysis;
        }

        tracing::info!(
            "📊 Batch analysis finished ({}/{} responses analyzable)",
            analyzed,
            responses.len()
        );
        analyzed
    }

    /// 現在のインサイトを計算する（同期版）
    pub fn current_insights(responses: &[FeedbackResponse]) -> InsightSnapshot {
        let summaries: Vec<ResponseSummary> =
            responses.iter().filter_map(|r| r.summary()).collect();
        InsightAggregator::new().aggregate(&summaries)
    }
}
