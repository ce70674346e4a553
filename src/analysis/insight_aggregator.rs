//! インサイト集計モジュール
//!
//! 分析済みフィードバックの集合を、ダッシュボード表示用の統計スナップショット
//! （感情分布・上位カテゴリ・緊急件数・トレンド）へ集約する。

use serde::{Deserialize, Serialize};

use super::{Sentiment, SentimentTrend, Urgency};

/// トレンド比較の直近ウィンドウ長
const RECENT_WINDOW_SIZE: usize = 10;
/// トレンド判定のしきい値（ポジティブ比率の差）
const TREND_THRESHOLD: f64 = 0.1;
/// 上位カテゴリの最大数
const MAX_TOP_CATEGORIES: usize = 5;

/// 集計対象となる分析済みアイテムの要約
///
/// 呼び出し側（保存層）がレスポンスごとに保持する形。`sentiment`以外は
/// 分析がスキップされた場合などに欠損しうる。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResponseSummary {
    /// 感情極性
    pub sentiment: Sentiment,
    /// 緊急度（分類済みの場合のみ）
    pub urgency: Option<Urgency>,
    /// 対応要否（分類済みの場合のみ）
    pub action_required: Option<bool>,
    /// 付与されたカテゴリ
    pub categories: Vec<String>,
}

/// 感情分布（各値はパーセント、独立に丸めるため合計は100±数%）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct SentimentDistribution {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

/// 上位カテゴリ1件分の統計
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryInsight {
    /// カテゴリ名
    pub category: String,
    /// 出現件数
    pub count: usize,
    /// 最頻の感情極性
    pub dominant_sentiment: Sentiment,
}

/// トレンド分析結果
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct TrendAnalysis {
    /// 直近ウィンドウとそれ以前の比較による感情トレンド
    pub sentiment_trend: SentimentTrend,
}

/// インサイトスナップショット
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct InsightSnapshot {
    /// 全体の感情分布
    pub overall_sentiment: SentimentDistribution,
    /// 件数降順の上位カテゴリ（最大5件）
    pub top_categories: Vec<CategoryInsight>,
    /// 緊急度High/Criticalの件数
    pub urgent_issues: usize,
    /// 対応が必要な件数
    pub actionable_items: usize,
    /// トレンド分析
    pub trend_analysis: TrendAnalysis,
}

/// インサイト集計エンジン
///
/// 与えられたコレクションに対する単一パスの集約。フィルタリングや保存には
/// 関与しない。
#[derive(Debug, Clone, Default)]
pub struct InsightAggregator;

impl InsightAggregator {
    pub fn new() -> Self {
        Self
    }

    /// 分析済みアイテムの集合をスナップショットへ集約する
    ///
    /// 空の入力に対しては全ゼロ・トレンドStableのスナップショットを返す。
    pub fn aggregate(&self, items: &[ResponseSummary]) -> InsightSnapshot {
        if items.is_empty() {
            return InsightSnapshot::default();
        }

        InsightSnapshot {
            overall_sentiment: Self::sentiment_distribution(items),
            top_categories: Self::top_categories(items),
            urgent_issues: items
                .iter()
                .filter(|i| i.urgency.map(|u| u.is_urgent()).unwrap_or(false))
                .count(),
            actionable_items: items
                .iter()
                .filter(|i| i.action_required.unwrap_or(false))
                .count(),
            trend_analysis: TrendAnalysis {
                sentiment_trend: Self::sentiment_trend(items),
            },
        }
    }

    /// 感情分布を計算する
    ///
    /// 各バケットを独立に丸めるため、合計は100丁度にならないことがある。
    /// 再正規化はしない。
    fn sentiment_distribution(items: &[ResponseSummary]) -> SentimentDistribution {
        let total = items.len() as f64;
        let count_of = |sentiment: Sentiment| {
            items.iter().filter(|i| i.sentiment == sentiment).count() as f64
        };

        SentimentDistribution {
            positive: (count_of(Sentiment::Positive) / total * 100.0).round(),
            neutral: (count_of(Sentiment::Neutral) / total * 100.0).round(),
            negative: (count_of(Sentiment::Negative) / total * 100.0).round(),
        }
    }

    /// 上位カテゴリを計算する
    ///
    /// 件数降順で最大5件。同数は初出順を保つ。
    fn top_categories(items: &[ResponseSummary]) -> Vec<CategoryInsight> {
        // 初出順を保つため、Mapではなく順序付きのVecに積む
        let mut entries: Vec<(String, usize, Vec<Sentiment>)> = Vec::new();

        for item in items {
            for category in &item.categories {
                if let Some(entry) = entries.iter_mut().find(|(name, _, _)| name == category) {
                    entry.1 += 1;
                    entry.2.push(item.sentiment);
                } else {
                    entries.push((category.clone(), 1, vec![item.sentiment]));
                }
            }
        }

        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
            .into_iter()
            .take(MAX_TOP_CATEGORIES)
            .map(|(category, count, sentiments)| CategoryInsight {
                category,
                count,
                dominant_sentiment: Self::dominant_sentiment(&sentiments),
            })
            .collect()
    }

    /// 感情リストの最頻値。同数はpositive > neutral > negativeの順で解決
    fn dominant_sentiment(sentiments: &[Sentiment]) -> Sentiment {
        let positive = sentiments.iter().filter(|s| **s == Sentiment::Positive).count();
        let neutral = sentiments.iter().filter(|s| **s == Sentiment::Neutral).count();
        let negative = sentiments.iter().filter(|s| **s == Sentiment::Negative).count();

        if positive >= neutral && positive >= negative {
            Sentiment::Positive
        } else if neutral >= negative {
            Sentiment::Neutral
        } else {
            Sentiment::Negative
        }
    }

    /// 2ウィンドウ比較による感情トレンド
    ///
    /// 直近10件とそれ以前を比較する。どちらかのウィンドウが空ならStable。
    fn sentiment_trend(items: &[ResponseSummary]) -> SentimentTrend {
        if items.len() <= RECENT_WINDOW_SIZE {
            return SentimentTrend::Stable;
        }

        let split_at = items.len() - RECENT_WINDOW_SIZE;
        let older = &items[..split_at];
        let recent = &items[split_at..];

        let positive_ratio = |window: &[ResponseSummary]| {
            window
                .iter()
                .filter(|i| i.sentiment == Sentiment::Positive)
                .count() as f64
                / window.len() as f64
        };

        let delta = positive_ratio(recent) - positive_ratio(older);
        if delta > TREND_THRESHOLD {
            SentimentTrend::Improving
        } else if delta < -TREND_THRESHOLD {
            SentimentTrend::Declining
        } else {
            SentimentTrend::Stable
        }
    }
}
