pub mod feedback_classifier;
pub mod insight_aggregator;
pub mod integration_service;
pub mod sentiment_analyzer;

pub use feedback_classifier::*;
pub use insight_aggregator::*;
pub use integration_service::*;
pub use sentiment_analyzer::*;

use serde::{Deserialize, Serialize};

/// 感情極性（ポジティブ/中立/ネガティブ）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }
}

/// フィードバックの緊急度（4段階、深刻度順）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Urgency {
    Low = 1,
    Medium = 2,
    High = 3,
    Critical = 4,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
            Urgency::Critical => "critical",
        }
    }

    /// 対応が必要な深刻度かどうか
    pub fn is_urgent(&self) -> bool {
        matches!(self, Urgency::High | Urgency::Critical)
    }
}

/// 感情トレンドの方向
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SentimentTrend {
    Improving,
    #[default]
    Stable,
    Declining,
}

impl SentimentTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentTrend::Improving => "improving",
            SentimentTrend::Stable => "stable",
            SentimentTrend::Declining => "declining",
        }
    }
}
