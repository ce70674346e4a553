//! フィードバック分類モジュール
//!
//! 感情分析結果と本文から、主カテゴリ・緊急度・対応要否・推奨アクションを
//! 導出する。

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{Sentiment, SentimentAnalysis, Urgency};

/// カテゴリが1件も無い場合の主カテゴリ
pub const GENERAL_FEEDBACK: &str = "General Feedback";

/// 推奨アクションの最大数
const MAX_SUGGESTED_ACTIONS: usize = 5;
/// 副カテゴリの最大数
const MAX_SECONDARY_CATEGORIES: usize = 2;

/// 緊急度Criticalを即時に確定させる語彙（部分一致）
const URGENT_KEYWORDS: &[&str] = &[
    "urgent",
    "critical",
    "emergency",
    "immediately",
    "asap",
    "broken",
    "not working",
    "unusable",
    "data loss",
];

/// 緊急度をMediumに引き上げる語彙（部分一致）
const HIGH_PRIORITY_KEYWORDS: &[&str] = &[
    "important",
    "serious",
    "major",
    "significant",
    "problem",
    "issue",
    "concern",
    "struggling",
];

/// ネガティブなフィードバックへの基本アクション
const NEGATIVE_ACTIONS: &[&str] = &[
    "Follow up with the respondent directly",
    "Investigate the reported problem",
];

/// Critical時に追加するエスカレーションアクション
const ESCALATION_ACTIONS: &[&str] = &[
    "Escalate to the on-call support team",
    "Acknowledge the report within 24 hours",
];

/// ポジティブなフィードバックへの基本アクション
const POSITIVE_ACTIONS: &[&str] = &[
    "Thank the respondent for the feedback",
    "Consider featuring this response as a testimonial",
];

/// 主カテゴリごとの固有アクション（各2件）
const CATEGORY_ACTIONS: &[(&str, [&str; 2])] = &[
    (
        "User Experience",
        [
            "Schedule a usability review of the affected flow",
            "Share the feedback with the design team",
        ],
    ),
    (
        "Performance",
        [
            "Profile the reported slow path",
            "Compare against the performance baseline",
        ],
    ),
    (
        "Customer Service",
        [
            "Review the support interaction history",
            "Coach the support team on this case",
        ],
    ),
    (
        "Product Quality",
        [
            "File a quality report for the affected batch",
            "Request photos or details from the respondent",
        ],
    ),
    (
        "Pricing",
        [
            "Forward to the pricing team for review",
            "Check eligibility for a discount or refund",
        ],
    ),
    (
        "Technical Issues",
        [
            "Create a bug ticket for the engineering team",
            "Verify the fix in the next release",
        ],
    ),
    (
        "Delivery/Shipping",
        [
            "Check the shipment status with the carrier",
            "Offer compensation for the delayed delivery",
        ],
    ),
    (
        "Communication",
        [
            "Audit the notification settings involved",
            "Update the messaging templates",
        ],
    ),
    (
        "Accessibility",
        [
            "Run an accessibility audit on the affected screen",
            "Prioritize the accessibility backlog item",
        ],
    ),
    (
        "Security",
        [
            "Notify the security team for assessment",
            "Review the account activity involved",
        ],
    ),
];

/// フィードバック分類結果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedbackCategorization {
    /// 主カテゴリ（未検出時は "General Feedback"）
    pub primary_category: String,
    /// 副カテゴリ（最大2件）
    pub secondary_categories: Vec<String>,
    /// 緊急度
    pub urgency: Urgency,
    /// 対応が必要かどうか
    pub action_required: bool,
    /// 推奨アクション（重複なし、最大5件）
    pub suggested_actions: Vec<String>,
}

/// フィードバック分類エンジン
///
/// 状態を持たない純粋な分類器。判定は本文と感情分析結果のみから決まる。
#[derive(Debug, Clone, Default)]
pub struct FeedbackClassifier;

impl FeedbackClassifier {
    pub fn new() -> Self {
        Self
    }

    /// 本文と感情分析結果からフィードバックを分類する
    pub fn categorize(&self, text: &str, analysis: &SentimentAnalysis) -> FeedbackCategorization {
        let lowered = text.to_lowercase();

        let primary_category = analysis
            .categories
            .first()
            .cloned()
            .unwrap_or_else(|| GENERAL_FEEDBACK.to_string());
        let secondary_categories: Vec<String> = analysis
            .categories
            .iter()
            .skip(1)
            .take(MAX_SECONDARY_CATEGORIES)
            .cloned()
            .collect();

        let urgency = Self::resolve_urgency(&lowered, analysis);
        let action_required = urgency.is_urgent()
            || (analysis.sentiment == Sentiment::Negative && analysis.confidence > 0.7);
        let suggested_actions =
            Self::build_suggested_actions(analysis, urgency, &primary_category);

        FeedbackCategorization {
            primary_category,
            secondary_categories,
            urgency,
            action_required,
            suggested_actions,
        }
    }

    /// 緊急度を判定する。最初に一致したルールが勝つ
    fn resolve_urgency(lowered: &str, analysis: &SentimentAnalysis) -> Urgency {
        if URGENT_KEYWORDS.iter().any(|k| lowered.contains(k)) {
            Urgency::Critical
        } else if analysis.sentiment == Sentiment::Negative && analysis.confidence > 0.8 {
            Urgency::High
        } else if HIGH_PRIORITY_KEYWORDS.iter().any(|k| lowered.contains(k)) {
            Urgency::Medium
        } else if analysis.sentiment == Sentiment::Negative {
            Urgency::Medium
        } else {
            Urgency::Low
        }
    }

    /// 推奨アクションを構築する
    ///
    /// 極性由来のアクション、次に主カテゴリ固有のアクションの順で連結し、
    /// 初出を優先して重複を除き、5件に切り詰める。
    fn build_suggested_actions(
        analysis: &SentimentAnalysis,
        urgency: Urgency,
        primary_category: &str,
    ) -> Vec<String> {
        let mut actions: Vec<String> = Vec::new();

        match analysis.sentiment {
            Sentiment::Negative => {
                actions.extend(NEGATIVE_ACTIONS.iter().map(|a| a.to_string()));
                if urgency == Urgency::Critical {
                    actions.extend(ESCALATION_ACTIONS.iter().map(|a| a.to_string()));
                }
            }
            Sentiment::Positive => {
                actions.extend(POSITIVE_ACTIONS.iter().map(|a| a.to_string()));
            }
            Sentiment::Neutral => {}
        }

        if let Some((_, category_actions)) = CATEGORY_ACTIONS
            .iter()
            .find(|(name, _)| *name == primary_category)
        {
            actions.extend(category_actions.iter().map(|a| a.to_string()));
        }

        let mut seen = HashSet::new();
        actions.retain(|a| seen.insert(a.clone()));
        actions.truncate(MAX_SUGGESTED_ACTIONS);
        actions
    }
}
