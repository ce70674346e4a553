//! フォーム回答レコードのデータモデル
//!
//! 分析エンジンが消費・生成する境界上の構造体。保存や取得は外部の
//! ストレージ層の責務であり、ここでは形だけを定義する。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::{FeedbackCategorization, ResponseSummary, SentimentAnalysis};

/// 分析対象とする自由記述回答の最小文字数
///
/// この長さ以下の回答は連結から除外する。1件も残らなければ分析自体を
/// スキップする。
pub const MIN_ANALYZABLE_ANSWER_CHARS: usize = 10;

/// 1件のフォーム回答
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedbackResponse {
    /// 回答ID
    pub id: Uuid,
    /// フォームID
    pub form_id: String,
    /// 送信時刻
    pub submitted_at: DateTime<Utc>,
    /// 設問ごとの回答値
    pub answers: Vec<FeedbackAnswer>,
    /// 付与された分析結果（分析スキップ時はNone）
    pub analysis: Option<ResponseAnalysis>,
}

/// 設問1つ分の回答
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedbackAnswer {
    /// 設問ID
    pub question_id: String,
    /// 回答値
    pub value: AnswerValue,
}

/// 回答値の種類
///
/// 自由記述（Text）のみが感情分析の対象になる。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum AnswerValue {
    Text(String),
    Choice(String),
    MultiChoice(Vec<String>),
    Rating(u32),
}

/// 回答に付与される分析結果一式
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResponseAnalysis {
    /// 感情分析結果
    pub sentiment: SentimentAnalysis,
    /// 分類結果
    pub categorization: FeedbackCategorization,
    /// 分析実行時刻
    pub analyzed_at: DateTime<Utc>,
}

impl FeedbackResponse {
    /// 新しい未分析の回答を作成する
    pub fn new(form_id: impl Into<String>, answers: Vec<FeedbackAnswer>) -> Self {
        Self {
            id: Uuid::new_v4(),
            form_id: form_id.into(),
            submitted_at: Utc::now(),
            answers,
            analysis: None,
        }
    }

    /// 分析対象の自由記述テキストを連結して返す
    ///
    /// 10文字以下のText回答は除外する。対象が1件も無ければNone。
    pub fn free_text(&self) -> Option<String> {
        let parts: Vec<&str> = self
            .answers
            .iter()
            .filter_map(|answer| match &answer.value {
                AnswerValue::Text(text) if text.chars().count() > MIN_ANALYZABLE_ANSWER_CHARS => {
                    Some(text.as_str())
                }
                _ => None,
            })
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }

    /// 集計用の要約を返す（分析済みの場合のみ）
    pub fn summary(&self) -> Option<ResponseSummary> {
        self.analysis.as_ref().map(|analysis| ResponseSummary {
            sentiment: analysis.sentiment.sentiment,
            urgency: Some(analysis.categorization.urgency),
            action_required: Some(analysis.categorization.action_required),
            categories: analysis.sentiment.categories.clone(),
        })
    }
}

impl FeedbackAnswer {
    /// 自由記述回答を作成するショートカット
    pub fn text(question_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            value: AnswerValue::Text(text.into()),
        }
    }
}
