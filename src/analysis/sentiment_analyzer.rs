//! 感情分析モジュール
//!
//! フィードバック本文をキーワード辞書ベースで解析し、極性・カテゴリ・
//! キーワード・感情6次元を導出する。

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::Sentiment;

/// 信頼度の下限・上限
const MIN_CONFIDENCE: f64 = 0.5;
const MAX_CONFIDENCE: f64 = 0.95;
/// 極性が拮抗した場合の信頼度
const TIE_CONFIDENCE: f64 = 0.6;
/// 感情スコアのキーワード1件あたりの重み
const EMOTION_KEYWORD_WEIGHT: f64 = 0.3;
/// 抽出するカテゴリの最大数
const MAX_CATEGORIES: usize = 3;
/// 抽出するキーワードの最大数
const MAX_KEYWORDS: usize = 5;

/// カテゴリ定義（宣言順がタイブレーク順）
const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "User Experience",
        &["interface", "design", "layout", "navigation", "usability", "menu"],
    ),
    (
        "Performance",
        &["slow", "fast", "speed", "lag", "loading", "performance"],
    ),
    (
        "Customer Service",
        &["support", "service", "staff", "representative", "agent", "helpdesk"],
    ),
    (
        "Product Quality",
        &["quality", "material", "durable", "build", "defect", "damaged"],
    ),
    (
        "Pricing",
        &["price", "pricing", "cost", "expensive", "cheap", "subscription", "billing"],
    ),
    (
        "Technical Issues",
        &["bug", "error", "broken", "glitch", "crash", "fix"],
    ),
    (
        "Delivery/Shipping",
        &["delivery", "shipping", "package", "arrived", "tracking", "courier"],
    ),
    (
        "Communication",
        &["email", "notification", "update", "information", "contact", "newsletter"],
    ),
    (
        "Accessibility",
        &["accessibility", "accessible", "font", "contrast", "reader", "keyboard"],
    ),
    (
        "Security",
        &["security", "privacy", "password", "login", "account", "breach"],
    ),
];

/// 感情6次元のキーワード辞書（部分一致で照合）
const JOY_KEYWORDS: &[&str] = &[
    "happy", "glad", "delight", "love", "enjoy", "excited", "wonderful", "pleased",
];
const ANGER_KEYWORDS: &[&str] = &[
    "angry", "furious", "annoy", "frustrat", "outrage", "irritat", "infuriat",
];
const FEAR_KEYWORDS: &[&str] = &[
    "afraid", "scared", "worri", "anxious", "nervous", "alarm", "panic",
];
const SADNESS_KEYWORDS: &[&str] = &[
    "sad", "unhappy", "disappoint", "upset", "regret", "heartbroken",
];
const SURPRISE_KEYWORDS: &[&str] = &[
    "surpris", "unexpected", "shock", "astonish", "stunned", "sudden",
];
const DISGUST_KEYWORDS: &[&str] = &[
    "disgust", "gross", "awful", "horrible", "revolting", "repuls",
];

/// 感情6次元スコア（各値は0.0〜1.0）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct EmotionScores {
    pub joy: f64,
    pub anger: f64,
    pub fear: f64,
    pub sadness: f64,
    pub surprise: f64,
    pub disgust: f64,
}

/// 感情分析結果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SentimentAnalysis {
    /// 感情極性
    pub sentiment: Sentiment,
    /// 信頼度（0.5〜0.95）
    pub confidence: f64,
    /// マッチ数降順のカテゴリ（最大3件）
    pub categories: Vec<String>,
    /// 頻度降順のキーワード（最大5件）
    pub keywords: Vec<String>,
    /// 感情6次元スコア
    pub emotions: EmotionScores,
}

/// フィードバック感情分析エンジン
///
/// 辞書は読み取り専用の固定データであり、インスタンスは任意のスレッドから
/// 同時に呼び出せる。
#[derive(Debug, Clone)]
pub struct FeedbackAnalyzer {
    /// ポジティブ語辞書
    positive_words: HashSet<&'static str>,
    /// ネガティブ語辞書
    negative_words: HashSet<&'static str>,
    /// 中立・ヘッジ語辞書
    neutral_words: HashSet<&'static str>,
    /// キーワード抽出から除外するストップワード
    stop_words: HashSet<&'static str>,
    /// 単語・空白以外の文字にマッチする正規化パターン
    non_word: Regex,
}

impl Default for FeedbackAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedbackAnalyzer {
    pub fn new() -> Self {
        Self {
            positive_words: Self::build_positive_lexicon(),
            negative_words: Self::build_negative_lexicon(),
            neutral_words: Self::build_neutral_lexicon(),
            stop_words: Self::build_stop_words(),
            non_word: Regex::new(r"[^\w\s]").expect("static normalization pattern"),
        }
    }

    /// テキストを解析する
    ///
    /// 空文字列を含むあらゆる入力に対して失敗しない。シグナルが無い場合は
    /// 中立・信頼度0.5のデフォルト結果を返す。
    pub fn analyze(&self, text: &str) -> SentimentAnalysis {
        let lowered = text.to_lowercase();
        let normalized = self.non_word.replace_all(&lowered, " ");

        // 正規化トークン列。カテゴリ照合には長さフィルタ前の列を使う
        let raw_tokens: Vec<&str> = normalized.split_whitespace().collect();
        let tokens: Vec<&str> = raw_tokens
            .iter()
            .copied()
            .filter(|t| t.chars().count() > 2)
            .collect();

        let (sentiment, confidence) = self.score_sentiment(&tokens);

        SentimentAnalysis {
            sentiment,
            confidence,
            categories: self.extract_categories(&raw_tokens),
            keywords: self.extract_keywords(&tokens),
            emotions: self.score_emotions(&lowered),
        }
    }

    /// 極性判定と信頼度計算
    fn score_sentiment(&self, tokens: &[&str]) -> (Sentiment, f64) {
        let positive = tokens
            .iter()
            .filter(|t| self.positive_words.contains(**t))
            .count();
        let negative = tokens
            .iter()
            .filter(|t| self.negative_words.contains(**t))
            .count();
        let neutral = tokens
            .iter()
            .filter(|t| self.neutral_words.contains(**t))
            .count();

        let total = (positive + negative + neutral) as f64;

        if positive == 0 && negative == 0 && neutral == 0 {
            // シグナルなし
            (Sentiment::Neutral, MIN_CONFIDENCE)
        } else if positive > negative {
            let confidence = (MIN_CONFIDENCE + positive as f64 / total * 0.5).min(MAX_CONFIDENCE);
            (Sentiment::Positive, confidence)
        } else if negative > positive {
            let confidence = (MIN_CONFIDENCE + negative as f64 / total * 0.5).min(MAX_CONFIDENCE);
            (Sentiment::Negative, confidence)
        } else {
            // 拮抗、または中立語のみ
            (Sentiment::Neutral, TIE_CONFIDENCE)
        }
    }

    /// カテゴリ抽出
    ///
    /// カテゴリごとにキーワードの完全一致出現回数を数え、1件以上マッチした
    /// カテゴリを回数降順で返す。同数の場合は宣言順を保つ。
    fn extract_categories(&self, raw_tokens: &[&str]) -> Vec<String> {
        let mut matched: Vec<(&'static str, usize)> = Vec::new();

        for &(name, keywords) in CATEGORY_KEYWORDS {
            let count = raw_tokens
                .iter()
                .filter(|t| keywords.contains(*t))
                .count();
            if count > 0 {
                matched.push((name, count));
            }
        }

        // 安定ソートなので同数は宣言順のまま
        matched.sort_by(|a, b| b.1.cmp(&a.1));
        matched
            .into_iter()
            .take(MAX_CATEGORIES)
            .map(|(name, _)| name.to_string())
            .collect()
    }

    /// キーワード抽出
    ///
    /// 長さ4以上かつストップワードでないトークンを頻度降順で返す。
    /// 同数の場合は初出順を保つ。
    fn extract_keywords(&self, tokens: &[&str]) -> Vec<String> {
        let mut order: Vec<&str> = Vec::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();

        for &token in tokens {
            if token.chars().count() <= 3 || self.stop_words.contains(token) {
                continue;
            }
            if !counts.contains_key(token) {
                order.push(token);
            }
            *counts.entry(token).or_insert(0) += 1;
        }

        order.sort_by(|a, b| counts[*b].cmp(&counts[*a]));
        order
            .into_iter()
            .take(MAX_KEYWORDS)
            .map(|t| t.to_string())
            .collect()
    }

    /// 感情6次元スコアを計算
    fn score_emotions(&self, lowered: &str) -> EmotionScores {
        EmotionScores {
            joy: Self::emotion_score(lowered, JOY_KEYWORDS),
            anger: Self::emotion_score(lowered, ANGER_KEYWORDS),
            fear: Self::emotion_score(lowered, FEAR_KEYWORDS),
            sadness: Self::emotion_score(lowered, SADNESS_KEYWORDS),
            surprise: Self::emotion_score(lowered, SURPRISE_KEYWORDS),
            disgust: Self::emotion_score(lowered, DISGUST_KEYWORDS),
        }
    }

    /// 1感情のスコア = min(1.0, マッチしたキーワード数 × 0.3)
    fn emotion_score(lowered: &str, keywords: &[&str]) -> f64 {
        let hits = keywords.iter().filter(|k| lowered.contains(**k)).count();
        (hits as f64 * EMOTION_KEYWORD_WEIGHT).min(1.0)
    }

    /// ポジティブ語辞書を構築
    fn build_positive_lexicon() -> HashSet<&'static str> {
        [
            "great", "good", "excellent", "amazing", "awesome", "love", "loved",
            "fantastic", "wonderful", "perfect", "best", "happy", "helpful", "easy",
            "fast", "smooth", "reliable", "friendly", "beautiful", "impressive",
            "satisfied", "pleased", "enjoyable", "superb", "brilliant", "outstanding",
            "convenient", "intuitive", "responsive", "delightful",
        ]
        .into_iter()
        .collect()
    }

    /// ネガティブ語辞書を構築
    fn build_negative_lexicon() -> HashSet<&'static str> {
        [
            "bad", "terrible", "awful", "horrible", "worst", "hate", "hated", "poor",
            "slow", "broken", "useless", "annoying", "frustrating", "disappointing",
            "disappointed", "confusing", "difficult", "buggy", "crashes", "unreliable",
            "expensive", "overpriced", "ugly", "painful", "clunky", "laggy",
            "unusable", "failed", "failure", "worse",
        ]
        .into_iter()
        .collect()
    }

    /// 中立・ヘッジ語辞書を構築
    fn build_neutral_lexicon() -> HashSet<&'static str> {
        [
            "okay", "fine", "average", "decent", "normal", "standard", "typical",
            "moderate", "acceptable", "reasonable", "fair", "usual", "regular",
            "ordinary", "adequate", "sufficient", "maybe", "perhaps", "possibly",
            "somewhat", "slightly", "mostly", "generally", "probably", "alright",
        ]
        .into_iter()
        .collect()
    }

    /// ストップワードを構築
    fn build_stop_words() -> HashSet<&'static str> {
        [
            "that", "this", "with", "have", "from", "they", "what", "when", "where",
            "which", "will", "would", "could", "should", "there", "their", "about",
            "your", "just", "like", "very", "really", "been", "were", "them", "then",
            "than", "some", "only", "also",
        ]
        .into_iter()
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_sentiment() {
        let analyzer = FeedbackAnalyzer::new();
        let result = analyzer.analyze("This is absolutely excellent and amazing, I love it!");

        assert_eq!(result.sentiment, Sentiment::Positive);
        assert!(result.confidence > 0.7);
        assert!(
            result.keywords.iter().any(|k| k == "excellent")
                || result.keywords.iter().any(|k| k == "amazing")
        );
    }

    #[test]
    fn test_negative_sentiment() {
        let analyzer = FeedbackAnalyzer::new();
        let result = analyzer.analyze("Terrible experience, the app is broken and useless");

        assert_eq!(result.sentiment, Sentiment::Negative);
        assert!(result.confidence > 0.5);
    }

    #[test]
    fn test_no_signal_defaults_to_neutral() {
        let analyzer = FeedbackAnalyzer::new();
        let result = analyzer.analyze("The cat sat on the mat");

        assert_eq!(result.sentiment, Sentiment::Neutral);
        assert_eq!(result.confidence, 0.5);
    }

    #[test]
    fn test_tie_is_neutral_with_raised_confidence() {
        let analyzer = FeedbackAnalyzer::new();
        // ポジティブ1語・ネガティブ1語で拮抗
        let result = analyzer.analyze("The interface is great but the checkout is terrible");

        assert_eq!(result.sentiment, Sentiment::Neutral);
        assert_eq!(result.confidence, 0.6);
    }

    #[test]
    fn test_neutral_words_only() {
        let analyzer = FeedbackAnalyzer::new();
        let result = analyzer.analyze("The product is okay, fairly average overall");

        assert_eq!(result.sentiment, Sentiment::Neutral);
        assert_eq!(result.confidence, 0.6);
    }

    #[test]
    fn test_empty_text() {
        let analyzer = FeedbackAnalyzer::new();
        let result = analyzer.analyze("");

        assert_eq!(result.sentiment, Sentiment::Neutral);
        assert_eq!(result.confidence, 0.5);
        assert!(result.categories.is_empty());
        assert!(result.keywords.is_empty());
        assert_eq!(result.emotions, EmotionScores::default());
    }

    #[test]
    fn test_confidence_is_capped() {
        let analyzer = FeedbackAnalyzer::new();
        // 全トークンがポジティブ語 → 計算上は1.0だが0.95に丸められる
        let result = analyzer.analyze("excellent amazing wonderful fantastic perfect");

        assert_eq!(result.sentiment, Sentiment::Positive);
        assert!(result.confidence <= 0.95);
        assert_eq!(result.confidence, 0.95);
    }

    #[test]
    fn test_confidence_stays_in_documented_range() {
        let analyzer = FeedbackAnalyzer::new();
        for text in [
            "",
            "great",
            "terrible",
            "okay",
            "great terrible",
            "the quick brown fox",
            "great great great awful",
        ] {
            let result = analyzer.analyze(text);
            assert!(result.confidence >= 0.5, "confidence too low for {text:?}");
            assert!(result.confidence <= 0.95, "confidence too high for {text:?}");
        }
    }

    #[test]
    fn test_category_extraction_sorted_by_count() {
        let analyzer = FeedbackAnalyzer::new();
        let result =
            analyzer.analyze("The delivery was late and the delivery tracking failed. Bad support.");

        // delivery×2 + tracking×1 = 3、support×1 = 1
        assert_eq!(result.categories[0], "Delivery/Shipping");
        assert!(result.categories.contains(&"Customer Service".to_string()));
    }

    #[test]
    fn test_category_tie_keeps_declaration_order() {
        let analyzer = FeedbackAnalyzer::new();
        // User ExperienceとPerformanceが各1回ずつマッチ
        let result = analyzer.analyze("The design feels slow");

        assert_eq!(result.categories[0], "User Experience");
        assert_eq!(result.categories[1], "Performance");
    }

    #[test]
    fn test_categories_limited_to_three() {
        let analyzer = FeedbackAnalyzer::new();
        let result = analyzer
            .analyze("interface slow support quality price bug delivery email font password");

        assert_eq!(result.categories.len(), 3);
    }

    #[test]
    fn test_keyword_extraction_by_frequency() {
        let analyzer = FeedbackAnalyzer::new();
        let result = analyzer.analyze("checkout checkout checkout payment payment receipt");

        assert_eq!(result.keywords[0], "checkout");
        assert_eq!(result.keywords[1], "payment");
        assert_eq!(result.keywords[2], "receipt");
    }

    #[test]
    fn test_keywords_skip_stop_words_and_short_tokens() {
        let analyzer = FeedbackAnalyzer::new();
        let result = analyzer.analyze("this is very with just like the app map");

        // "this"等のストップワード、長さ3以下のトークンは含まれない
        assert!(result.keywords.is_empty());
    }

    #[test]
    fn test_keywords_limited_to_five() {
        let analyzer = FeedbackAnalyzer::new();
        let result =
            analyzer.analyze("alpha bravo charlie delta echoes foxtrot golfer hotels india");

        assert_eq!(result.keywords.len(), 5);
    }

    #[test]
    fn test_emotion_scores() {
        let analyzer = FeedbackAnalyzer::new();
        let result = analyzer.analyze("I was so happy and excited, what a delight");

        // happy + excited + delight = 3ヒット → 0.9
        assert!((result.emotions.joy - 0.9).abs() < 1e-9);
        assert_eq!(result.emotions.anger, 0.0);
    }

    #[test]
    fn test_emotion_score_clamped_to_one() {
        let analyzer = FeedbackAnalyzer::new();
        let result =
            analyzer.analyze("happy glad delighted love enjoying excited wonderful pleased");

        assert_eq!(result.emotions.joy, 1.0);
    }

    #[test]
    fn test_lexicons_are_disjoint() {
        let positive = FeedbackAnalyzer::build_positive_lexicon();
        let negative = FeedbackAnalyzer::build_negative_lexicon();
        let neutral = FeedbackAnalyzer::build_neutral_lexicon();

        assert!(positive.is_disjoint(&negative));
        assert!(positive.is_disjoint(&neutral));
        assert!(negative.is_disjoint(&neutral));
    }
}
