//! 開発・テスト用のモック回答データ生成ツール
//!
//! tests/data/feedback_responses.ndjson を生成する。

use chrono::{Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fs::File;
use std::io::Write;

use feedlens::{AnswerValue, FeedbackAnswer, FeedbackResponse};

/// ポジティブなコメントのテンプレート
const POSITIVE_COMMENTS: &[&str] = &[
    "The interface is excellent and really easy to use",
    "Amazing support, the staff answered within minutes",
    "Great value, the subscription price is perfect for us",
    "Fast and reliable, the loading speed is impressive",
    "Wonderful product quality, the build feels durable",
];

/// ネガティブなコメントのテンプレート
const NEGATIVE_COMMENTS: &[&str] = &[
    "The checkout is broken and the error keeps coming back",
    "Terrible delivery experience, the package arrived damaged",
    "The app is slow and laggy, loading takes forever",
    "Support was useless and the response was disappointing",
    "Confusing navigation, the menu layout is frustrating",
];

/// 中立的なコメントのテンプレート
const NEUTRAL_COMMENTS: &[&str] = &[
    "The product is okay, fairly average overall",
    "Decent experience, the standard features are acceptable",
    "Probably fine for most users, somewhat typical design",
];

fn main() -> anyhow::Result<()> {
    let mut rng = rand::thread_rng();
    let mut responses = Vec::new();
    let start = Utc::now() - Duration::days(30);

    for i in 0..40i64 {
        let pool = match rng.gen_range(0..3) {
            0 => POSITIVE_COMMENTS,
            1 => NEGATIVE_COMMENTS,
            _ => NEUTRAL_COMMENTS,
        };
        let comment = pool.choose(&mut rng).expect("non-empty template pool");

        let mut response = FeedbackResponse::new(
            "form_demo",
            vec![
                FeedbackAnswer::text("q_comment", *comment),
                FeedbackAnswer {
                    question_id: "q_rating".to_string(),
                    value: AnswerValue::Rating(rng.gen_range(1..=5)),
                },
            ],
        );
        // 30日分に分散させる
        response.submitted_at = start + Duration::hours(i * 18);
        responses.push(response);
    }

    // tests/data/ディレクトリを作成
    std::fs::create_dir_all("tests/data")?;

    let path = "tests/data/feedback_responses.ndjson";
    let mut file = File::create(path)?;
    for response in &responses {
        writeln!(file, "{}", serde_json::to_string(response)?)?;
    }

    println!("✅ Generated {} mock responses at {}", responses.len(), path);
    Ok(())
}
