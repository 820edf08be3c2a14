use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-label tally. All three labels are always present when serialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl SentimentCounts {
    pub fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Negative => self.negative += 1,
            Sentiment::Neutral => self.neutral += 1,
        }
    }

    pub fn get(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }
}

/// Maps a raw classifier label onto a [`Sentiment`].
///
/// Substring matches win first, checked as positive, negative, neutral.
/// Bare class indices follow the classifier's ordering: 0 is negative,
/// 1 is neutral, 2 is positive. Anything else is logged and read as neutral.
pub fn normalize_label(raw: Option<&str>) -> Sentiment {
    let label = match raw.map(str::trim) {
        Some(label) if !label.is_empty() => label.to_lowercase(),
        _ => return Sentiment::Neutral,
    };

    if label.contains("positive") {
        return Sentiment::Positive;
    }
    if label.contains("negative") {
        return Sentiment::Negative;
    }
    if label.contains("neutral") {
        return Sentiment::Neutral;
    }

    match label.as_str() {
        "0" | "label_0" => Sentiment::Negative,
        "1" | "label_1" => Sentiment::Neutral,
        "2" | "label_2" => Sentiment::Positive,
        _ => {
            warn!(label = %label, "Unrecognized sentiment label, treating as neutral");
            Sentiment::Neutral
        }
    }
}
