use std::fmt;

use async_trait::async_trait;
use sp_core::{ClassifierError, Sentiment, SentimentClassifier};

/// Offline classifier that answers every text with the same label.
pub struct DummyClassifier {
    sentiment: Sentiment,
}

impl fmt::Debug for DummyClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyClassifier")
            .field("sentiment", &self.sentiment)
            .finish()
    }
}

impl DummyClassifier {
    pub fn new(sentiment: Sentiment) -> Self {
        Self { sentiment }
    }
}

impl Default for DummyClassifier {
    fn default() -> Self {
        Self::new(Sentiment::Neutral)
    }
}

#[async_trait]
impl SentimentClassifier for DummyClassifier {
    fn name(&self) -> &str {
        "dummy"
    }

    fn model_id(&self) -> &str {
        "dummy"
    }

    async fn classify(&self, _text: &str) -> Result<Sentiment, ClassifierError> {
        Ok(self.sentiment)
    }
}
