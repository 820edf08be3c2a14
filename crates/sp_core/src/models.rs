use std::fmt;

use async_trait::async_trait;
use tracing::warn;

use crate::error::ClassifierError;
use crate::sentiment::Sentiment;

#[async_trait]
pub trait SentimentClassifier: Send + Sync + fmt::Debug {
    /// Short name of the backend, used in logs
    fn name(&self) -> &str;

    /// Identifier of the model the backend targets
    fn model_id(&self) -> &str;

    /// Classify a piece of text
    async fn classify(&self, text: &str) -> Result<Sentiment, ClassifierError>;

    /// Classify a piece of text, degrading every failure to neutral
    async fn classify_or_neutral(&self, text: &str) -> Sentiment {
        match self.classify(text).await {
            Ok(sentiment) => sentiment,
            Err(e) => {
                warn!(
                    classifier = self.name(),
                    model = self.model_id(),
                    timeout = e.is_timeout(),
                    "Classification degraded to neutral: {}",
                    e
                );
                Sentiment::Neutral
            }
        }
    }
}
