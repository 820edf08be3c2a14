use std::sync::Arc;

use sp_core::{Config, Result, Sentiment, SentimentClassifier};

pub mod dummy;
pub mod huggingface;

pub use dummy::DummyClassifier;
pub use huggingface::HuggingFaceClassifier;

/// Text language, which selects the sentiment model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Language {
    #[value(name = "en", alias = "english")]
    English,
    #[value(name = "ko", alias = "korean")]
    Korean,
}

impl Language {
    pub fn model_id<'a>(&self, config: &'a Config) -> &'a str {
        match self {
            Language::English => &config.english_model,
            Language::Korean => &config.korean_model,
        }
    }
}

/// Builds the classifier for `language`. With `offline` set, every text gets
/// that label and no request leaves the process.
pub fn create_classifier(
    language: Language,
    config: &Config,
    offline: Option<Sentiment>,
) -> Result<Arc<dyn SentimentClassifier>> {
    if let Some(sentiment) = offline {
        return Ok(Arc::new(DummyClassifier::new(sentiment)));
    }
    if config.huggingface_api_key.is_none() {
        tracing::warn!(
            model = language.model_id(config),
            "No inference API key configured, every article will be classified as neutral"
        );
    }
    Ok(Arc::new(HuggingFaceClassifier::for_language(language, config)?))
}
