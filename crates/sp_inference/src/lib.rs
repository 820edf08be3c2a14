pub mod models;

pub use models::{create_classifier, DummyClassifier, HuggingFaceClassifier, Language};

pub mod prelude {
    pub use super::models::{create_classifier, Language};
    pub use sp_core::{ClassifierError, Config, Result, Sentiment, SentimentClassifier};
}
