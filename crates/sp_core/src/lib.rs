pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod sentiment;
pub mod sources;
pub mod types;

pub use config::Config;
pub use error::{ClassifierError, Error};
pub use models::SentimentClassifier;
pub use sentiment::{normalize_label, Sentiment, SentimentCounts};
pub use sources::NewsSource;
pub use types::{AggregationResult, Article, GlobalNewsResponse, KoreanNewsResponse, Market};

pub type Result<T> = std::result::Result<T, Error>;
