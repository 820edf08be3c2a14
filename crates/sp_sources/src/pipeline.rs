//! Sentiment aggregation over a batch of articles.
//!
//! Classifications run on at most `concurrency` tasks at once. Each task
//! reports `(index, outcome)`; outcomes are tallied in completion order and
//! the articles are reassembled in input order afterwards. A failed or
//! panicking classification counts as neutral and never aborts the batch.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use sp_core::{
    AggregationResult, Article, ClassifierError, Sentiment, SentimentClassifier, SentimentCounts,
};
use tracing::{debug, info, warn};

pub use sp_core::config::DEFAULT_CLASSIFY_CONCURRENCY;

pub async fn aggregate(
    query_subject: &str,
    articles: Vec<Article>,
    classifier: Arc<dyn SentimentClassifier>,
    concurrency: usize,
) -> AggregationResult {
    if articles.is_empty() {
        return AggregationResult::empty(query_subject);
    }

    let total = articles.len();
    let mut counts = SentimentCounts::default();
    let mut labels = vec![Sentiment::Neutral; total];

    let texts: Vec<(usize, String)> = articles
        .iter()
        .map(|article| article.description.clone())
        .enumerate()
        .collect();

    {
        let mut outcomes = stream::iter(texts)
            .map(|(index, text)| {
                let classifier = Arc::clone(&classifier);
                async move {
                    let task = tokio::spawn(async move { classifier.classify(&text).await });
                    let outcome = match task.await {
                        Ok(result) => result,
                        Err(e) => Err(ClassifierError::Task(e.to_string())),
                    };
                    (index, outcome)
                }
            })
            .buffer_unordered(concurrency.max(1));

        let mut completed = 0;
        while let Some((index, outcome)) = outcomes.next().await {
            let sentiment = outcome.unwrap_or_else(|e| {
                warn!(
                    subject = query_subject,
                    index,
                    model = classifier.model_id(),
                    timeout = e.is_timeout(),
                    "Classification failed, counting as neutral: {}",
                    e
                );
                Sentiment::Neutral
            });
            counts.record(sentiment);
            labels[index] = sentiment;
            completed += 1;
            debug!(subject = query_subject, index, completed, total, %sentiment, "Article classified");
        }
    }

    let articles: Vec<Article> = articles
        .into_iter()
        .zip(labels)
        .map(|(article, sentiment)| article.with_sentiment(sentiment))
        .collect();

    info!(
        subject = query_subject,
        model = classifier.model_id(),
        positive = counts.positive,
        negative = counts.negative,
        neutral = counts.neutral,
        "✨ Aggregated sentiment for {} articles",
        articles.len()
    );

    AggregationResult {
        query_subject: query_subject.to_string(),
        counts,
        articles,
    }
}
