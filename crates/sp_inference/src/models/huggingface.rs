//! Text classification through the Hugging Face serverless inference API.
//!
//! One client serves every sentiment model; the English and Korean variants
//! differ only in the model id they post to.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sp_core::{normalize_label, ClassifierError, Config, Result, Sentiment, SentimentClassifier};
use tracing::debug;

use super::Language;

/// Inputs longer than this are cut, not rejected.
pub const MAX_INPUT_CHARS: usize = 512;

const LOG_BODY_CHARS: usize = 200;

#[derive(Serialize)]
struct ClassifyRequest<'a> {
    inputs: &'a str,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    label: String,
    score: f64,
}

#[derive(Clone)]
pub struct HuggingFaceClassifier {
    http: Client,
    api_key: Option<String>,
    base_url: String,
    model_id: String,
}

impl HuggingFaceClassifier {
    pub fn new(
        model_id: impl Into<String>,
        api_key: Option<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        let base_url: String = base_url.into();
        Ok(Self {
            http,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model_id: model_id.into(),
        })
    }

    pub fn for_language(language: Language, config: &Config) -> Result<Self> {
        Self::new(
            language.model_id(config),
            config.huggingface_api_key.clone(),
            config.huggingface_base_url.clone(),
            config.classify_timeout,
        )
    }

    pub fn english(config: &Config) -> Result<Self> {
        Self::for_language(Language::English, config)
    }

    pub fn korean(config: &Config) -> Result<Self> {
        Self::for_language(Language::Korean, config)
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}", self.base_url, self.model_id)
    }
}

impl fmt::Debug for HuggingFaceClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HuggingFaceClassifier")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model_id", &self.model_id)
            .finish()
    }
}

#[async_trait]
impl SentimentClassifier for HuggingFaceClassifier {
    fn name(&self) -> &str {
        "huggingface"
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn classify(&self, text: &str) -> std::result::Result<Sentiment, ClassifierError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ClassifierError::MissingApiKey)?;

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&ClassifyRequest {
                inputs: truncate_chars(text, MAX_INPUT_CHARS),
            })
            .send()
            .await?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ClassifierError::Status {
                status: status.as_u16(),
                body: truncate_chars(&body, LOG_BODY_CHARS).to_string(),
            });
        }
        if !content_type.contains("json") {
            return Err(ClassifierError::NotJson {
                content_type,
                body: truncate_chars(&body, LOG_BODY_CHARS).to_string(),
            });
        }

        let candidates = parse_candidates(&body)?;
        let best = best_candidate(&candidates).ok_or(ClassifierError::EmptyResponse)?;
        debug!(model = %self.model_id, label = %best.label, score = best.score, "Classified text");

        Ok(normalize_label(Some(&best.label)))
    }
}

/// The API answers a single input with `[[{label, score}, ...]]`.
fn parse_candidates(body: &str) -> std::result::Result<Vec<Candidate>, ClassifierError> {
    let nested: Vec<Vec<Candidate>> =
        serde_json::from_str(body).map_err(|e| ClassifierError::Decode {
            message: e.to_string(),
            body: truncate_chars(body, LOG_BODY_CHARS).to_string(),
        })?;
    Ok(nested.into_iter().next().unwrap_or_default())
}

/// Highest score wins; among equal scores the first one listed is kept.
fn best_candidate(candidates: &[Candidate]) -> Option<&Candidate> {
    candidates.iter().fold(None, |best: Option<&Candidate>, candidate| match best {
        Some(current) if current.score >= candidate.score => Some(current),
        _ => Some(candidate),
    })
}

pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MODEL: &str = "cardiffnlp/twitter-roberta-base-sentiment-latest";

    fn classifier(server: &MockServer, api_key: Option<&str>) -> HuggingFaceClassifier {
        HuggingFaceClassifier::new(
            MODEL,
            api_key.map(str::to_string),
            server.uri(),
            Duration::from_secs(2),
        )
        .unwrap()
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abc", 5), "abc");
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("", 3), "");
        assert_eq!(truncate_chars("삼성전자주가", 2), "삼성");
    }

    #[test]
    fn test_best_candidate_ties_keep_first() {
        let candidates = vec![
            Candidate { label: "neutral".to_string(), score: 0.4 },
            Candidate { label: "positive".to_string(), score: 0.4 },
            Candidate { label: "negative".to_string(), score: 0.2 },
        ];
        assert_eq!(best_candidate(&candidates).unwrap().label, "neutral");
        assert!(best_candidate(&[]).is_none());
    }

    #[tokio::test]
    async fn test_classify_picks_highest_score() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/models/{}", MODEL)))
            .and(header("Authorization", "Bearer test_key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([[
                {"label": "negative", "score": 0.1},
                {"label": "positive", "score": 0.8},
                {"label": "neutral", "score": 0.1}
            ]])))
            .expect(1)
            .mount(&server)
            .await;

        let result = classifier(&server, Some("test_key")).classify("Great quarter").await;
        assert_eq!(result.unwrap(), Sentiment::Positive);
    }

    #[tokio::test]
    async fn test_classify_normalizes_ordinal_labels() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([[
                {"label": "LABEL_0", "score": 0.7},
                {"label": "LABEL_2", "score": 0.3}
            ]])))
            .mount(&server)
            .await;

        let result = classifier(&server, Some("k")).classify("Shares plunge").await;
        assert_eq!(result.unwrap(), Sentiment::Negative);
    }

    #[tokio::test]
    async fn test_classify_truncates_input() {
        let server = MockServer::start().await;
        let long_text = "a".repeat(1000);
        Mock::given(method("POST"))
            .and(body_json(serde_json::json!({"inputs": "a".repeat(MAX_INPUT_CHARS)})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([[{"label": "neutral", "score": 0.9}]])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let result = classifier(&server, Some("k")).classify(&long_text).await;
        assert_eq!(result.unwrap(), Sentiment::Neutral);
    }

    #[tokio::test]
    async fn test_classify_accepts_empty_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_json(serde_json::json!({"inputs": ""})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([[{"label": "neutral", "score": 1.0}]])),
            )
            .mount(&server)
            .await;

        let result = classifier(&server, Some("k")).classify("").await;
        assert_eq!(result.unwrap(), Sentiment::Neutral);
    }

    #[tokio::test]
    async fn test_missing_api_key_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let classifier = classifier(&server, None);
        let result = classifier.classify("text").await;
        assert!(matches!(result, Err(ClassifierError::MissingApiKey)));
        assert_eq!(classifier.classify_or_neutral("text").await, Sentiment::Neutral);
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("Model is loading"))
            .mount(&server)
            .await;

        let result = classifier(&server, Some("k")).classify("text").await;
        match result {
            Err(ClassifierError::Status { status, body }) => {
                assert_eq!(status, 503);
                assert_eq!(body, "Model is loading");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html>rate limited by upstream gateway</html>"),
            )
            .mount(&server)
            .await;

        let err = classifier(&server, Some("k")).classify("text").await.unwrap_err();
        match &err {
            ClassifierError::NotJson { content_type, body } => {
                assert!(content_type.starts_with("text/plain"));
                assert_eq!(body, "<html>rate limited by upstream gateway</html>");
            }
            other => panic!("expected non-JSON error, got {:?}", other),
        }
        assert!(err.to_string().contains("rate limited by upstream gateway"));
    }

    #[tokio::test]
    async fn test_malformed_and_empty_bodies() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"error": "bad request"})),
            )
            .mount(&server)
            .await;
        let result = classifier(&server, Some("k")).classify("text").await;
        assert!(matches!(result, Err(ClassifierError::Decode { .. })));

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([[]])))
            .mount(&server)
            .await;
        let result = classifier(&server, Some("k")).classify("text").await;
        assert!(matches!(result, Err(ClassifierError::EmptyResponse)));

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;
        let result = classifier(&server, Some("k")).classify("text").await;
        assert!(matches!(result, Err(ClassifierError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_timeout_degrades_to_neutral() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([[{"label": "positive", "score": 1.0}]]))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let classifier = HuggingFaceClassifier::new(
            MODEL,
            Some("k".to_string()),
            server.uri(),
            Duration::from_millis(50),
        )
        .unwrap();
        let result = classifier.classify("text").await;
        assert!(result.as_ref().is_err_and(|e| e.is_timeout()), "got {:?}", result);
        assert_eq!(classifier.classify_or_neutral("text").await, Sentiment::Neutral);
    }

    #[test]
    fn test_language_variants_share_settings() {
        let config = Config {
            huggingface_api_key: Some("secret".to_string()),
            ..Config::default()
        };
        let english = HuggingFaceClassifier::english(&config).unwrap();
        let korean = HuggingFaceClassifier::korean(&config).unwrap();
        assert_eq!(english.model_id(), config.english_model);
        assert_eq!(korean.model_id(), config.korean_model);
        assert_eq!(english.base_url, korean.base_url);
        assert!(!format!("{:?}", english).contains("secret"));
    }
}
