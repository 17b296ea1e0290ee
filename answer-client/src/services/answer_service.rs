//! HTTP client for the policy answering service.
//!
//! Endpoints are derived from [`AnswerServiceConfig::base_url`]:
//! - `POST {base}/ask`            : answer a question (with citations)
//! - `GET  {base}/docs`           : list indexed policy documents
//! - `GET  {base}/docs/{doc_id}`  : metadata for one document
//! - `POST {base}/feedback`       : rate an answer
//!
//! Failure statuses are normalized into [`ServiceError`], whose
//! [`ServiceError::user_message`] is the server's `detail` or `"Server error"`.
//!
//! # Examples
//!
//! ```no_run
//! use answer_client::config::default_config::config_from_env;
//! use answer_client::services::answer_service::AnswerService;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let svc = AnswerService::new(config_from_env()?)?;
//! let answer = svc.submit("How many casual leaves do I get per year", 5).await?;
//! println!("{}", answer.text().unwrap_or("no answer found"));
//! # Ok(()) }
//! ```

use std::time::{Duration, Instant};

use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    backend::{AnswerBackend, SubmitFuture},
    config::service_config::AnswerServiceConfig,
    error_handler::{
        AnswerError, ConfigError, Result, ServiceError, make_snippet, validate_http_endpoint,
    },
    models::{Answer, AskRequest, DocList, DocumentInfo, Feedback},
};

const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-api-key");

/// Thin client for the answering service.
///
/// Keeps one preconfigured `reqwest::Client` (default headers, optional
/// timeout) and is cheap to share behind an `Arc`.
#[derive(Debug)]
pub struct AnswerService {
    client: reqwest::Client,
    cfg: AnswerServiceConfig,
    url_ask: String,
    url_docs: String,
    url_feedback: String,
}

impl AnswerService {
    /// Creates a new [`AnswerService`] from the given config.
    ///
    /// # Errors
    /// - [`ConfigError::InvalidFormat`] if the base URL or API key is unusable
    /// - [`AnswerError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: AnswerServiceConfig) -> Result<Self> {
        validate_http_endpoint("POLICY_API_BASE", cfg.base_url.trim())?;

        let mut headers = auth_headers(&cfg)?;
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(secs) = cfg.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        let url_ask = cfg.url("/ask");
        let url_docs = cfg.url("/docs");
        let url_feedback = cfg.url("/feedback");

        info!(
            base_url = %cfg.base_url,
            top_k = cfg.top_k,
            has_api_key = cfg.api_key.is_some(),
            timeout_secs = ?cfg.timeout_secs,
            "AnswerService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_ask,
            url_docs,
            url_feedback,
        })
    }

    /// The config this client was built from.
    pub fn config(&self) -> &AnswerServiceConfig {
        &self.cfg
    }

    /// Submits a question via `POST /ask`.
    ///
    /// The question is sent as-is; gating empty input is the caller's job.
    ///
    /// # Errors
    /// - [`AnswerError::Service`] for non-2xx responses
    /// - [`AnswerError::HttpTransport`] for client/network failures
    /// - [`AnswerError::Decode`] if a 2xx body is not a valid answer
    #[instrument(skip_all, fields(top_k = top_k, question_len = question.len()))]
    pub async fn submit(&self, question: &str, top_k: u32) -> Result<Answer> {
        let started = Instant::now();
        let body = AskRequest { question, top_k };

        debug!("POST {}", self.url_ask);
        let resp = self.client.post(&self.url_ask).json(&body).send().await?;
        let answer: Answer = self.decode(resp, &self.url_ask).await?;

        info!(
            has_answer = answer.text().is_some(),
            citations = answer.citations().len(),
            latency_ms = started.elapsed().as_millis(),
            "answer received"
        );
        Ok(answer)
    }

    /// Lists indexed policy documents via `GET /docs`.
    #[instrument(skip_all)]
    pub async fn list_docs(&self) -> Result<DocList> {
        debug!("GET {}", self.url_docs);
        let resp = self.client.get(&self.url_docs).send().await?;
        self.decode(resp, &self.url_docs).await
    }

    /// Fetches metadata for one document via `GET /docs/{doc_id}`.
    #[instrument(skip_all, fields(doc_id = %doc_id))]
    pub async fn document(&self, doc_id: &str) -> Result<DocumentInfo> {
        let url = format!("{}/{}", self.url_docs, urlencoding::encode(doc_id));
        debug!("GET {}", url);
        let resp = self.client.get(&url).send().await?;
        self.decode(resp, &url).await
    }

    /// Records whether an answer was helpful via `POST /feedback`.
    ///
    /// The response body is not inspected beyond its status.
    #[instrument(skip_all, fields(answer_id = %feedback.answer_id, helpful = feedback.helpful))]
    pub async fn send_feedback(&self, feedback: &Feedback) -> Result<()> {
        debug!("POST {}", self.url_feedback);
        let resp = self
            .client
            .post(&self.url_feedback)
            .json(feedback)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(Self::status_error(resp, &self.url_feedback).await.into());
        }
        Ok(())
    }

    /* --------------------- Internals --------------------- */

    async fn decode<T: DeserializeOwned>(&self, resp: reqwest::Response, url: &str) -> Result<T> {
        if !resp.status().is_success() {
            return Err(Self::status_error(resp, url).await.into());
        }

        let bytes = resp.bytes().await?;
        serde_json::from_slice::<T>(&bytes).map_err(|e| {
            warn!(
                %url,
                error = %e,
                snippet = %make_snippet(&String::from_utf8_lossy(&bytes)),
                "failed to decode response body"
            );
            AnswerError::Decode(e.to_string())
        })
    }

    async fn status_error(resp: reqwest::Response, url: &str) -> ServiceError {
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        let err = ServiceError::from_body(status.as_u16(), url, &text);

        error!(
            %status,
            %url,
            snippet = %make_snippet(&text),
            "answering service returned non-success status"
        );
        err
    }
}

/// `X-API-Key` header when a key is configured; empty otherwise.
///
/// Shared by every client that talks to the service.
pub(crate) fn auth_headers(cfg: &AnswerServiceConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    if let Some(key) = &cfg.api_key {
        let value = HeaderValue::from_str(key).map_err(|_| ConfigError::InvalidFormat {
            var: "POLICY_API_KEY",
            reason: "must be a visible ASCII header value",
        })?;
        headers.insert(API_KEY_HEADER, value);
    }
    Ok(headers)
}

impl AnswerBackend for AnswerService {
    fn submit<'a>(&'a self, question: &'a str, top_k: u32) -> SubmitFuture<'a> {
        Box::pin(AnswerService::submit(self, question, top_k))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Json, Router,
        extract::Path,
        http::{HeaderMap as AxumHeaders, StatusCode},
        routing::{get, post},
    };
    use serde_json::{Value, json};

    use super::*;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn service(base_url: String, api_key: Option<&str>) -> AnswerService {
        AnswerService::new(AnswerServiceConfig {
            base_url,
            api_key: api_key.map(str::to_string),
            top_k: 5,
            timeout_secs: Some(5),
            health_timeout_secs: None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn submit_posts_question_and_decodes_answer() {
        let seen: Arc<Mutex<Vec<(Option<String>, Option<String>, Value)>>> = Arc::default();
        let sink = seen.clone();
        let router = Router::new().route(
            "/ask",
            post(move |headers: AxumHeaders, Json(body): Json<Value>| {
                let sink = sink.clone();
                async move {
                    let header = |name: &str| {
                        headers
                            .get(name)
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string)
                    };
                    sink.lock()
                        .unwrap()
                        .push((header("content-type"), header("x-api-key"), body));
                    Json(json!({
                        "answer": "12 per calendar year",
                        "citations": [
                            {"doc_id": "HR-04", "snippet": "Employees accrue 12 casual leave days..."}
                        ],
                        "confidence": 0.91,
                        "disclaimer": "Consult HR for exceptions."
                    }))
                }
            }),
        );
        let svc = service(serve(router).await, Some("k-1"));

        let answer = svc
            .submit("How many casual leaves do I get per year", 5)
            .await
            .unwrap();

        assert_eq!(answer.text(), Some("12 per calendar year"));
        assert_eq!(answer.citations()[0].doc_id, "HR-04");
        assert_eq!(answer.disclaimer(), Some("Consult HR for exceptions."));

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let (content_type, api_key, body) = &seen[0];
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(api_key.as_deref(), Some("k-1"));
        assert_eq!(
            body,
            &json!({"question": "How many casual leaves do I get per year", "top_k": 5})
        );
    }

    #[tokio::test]
    async fn failure_status_uses_detail_verbatim() {
        let router = Router::new().route(
            "/ask",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"detail": "index unavailable"})),
                )
            }),
        );
        let svc = service(serve(router).await, None);

        let err = svc.submit("q", 5).await.unwrap_err();
        match &err {
            AnswerError::Service(e) => assert_eq!(e.status, 500),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.user_message(), "index unavailable");
    }

    #[tokio::test]
    async fn failure_status_without_detail_is_generic() {
        let router = Router::new().route(
            "/ask",
            post(|| async { (StatusCode::BAD_GATEWAY, Json(json!({"error": "upstream"}))) }),
        );
        let svc = service(serve(router).await, None);

        let err = svc.submit("q", 5).await.unwrap_err();
        assert_eq!(err.user_message(), "Server error");
    }

    #[tokio::test]
    async fn malformed_success_body_is_a_decode_error() {
        let router = Router::new().route("/ask", post(|| async { "definitely not json" }));
        let svc = service(serve(router).await, None);

        let err = svc.submit("q", 5).await.unwrap_err();
        assert!(matches!(err, AnswerError::Decode(_)));
        assert!(!err.user_message().is_empty());
    }

    #[tokio::test]
    async fn unreachable_service_is_a_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let svc = service(format!("http://{addr}"), None);

        let err = svc.submit("q", 5).await.unwrap_err();
        assert!(matches!(err, AnswerError::HttpTransport(_)));
        assert!(!err.user_message().is_empty());
    }

    #[tokio::test]
    async fn docs_and_feedback_endpoints() {
        let feedback: Arc<Mutex<Vec<Value>>> = Arc::default();
        let sink = feedback.clone();
        let router = Router::new()
            .route(
                "/docs",
                get(|| async { Json(json!({"docs": ["leave_policy_v3.pdf", "exit_policy_v2.pdf"]})) }),
            )
            .route(
                "/docs/{doc_id}",
                get(|Path(doc_id): Path<String>| async move {
                    Json(json!({"doc_id": doc_id, "title": doc_id, "owner": "HR", "url": null}))
                }),
            )
            .route(
                "/feedback",
                post(move |Json(body): Json<Value>| {
                    let sink = sink.clone();
                    async move {
                        sink.lock().unwrap().push(body);
                        Json(json!({"status": "ok"}))
                    }
                }),
            );
        let svc = service(serve(router).await, None);

        let list = svc.list_docs().await.unwrap();
        assert_eq!(list.docs, ["leave_policy_v3.pdf", "exit_policy_v2.pdf"]);

        let doc = svc.document("leave policy v3.pdf").await.unwrap();
        assert_eq!(doc.doc_id, "leave policy v3.pdf");
        assert_eq!(doc.owner.as_deref(), Some("HR"));
        assert_eq!(doc.url, None);

        svc.send_feedback(&Feedback {
            answer_id: "a-1".into(),
            helpful: false,
            comment: Some("outdated".into()),
        })
        .await
        .unwrap();
        assert_eq!(
            feedback.lock().unwrap().as_slice(),
            [json!({"answer_id": "a-1", "helpful": false, "comment": "outdated"})]
        );
    }

    #[test]
    fn rejects_non_http_base_url() {
        let err = AnswerService::new(AnswerServiceConfig {
            base_url: "ftp://policies".into(),
            api_key: None,
            top_k: 5,
            timeout_secs: None,
            health_timeout_secs: None,
        })
        .unwrap_err();
        assert!(matches!(err, AnswerError::Config(_)));
    }
}
