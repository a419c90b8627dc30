use clipchat_logging::{chat_debug, chat_info, chat_warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::types::ErrorBody;
use crate::{ChatAnswer, ChatRequest, ClientError, FailureKind, IngestReceipt, IngestRequest};

/// Where the two endpoints live. No timeouts: a request settles or waits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    pub base_url: String,
    pub ingest_path: String,
    pub chat_path: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/api/".to_string(),
            ingest_path: "process".to_string(),
            chat_path: "chat".to_string(),
        }
    }
}

/// The remote ingestion and question-answering collaborators.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// Submits a video reference for ingestion.
    async fn ingest(&self, reference: &str) -> Result<IngestReceipt, ClientError>;

    /// Asks one question against the ingested content.
    async fn ask(&self, question: &str) -> Result<ChatAnswer, ClientError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    client: reqwest::Client,
    ingest_url: Url,
    chat_url: Url,
}

impl ReqwestBackend {
    pub fn new(settings: &ClientSettings) -> Result<Self, ClientError> {
        let base = parse_base(&settings.base_url)?;
        let ingest_url = join_endpoint(&base, &settings.ingest_path)?;
        let chat_url = join_endpoint(&base, &settings.chat_path)?;

        let client = reqwest::Client::builder()
            .build()
            .map_err(|err| ClientError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            client,
            ingest_url,
            chat_url,
        })
    }

    pub fn ingest_url(&self) -> &Url {
        &self.ingest_url
    }

    pub fn chat_url(&self) -> &Url {
        &self.chat_url
    }

    /// POSTs `payload` as JSON and returns the body of a success response.
    async fn post_json<P>(&self, url: &Url, payload: &P) -> Result<Vec<u8>, ClientError>
    where
        P: Serialize + Sync,
    {
        let body = serde_json::to_vec(payload)
            .map_err(|err| ClientError::new(FailureKind::Unparsable, err.to_string()))?;

        let response = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        chat_debug!("POST {} -> {} ({} bytes)", url, status, bytes.len());

        if !status.is_success() {
            let detail = serde_json::from_slice::<ErrorBody>(&bytes)
                .ok()
                .and_then(|body| body.detail);
            return Err(
                ClientError::new(FailureKind::HttpStatus(status.as_u16()), status.to_string())
                    .with_detail(detail),
            );
        }

        Ok(bytes.to_vec())
    }
}

#[async_trait::async_trait]
impl Backend for ReqwestBackend {
    async fn ingest(&self, reference: &str) -> Result<IngestReceipt, ClientError> {
        chat_info!("Submitting reference for ingestion: {}", reference);
        let body = self
            .post_json(&self.ingest_url, &IngestRequest { url: reference })
            .await
            .inspect_err(|err| chat_warn!("Ingestion failed: {}", err))?;

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(IngestReceipt::default());
        }
        let value: serde_json::Value = serde_json::from_slice(&body)
            .map_err(|err| ClientError::new(FailureKind::Unparsable, err.to_string()))?;
        // Informational fields only; an unexpected shape is still a success.
        let receipt: IngestReceipt = serde_json::from_value(value).unwrap_or_default();
        chat_info!("Ingestion succeeded: {:?}", receipt);
        Ok(receipt)
    }

    async fn ask(&self, question: &str) -> Result<ChatAnswer, ClientError> {
        chat_info!("Asking question ({} chars)", question.chars().count());
        let body = self
            .post_json(&self.chat_url, &ChatRequest { question })
            .await
            .inspect_err(|err| chat_warn!("Chat request failed: {}", err))?;

        serde_json::from_slice::<ChatAnswer>(&body).map_err(|err| {
            chat_warn!("Chat response missing answer: {}", err);
            ClientError::new(FailureKind::Unparsable, err.to_string())
        })
    }
}

fn parse_base(raw: &str) -> Result<Url, ClientError> {
    // `Url::join` replaces the last segment unless the base ends in '/'.
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    Url::parse(&normalized)
        .map_err(|err| ClientError::new(FailureKind::InvalidEndpoint, err.to_string()))
}

fn join_endpoint(base: &Url, path: &str) -> Result<Url, ClientError> {
    base.join(path.trim_start_matches('/'))
        .map_err(|err| ClientError::new(FailureKind::InvalidEndpoint, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> ClientError {
    if err.is_decode() {
        return ClientError::new(FailureKind::Unparsable, err.to_string());
    }
    ClientError::new(FailureKind::Network, err.to_string())
}
