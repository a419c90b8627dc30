use std::sync::Arc;
use std::time::Duration;

use clipchat_engine::{
    Backend, ChatAnswer, ClientError, ClientSettings, EngineEvent, EngineHandle, FailureKind,
    IngestReceipt, ReqwestBackend, RequestTag,
};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Answers by echoing; questions starting with "slow" take longer.
struct EchoBackend;

#[async_trait::async_trait]
impl Backend for EchoBackend {
    async fn ingest(&self, reference: &str) -> Result<IngestReceipt, ClientError> {
        Ok(IngestReceipt {
            status: Some("success".to_string()),
            message: Some(reference.to_string()),
        })
    }

    async fn ask(&self, question: &str) -> Result<ChatAnswer, ClientError> {
        if question.starts_with("slow") {
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
        Ok(ChatAnswer {
            answer: format!("echo: {question}"),
        })
    }
}

const TAG: RequestTag = RequestTag {
    session: 3,
    request: 9,
};

#[test]
fn ingestion_settles_with_its_tag() {
    let engine = EngineHandle::new(Arc::new(EchoBackend)).expect("engine starts");
    engine.submit_ingestion(TAG, "https://youtu.be/abc");

    let event = engine.recv().expect("settlement");
    assert_eq!(
        event,
        EngineEvent::IngestionCompleted {
            tag: TAG,
            result: Ok(IngestReceipt {
                status: Some("success".to_string()),
                message: Some("https://youtu.be/abc".to_string()),
            }),
        }
    );
}

#[test]
fn answers_arrive_in_completion_order() {
    let engine = EngineHandle::new(Arc::new(EchoBackend)).expect("engine starts");
    let slow = RequestTag {
        session: 0,
        request: 1,
    };
    let fast = RequestTag {
        session: 0,
        request: 2,
    };
    engine.ask(slow, "slow question");
    engine.ask(fast, "quick question");

    let first = engine.recv().expect("first settlement");
    let second = engine.recv().expect("second settlement");
    let tags: Vec<_> = [first, second]
        .into_iter()
        .map(|event| match event {
            EngineEvent::AnswerCompleted { tag, result } => {
                assert!(result.is_ok());
                tag
            }
            other => panic!("unexpected event {other:?}"),
        })
        .collect();
    assert_eq!(tags, vec![fast, slow]);
    assert!(engine.try_recv().is_none());
}

#[test]
fn engine_reports_http_failures_from_reqwest_backend() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "detail": "No video processed yet. Please process a video first."
            })))
            .mount(&server)
            .await;
        server
    });

    let settings = ClientSettings {
        base_url: format!("{}/api/", server.uri()),
        ..ClientSettings::default()
    };
    let backend = ReqwestBackend::new(&settings).unwrap();
    let engine = EngineHandle::new(Arc::new(backend)).expect("engine starts");
    engine.ask(TAG, "anything");

    match engine.recv().expect("settlement") {
        EngineEvent::AnswerCompleted { tag, result } => {
            assert_eq!(tag, TAG);
            let err = result.unwrap_err();
            assert_eq!(err.kind, FailureKind::HttpStatus(400));
            assert_eq!(
                err.detail.as_deref(),
                Some("No video processed yet. Please process a video first.")
            );
        }
        other => panic!("unexpected event {other:?}"),
    }
    drop(server);
}
