//! Clipchat engine: the ingestion and chat request contracts and their execution.
mod client;
mod engine;
mod types;

pub use client::{Backend, ClientSettings, ReqwestBackend};
pub use engine::EngineHandle;
pub use types::{
    ChatAnswer, ChatRequest, ClientError, EngineEvent, FailureKind, IngestReceipt, IngestRequest,
    RequestTag,
};
