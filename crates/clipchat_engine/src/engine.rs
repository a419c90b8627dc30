use std::io;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use clipchat_logging::{chat_debug, chat_warn};

use crate::client::Backend;
use crate::{EngineEvent, RequestTag};

enum EngineCommand {
    Ingest { tag: RequestTag, reference: String },
    Ask { tag: RequestTag, question: String },
}

impl EngineCommand {
    fn tag(&self) -> RequestTag {
        match self {
            EngineCommand::Ingest { tag, .. } | EngineCommand::Ask { tag, .. } => *tag,
        }
    }
}

/// Runs requests on a background tokio runtime and reports settlements.
///
/// Every command settles exactly once with a matching event. Requests run
/// concurrently, so events arrive in completion order.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(backend: Arc<dyn Backend>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .thread_name("clipchat-engine")
            .build()?;

        thread::Builder::new()
            .name("clipchat-engine-commands".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let backend = backend.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(backend.as_ref(), command, event_tx).await;
                    });
                }
                chat_debug!("Engine command channel closed");
            })?;

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    /// Returns false when the engine has stopped and the request was dropped.
    pub fn submit_ingestion(&self, tag: RequestTag, reference: impl Into<String>) -> bool {
        self.send(EngineCommand::Ingest {
            tag,
            reference: reference.into(),
        })
    }

    /// Returns false when the engine has stopped and the request was dropped.
    pub fn ask(&self, tag: RequestTag, question: impl Into<String>) -> bool {
        self.send(EngineCommand::Ask {
            tag,
            question: question.into(),
        })
    }

    fn send(&self, command: EngineCommand) -> bool {
        let tag = command.tag();
        if self.cmd_tx.send(command).is_err() {
            chat_warn!("Engine stopped; dropping request {:?}", tag);
            return false;
        }
        true
    }

    /// Blocks until the next settlement. `None` once the engine is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv().ok()
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }
}

async fn handle_command(
    backend: &dyn Backend,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::Ingest { tag, reference } => EngineEvent::IngestionCompleted {
            tag,
            result: backend.ingest(&reference).await,
        },
        EngineCommand::Ask { tag, question } => EngineEvent::AnswerCompleted {
            tag,
            result: backend.ask(&question).await,
        },
    };
    let _ = event_tx.send(event);
}
