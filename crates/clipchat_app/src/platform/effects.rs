use std::sync::mpsc;
use std::thread;

use clipchat_core::{Effect, Msg, PlaceholderId, RequestFailure};
use clipchat_engine::{ClientError, EngineEvent, EngineHandle, FailureKind, RequestTag};
use clipchat_logging::{chat_debug, chat_info, chat_warn};

use super::app::AppEvent;

/// The single ingestion of a session always uses request number zero.
const INGESTION_REQUEST: u64 = 0;

/// Executes core effects and feeds settlements back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
    events: mpsc::Sender<AppEvent>,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, events: mpsc::Sender<AppEvent>) -> Self {
        let runner = Self { engine, events };
        runner.spawn_event_loop();
        runner
    }

    pub fn run(&self, effect: Effect) {
        match effect {
            Effect::SubmitIngestion { epoch, reference } => {
                chat_info!("SubmitIngestion epoch={} reference={}", epoch, reference);
                let tag = RequestTag {
                    session: epoch,
                    request: INGESTION_REQUEST,
                };
                self.engine.submit_ingestion(tag, reference);
            }
            Effect::ScheduleReveal { epoch, after } => {
                let events = self.events.clone();
                thread::spawn(move || {
                    thread::sleep(after);
                    let _ = events.send(AppEvent::Msg(Msg::RevealConversation { epoch }));
                });
            }
            Effect::AskQuestion {
                epoch,
                placeholder,
                question,
            } => {
                chat_info!(
                    "AskQuestion epoch={} placeholder={} question_len={}",
                    epoch,
                    placeholder,
                    question.len()
                );
                let tag = RequestTag {
                    session: epoch,
                    request: placeholder.0,
                };
                self.engine.ask(tag, question);
            }
            Effect::RevealLatestTurn { turn } => {
                // Output is appended and flushed after every frame; the newest turn is already visible.
                chat_debug!("RevealLatestTurn turn={}", turn);
            }
        }
    }

    fn spawn_event_loop(&self) {
        let engine = self.engine.clone();
        let events = self.events.clone();
        thread::spawn(move || {
            while let Some(event) = engine.recv() {
                if events.send(AppEvent::Msg(settlement_msg(event))).is_err() {
                    break;
                }
            }
        });
    }
}

fn settlement_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::IngestionCompleted { tag, result } => Msg::IngestionSettled {
            epoch: tag.session,
            result: result.map(|_receipt| ()).map_err(request_failure),
        },
        EngineEvent::AnswerCompleted { tag, result } => Msg::AnswerSettled {
            epoch: tag.session,
            placeholder: PlaceholderId(tag.request),
            result: result.map(|chat| chat.answer).map_err(request_failure),
        },
    }
}

fn request_failure(err: ClientError) -> RequestFailure {
    chat_warn!("Request failed: {}", err);
    match err.kind {
        FailureKind::HttpStatus(status) => RequestFailure::Rejected {
            status,
            detail: err.detail,
        },
        FailureKind::Unparsable => RequestFailure::Unparsable,
        FailureKind::Network | FailureKind::InvalidEndpoint => RequestFailure::Transport,
    }
}
