use crate::{
    AppState, Effect, Key, Msg, Phase, PlaceholderId, RequestFailure, SessionEpoch, Sender,
    Severity, REVEAL_DELAY,
};

const INVALID_REFERENCE: &str = "Please enter a valid reference";
const INGESTION_IN_PROGRESS: &str =
    "Processing transcript and embedding... This may take a moment.";
const INGESTION_SUCCEEDED: &str = "Success! Ready to chat.";
const INGESTION_FAILED: &str = "Failed to process video";
const ANSWER_PENDING: &str = "Thinking...";
const ANSWER_FAILED: &str = "Failed to get answer";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ReferenceInputChanged(text) => {
            // The input is disabled outside `Input`.
            if state.phase() == Phase::Input {
                state.set_reference_input(text);
            }
            Vec::new()
        }
        Msg::SubmitReferenceClicked => submit_reference(&mut state),
        Msg::IngestionSettled { epoch, result } => {
            if !is_current(&state, epoch) {
                return (state, Vec::new());
            }
            ingestion_settled(&mut state, result)
        }
        Msg::RevealConversation { epoch } => {
            if is_current(&state, epoch) {
                state.reveal_conversation();
            }
            Vec::new()
        }
        Msg::QuestionInputChanged(text) => {
            if state.phase() == Phase::Ready {
                state.set_question_input(text);
            }
            Vec::new()
        }
        Msg::AskClicked | Msg::KeyPressed(Key::Enter) => ask_question(&mut state),
        Msg::KeyPressed(Key::Other) => Vec::new(),
        Msg::AnswerSettled {
            epoch,
            placeholder,
            result,
        } => {
            if !is_current(&state, epoch) {
                return (state, Vec::new());
            }
            answer_settled(&mut state, placeholder, result)
        }
        Msg::ResetClicked => {
            state.reset();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn submit_reference(state: &mut AppState) -> Vec<Effect> {
    // Submit is disabled while processing and after the reveal.
    if state.phase() != Phase::Input {
        return Vec::new();
    }

    let reference = state.reference_input().trim().to_owned();
    if reference.is_empty() {
        state.present_status(INVALID_REFERENCE, Severity::Error);
        return Vec::new();
    }

    state.begin_ingestion();
    state.present_status(INGESTION_IN_PROGRESS, Severity::Neutral);
    vec![Effect::SubmitIngestion {
        epoch: state.epoch(),
        reference,
    }]
}

fn ingestion_settled(state: &mut AppState, result: Result<(), RequestFailure>) -> Vec<Effect> {
    match result {
        Ok(()) => {
            if !state.ingestion_succeeded() {
                return Vec::new();
            }
            state.present_status(INGESTION_SUCCEEDED, Severity::Success);
            vec![Effect::ScheduleReveal {
                epoch: state.epoch(),
                after: REVEAL_DELAY,
            }]
        }
        Err(failure) => {
            if state.ingestion_failed() {
                state.present_status(error_text(&failure, INGESTION_FAILED), Severity::Error);
            }
            Vec::new()
        }
    }
}

fn ask_question(state: &mut AppState) -> Vec<Effect> {
    if state.phase() != Phase::Ready {
        return Vec::new();
    }

    let question = state.question_input().trim().to_owned();
    if question.is_empty() {
        return Vec::new();
    }

    state.append_turn(Sender::User, question.clone());
    state.set_question_input(String::new());
    let (placeholder, turn) = state.append_placeholder(ANSWER_PENDING);

    vec![
        Effect::AskQuestion {
            epoch: state.epoch(),
            placeholder,
            question,
        },
        Effect::RevealLatestTurn { turn },
    ]
}

fn answer_settled(
    state: &mut AppState,
    placeholder: PlaceholderId,
    result: Result<String, RequestFailure>,
) -> Vec<Effect> {
    let text = match result {
        Ok(answer) => answer,
        Err(failure) => error_text(&failure, ANSWER_FAILED),
    };
    let turn = state.resolve_placeholder(placeholder, text);
    vec![Effect::RevealLatestTurn { turn }]
}

fn error_text(failure: &RequestFailure, fallback: &str) -> String {
    format!("Error: {}", failure.detail().unwrap_or(fallback))
}

/// Settlements issued before the last reset belong to a discarded session.
fn is_current(state: &AppState, epoch: SessionEpoch) -> bool {
    state.epoch() == epoch
}
