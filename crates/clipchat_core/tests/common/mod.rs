#![allow(dead_code)]

use std::sync::Once;

use clipchat_core::{update, AppState, Effect, Key, Msg, PlaceholderId, RequestFailure};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(clipchat_logging::initialize_for_tests);
}

pub fn submit_reference(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::ReferenceInputChanged(input.to_string()));
    update(state, Msg::SubmitReferenceClicked)
}

pub fn settle_ingestion(
    state: AppState,
    result: Result<(), RequestFailure>,
) -> (AppState, Vec<Effect>) {
    let epoch = state.epoch();
    update(state, Msg::IngestionSettled { epoch, result })
}

/// Drives a fresh session through a successful ingestion and the reveal.
pub fn ready_state() -> AppState {
    let (state, _) = submit_reference(AppState::new(), "https://youtu.be/abc");
    let (state, _) = settle_ingestion(state, Ok(()));
    let epoch = state.epoch();
    let (mut state, _) = update(state, Msg::RevealConversation { epoch });
    state.consume_dirty();
    state
}

pub fn ask(state: AppState, question: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::QuestionInputChanged(question.to_string()));
    update(state, Msg::KeyPressed(Key::Enter))
}

pub fn placeholder_of(effects: &[Effect]) -> PlaceholderId {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::AskQuestion { placeholder, .. } => Some(*placeholder),
            _ => None,
        })
        .expect("ask effect")
}

pub fn settle_answer(
    state: AppState,
    placeholder: PlaceholderId,
    result: Result<String, RequestFailure>,
) -> (AppState, Vec<Effect>) {
    let epoch = state.epoch();
    update(
        state,
        Msg::AnswerSettled {
            epoch,
            placeholder,
            result,
        },
    )
}
