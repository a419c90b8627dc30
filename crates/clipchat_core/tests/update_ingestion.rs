mod common;

use clipchat_core::{update, AppState, Effect, Msg, Phase, RequestFailure, Severity, REVEAL_DELAY};
use common::{init_logging, settle_ingestion, submit_reference};

#[test]
fn blank_reference_issues_no_request() {
    init_logging();
    let (mut state, effects) = submit_reference(AppState::new(), "   \t ");

    assert!(effects.is_empty());
    assert_eq!(state.phase(), Phase::Input);
    let view = state.view();
    let status = view.status.expect("status presented");
    assert_eq!(status.text, "Please enter a valid reference");
    assert_eq!(status.severity, Severity::Error);
    assert!(view.reference_enabled);
    assert!(view.submit_enabled);
    assert!(!view.submit_busy);
    assert!(state.consume_dirty());
}

#[test]
fn submit_trims_reference_and_locks_input() {
    init_logging();
    let (state, effects) = submit_reference(AppState::new(), "  https://youtu.be/abc \n");

    assert_eq!(
        effects,
        vec![Effect::SubmitIngestion {
            epoch: 0,
            reference: "https://youtu.be/abc".to_string(),
        }]
    );
    assert_eq!(state.phase(), Phase::Processing);
    let view = state.view();
    assert!(!view.reference_enabled);
    assert!(!view.submit_enabled);
    assert!(view.submit_busy);
    assert!(view.input_view_visible);
    assert!(!view.conversation_visible);
    let status = view.status.expect("status presented");
    assert_eq!(status.severity, Severity::Neutral);
    assert!(status.text.starts_with("Processing"));
}

#[test]
fn second_submit_while_processing_is_ignored() {
    init_logging();
    let (state, _) = submit_reference(AppState::new(), "https://youtu.be/abc");
    let before = state.clone();

    let (state, effects) = update(state, Msg::SubmitReferenceClicked);
    assert!(effects.is_empty());
    assert_eq!(state, before);

    let (state, _) = update(state, Msg::ReferenceInputChanged("other".to_string()));
    assert_eq!(state.reference_input(), "https://youtu.be/abc");
}

#[test]
fn success_schedules_reveal_then_moves_to_ready_once() {
    init_logging();
    let (state, _) = submit_reference(AppState::new(), "https://youtu.be/abc");
    let (state, effects) = settle_ingestion(state, Ok(()));

    assert_eq!(
        effects,
        vec![Effect::ScheduleReveal {
            epoch: 0,
            after: REVEAL_DELAY,
        }]
    );
    // Still busy until the reveal fires.
    assert_eq!(state.phase(), Phase::Processing);
    let view = state.view();
    assert_eq!(view.status.as_ref().unwrap().severity, Severity::Success);
    assert!(view.input_view_visible);
    assert!(view.submit_busy);

    let (mut state, effects) = update(state, Msg::RevealConversation { epoch: 0 });
    assert!(effects.is_empty());
    assert_eq!(state.phase(), Phase::Ready);
    let view = state.view();
    assert!(!view.input_view_visible);
    assert!(view.conversation_visible);
    assert!(!view.reference_enabled);
    assert!(!view.submit_enabled);
    assert!(view.submit_busy);
    assert!(state.consume_dirty());

    // A duplicate reveal or settlement changes nothing.
    let (state, _) = update(state, Msg::RevealConversation { epoch: 0 });
    let (mut state, effects) = settle_ingestion(state, Ok(()));
    assert!(effects.is_empty());
    assert_eq!(state.phase(), Phase::Ready);
    assert!(!state.consume_dirty());
}

#[test]
fn failure_surfaces_detail_and_unlocks_input() {
    init_logging();
    let (state, _) = submit_reference(AppState::new(), "not a video");
    let (state, effects) = settle_ingestion(
        state,
        Err(RequestFailure::Rejected {
            status: 400,
            detail: Some("bad url".to_string()),
        }),
    );

    assert!(effects.is_empty());
    assert_eq!(state.phase(), Phase::Input);
    let view = state.view();
    let status = view.status.expect("status presented");
    assert!(status.text.contains("bad url"));
    assert!(status.text.starts_with("Error: "));
    assert_eq!(status.severity, Severity::Error);
    assert!(view.reference_enabled);
    assert!(view.submit_enabled);
    assert!(!view.submit_busy);
    assert!(view.input_view_visible);
    assert!(!view.conversation_visible);
    assert_eq!(view.reference_input, "not a video");
}

#[test]
fn failure_detail_is_shown_verbatim() {
    init_logging();
    let (state, _) = submit_reference(AppState::new(), "https://youtu.be/abc");
    let (state, _) = settle_ingestion(
        state,
        Err(RequestFailure::Rejected {
            status: 400,
            detail: Some("  bad url\n".to_string()),
        }),
    );

    let status = state.view().status.expect("status presented");
    assert_eq!(status.text, "Error:   bad url\n");
}

#[test]
fn failure_without_detail_uses_generic_message() {
    init_logging();
    for failure in [
        RequestFailure::Transport,
        RequestFailure::Unparsable,
        RequestFailure::Rejected {
            status: 500,
            detail: None,
        },
        RequestFailure::Rejected {
            status: 500,
            detail: Some("   ".to_string()),
        },
    ] {
        let (state, _) = submit_reference(AppState::new(), "https://youtu.be/abc");
        let (state, _) = settle_ingestion(state, Err(failure));
        let status = state.view().status.expect("status presented");
        assert_eq!(status.text, "Error: Failed to process video");
    }
}

#[test]
fn retry_after_failure_issues_new_request() {
    init_logging();
    let (state, _) = submit_reference(AppState::new(), "https://youtu.be/bad");
    let (state, _) = settle_ingestion(state, Err(RequestFailure::Transport));

    let (state, effects) = submit_reference(state, "https://youtu.be/good");
    assert_eq!(
        effects,
        vec![Effect::SubmitIngestion {
            epoch: 0,
            reference: "https://youtu.be/good".to_string(),
        }]
    );
    assert_eq!(state.phase(), Phase::Processing);
}

#[test]
fn settlement_without_outstanding_request_is_ignored() {
    init_logging();
    let state = AppState::new();
    let (state, effects) = settle_ingestion(state, Ok(()));

    assert!(effects.is_empty());
    assert_eq!(state, AppState::new());
}
