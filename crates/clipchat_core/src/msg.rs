use crate::{PlaceholderId, RequestFailure, SessionEpoch};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the reference input box.
    ReferenceInputChanged(String),
    /// User activated the submit affordance.
    SubmitReferenceClicked,
    /// The ingestion request issued in `epoch` settled.
    IngestionSettled {
        epoch: SessionEpoch,
        result: Result<(), RequestFailure>,
    },
    /// The post-success reveal delay for `epoch` elapsed.
    RevealConversation { epoch: SessionEpoch },
    /// User edited the question input box.
    QuestionInputChanged(String),
    /// User activated the ask affordance.
    AskClicked,
    /// Key press inside the question input.
    KeyPressed(Key),
    /// The chat request owning `placeholder` settled.
    AnswerSettled {
        epoch: SessionEpoch,
        placeholder: PlaceholderId,
        result: Result<String, RequestFailure>,
    },
    /// User clicked reset.
    ResetClicked,
    /// Fallback for placeholder wiring.
    NoOp,
}
