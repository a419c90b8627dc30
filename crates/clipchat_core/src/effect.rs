use std::time::Duration;

use crate::{PlaceholderId, SessionEpoch, TurnId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue the ingestion request for an already trimmed reference.
    SubmitIngestion {
        epoch: SessionEpoch,
        reference: String,
    },
    /// Deliver `Msg::RevealConversation` for `epoch` once `after` has elapsed.
    ScheduleReveal { epoch: SessionEpoch, after: Duration },
    /// Issue the chat request whose answer resolves `placeholder`.
    AskQuestion {
        epoch: SessionEpoch,
        placeholder: PlaceholderId,
        question: String,
    },
    /// Scroll the transcript so that `turn` is visible.
    RevealLatestTurn { turn: TurnId },
}
