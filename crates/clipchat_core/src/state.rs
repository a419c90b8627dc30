use std::time::Duration;

use crate::transcript::{PlaceholderId, Sender, Transcript, TurnId};
use crate::view_model::{AppViewModel, StatusView, TurnView};

/// Delay between a successful ingestion and revealing the conversation view.
///
/// Purely cosmetic; it never fails the ingestion.
pub const REVEAL_DELAY: Duration = Duration::from_millis(1000);

/// Incremented on every reset. Settlements from an older epoch are dropped.
pub type SessionEpoch = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Input,
    Processing,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Neutral,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub severity: Severity,
}

/// Why a request failed, as far as the session cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestFailure {
    /// Non-success status; `detail` is the server's message when it sent one.
    Rejected { status: u16, detail: Option<String> },
    /// The request never produced a response.
    Transport,
    /// The response body could not be interpreted.
    Unparsable,
}

impl RequestFailure {
    pub fn detail(&self) -> Option<&str> {
        match self {
            RequestFailure::Rejected { detail, .. } => detail
                .as_deref()
                .filter(|detail| !detail.trim().is_empty()),
            RequestFailure::Transport | RequestFailure::Unparsable => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Ingestion {
    #[default]
    Idle,
    InFlight,
    /// Success was reported; waiting for the reveal delay.
    Succeeded,
    Revealed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    epoch: SessionEpoch,
    reference_input: String,
    question_input: String,
    ingestion: Ingestion,
    status: Option<StatusMessage>,
    transcript: Transcript,
    next_placeholder: u64,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        match self.ingestion {
            Ingestion::Idle => Phase::Input,
            Ingestion::InFlight | Ingestion::Succeeded => Phase::Processing,
            Ingestion::Revealed => Phase::Ready,
        }
    }

    pub fn epoch(&self) -> SessionEpoch {
        self.epoch
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn reference_input(&self) -> &str {
        &self.reference_input
    }

    pub fn question_input(&self) -> &str {
        &self.question_input
    }

    pub fn view(&self) -> AppViewModel {
        let phase = self.phase();
        let inputs_locked = phase != Phase::Input;
        AppViewModel {
            epoch: self.epoch,
            phase,
            reference_input: self.reference_input.clone(),
            reference_enabled: !inputs_locked,
            submit_enabled: !inputs_locked,
            submit_busy: inputs_locked,
            input_view_visible: phase != Phase::Ready,
            conversation_visible: phase == Phase::Ready,
            status: self.status.as_ref().map(|status| StatusView {
                text: status.text.clone(),
                severity: status.severity,
            }),
            question_input: self.question_input.clone(),
            transcript: self
                .transcript
                .turns()
                .iter()
                .map(|turn| TurnView {
                    id: turn.id,
                    sender: turn.sender,
                    text: turn.text.clone(),
                    pending: turn.is_placeholder(),
                    replaces: turn.replaces,
                })
                .collect(),
            pending_answers: self.transcript.pending_count(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn present_status(&mut self, text: impl Into<String>, severity: Severity) {
        self.status = Some(StatusMessage {
            text: text.into(),
            severity,
        });
        self.mark_dirty();
    }

    pub(crate) fn set_reference_input(&mut self, text: String) {
        if self.reference_input != text {
            self.reference_input = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_question_input(&mut self, text: String) {
        if self.question_input != text {
            self.question_input = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn begin_ingestion(&mut self) {
        self.ingestion = Ingestion::InFlight;
        self.mark_dirty();
    }

    /// Returns false when no ingestion was outstanding.
    pub(crate) fn ingestion_succeeded(&mut self) -> bool {
        if self.ingestion != Ingestion::InFlight {
            return false;
        }
        self.ingestion = Ingestion::Succeeded;
        self.mark_dirty();
        true
    }

    /// Returns false when no ingestion was outstanding.
    pub(crate) fn ingestion_failed(&mut self) -> bool {
        if self.ingestion != Ingestion::InFlight {
            return false;
        }
        self.ingestion = Ingestion::Idle;
        self.mark_dirty();
        true
    }

    /// Moves to `Ready`. Only the first reveal after a success counts.
    pub(crate) fn reveal_conversation(&mut self) -> bool {
        if self.ingestion != Ingestion::Succeeded {
            return false;
        }
        self.ingestion = Ingestion::Revealed;
        self.mark_dirty();
        true
    }

    pub(crate) fn append_turn(&mut self, sender: Sender, text: impl Into<String>) -> TurnId {
        self.mark_dirty();
        self.transcript.append(sender, text)
    }

    pub(crate) fn append_placeholder(&mut self, text: &str) -> (PlaceholderId, TurnId) {
        self.next_placeholder += 1;
        let placeholder = PlaceholderId(self.next_placeholder);
        let turn = self.transcript.append_placeholder(placeholder, text);
        self.mark_dirty();
        (placeholder, turn)
    }

    pub(crate) fn resolve_placeholder(
        &mut self,
        placeholder: PlaceholderId,
        text: impl Into<String>,
    ) -> TurnId {
        self.mark_dirty();
        self.transcript.resolve(placeholder, text)
    }

    /// Discards everything and starts a fresh session in the next epoch.
    pub(crate) fn reset(&mut self) {
        *self = Self {
            epoch: self.epoch + 1,
            dirty: true,
            ..Self::default()
        };
    }
}
