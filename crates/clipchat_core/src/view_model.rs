use crate::{Phase, SessionEpoch, Sender, Severity, TurnId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub epoch: SessionEpoch,
    pub phase: Phase,
    pub reference_input: String,
    pub reference_enabled: bool,
    pub submit_enabled: bool,
    /// Submit affordance shows its loading indicator instead of its label.
    pub submit_busy: bool,
    pub input_view_visible: bool,
    pub conversation_visible: bool,
    pub status: Option<StatusView>,
    pub question_input: String,
    pub transcript: Vec<TurnView>,
    pub pending_answers: usize,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    pub text: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnView {
    pub id: TurnId,
    pub sender: Sender,
    pub text: String,
    pub pending: bool,
    /// Provisional turn this one settled, if it was still shown.
    pub replaces: Option<TurnId>,
}
