use std::collections::BTreeSet;

use clipchat_core::{
    AppViewModel, Phase, SessionEpoch, Sender, Severity, StatusView, TurnId, TurnView,
};

use super::input::{QUIT_COMMAND, RESET_COMMAND};

const RESET_BANNER: &str = "--- session reset ---";
const CONVERSATION_BANNER: &str = "=== Ask questions about the video (Enter to send) ===";
const BUSY_LINE: &str = "[busy] input disabled while processing";

/// Turns successive view models into terminal lines.
///
/// The terminal transcript is append-only, so the renderer remembers what it
/// already printed and emits only the difference. A provisional line cannot be
/// erased, so it carries a `[#id]` tag and the line that settles it repeats
/// the tag in place of the pending marker.
#[derive(Debug, Default)]
pub struct Renderer {
    epoch: Option<SessionEpoch>,
    phase: Option<Phase>,
    status: Option<StatusView>,
    last_turn: TurnId,
    shown_pending: BTreeSet<TurnId>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// True until the first frame has been rendered.
    pub fn is_pristine(&self) -> bool {
        self.epoch.is_none()
    }

    pub fn render(&mut self, view: &AppViewModel) -> Vec<String> {
        let mut lines = Vec::new();

        if self.epoch != Some(view.epoch) {
            if self.epoch.is_some() {
                lines.push(RESET_BANNER.to_string());
            }
            *self = Self {
                epoch: Some(view.epoch),
                ..Self::default()
            };
        }

        if view.status != self.status {
            if let Some(status) = &view.status {
                lines.push(format_status(status));
            }
            self.status = view.status.clone();
        }

        if self.phase != Some(view.phase) {
            lines.push(match view.phase {
                Phase::Input => input_prompt(),
                Phase::Processing => BUSY_LINE.to_string(),
                Phase::Ready => CONVERSATION_BANNER.to_string(),
            });
            self.phase = Some(view.phase);
        }

        let printed = self.last_turn;
        for turn in view.transcript.iter().filter(|turn| turn.id > printed) {
            let settles = turn
                .replaces
                .filter(|replaced| self.shown_pending.remove(replaced));
            if turn.pending {
                self.shown_pending.insert(turn.id);
            }
            lines.push(format_turn(turn, settles));
            self.last_turn = turn.id;
        }

        lines
    }
}

fn input_prompt() -> String {
    format!(
        "Paste a video URL and press Enter ({RESET_COMMAND} to start over, {QUIT_COMMAND} to exit):"
    )
}

fn format_status(status: &StatusView) -> String {
    let marker = match status.severity {
        Severity::Neutral => "[..]",
        Severity::Success => "[ok]",
        Severity::Error => "[!!]",
    };
    format!("{marker} {}", status.text)
}

fn format_turn(turn: &TurnView, settles: Option<TurnId>) -> String {
    match (turn.sender, turn.pending, settles) {
        (Sender::User, ..) => format!("you> {}", turn.text),
        (Sender::Bot, true, _) => format!("bot… [#{}] {}", turn.id, turn.text),
        (Sender::Bot, false, Some(replaced)) => format!("bot> [#{replaced}] {}", turn.text),
        (Sender::Bot, false, None) => format!("bot> {}", turn.text),
    }
}
