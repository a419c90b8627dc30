use clipchat_core::{AppViewModel, Key, Msg};
use clipchat_logging::chat_debug;

pub const RESET_COMMAND: &str = ":reset";
pub const QUIT_COMMAND: &str = ":quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineAction {
    Dispatch(Vec<Msg>),
    Quit,
}

/// Maps one typed line onto the controls visible in `view`.
pub fn interpret(line: &str, view: &AppViewModel) -> LineAction {
    match line.trim() {
        QUIT_COMMAND => return LineAction::Quit,
        RESET_COMMAND => return LineAction::Dispatch(vec![Msg::ResetClicked]),
        _ => {}
    }

    if view.conversation_visible {
        LineAction::Dispatch(vec![
            Msg::QuestionInputChanged(line.to_string()),
            Msg::KeyPressed(Key::Enter),
        ])
    } else if view.reference_enabled {
        LineAction::Dispatch(vec![
            Msg::ReferenceInputChanged(line.to_string()),
            Msg::SubmitReferenceClicked,
        ])
    } else {
        chat_debug!("Input ignored while the reference is processing");
        LineAction::Dispatch(Vec::new())
    }
}
