//! Clipchat core: pure session state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod transcript;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::{Key, Msg};
pub use state::{
    AppState, Phase, RequestFailure, SessionEpoch, Severity, StatusMessage, REVEAL_DELAY,
};
pub use transcript::{PlaceholderId, Sender, Transcript, Turn, TurnId};
pub use update::update;
pub use view_model::{AppViewModel, StatusView, TurnView};
