use std::fmt;

/// Per-session sequence number of a transcript turn.
pub type TurnId = u64;

/// Correlates an in-flight chat request with its provisional turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlaceholderId(pub u64);

impl fmt::Display for PlaceholderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pending-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub id: TurnId,
    pub sender: Sender,
    pub text: String,
    /// Set only on the provisional turn of an outstanding answer.
    pub placeholder: Option<PlaceholderId>,
    /// Id of the provisional turn this turn took the place of.
    pub replaces: Option<TurnId>,
}

impl Turn {
    pub fn is_placeholder(&self) -> bool {
        self.placeholder.is_some()
    }
}

/// Ordered, append-only list of turns.
///
/// The only in-place edit is [`Transcript::remove`], which drops a
/// placeholder turn once its request settles.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
    next_turn_id: TurnId,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a completed turn and returns its id.
    pub fn append(&mut self, sender: Sender, text: impl Into<String>) -> TurnId {
        self.push(sender, text.into(), None, None)
    }

    /// Appends a provisional bot turn tied to `placeholder`.
    pub fn append_placeholder(
        &mut self,
        placeholder: PlaceholderId,
        text: impl Into<String>,
    ) -> TurnId {
        self.push(Sender::Bot, text.into(), Some(placeholder), None)
    }

    /// Removes the provisional turn for `placeholder` and appends the bot turn
    /// that settles it. The new turn records which provisional turn it
    /// replaced, or `None` when that one was already gone.
    pub fn resolve(&mut self, placeholder: PlaceholderId, text: impl Into<String>) -> TurnId {
        let replaces = self.remove(placeholder).map(|turn| turn.id);
        self.push(Sender::Bot, text.into(), None, replaces)
    }

    /// Removes the turn carrying `placeholder`. Absent ids are a no-op.
    pub fn remove(&mut self, placeholder: PlaceholderId) -> Option<Turn> {
        let position = self
            .turns
            .iter()
            .position(|turn| turn.placeholder == Some(placeholder))?;
        Some(self.turns.remove(position))
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn pending_count(&self) -> usize {
        self.turns.iter().filter(|turn| turn.is_placeholder()).count()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    fn push(
        &mut self,
        sender: Sender,
        text: String,
        placeholder: Option<PlaceholderId>,
        replaces: Option<TurnId>,
    ) -> TurnId {
        self.next_turn_id += 1;
        let id = self.next_turn_id;
        self.turns.push(Turn {
            id,
            sender,
            text,
            placeholder,
            replaces,
        });
        id
    }
}
