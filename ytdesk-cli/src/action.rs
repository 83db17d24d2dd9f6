//! Per-action submission state
//!
//! Each kind of user action moves `Idle -> Submitting -> Idle`. While one is
//! submitting, starting another of the same kind is refused; this is what a
//! disabled button does in a graphical front end.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard};
use ytdesk_common::{Error, Result};

/// User actions that talk to the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    LoadVideo,
    UpdateVideo,
    CreateNote,
    UpdateNote,
    DeleteNote,
    AddComment,
    ReplyToComment,
    DeleteComment,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionKind::LoadVideo => "load video",
            ActionKind::UpdateVideo => "update video",
            ActionKind::CreateNote => "create note",
            ActionKind::UpdateNote => "update note",
            ActionKind::DeleteNote => "delete note",
            ActionKind::AddComment => "add comment",
            ActionKind::ReplyToComment => "reply to comment",
            ActionKind::DeleteComment => "delete comment",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionState {
    Idle,
    Submitting,
}

/// How the most recent submission of an action ended
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Succeeded,
    Failed(String),
}

#[derive(Debug, Default)]
struct Slot {
    submitting: bool,
    last: Option<Outcome>,
}

/// State of every action kind for one dashboard session
#[derive(Debug, Default)]
pub struct ActionBoard {
    slots: Mutex<HashMap<ActionKind, Slot>>,
}

impl ActionBoard {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave a slot half-written
    fn slots(&self) -> MutexGuard<'_, HashMap<ActionKind, Slot>> {
        self.slots.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Move `kind` to `Submitting`
    ///
    /// Fails with `ActionInFlight` if it is already submitting. The returned
    /// ticket puts the action back to `Idle` when finished or dropped.
    pub fn begin(&self, kind: ActionKind) -> Result<ActionTicket<'_>> {
        let mut slots = self.slots();
        let slot = slots.entry(kind).or_default();
        if slot.submitting {
            return Err(Error::ActionInFlight(format!("{} is already in progress", kind)));
        }
        slot.submitting = true;
        Ok(ActionTicket {
            board: self,
            kind,
            done: false,
        })
    }

    pub fn state(&self, kind: ActionKind) -> ActionState {
        match self.slots().get(&kind) {
            Some(slot) if slot.submitting => ActionState::Submitting,
            _ => ActionState::Idle,
        }
    }

    pub fn last_outcome(&self, kind: ActionKind) -> Option<Outcome> {
        self.slots().get(&kind).and_then(|s| s.last.clone())
    }

    fn finish(&self, kind: ActionKind, outcome: Option<Outcome>) {
        let mut slots = self.slots();
        let slot = slots.entry(kind).or_default();
        slot.submitting = false;
        if outcome.is_some() {
            slot.last = outcome;
        }
    }
}

/// Proof that an action is submitting
pub struct ActionTicket<'a> {
    board: &'a ActionBoard,
    kind: ActionKind,
    done: bool,
}

impl ActionTicket<'_> {
    pub fn succeed(mut self) {
        self.done = true;
        self.board.finish(self.kind, Some(Outcome::Succeeded));
    }

    pub fn fail(mut self, err: &Error) {
        self.done = true;
        self.board.finish(self.kind, Some(Outcome::Failed(err.to_string())));
    }

    /// Settle the ticket from a result, passing the result through
    pub fn settle<T>(self, result: Result<T>) -> Result<T> {
        match &result {
            Ok(_) => self.succeed(),
            Err(e) => self.fail(e),
        }
        result
    }
}

impl Drop for ActionTicket<'_> {
    fn drop(&mut self) {
        // Future dropped mid-flight: release without recording an outcome
        if !self.done {
            self.board.finish(self.kind, None);
        }
    }
}
