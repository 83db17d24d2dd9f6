//! Shared data models

pub mod comment;
pub mod event_log;
pub mod note;
pub mod video;

pub use comment::{Comment, CommentReplies, CommentSnippet, CommentText, CommentThread, CommentThreadSnippet};
pub use event_log::{EventLog, NewEventLog};
pub use note::{Note, NoteCategory, NoteDraft, NotePriority, NoteUpdate};
pub use video::{VideoDetails, VideoUpdate};
