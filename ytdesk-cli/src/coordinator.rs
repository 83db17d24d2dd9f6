//! Note/comment coordinator
//!
//! Holds what the dashboard shows for one video: its metadata, the note list
//! and the comment threads. Lists are never patched locally. Every successful
//! mutation is followed by a full refetch of the list it touched, so between
//! the mutation and the refetch the list is one round trip stale.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, warn};
use ytdesk_common::models::event_log::actions;
use ytdesk_common::models::{
    Comment, CommentText, CommentThread, EventLog, NewEventLog, Note, NoteCategory, NoteDraft,
    NotePriority, NoteUpdate, VideoDetails, VideoUpdate,
};
use ytdesk_common::{Result, VideoRef};

use crate::action::{ActionBoard, ActionKind, ActionState, Outcome};
use crate::backend::DashboardBackend;

/// Dashboard session scoped to one video
pub struct Coordinator<B> {
    backend: B,
    video: VideoRef,
    details: RwLock<Option<VideoDetails>>,
    notes: RwLock<Vec<Note>>,
    comments: RwLock<Vec<CommentThread>>,
    actions: ActionBoard,
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|e| e.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|e| e.into_inner())
}

impl<B: DashboardBackend> Coordinator<B> {
    /// Session for an already resolved video; nothing is fetched yet
    pub fn new(backend: B, video: VideoRef) -> Self {
        Self {
            backend,
            video,
            details: RwLock::new(None),
            notes: RwLock::new(Vec::new()),
            comments: RwLock::new(Vec::new()),
            actions: ActionBoard::new(),
        }
    }

    /// Resolve user input and fetch the video's metadata
    ///
    /// Fails (and no session exists) when the metadata fetch fails.
    pub async fn open(backend: B, raw_input: &str) -> Result<Self> {
        let video = VideoRef::parse(raw_input);
        debug!(input = raw_input, video_id = %video, "Resolved video reference");

        let session = Self::new(backend, video);
        session.refresh_video().await?;
        Ok(session)
    }

    pub fn video_id(&self) -> &str {
        self.video.external_id()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Last fetched metadata
    pub fn video(&self) -> Option<VideoDetails> {
        read(&self.details).clone()
    }

    /// Last fetched note list
    pub fn notes(&self) -> Vec<Note> {
        read(&self.notes).clone()
    }

    /// Last fetched comment threads
    pub fn comments(&self) -> Vec<CommentThread> {
        read(&self.comments).clone()
    }

    pub fn action_state(&self, kind: ActionKind) -> ActionState {
        self.actions.state(kind)
    }

    pub fn last_outcome(&self, kind: ActionKind) -> Option<Outcome> {
        self.actions.last_outcome(kind)
    }

    // ---- video -------------------------------------------------------------

    pub async fn refresh_video(&self) -> Result<VideoDetails> {
        let ticket = self.actions.begin(ActionKind::LoadVideo)?;
        let result = self.backend.video(self.video_id()).await;
        let details = ticket.settle(result)?;
        *write(&self.details) = Some(details.clone());
        Ok(details)
    }

    /// Append a `video_viewed` entry to the activity log
    pub async fn record_view(&self) -> Result<EventLog> {
        let entry = NewEventLog {
            video_id: Some(self.video_id().to_string()),
            action: actions::VIDEO_VIEWED.to_string(),
            detail: None,
        };
        self.backend.record_event(&entry).await
    }

    pub async fn update_video(&self, update: VideoUpdate) -> Result<VideoDetails> {
        let update = update.validated()?;
        let ticket = self.actions.begin(ActionKind::UpdateVideo)?;
        let result = self.backend.update_video(self.video_id(), &update).await;
        let details = ticket.settle(result)?;
        *write(&self.details) = Some(details.clone());
        Ok(details)
    }

    // ---- notes -------------------------------------------------------------

    /// Replace the note list with the server's, in creation order
    pub async fn refresh_notes(&self) -> Result<Vec<Note>> {
        let notes = self.backend.list_notes(self.video_id()).await?;
        *write(&self.notes) = notes.clone();
        Ok(notes)
    }

    /// Create a note on the current video
    ///
    /// Empty title or content is rejected before anything is sent.
    pub async fn create_note(
        &self,
        title: &str,
        content: &str,
        category: NoteCategory,
        priority: NotePriority,
    ) -> Result<Note> {
        let draft = NoteDraft {
            video_id: self.video_id().to_string(),
            title: title.to_string(),
            content: content.to_string(),
            category,
            priority,
        }
        .validated()?;

        let ticket = self.actions.begin(ActionKind::CreateNote)?;
        let result = self.backend.create_note(&draft).await;
        let note = ticket.settle(result)?;

        self.refetch_notes().await;
        Ok(note)
    }

    pub async fn update_note(&self, note_id: &str, changes: NoteUpdate) -> Result<Note> {
        let changes = changes.validated()?;
        let ticket = self.actions.begin(ActionKind::UpdateNote)?;
        let result = self.backend.update_note(note_id, &changes).await;
        let note = ticket.settle(result)?;

        self.refetch_notes().await;
        Ok(note)
    }

    /// Delete a note; the caller has already confirmed with the user
    pub async fn delete_note(&self, note_id: &str) -> Result<()> {
        let ticket = self.actions.begin(ActionKind::DeleteNote)?;
        let result = self.backend.delete_note(note_id).await;
        ticket.settle(result)?;

        self.refetch_notes().await;
        Ok(())
    }

    async fn refetch_notes(&self) {
        if let Err(e) = self.refresh_notes().await {
            warn!(video_id = self.video_id(), error = %e, "Note refetch failed; list is stale");
        }
    }

    // ---- comments ----------------------------------------------------------

    /// Replace the comment threads with YouTube's current ones
    pub async fn refresh_comments(&self) -> Result<Vec<CommentThread>> {
        let threads = self.backend.list_comments(self.video_id()).await?;
        *write(&self.comments) = threads.clone();
        Ok(threads)
    }

    pub async fn add_comment(&self, text: &str) -> Result<CommentThread> {
        let text = CommentText { text: text.to_string() }.validated()?;
        let ticket = self.actions.begin(ActionKind::AddComment)?;
        let result = self.backend.add_comment(self.video_id(), &text).await;
        let thread = ticket.settle(result)?;

        self.refetch_comments().await;
        Ok(thread)
    }

    pub async fn reply_to_comment(&self, comment_id: &str, text: &str) -> Result<Comment> {
        let text = CommentText { text: text.to_string() }.validated()?;
        let ticket = self.actions.begin(ActionKind::ReplyToComment)?;
        let result = self
            .backend
            .reply_to_comment(self.video_id(), comment_id, &text)
            .await;
        let reply = ticket.settle(result)?;

        self.refetch_comments().await;
        Ok(reply)
    }

    /// Delete a comment or reply; the caller has already confirmed with the user
    pub async fn delete_comment(&self, comment_id: &str) -> Result<()> {
        let ticket = self.actions.begin(ActionKind::DeleteComment)?;
        let result = self.backend.delete_comment(self.video_id(), comment_id).await;
        ticket.settle(result)?;

        self.refetch_comments().await;
        Ok(())
    }

    async fn refetch_comments(&self) {
        if let Err(e) = self.refresh_comments().await {
            warn!(video_id = self.video_id(), error = %e, "Comment refetch failed; list is stale");
        }
    }
}
