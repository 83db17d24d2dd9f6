//! Dashboard against a live ytdesk-server router
//!
//! The server runs in-process on an ephemeral port with an in-memory store and
//! a scripted video platform; the dashboard talks to it over real HTTP.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::{Arc, Mutex};
use ytdesk_cli::{Coordinator, DashboardBackend, HttpBackend};
use ytdesk_common::models::event_log::actions;
use ytdesk_common::models::{
    Comment, CommentSnippet, CommentThread, CommentThreadSnippet, NoteCategory, NoteDraft,
    NotePriority, NoteUpdate, VideoDetails, VideoUpdate,
};
use ytdesk_common::{Error, Result};
use ytdesk_server::{build_router, AppState, VideoPlatform};

const VIDEO_ID: &str = "dQw4w9WgXcQ";

#[derive(Default)]
struct ScriptedPlatform {
    threads: Mutex<Vec<CommentThread>>,
    failure: Mutex<Option<(u16, String)>>,
}

impl ScriptedPlatform {
    fn check(&self) -> Result<()> {
        match self.failure.lock().unwrap().clone() {
            Some((status, message)) => Err(Error::remote(status, message)),
            None => Ok(()),
        }
    }
}

fn comment(id: &str, text: &str, parent: Option<&str>) -> Comment {
    Comment {
        id: id.to_string(),
        snippet: CommentSnippet {
            author_display_name: "Owner".to_string(),
            author_profile_image_url: None,
            author_channel_url: None,
            text_display: text.to_string(),
            text_original: text.to_string(),
            parent_id: parent.map(str::to_string),
            like_count: 0,
            published_at: Utc::now(),
            updated_at: None,
        },
    }
}

#[async_trait]
impl VideoPlatform for ScriptedPlatform {
    async fn video(&self, video_id: &str) -> Result<VideoDetails> {
        self.check()?;
        if video_id != VIDEO_ID {
            return Err(Error::NotFound(format!("Video not found: {}", video_id)));
        }
        Ok(VideoDetails {
            youtube_id: VIDEO_ID.to_string(),
            title: "Never Gonna Give You Up".to_string(),
            description: "The official video".to_string(),
            channel_id: "UCuAXFkgsw1L7xaCfnd5JJOw".to_string(),
            channel_title: "Rick Astley".to_string(),
            thumbnail_url: None,
            published_at: None,
            category_id: Some("10".to_string()),
            tags: Vec::new(),
            privacy_status: Some("public".to_string()),
            view_count: Some(1),
            like_count: None,
            comment_count: None,
        })
    }

    async fn update_video(&self, video_id: &str, update: VideoUpdate) -> Result<VideoDetails> {
        let mut details = self.video(video_id).await?;
        if let Some(title) = update.title {
            details.title = title;
        }
        Ok(details)
    }

    async fn comment_threads(&self, _video_id: &str) -> Result<Vec<CommentThread>> {
        self.check()?;
        Ok(self.threads.lock().unwrap().clone())
    }

    async fn add_comment(&self, video_id: &str, text: &str) -> Result<CommentThread> {
        self.check()?;
        let mut threads = self.threads.lock().unwrap();
        let id = format!("Ugz{}", threads.len());
        let thread = CommentThread {
            id: id.clone(),
            snippet: CommentThreadSnippet {
                video_id: video_id.to_string(),
                top_level_comment: comment(&id, text, None),
                total_reply_count: 0,
                can_reply: true,
                is_public: true,
            },
            replies: None,
        };
        threads.insert(0, thread.clone());
        Ok(thread)
    }

    async fn reply_to_comment(&self, parent_id: &str, text: &str) -> Result<Comment> {
        self.check()?;
        if !self.threads.lock().unwrap().iter().any(|t| t.id == parent_id) {
            return Err(Error::NotFound("The comment could not be found.".to_string()));
        }
        Ok(comment(&format!("{}.r", parent_id), text, Some(parent_id)))
    }

    async fn delete_comment(&self, comment_id: &str) -> Result<()> {
        self.check()?;
        self.threads.lock().unwrap().retain(|t| t.id != comment_id);
        Ok(())
    }
}

/// Serve the real router on 127.0.0.1:0 and return a backend pointed at it
async fn start_server(platform: Arc<ScriptedPlatform>) -> HttpBackend {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    ytdesk_server::db::init_tables(&pool).await.unwrap();

    let app = build_router(AppState::new(pool, platform), &[]);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    HttpBackend::new(&format!("http://{}", addr)).unwrap()
}

#[tokio::test]
async fn test_open_video_from_url() {
    let backend = start_server(Arc::new(ScriptedPlatform::default())).await;

    let desk = Coordinator::open(backend, "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42")
        .await
        .unwrap();

    assert_eq!(desk.video_id(), VIDEO_ID);
    assert_eq!(desk.video().unwrap().channel_title, "Rick Astley");
}

#[tokio::test]
async fn test_unknown_video_is_not_found() {
    let backend = start_server(Arc::new(ScriptedPlatform::default())).await;

    let err = Coordinator::open(backend, "zzzzzzzzzzz").await.err().unwrap();
    assert!(matches!(err, Error::NotFound(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_note_lifecycle_over_http() {
    let backend = start_server(Arc::new(ScriptedPlatform::default())).await;
    let desk = Coordinator::new(backend, ytdesk_common::VideoRef::parse(VIDEO_ID));

    let first = desk
        .create_note("Intro", "Tighten the first 10s", NoteCategory::Improvement, NotePriority::High)
        .await
        .unwrap();
    let second = desk
        .create_note("Thumbnail", "Try a red background", NoteCategory::Ideas, NotePriority::Low)
        .await
        .unwrap();

    let ids: Vec<_> = desk.notes().into_iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![first.id.clone(), second.id.clone()]);

    let edited = desk
        .update_note(
            &first.id,
            NoteUpdate {
                title: Some("Intro hook".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(edited.title, "Intro hook");
    assert_eq!(edited.content, "Tighten the first 10s");
    assert!(edited.updated_at >= first.updated_at);

    desk.delete_note(&second.id).await.unwrap();
    let remaining = desk.refresh_notes().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].title, "Intro hook");
}

#[tokio::test]
async fn test_server_side_validation_maps_to_validation() {
    let backend = start_server(Arc::new(ScriptedPlatform::default())).await;

    // Bypass local checks to exercise the server's own
    let draft = NoteDraft {
        video_id: VIDEO_ID.to_string(),
        title: "   ".to_string(),
        content: "body".to_string(),
        category: NoteCategory::General,
        priority: NotePriority::Medium,
    };
    let err = backend.create_note(&draft).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)), "got {:?}", err);

    assert!(backend.list_notes(VIDEO_ID).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_note_maps_to_not_found() {
    let backend = start_server(Arc::new(ScriptedPlatform::default())).await;
    let desk = Coordinator::new(backend, ytdesk_common::VideoRef::parse(VIDEO_ID));

    let err = desk
        .update_note(
            "no-such-note",
            NoteUpdate {
                content: Some("x".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_comment_moderation_over_http() {
    let backend = start_server(Arc::new(ScriptedPlatform::default())).await;
    let desk = Coordinator::new(backend, ytdesk_common::VideoRef::parse(VIDEO_ID));

    let thread = desk.add_comment("Thanks for watching!").await.unwrap();
    assert_eq!(desk.comments().len(), 1);
    assert_eq!(desk.comments()[0].id, thread.id);

    let reply = desk.reply_to_comment(&thread.id, "Pinned").await.unwrap();
    assert_eq!(reply.snippet.parent_id.as_deref(), Some(thread.id.as_str()));

    desk.delete_comment(&thread.id).await.unwrap();
    assert!(desk.comments().is_empty());

    let logs = desk.backend().event_logs(Some(VIDEO_ID), 10).await.unwrap();
    assert_eq!(logs.len(), 3);
}

#[tokio::test]
async fn test_upstream_failure_keeps_status() {
    let platform = Arc::new(ScriptedPlatform::default());
    let backend = start_server(platform.clone()).await;
    let desk = Coordinator::new(backend, ytdesk_common::VideoRef::parse(VIDEO_ID));

    *platform.failure.lock().unwrap() = Some((403, "Comments are disabled".to_string()));

    let err = desk.refresh_comments().await.unwrap_err();
    assert_eq!(err.remote_status(), Some(403));
    assert!(err.to_string().contains("Comments are disabled"));

    // Local notes are unaffected by the platform outage
    desk.create_note("Still here", "notes work", NoteCategory::General, NotePriority::Medium)
        .await
        .unwrap();
    assert_eq!(desk.notes().len(), 1);
}

#[tokio::test]
async fn test_unmatched_input_with_url_characters_is_not_found() {
    let backend = start_server(Arc::new(ScriptedPlatform::default())).await;

    // Passed through verbatim by the resolver; must not address another video
    for raw in ["dQw4w9WgXcQ?x", "dQw4w9WgXcQ#top", "dQw4w9WgXcQ/comments"] {
        let backend = HttpBackend::new(backend.base_url()).unwrap();
        let err = Coordinator::open(backend, raw).await.err().unwrap();
        assert!(matches!(err, Error::NotFound(ref msg) if msg.contains(raw)), "{}: got {:?}", raw, err);
    }
}

#[tokio::test]
async fn test_notes_keep_unmatched_identifier() {
    let backend = start_server(Arc::new(ScriptedPlatform::default())).await;
    let desk = Coordinator::new(backend, ytdesk_common::VideoRef::parse("clip?id=7&t=1"));

    let note = desk
        .create_note("Odd id", "kept verbatim", NoteCategory::General, NotePriority::Low)
        .await
        .unwrap();
    assert_eq!(note.video_id, "clip?id=7&t=1");

    let listed = desk.refresh_notes().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert!(desk.backend().list_notes(VIDEO_ID).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_comment_maps_to_not_found() {
    let backend = start_server(Arc::new(ScriptedPlatform::default())).await;

    let err = backend
        .reply_to_comment(VIDEO_ID, "UgzGone", "hello")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_record_view_lands_in_activity_log() {
    let backend = start_server(Arc::new(ScriptedPlatform::default())).await;
    let desk = Coordinator::open(backend, "https://youtu.be/dQw4w9WgXcQ").await.unwrap();

    let entry = desk.record_view().await.unwrap();
    assert_eq!(entry.action, actions::VIDEO_VIEWED);

    let logs = desk.backend().event_logs(Some(VIDEO_ID), 10).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].action, "video_viewed");
    assert_eq!(logs[0].video_id.as_deref(), Some(VIDEO_ID));
}
