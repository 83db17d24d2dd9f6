//! ytdesk - terminal dashboard for a YouTube creator
//!
//! Looks up a video by ID or URL, moderates its comments and keeps private
//! notes about it, all through a running ytdesk-server.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dialoguer::Confirm;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ytdesk_cli::{render, Coordinator, DashboardBackend, HttpBackend};
use ytdesk_common::config::{load_config_or_default, non_blank, DEFAULT_SERVER_URL};
use ytdesk_common::models::{NoteCategory, NotePriority, NoteUpdate, VideoUpdate};
use ytdesk_common::VideoRef;

#[derive(Parser, Debug)]
#[command(name = "ytdesk")]
#[command(about = "YouTube creator desk: video lookup, comment moderation, private notes")]
#[command(version)]
struct Cli {
    /// ytdesk-server base URL
    #[arg(long, global = true, env = "YTDESK_SERVER_URL")]
    server: Option<String>,

    /// Config file path
    #[arg(long, global = true, env = "YTDESK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show video metadata
    Video {
        /// Video ID or YouTube URL
        video: String,
    },

    /// Change a video's title or description
    VideoEdit {
        video: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },

    /// List notes for a video
    Notes { video: String },

    /// Add a note to a video
    NoteAdd {
        video: String,
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        content: String,
        #[arg(long, default_value_t = NoteCategory::General)]
        category: NoteCategory,
        #[arg(long, default_value_t = NotePriority::Medium)]
        priority: NotePriority,
    },

    /// Edit an existing note
    NoteEdit {
        video: String,
        note_id: String,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        content: Option<String>,
        #[arg(long)]
        category: Option<NoteCategory>,
        #[arg(long)]
        priority: Option<NotePriority>,
    },

    /// Delete a note
    NoteRm {
        video: String,
        note_id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// List comment threads for a video
    Comments { video: String },

    /// Post a top-level comment
    Comment { video: String, text: String },

    /// Reply to a top-level comment
    Reply {
        video: String,
        comment_id: String,
        text: String,
    },

    /// Delete a comment or reply
    CommentRm {
        video: String,
        comment_id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show recent activity
    Events {
        /// Limit to one video
        video: Option<String>,
        #[arg(short, long, default_value_t = 50)]
        limit: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ytdesk_cli=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let toml = load_config_or_default(cli.config.as_deref()).context("Failed to load config file")?;
    let server = non_blank(cli.server)
        .or(non_blank(toml.server_url))
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

    let backend = HttpBackend::new(&server)?;
    run(cli.command, backend).await
}

fn session<B: DashboardBackend>(backend: B, video: &str) -> Coordinator<B> {
    Coordinator::new(backend, VideoRef::parse(video))
}

fn confirm(prompt: String, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .context("Confirmation prompt failed")?;
    if !confirmed {
        println!("Operation cancelled");
    }
    Ok(confirmed)
}

async fn run<B: DashboardBackend>(command: Command, backend: B) -> Result<()> {
    match command {
        Command::Video { video } => {
            let desk = Coordinator::open(backend, &video).await?;
            if let Some(details) = desk.video() {
                print!("{}", render::video(&details));
            }
            if let Err(e) = desk.record_view().await {
                tracing::debug!(error = %e, "Activity not recorded");
            }
        }

        Command::VideoEdit {
            video,
            title,
            description,
        } => {
            let desk = session(backend, &video);
            let details = desk.update_video(VideoUpdate { title, description }).await?;
            println!("Video updated");
            print!("{}", render::video(&details));
        }

        Command::Notes { video } => {
            let desk = session(backend, &video);
            let notes = desk.refresh_notes().await?;
            println!("{}", render::notes(&notes));
        }

        Command::NoteAdd {
            video,
            title,
            content,
            category,
            priority,
        } => {
            let desk = session(backend, &video);
            let note = desk.create_note(&title, &content, category, priority).await?;
            println!("Note created: {}", note.id);
            println!("{}", render::notes(&desk.notes()));
        }

        Command::NoteEdit {
            video,
            note_id,
            title,
            content,
            category,
            priority,
        } => {
            let changes = NoteUpdate {
                title,
                content,
                category,
                priority,
            };
            if changes.is_empty() {
                anyhow::bail!("Nothing to change: pass --title, --content, --category or --priority");
            }
            let desk = session(backend, &video);
            desk.update_note(&note_id, changes).await?;
            println!("Note updated");
            println!("{}", render::notes(&desk.notes()));
        }

        Command::NoteRm { video, note_id, yes } => {
            if !confirm(format!("Delete note {}?", note_id), yes)? {
                return Ok(());
            }
            let desk = session(backend, &video);
            desk.delete_note(&note_id).await?;
            println!("Note deleted");
            println!("{}", render::notes(&desk.notes()));
        }

        Command::Comments { video } => {
            let desk = session(backend, &video);
            let threads = desk.refresh_comments().await?;
            println!("{}", render::comments(&threads));
        }

        Command::Comment { video, text } => {
            let desk = session(backend, &video);
            let thread = desk.add_comment(&text).await?;
            println!("Comment posted: {}", thread.id);
            println!("{}", render::comments(&desk.comments()));
        }

        Command::Reply {
            video,
            comment_id,
            text,
        } => {
            let desk = session(backend, &video);
            let reply = desk.reply_to_comment(&comment_id, &text).await?;
            println!("Reply posted: {}", reply.id);
            println!("{}", render::comments(&desk.comments()));
        }

        Command::CommentRm {
            video,
            comment_id,
            yes,
        } => {
            if !confirm(format!("Delete comment {}? This cannot be undone.", comment_id), yes)? {
                return Ok(());
            }
            let desk = session(backend, &video);
            desk.delete_comment(&comment_id).await?;
            println!("Comment deleted");
            println!("{}", render::comments(&desk.comments()));
        }

        Command::Events { video, limit } => {
            let video_id = video.as_deref().map(ytdesk_common::resolve);
            let logs = backend.event_logs(video_id.as_deref(), limit).await?;
            println!("{}", render::event_logs(&logs));
        }
    }

    Ok(())
}
