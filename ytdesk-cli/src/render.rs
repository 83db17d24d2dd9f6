//! Terminal rendering of dashboard state

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use ytdesk_common::models::{CommentThread, EventLog, Note, VideoDetails};

const EXCERPT_CHARS: usize = 60;

fn table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

/// First line of `text`, cut to a readable width
fn excerpt(text: &str) -> String {
    let line = text.lines().next().unwrap_or_default();
    if line.chars().count() > EXCERPT_CHARS {
        let cut: String = line.chars().take(EXCERPT_CHARS - 1).collect();
        format!("{}…", cut)
    } else if text.lines().nth(1).is_some() {
        format!("{} …", line)
    } else {
        line.to_string()
    }
}

fn count(value: Option<u64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

pub fn video(details: &VideoDetails) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", details.title));
    out.push_str(&format!(
        "{} · {}\n",
        details.channel_title,
        details.privacy_status.as_deref().unwrap_or("unknown")
    ));
    if let Some(published) = details.published_at {
        out.push_str(&format!("Published {}\n", published.format("%Y-%m-%d")));
    }
    out.push_str(&format!(
        "Views {} · Likes {} · Comments {}\n",
        count(details.view_count),
        count(details.like_count),
        count(details.comment_count)
    ));
    out.push_str(&format!("https://youtu.be/{}\n", details.youtube_id));
    if !details.description.is_empty() {
        out.push('\n');
        out.push_str(&details.description);
        out.push('\n');
    }
    out
}

pub fn notes(notes: &[Note]) -> String {
    if notes.is_empty() {
        return "No notes yet".to_string();
    }
    let mut t = table(vec!["ID", "Title", "Category", "Priority", "Content", "Updated"]);
    for note in notes {
        t.add_row(vec![
            note.id.clone(),
            note.title.clone(),
            note.category.to_string(),
            note.priority.to_string(),
            excerpt(&note.content),
            note.updated_at.format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }
    t.to_string()
}

pub fn comments(threads: &[CommentThread]) -> String {
    if threads.is_empty() {
        return "No comments".to_string();
    }
    let mut t = table(vec!["ID", "Author", "Comment", "Likes", "Posted"]);
    for thread in threads {
        let top = thread.top_level();
        t.add_row(vec![
            top.id.clone(),
            top.snippet.author_display_name.clone(),
            excerpt(&top.snippet.text_display),
            top.snippet.like_count.to_string(),
            top.snippet.published_at.format("%Y-%m-%d").to_string(),
        ]);
        for reply in thread.reply_list() {
            t.add_row(vec![
                format!("  ↳ {}", reply.id),
                reply.snippet.author_display_name.clone(),
                excerpt(&reply.snippet.text_display),
                reply.snippet.like_count.to_string(),
                reply.snippet.published_at.format("%Y-%m-%d").to_string(),
            ]);
        }
    }
    t.to_string()
}

pub fn event_logs(logs: &[EventLog]) -> String {
    if logs.is_empty() {
        return "No activity recorded".to_string();
    }
    let mut t = table(vec!["When", "Video", "Action", "Detail"]);
    for log in logs {
        t.add_row(vec![
            log.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            log.video_id.clone().unwrap_or_default(),
            log.action.clone(),
            log.detail.as_deref().map(excerpt).unwrap_or_default(),
        ]);
    }
    t.to_string()
}
