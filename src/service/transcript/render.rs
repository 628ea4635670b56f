//! Renders a ticket conversation into a self-contained HTML page.
//!
//! Every string that originates from Discord users is escaped. Attachment links are only
//! emitted for `http(s)` URLs.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::model::transcript::{TranscriptAttachment, TranscriptMessage, TranscriptTicketInfo};

const STYLE: &str = "body{font-family:sans-serif;background:#313338;color:#dbdee1;margin:0;padding:24px}\
header{border-bottom:1px solid #4e5058;margin-bottom:16px}\
dt{font-weight:bold;float:left;clear:left;width:110px}dd{margin-left:120px}\
.message{padding:6px 0}.author{font-weight:bold;color:#f2f3f5}.bot{background:#5865f2;color:#fff;\
border-radius:3px;font-size:11px;padding:1px 4px;margin-left:4px}.time{color:#949ba4;font-size:12px;\
margin-left:8px}.content{white-space:pre-wrap;margin-top:2px}a{color:#00a8fc}";

/// Renders the transcript page for `info`.
///
/// Messages are emitted oldest first regardless of input order.
pub fn render(info: &TranscriptTicketInfo, messages: &[TranscriptMessage]) -> String {
    let mut ordered: Vec<&TranscriptMessage> = messages.iter().collect();
    ordered.sort_by_key(|message| message.sent_at);

    let mut html = String::new();
    let title = format!("Ticket {}", escape_html(&info.ticket_id));

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{} transcript</title>", title);
    let _ = writeln!(html, "<style>{}</style>", STYLE);
    html.push_str("</head>\n<body>\n<header>\n");
    let _ = writeln!(html, "<h1>{}</h1>", title);
    render_details(&mut html, info, ordered.len());
    html.push_str("</header>\n<main>\n");

    if ordered.is_empty() {
        html.push_str("<p class=\"empty\">No messages were sent in this ticket.</p>\n");
    }
    for message in ordered {
        render_message(&mut html, message);
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn render_details(html: &mut String, info: &TranscriptTicketInfo, message_count: usize) {
    html.push_str("<dl>\n");

    let opener = match &info.username {
        Some(username) => format!("{} ({})", escape_html(username), escape_html(&info.user_id)),
        None => escape_html(&info.user_id),
    };
    detail(html, "Opened by", &opener);
    if let Some(reason) = &info.reason {
        detail(html, "Reason", &escape_html(reason));
    }
    if let Some(opened_at) = info.opened_at {
        detail(html, "Opened", &format_time(opened_at));
    }
    if let Some(closed_by) = &info.closed_by {
        detail(html, "Closed by", &escape_html(closed_by));
    }
    if let Some(closed_at) = info.closed_at {
        detail(html, "Closed", &format_time(closed_at));
    }
    detail(html, "Messages", &message_count.to_string());

    html.push_str("</dl>\n");
}

/// `value` must already be escaped.
fn detail(html: &mut String, label: &str, value: &str) {
    let _ = writeln!(html, "<dt>{}</dt><dd>{}</dd>", label, value);
}

fn render_message(html: &mut String, message: &TranscriptMessage) {
    html.push_str("<article class=\"message\">\n<div>");
    let _ = write!(
        html,
        "<span class=\"author\" title=\"{}\">{}</span>",
        escape_html(&message.author_id),
        escape_html(&message.author_name)
    );
    if message.is_bot {
        html.push_str("<span class=\"bot\">BOT</span>");
    }
    let _ = write!(
        html,
        "<time class=\"time\" datetime=\"{}\">{}</time>",
        message.sent_at.to_rfc3339(),
        format_time(message.sent_at)
    );
    html.push_str("</div>\n");

    if !message.content.is_empty() {
        let _ = writeln!(
            html,
            "<div class=\"content\">{}</div>",
            escape_html(&message.content)
        );
    }
    if !message.attachments.is_empty() {
        render_attachments(html, &message.attachments);
    }

    html.push_str("</article>\n");
}

fn render_attachments(html: &mut String, attachments: &[TranscriptAttachment]) {
    html.push_str("<ul class=\"attachments\">\n");
    for attachment in attachments {
        let filename = escape_html(&attachment.filename);
        if is_web_url(&attachment.url) {
            let _ = writeln!(
                html,
                "<li><a href=\"{}\" rel=\"noopener noreferrer\">{}</a></li>",
                escape_html(&attachment.url),
                filename
            );
        } else {
            let _ = writeln!(html, "<li>{}</li>", filename);
        }
    }
    html.push_str("</ul>\n");
}

fn is_web_url(url: &str) -> bool {
    let lower = url.trim_start().to_ascii_lowercase();
    lower.starts_with("https://") || lower.starts_with("http://")
}

fn format_time(time: DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Escapes text for use in HTML element content and quoted attribute values.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
