//! Ticket channel name rendering.

const USERNAME_PLACEHOLDER: &str = "{username}";
const MAX_CHANNEL_NAME_LEN: usize = 100;
const FALLBACK_CHANNEL_NAME: &str = "ticket";

/// Renders a ticket channel name from a template containing `{username}`.
///
/// Discord text channel names are lowercase and cannot contain spaces, so the rendered
/// string is normalised: whitespace becomes `-`, characters other than ASCII letters,
/// digits, `-` and `_` are dropped, dash runs are collapsed and the result is capped at
/// 100 characters.
pub fn render_ticket_channel_name(template: &str, username: &str) -> String {
    let rendered = template.replace(USERNAME_PLACEHOLDER, username);

    let mut name = String::with_capacity(rendered.len());
    for c in rendered.chars().flat_map(char::to_lowercase) {
        let c = if c.is_whitespace() { '-' } else { c };
        if !(c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            continue;
        }
        if c == '-' && (name.is_empty() || name.ends_with('-')) {
            continue;
        }
        name.push(c);
    }

    let name: String = name
        .trim_end_matches('-')
        .chars()
        .take(MAX_CHANNEL_NAME_LEN)
        .collect();

    if name.is_empty() {
        FALLBACK_CHANNEL_NAME.to_string()
    } else {
        name
    }
}
