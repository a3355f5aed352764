pub mod counters;
pub mod rules;
pub mod text;

/// Maximum characters in one card field body.
pub const FIELD_LIMIT: usize = 1024;

/// Maximum characters in a card title.
pub const TITLE_LIMIT: usize = 256;

/// Cuts `text` to `limit` characters, ending with `…` when shortened.
pub fn clamp(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut out: String = text.chars().take(limit.saturating_sub(1)).collect();
    out.push('…');
    out
}
