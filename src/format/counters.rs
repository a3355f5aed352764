use super::rules::{RewriteRule, RuleSet};
use super::FIELD_LIMIT;
use once_cell::sync::Lazy;
use regex::Regex;

pub const BULLET: &str = "•";
pub const NO_COUNTERS_PLACEHOLDER: &str = "No counters listed.";

static EMPHASIS_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*").unwrap());
static DASH_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*-[ \t]+").unwrap());
static LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b([A-Z][A-Za-z'-]*):").unwrap());
static BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n(?:[ \t]*\n){2,}").unwrap());

static TIP_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new(vec![
        RewriteRule::template("strip-emphasis", &EMPHASIS_MARKER, ""),
        RewriteRule::template("dash-bullets", &DASH_ITEM, "• "),
        RewriteRule::template("label-emphasis", &LABEL, "**$1:**"),
        RewriteRule::template("collapse-blank-lines", &BLANK_RUN, "\n\n"),
    ])
});

/// Cleans free-form counter tips and splits them into field-sized chunks.
///
/// Chunks are cut every [`FIELD_LIMIT`] characters, even mid-word.
pub fn format_counter_tips(raw: &str) -> Vec<String> {
    let cleaned = TIP_RULES.apply(raw);
    chunk(cleaned.trim(), FIELD_LIMIT)
}

/// One bullet line per comma-separated counter.
pub fn format_counter_list(raw: &str) -> Vec<String> {
    let lines: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| format!("{} {}", BULLET, token))
        .collect();
    if lines.is_empty() {
        return vec![NO_COUNTERS_PLACEHOLDER.to_string()];
    }
    lines
}

/// Fixed-size split on character boundaries.
pub fn chunk(text: &str, size: usize) -> Vec<String> {
    if text.is_empty() || size == 0 {
        return Vec::new();
    }
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(size)
        .map(|piece| piece.iter().collect())
        .collect()
}
