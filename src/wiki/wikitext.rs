//! Reads raw wikitext into the [`WikiDocument`] view.
//!
//! This is not a full MediaWiki parser. It understands headings, templates,
//! links, galleries, tables and the inline markup that shows up in champion
//! pages, and reduces everything else to plain text.

use super::document::{Infobox, Section, WikiDocument};
use crate::api::endpoints;
use crate::format::rules::{Rewrite, RewriteRule, RuleSet};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;

const IMAGE_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".gif", ".webp", ".svg"];

fn rule(name: &'static str, pattern: &str, template: &str) -> RewriteRule {
    RewriteRule::new(
        name,
        Regex::new(pattern).unwrap(),
        Rewrite::Template(template.to_string()),
    )
}

static GALLERY_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<gallery[^>]*>(.*?)</gallery>").unwrap());

// Hidden text that must not count as page content.
static SOURCE_CLEANUP: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new(vec![
        rule("comments", r"(?s)<!--.*?-->", ""),
        rule("nowiki", r"(?is)<nowiki>.*?</nowiki>", ""),
        rule("self-closing-refs", r"(?i)<ref[^>]*/>", ""),
        rule("refs", r"(?is)<ref[^>]*>.*?</ref>", ""),
    ])
});

// Applied before templates and links are resolved.
static MARKUP_REMOVAL: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new(vec![
        rule("comments", r"(?s)<!--.*?-->", ""),
        rule("self-closing-refs", r"(?i)<ref[^>]*/>", ""),
        rule("refs", r"(?is)<ref[^>]*>.*?</ref>", ""),
        rule("galleries", r"(?is)<gallery[^>]*>.*?</gallery>", ""),
    ])
});

// Applied once only prose and inline markup are left.
static INLINE_CLEANUP: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new(vec![
        rule(
            "labelled-external-links",
            r"\[(?:https?:)?//[^\s\]]+[ \t]+([^\]]+)\]",
            "$1",
        ),
        rule("bare-external-links", r"\[(?:https?:)?//[^\s\]]+\]", ""),
        rule("bold-italic", r"'{2,}", ""),
        rule("line-breaks", r"(?i)<br\s*/?>", "\n"),
        rule("html-tags", r"</?[A-Za-z][^>]*>", ""),
        rule("nbsp", r"&nbsp;", " "),
        rule("amp", r"&amp;", "&"),
        rule("lt", r"&lt;", "<"),
        rule("gt", r"&gt;", ">"),
        rule("quot", r"&quot;", "\""),
        rule("apos", r"&#0?39;", "'"),
        rule("magic-words", r"__[A-Z]+__", ""),
        rule("list-items", r"(?m)^[ \t]*[*#]+[ \t]*", "- "),
        rule("indents", r"(?m)^[ \t]*[:;]+[ \t]*", ""),
        rule("horizontal-rules", r"(?m)^-{4,}[ \t]*$", ""),
        rule("space-runs", r"[ \t]{2,}", " "),
        rule("trailing-space", r"(?m)[ \t]+$", ""),
        rule("blank-runs", r"\n{3,}", "\n\n"),
    ])
});

/// A page as returned by the wiki, kept as source text.
#[derive(Debug, Clone)]
pub struct WikitextPage {
    domain: String,
    source: String,
    disambiguation_flag: bool,
}

impl WikitextPage {
    /// `disambiguation_flag` carries the `disambiguation` page property when
    /// the wiki reports one. Comments, `<nowiki>` and `<ref>` bodies are
    /// dropped up front so no scan sees them.
    pub fn new(domain: &str, source: &str, disambiguation_flag: bool) -> Self {
        WikitextPage {
            domain: domain.to_string(),
            source: SOURCE_CLEANUP.apply(source),
            disambiguation_flag,
        }
    }
}

impl WikiDocument for WikitextPage {
    fn is_redirect(&self) -> bool {
        let head: String = self.source.trim_start().chars().take(9).collect();
        head.eq_ignore_ascii_case("#redirect")
    }

    fn is_disambiguation(&self) -> bool {
        self.disambiguation_flag
            || top_level_templates(&self.source).iter().any(|template| {
                let name = template_name(template.inner);
                name.starts_with("disambig") || name == "dab"
            })
    }

    fn infoboxes(&self) -> Vec<Infobox> {
        top_level_templates(&self.source)
            .iter()
            .filter(|template| template_name(template.inner).contains("infobox"))
            .map(|template| parse_infobox(template.inner))
            .collect()
    }

    fn sections(&self) -> Vec<Section> {
        let mut sections = Vec::new();
        let mut title = String::new();
        let mut body = String::new();

        for line in self.source.lines() {
            if let Some(next) = heading(line) {
                let text = plain_text(&body);
                if !title.is_empty() || !text.is_empty() {
                    sections.push(Section {
                        title: std::mem::replace(&mut title, next),
                        text,
                    });
                } else {
                    title = next;
                }
                body.clear();
                continue;
            }
            body.push_str(line);
            body.push('\n');
        }

        let text = plain_text(&body);
        if !title.is_empty() || !text.is_empty() {
            sections.push(Section { title, text });
        }
        sections
    }

    fn images(&self) -> Vec<String> {
        let mut found: Vec<(usize, String)> = Vec::new();

        for link in find_links(&self.source) {
            let target = split_top_level(link.inner, b'|')
                .first()
                .copied()
                .unwrap_or("");
            if let Some(file) = media_file(target) {
                found.push((link.start, file.to_string()));
            }
        }

        for block in GALLERY_BLOCK.captures_iter(&self.source) {
            let Some(body) = block.get(1) else { continue };
            let mut offset = body.start();
            for line in body.as_str().lines() {
                let entry = line.split('|').next().unwrap_or("").trim();
                let file = strip_file_namespace(entry);
                if looks_like_file(file) {
                    found.push((offset, file.to_string()));
                }
                offset += line.len() + 1;
            }
        }

        for template in top_level_templates(&self.source) {
            if !template_name(template.inner).contains("infobox") {
                continue;
            }
            for param in split_top_level(template.inner, b'|').into_iter().skip(1) {
                let Some((key, value)) = param.split_once('=') else {
                    continue;
                };
                let value = value.trim();
                if key.trim().to_lowercase().starts_with("image")
                    && !value.starts_with("[[")
                    && looks_like_file(strip_file_namespace(value))
                {
                    found.push((template.start, strip_file_namespace(value).to_string()));
                }
            }
        }

        found.sort_by_key(|(offset, _)| *offset);

        let mut seen = HashSet::new();
        found
            .into_iter()
            .filter(|(_, file)| seen.insert(file.replace(' ', "_")))
            .map(|(_, file)| endpoints::file_url(&self.domain, &file))
            .collect()
    }
}

/// Reduces a wikitext fragment to readable plain text.
pub fn plain_text(fragment: &str) -> String {
    let text = MARKUP_REMOVAL.apply(fragment);
    let text = strip_templates(&text);
    let text = strip_tables(&text);
    let text = replace_links(&text);
    INLINE_CLEANUP.apply(&text).trim().to_string()
}

fn heading(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.len() < 4 || !trimmed.starts_with('=') || !trimmed.ends_with('=') {
        return None;
    }
    let leading = trimmed.chars().take_while(|ch| *ch == '=').count();
    let trailing = trimmed.chars().rev().take_while(|ch| *ch == '=').count();
    if leading != trailing || !(2..=6).contains(&leading) || leading * 2 >= trimmed.len() {
        return None;
    }
    let title = plain_text(&trimmed[leading..trimmed.len() - trailing]);
    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

struct Span<'a> {
    start: usize,
    end: usize,
    inner: &'a str,
}

fn top_level_templates(source: &str) -> Vec<Span<'_>> {
    let bytes = source.as_bytes();
    let mut spans = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    let mut i = 0usize;

    while i + 1 < bytes.len() {
        if bytes[i] == b'{' && bytes[i + 1] == b'{' {
            if depth == 0 {
                start = i;
            }
            depth += 1;
            i += 2;
            continue;
        }
        if bytes[i] == b'}' && bytes[i + 1] == b'}' && depth > 0 {
            depth -= 1;
            i += 2;
            if depth == 0 {
                spans.push(Span {
                    start,
                    end: i,
                    inner: &source[start + 2..i - 2],
                });
            }
            continue;
        }
        i += 1;
    }
    spans
}

/// Balanced `[[...]]` spans. Links never cross lines, so a newline resets
/// an unclosed opener.
fn find_links(source: &str) -> Vec<Span<'_>> {
    let bytes = source.as_bytes();
    let mut spans = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    let mut i = 0usize;

    while i + 1 < bytes.len() {
        if bytes[i] == b'\n' {
            depth = 0;
        } else if bytes[i] == b'[' && bytes[i + 1] == b'[' {
            if depth == 0 {
                start = i;
            }
            depth += 1;
            i += 2;
            continue;
        } else if bytes[i] == b']' && bytes[i + 1] == b']' && depth > 0 {
            depth -= 1;
            i += 2;
            if depth == 0 {
                spans.push(Span {
                    start,
                    end: i,
                    inner: &source[start + 2..i - 2],
                });
            }
            continue;
        }
        i += 1;
    }
    spans
}

/// Splits on `separator` outside nested templates and links.
fn split_top_level(inner: &str, separator: u8) -> Vec<&str> {
    let bytes = inner.as_bytes();
    let mut parts = Vec::new();
    let mut braces = 0usize;
    let mut brackets = 0usize;
    let mut last = 0usize;
    let mut i = 0usize;

    while i < bytes.len() {
        let next = bytes.get(i + 1).copied();
        match (bytes[i], next) {
            (b'{', Some(b'{')) => {
                braces += 1;
                i += 2;
                continue;
            }
            (b'}', Some(b'}')) if braces > 0 => {
                braces -= 1;
                i += 2;
                continue;
            }
            (b'[', Some(b'[')) => {
                brackets += 1;
                i += 2;
                continue;
            }
            (b']', Some(b']')) if brackets > 0 => {
                brackets -= 1;
                i += 2;
                continue;
            }
            (ch, _) if ch == separator && braces == 0 && brackets == 0 => {
                parts.push(&inner[last..i]);
                last = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    parts.push(&inner[last..]);
    parts
}

fn template_name(inner: &str) -> String {
    let head = split_top_level(inner, b'|')
        .first()
        .copied()
        .unwrap_or("")
        .trim();
    let head = head.strip_prefix("Template:").unwrap_or(head);
    head.replace('_', " ").trim().to_lowercase()
}

fn parse_infobox(inner: &str) -> Infobox {
    let mut infobox = Infobox::new();
    for param in split_top_level(inner, b'|').into_iter().skip(1) {
        let Some((key, value)) = param.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() || key.contains("{{") || key.contains("[[") {
            continue;
        }
        let value = plain_text(value);
        if value.is_empty() {
            continue;
        }
        infobox.insert(key.to_string(), infobox_value(&value));
    }
    infobox
}

fn infobox_value(text: &str) -> Value {
    if let Ok(number) = text.parse::<i64>() {
        return Value::from(number);
    }
    if let Ok(number) = text.parse::<f64>() {
        if number.is_finite() {
            if let Some(number) = serde_json::Number::from_f64(number) {
                return Value::Number(number);
            }
        }
    }
    Value::String(text.to_string())
}

fn strip_templates(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0usize;
    for span in top_level_templates(text) {
        out.push_str(&text[cursor..span.start]);
        cursor = span.end;
    }
    out.push_str(&text[cursor..]);
    out
}

fn strip_tables(text: &str) -> String {
    let mut depth = 0usize;
    let mut kept = Vec::new();
    for line in text.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("{|") {
            depth += 1;
            continue;
        }
        if depth > 0 {
            if trimmed.starts_with("|}") {
                depth -= 1;
            }
            continue;
        }
        kept.push(line);
    }
    kept.join("\n")
}

fn replace_links(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0usize;
    for span in find_links(text) {
        out.push_str(&text[cursor..span.start]);
        out.push_str(&link_label(span.inner));
        cursor = span.end;
    }
    out.push_str(&text[cursor..]);
    out
}

fn link_label(inner: &str) -> String {
    let parts = split_top_level(inner, b'|');
    let target = parts.first().copied().unwrap_or("").trim();
    if !target.starts_with(':') && is_hidden_namespace(target) {
        return String::new();
    }
    let label = match parts.last() {
        Some(label) if parts.len() > 1 && !label.trim().is_empty() => label.trim(),
        _ => target.trim_start_matches(':'),
    };
    replace_links(label)
}

fn is_hidden_namespace(target: &str) -> bool {
    match target.split_once(':') {
        Some((namespace, _)) => matches!(
            namespace.trim().to_lowercase().as_str(),
            "file" | "image" | "media" | "category"
        ),
        None => false,
    }
}

fn media_file(target: &str) -> Option<&str> {
    let target = target.trim();
    if target.starts_with(':') {
        return None;
    }
    let (namespace, file) = target.split_once(':')?;
    let namespace = namespace.trim();
    if !(namespace.eq_ignore_ascii_case("file") || namespace.eq_ignore_ascii_case("image")) {
        return None;
    }
    let file = file.trim();
    if file.is_empty() {
        None
    } else {
        Some(file)
    }
}

fn strip_file_namespace(value: &str) -> &str {
    media_file(value).unwrap_or(value.trim())
}

fn looks_like_file(value: &str) -> bool {
    let lower = value.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOMAIN: &str = "marvel-contestofchampions.fandom.com";

    const GROOT: &str = r#"{{Champion Infobox
|name = Groot
|image = Groot portrait.png
|class = Skill
|release = 2015
|rating = 4.5
|tags = [[Guardians]], ''Plant''
}}
'''Groot''' is a [[Skill]] champion.<ref>Patch notes</ref>
== Abilities ==
* Heavy attacks inflict [[Bleed|bleed]].
* Gains {{Buff|Regeneration}} when struck.
<!-- hidden -->
[[File:Groot ability.jpg|thumb|Groot [[roots]] a foe]]
=== Signature Ability ===
Heals more.
== Strengths ==
Strong vs [[Hulk (Ragnarok)]]&nbsp;and bleed-immune foes.
{| class="wikitable"
| cell
|}
<gallery>
File:Groot alt.png|Alt costume
Groot old.jpg
</gallery>
== Abilities ==
Second abilities section.
"#;

    fn page(source: &str) -> WikitextPage {
        WikitextPage::new(DOMAIN, source, false)
    }

    #[test]
    fn reads_first_infobox_as_flat_map() {
        let infoboxes = page(GROOT).infoboxes();
        assert_eq!(infoboxes.len(), 1);
        let infobox = &infoboxes[0];
        assert_eq!(infobox["name"], Value::from("Groot"));
        assert_eq!(infobox["class"], Value::from("Skill"));
        assert_eq!(infobox["release"], Value::from(2015));
        assert_eq!(infobox["rating"], Value::from(4.5));
        assert_eq!(infobox["tags"], Value::from("Guardians, Plant"));
    }

    #[test]
    fn splits_sections_and_strips_markup() {
        let sections = page(GROOT).sections();
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["", "Abilities", "Signature Ability", "Strengths", "Abilities"]
        );
        assert_eq!(sections[0].text, "Groot is a Skill champion.");
        assert_eq!(
            sections[1].text,
            "- Heavy attacks inflict bleed.\n- Gains when struck."
        );
        assert_eq!(sections[2].text, "Heals more.");
        assert_eq!(
            sections[3].text,
            "Strong vs Hulk (Ragnarok) and bleed-immune foes."
        );
        assert_eq!(sections[4].text, "Second abilities section.");
    }

    #[test]
    fn collects_images_in_document_order() {
        let images = page(GROOT).images();
        assert_eq!(
            images,
            vec![
                endpoints::file_url(DOMAIN, "Groot portrait.png"),
                endpoints::file_url(DOMAIN, "Groot ability.jpg"),
                endpoints::file_url(DOMAIN, "Groot alt.png"),
                endpoints::file_url(DOMAIN, "Groot old.jpg"),
            ]
        );
    }

    #[test]
    fn duplicate_images_are_listed_once() {
        let images = page("[[File:A.png]] text [[Image:A.png|thumb]]").images();
        assert_eq!(images.len(), 1);
    }

    #[test]
    fn detects_redirects() {
        assert!(page("#REDIRECT [[Groot]]").is_redirect());
        assert!(page("  #redirect [[Groot]]").is_redirect());
        assert!(!page(GROOT).is_redirect());
    }

    #[test]
    fn detects_disambiguation_pages() {
        assert!(page("Iron Man may refer to:\n{{Disambig}}").is_disambiguation());
        assert!(WikitextPage::new(DOMAIN, "Iron Man", true).is_disambiguation());
        assert!(!page(GROOT).is_disambiguation());
    }

    #[test]
    fn commented_out_markup_is_ignored() {
        let groot = page(concat!(
            "<!-- {{Disambig}} [[File:Old.png]] -->\n",
            "'''Groot''' is a tree.[[File:New.png]]\n",
            "<ref>{{Disambig}}</ref><nowiki>[[File:Raw.png]]</nowiki>",
        ));
        assert!(!groot.is_disambiguation());
        assert_eq!(groot.images(), vec![endpoints::file_url(DOMAIN, "New.png")]);
        assert_eq!(groot.sections()[0].text, "Groot is a tree.");
    }

    #[test]
    fn empty_page_has_no_sections_or_images() {
        let empty = page("");
        assert!(empty.sections().is_empty());
        assert!(empty.images().is_empty());
        assert!(empty.infoboxes().is_empty());
    }

    #[test]
    fn plain_text_handles_links_and_external_links() {
        assert_eq!(
            plain_text("See [[Groot|the tree]], [[:Category:Skill]] and [https://example.com the site].[[Category:Champions]]"),
            "See the tree, Category:Skill and the site."
        );
    }

    #[test]
    fn nested_templates_are_removed_whole() {
        assert_eq!(plain_text("a {{outer|{{inner}}|x}} b"), "a b");
    }
}
