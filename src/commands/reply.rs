use crate::format::{clamp, FIELD_LIMIT, TITLE_LIMIT};
use serde::Serialize;
use tracing::warn;

/// Chat platforms reject cards with more fields than this.
pub const MAX_FIELDS: usize = 25;

pub mod colors {
    pub const CHAMPION: u32 = 0x007bff;
    pub const FAILURE: u32 = 0xdc3545;
    pub const NOT_FOUND: u32 = 0xffc107;
    pub const SUGGESTIONS: u32 = 0x6c757d;

    /// Card tint for a champion class.
    pub fn for_class(class: &str) -> u32 {
        match class.trim().to_lowercase().as_str() {
            "cosmic" => 0x00b4d8,
            "tech" => 0x1e64c8,
            "mutant" => 0xf0c800,
            "skill" => 0xc81e1e,
            "science" => 0x32b432,
            "mystic" => 0x9632c8,
            _ => 0x808080,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub label: String,
    pub body: String,
}

/// A message card: title, color, labelled fields and an optional thumbnail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub title: String,
    pub color: u32,
    pub description: Option<String>,
    pub fields: Vec<Field>,
    pub thumbnail: Option<String>,
}

impl Reply {
    pub fn new(title: &str, color: u32) -> Self {
        Reply {
            title: clamp(title, TITLE_LIMIT),
            color,
            description: None,
            fields: Vec::new(),
            thumbnail: None,
        }
    }

    pub fn with_description(mut self, text: &str) -> Self {
        self.description = Some(text.to_string());
        self
    }

    /// Adds a field, clamping the body. Empty bodies and fields past
    /// [`MAX_FIELDS`] are dropped.
    pub fn add_field(&mut self, label: &str, body: &str) -> bool {
        if body.trim().is_empty() {
            return false;
        }
        if self.fields.len() >= MAX_FIELDS {
            warn!(title = %self.title, label, "card is full, dropping field");
            return false;
        }
        self.fields.push(Field {
            label: clamp(label, TITLE_LIMIT),
            body: clamp(body, FIELD_LIMIT),
        });
        true
    }

    pub fn set_thumbnail(&mut self, url: &str) {
        self.thumbnail = Some(url.to_string());
    }

    #[allow(dead_code)]
    pub fn field(&self, label: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.label == label)
    }
}
