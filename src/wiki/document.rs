use crate::error::AppError;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Flat key/value view of one infobox template.
pub type Infobox = BTreeMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: String,
    pub text: String,
}

/// The parts of a fetched wiki page the extractor relies on.
pub trait WikiDocument {
    fn is_redirect(&self) -> bool;
    fn is_disambiguation(&self) -> bool;
    fn infoboxes(&self) -> Vec<Infobox>;
    fn sections(&self) -> Vec<Section>;
    /// Absolute image URLs in document order.
    fn images(&self) -> Vec<String>;
}

/// Anything that can fetch a page by title from a fixed wiki.
pub trait DocumentSource {
    type Document: WikiDocument;

    /// `Ok(None)` when the page does not exist.
    fn fetch(&self, title: &str) -> Result<Option<Self::Document>, AppError>;
}

/// Summary of a champion page, built per query and then dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChampionDocument {
    pub name: String,
    pub infobox: Infobox,
    pub sections: BTreeMap<String, String>,
    /// Every section in page order, repeated titles included.
    pub outline: Vec<Section>,
    pub images: Vec<String>,
}

impl ChampionDocument {
    pub fn section(&self, title: &str) -> Option<&str> {
        self.sections.get(title).map(String::as_str)
    }
}

#[cfg(test)]
pub mod fake {
    use super::*;
    use std::collections::HashMap;

    #[derive(Debug, Clone, Default)]
    pub struct FakeDocument {
        pub redirect: bool,
        pub disambiguation: bool,
        pub infoboxes: Vec<Infobox>,
        pub sections: Vec<Section>,
        pub images: Vec<String>,
    }

    impl FakeDocument {
        pub fn with_section(mut self, title: &str, text: &str) -> Self {
            self.sections.push(Section {
                title: title.to_string(),
                text: text.to_string(),
            });
            self
        }

        pub fn with_image(mut self, url: &str) -> Self {
            self.images.push(url.to_string());
            self
        }
    }

    impl WikiDocument for FakeDocument {
        fn is_redirect(&self) -> bool {
            self.redirect
        }

        fn is_disambiguation(&self) -> bool {
            self.disambiguation
        }

        fn infoboxes(&self) -> Vec<Infobox> {
            self.infoboxes.clone()
        }

        fn sections(&self) -> Vec<Section> {
            self.sections.clone()
        }

        fn images(&self) -> Vec<String> {
            self.images.clone()
        }
    }

    #[derive(Debug, Clone)]
    pub enum Outcome {
        Page(FakeDocument),
        Unreachable(String),
    }

    /// In-memory wiki keyed by exact title. Unknown titles are missing pages.
    #[derive(Debug, Default)]
    pub struct FakeSource {
        pages: HashMap<String, Outcome>,
    }

    impl FakeSource {
        pub fn with_page(mut self, title: &str, document: FakeDocument) -> Self {
            self.pages
                .insert(title.to_string(), Outcome::Page(document));
            self
        }

        pub fn with_failure(mut self, title: &str, message: &str) -> Self {
            self.pages
                .insert(title.to_string(), Outcome::Unreachable(message.to_string()));
            self
        }
    }

    impl DocumentSource for FakeSource {
        type Document = FakeDocument;

        fn fetch(&self, title: &str) -> Result<Option<FakeDocument>, AppError> {
            match self.pages.get(title) {
                Some(Outcome::Page(document)) => Ok(Some(document.clone())),
                Some(Outcome::Unreachable(message)) => {
                    Err(AppError::HttpError(message.clone()))
                }
                None => Ok(None),
            }
        }
    }
}
