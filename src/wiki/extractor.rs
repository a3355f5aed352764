use super::document::{ChampionDocument, DocumentSource, WikiDocument};
use crate::error::AppError;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Fetches a champion page and keeps the parts the cards use.
pub struct ChampionExtractor<S> {
    source: S,
}

impl<S: DocumentSource> ChampionExtractor<S> {
    pub fn new(source: S) -> Self {
        ChampionExtractor { source }
    }

    /// One request, no retries. Missing pages are `EntityNotFound`; redirects
    /// and disambiguation pages are `EntityAmbiguous`.
    pub fn fetch(&self, name: &str) -> Result<ChampionDocument, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::EntityNotFound(String::new()));
        }

        let document = self
            .source
            .fetch(name)?
            .ok_or_else(|| AppError::EntityNotFound(name.to_string()))?;

        if document.is_redirect() {
            debug!(champion = name, "page is a redirect");
            return Err(AppError::EntityAmbiguous(name.to_string()));
        }
        if document.is_disambiguation() {
            debug!(champion = name, "page is a disambiguation page");
            return Err(AppError::EntityAmbiguous(name.to_string()));
        }

        let infobox = document.infoboxes().into_iter().next().unwrap_or_default();

        let outline = document.sections();
        let mut sections = BTreeMap::new();
        for section in &outline {
            sections.insert(section.title.clone(), section.text.clone());
        }

        let images = document.images();

        info!(
            champion = name,
            sections = sections.len(),
            images = images.len(),
            "champion page extracted"
        );

        Ok(ChampionDocument {
            name: name.to_string(),
            infobox,
            sections,
            outline,
            images,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wiki::document::fake::{FakeDocument, FakeSource};
    use crate::wiki::document::Infobox;
    use serde_json::Value;

    fn infobox(class: &str) -> Infobox {
        let mut map = Infobox::new();
        map.insert("class".to_string(), Value::from(class));
        map
    }

    #[test]
    fn extracts_first_infobox_sections_and_images() {
        let document = FakeDocument {
            infoboxes: vec![infobox("Skill"), infobox("Cosmic")],
            ..FakeDocument::default()
        }
        .with_section("Abilities", "old")
        .with_section("Strengths", "roots")
        .with_section("Abilities", "new")
        .with_image("https://img/1.png")
        .with_image("https://img/2.png");

        let extractor = ChampionExtractor::new(FakeSource::default().with_page("Groot", document));
        let champion = extractor.fetch("  Groot ").expect("fetch");

        assert_eq!(champion.name, "Groot");
        assert_eq!(champion.infobox["class"], Value::from("Skill"));
        assert_eq!(champion.section("Abilities"), Some("new"));
        assert_eq!(champion.section("Strengths"), Some("roots"));
        let titles: Vec<&str> = champion.outline.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Abilities", "Strengths", "Abilities"]);
        assert_eq!(champion.outline[0].text, "old");
        assert_eq!(champion.images, vec!["https://img/1.png", "https://img/2.png"]);
    }

    #[test]
    fn empty_pages_are_valid() {
        let source = FakeSource::default().with_page("Groot", FakeDocument::default());
        let extractor = ChampionExtractor::new(source);
        let champion = extractor.fetch("Groot").expect("fetch");
        assert!(champion.sections.is_empty());
        assert!(champion.images.is_empty());
        assert!(champion.infobox.is_empty());
    }

    #[test]
    fn missing_page_is_not_found() {
        let extractor = ChampionExtractor::new(FakeSource::default());
        assert!(matches!(
            extractor.fetch("Nobody"),
            Err(AppError::EntityNotFound(name)) if name == "Nobody"
        ));
        assert!(matches!(
            extractor.fetch("   "),
            Err(AppError::EntityNotFound(_))
        ));
    }

    #[test]
    fn redirects_and_disambiguations_are_ambiguous() {
        let source = FakeSource::default()
            .with_page(
                "Iron Man",
                FakeDocument {
                    disambiguation: true,
                    ..FakeDocument::default()
                },
            )
            .with_page(
                "Starlord",
                FakeDocument {
                    redirect: true,
                    ..FakeDocument::default()
                },
            );
        let extractor = ChampionExtractor::new(source);
        assert!(matches!(
            extractor.fetch("Iron Man"),
            Err(AppError::EntityAmbiguous(_))
        ));
        assert!(matches!(
            extractor.fetch("Starlord"),
            Err(AppError::EntityAmbiguous(_))
        ));
    }

    #[test]
    fn transport_failures_surface_unchanged() {
        let extractor =
            ChampionExtractor::new(FakeSource::default().with_failure("Groot", "timed out"));
        assert!(matches!(
            extractor.fetch("Groot"),
            Err(AppError::HttpError(message)) if message == "timed out"
        ));
    }
}
