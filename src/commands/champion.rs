use super::reply::{colors, Reply};
use crate::error::AppError;
use crate::format::text::SectionFormatter;
use crate::wiki::document::{ChampionDocument, DocumentSource};
use crate::wiki::extractor::ChampionExtractor;
use tracing::warn;

/// Sections shown on a champion card, in display order.
pub const IMPORTANT_SECTIONS: &[&str] = &[
    "Abilities",
    "Counters",
    "Immunities",
    "Signature Ability - Hero's Mantra",
    "Synergy Bonuses",
    "Strengths",
    "Weaknesses",
    "Relic Recommendations",
    "Signature Recommendations",
    "Notes",
];

pub fn failure_reply(name: &str) -> Reply {
    Reply::new("Champion lookup failed", colors::FAILURE).with_description(&format!(
        "Failed to fetch champion data for \"{}\". Please check the spelling or try a different champion.",
        name.trim()
    ))
}

/// The "champion info" query.
pub struct ChampionCommand<S> {
    extractor: ChampionExtractor<S>,
    formatter: SectionFormatter,
}

impl<S: DocumentSource> ChampionCommand<S> {
    pub fn new(extractor: ChampionExtractor<S>, formatter: SectionFormatter) -> Self {
        ChampionCommand {
            extractor,
            formatter,
        }
    }

    pub fn lookup(&self, name: &str) -> Result<ChampionDocument, AppError> {
        self.extractor.fetch(name)
    }

    pub fn handle(&self, name: &str) -> Reply {
        match self.lookup(name) {
            Ok(document) => self.render(&document),
            Err(e) => {
                warn!(champion = name, error = %e, "champion lookup failed");
                failure_reply(name)
            }
        }
    }

    pub fn render(&self, document: &ChampionDocument) -> Reply {
        let mut reply = Reply::new(&document.name, colors::CHAMPION);

        for title in IMPORTANT_SECTIONS {
            if let Some(text) = document.section(title) {
                let body = self.formatter.format(&document.name, text);
                reply.add_field(title, &body);
            }
        }

        if let Some(image) = document.images.first() {
            reply.set_thumbnail(image);
        }

        reply
    }
}
