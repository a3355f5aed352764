use super::rules::{keyword_emphasis, RewriteRule, RuleSet};
use super::FIELD_LIMIT;
use crate::api::endpoints;
use once_cell::sync::Lazy;
use regex::Regex;

static NEWLINE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{2,}").unwrap());

/// Ability mechanics highlighted in section bodies.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "Armor Break",
    "Armor Up",
    "Auto-Block",
    "Bleed",
    "Coldsnap",
    "Cruelty",
    "Degeneration",
    "Evade",
    "Frostbite",
    "Fury",
    "Heal Block",
    "Incinerate",
    "Nullify",
    "Petrify",
    "Poison",
    "Power Burn",
    "Power Drain",
    "Power Lock",
    "Precision",
    "Regeneration",
    "Shock",
    "Stagger",
    "Stun",
    "Unblockable",
    "Unstoppable",
    "Weakness",
];

/// Turns a raw wiki section into a field body for a given wiki domain.
#[derive(Debug, Clone)]
pub struct SectionFormatter {
    domain: String,
    rules: RuleSet,
}

impl SectionFormatter {
    pub fn new(domain: &str) -> Self {
        Self::with_keywords(domain, DEFAULT_KEYWORDS)
    }

    pub fn with_keywords(domain: &str, keywords: &[&str]) -> Self {
        let mut rules = RuleSet::new(vec![RewriteRule::template(
            "collapse-newlines",
            &NEWLINE_RUN,
            "\n",
        )]);
        if let Some(emphasis) = keyword_emphasis(keywords) {
            rules.push(emphasis);
        }
        SectionFormatter {
            domain: domain.to_string(),
            rules,
        }
    }

    /// Suffix appended to truncated bodies.
    pub fn read_more_suffix(&self, entity: &str) -> String {
        format!(
            "…\n[Read more]({})",
            endpoints::page_url(&self.domain, entity)
        )
    }

    pub fn format(&self, entity: &str, raw: &str) -> String {
        let text = self.rules.apply(raw);
        if text.chars().count() <= FIELD_LIMIT {
            return text;
        }

        let suffix = self.read_more_suffix(entity);
        let keep = FIELD_LIMIT.saturating_sub(suffix.chars().count());
        let mut out: String = text.chars().take(keep).collect();
        if out.matches("**").count() % 2 == 1 {
            // The cut landed inside an emphasized span; drop its opener.
            if let Some(open) = out.rfind("**") {
                out.truncate(open);
            }
        }
        out.push_str(&suffix);
        if keep == 0 {
            // Suffix alone is over the limit (absurdly long entity name).
            out = out.chars().take(FIELD_LIMIT).collect();
        }
        out
    }
}
