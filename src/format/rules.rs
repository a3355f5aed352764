use regex::{Captures, Regex};

/// What to do with a pattern match.
#[derive(Debug, Clone)]
pub enum Rewrite {
    /// Regex replacement template (`$1`, `$0`, ...).
    Template(String),
    /// Wrap the match in `**`, unless it already is.
    Emphasize,
}

#[derive(Debug, Clone)]
pub struct RewriteRule {
    pub name: &'static str,
    pattern: Regex,
    rewrite: Rewrite,
}

impl RewriteRule {
    pub fn new(name: &'static str, pattern: Regex, rewrite: Rewrite) -> Self {
        RewriteRule {
            name,
            pattern,
            rewrite,
        }
    }

    pub fn template(name: &'static str, pattern: &Regex, template: &str) -> Self {
        Self::new(name, pattern.clone(), Rewrite::Template(template.to_string()))
    }

    pub fn apply(&self, text: &str) -> String {
        match &self.rewrite {
            Rewrite::Template(template) => {
                self.pattern.replace_all(text, template.as_str()).into_owned()
            }
            Rewrite::Emphasize => self
                .pattern
                .replace_all(text, |caps: &Captures| {
                    let matched = &caps[0];
                    if matched.starts_with("**") && matched.ends_with("**") {
                        matched.to_string()
                    } else {
                        format!("**{}**", matched)
                    }
                })
                .into_owned(),
        }
    }
}

/// Ordered list of rewrites applied one after another.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<RewriteRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<RewriteRule>) -> Self {
        RuleSet { rules }
    }

    pub fn push(&mut self, rule: RewriteRule) {
        self.rules.push(rule);
    }

    pub fn apply(&self, text: &str) -> String {
        self.rules
            .iter()
            .fold(text.to_string(), |acc, rule| rule.apply(&acc))
    }

    #[allow(dead_code)]
    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name).collect()
    }
}

/// Builds a case-insensitive whole-word emphasis rule for `keywords`.
///
/// Longer keywords are tried first so "Armor Break" wins over "Armor".
/// Spans already wrapped in `**` are matched as a unit and left unchanged,
/// which keeps the rule idempotent.
pub fn keyword_emphasis(keywords: &[&str]) -> Option<RewriteRule> {
    let mut sorted: Vec<&str> = keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| b.len().cmp(&a.len()));

    let alternation = sorted
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!(r"\*\*[^*\n]+?\*\*|(?i:\b(?:{})\b)", alternation);
    let regex = Regex::new(&pattern).ok()?;
    Some(RewriteRule::new("keyword-emphasis", regex, Rewrite::Emphasize))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emphasis_is_case_insensitive_and_whole_word() {
        let rule = keyword_emphasis(&["Bleed", "Armor Break", "Armor"]).expect("rule");
        assert_eq!(
            rule.apply("Inflicts bleed and an armor break, armored foes ignore it."),
            "Inflicts **bleed** and an **armor break**, armored foes ignore it."
        );
    }

    #[test]
    fn emphasis_does_not_nest() {
        let rule = keyword_emphasis(&["Bleed"]).expect("rule");
        let once = rule.apply("Bleed on hit");
        assert_eq!(once, "**Bleed** on hit");
        assert_eq!(rule.apply(&once), once);
    }

    #[test]
    fn empty_keyword_list_builds_nothing() {
        assert!(keyword_emphasis(&[]).is_none());
        assert!(keyword_emphasis(&["  "]).is_none());
    }

    #[test]
    fn rule_set_applies_in_order() {
        let collapse = Regex::new(r"a+").expect("regex");
        let upper = Regex::new(r"a").expect("regex");
        let set = RuleSet::new(vec![
            RewriteRule::template("collapse", &collapse, "a"),
            RewriteRule::template("upper", &upper, "A"),
        ]);
        assert_eq!(set.apply("baaad"), "bAd");
        assert_eq!(set.names(), vec!["collapse", "upper"]);
    }
}
