use super::champion::ChampionCommand;
use super::counter::CounterCommand;
use super::reply::{colors, Reply};
use crate::roster::Roster;
use crate::wiki::document::DocumentSource;

const CHAMP_PREFIX: &str = "!champ";
const COUNTER_PREFIX: &str = "!counter";
const SUGGEST_PREFIX: &str = "!suggest";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Champion(String),
    Counter(String),
    Suggest(String),
}

impl Command {
    /// Parses a chat message. Returns `None` for anything that is not one of
    /// our prefix commands.
    pub fn parse(message: &str) -> Option<Command> {
        let message = message.trim();
        if let Some(arg) = strip_command(message, CHAMP_PREFIX) {
            return Some(Command::Champion(arg));
        }
        if let Some(arg) = strip_command(message, COUNTER_PREFIX) {
            return Some(Command::Counter(arg));
        }
        strip_command(message, SUGGEST_PREFIX).map(Command::Suggest)
    }
}

fn strip_command(message: &str, prefix: &str) -> Option<String> {
    let head = message.get(..prefix.len())?;
    if !head.eq_ignore_ascii_case(prefix) {
        return None;
    }
    let rest = &message[prefix.len()..];
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(rest.trim().to_string())
}

fn usage_reply(text: &str) -> Reply {
    Reply::new("Missing argument", colors::NOT_FOUND).with_description(text)
}

pub fn suggestions_reply(partial: &str, names: &[String]) -> Reply {
    let title = if partial.trim().is_empty() {
        "Champions".to_string()
    } else {
        format!("Champions matching \"{}\"", partial.trim())
    };
    let body = if names.is_empty() {
        "No matches.".to_string()
    } else {
        names.join("\n")
    };
    Reply::new(&title, colors::SUGGESTIONS).with_description(&body)
}

/// Routes chat messages to the command handlers.
pub struct Bot<'a, S> {
    champions: ChampionCommand<S>,
    counters: CounterCommand<'a>,
    roster: &'a Roster,
}

impl<'a, S: DocumentSource> Bot<'a, S> {
    pub fn new(
        champions: ChampionCommand<S>,
        counters: CounterCommand<'a>,
        roster: &'a Roster,
    ) -> Self {
        Bot {
            champions,
            counters,
            roster,
        }
    }

    pub fn dispatch(&self, message: &str) -> Option<Reply> {
        let reply = match Command::parse(message)? {
            Command::Champion(name) if name.is_empty() => usage_reply(
                "Please provide a champion name. Example: `!champ Spider-Man (Stark Enhanced)`",
            ),
            Command::Champion(name) => self.champions.handle(&name),
            Command::Counter(name) if name.is_empty() => {
                usage_reply("Please provide a defender name. Example: `!counter Doctor Doom`")
            }
            Command::Counter(name) => self.counters.handle(&name),
            Command::Suggest(partial) => {
                suggestions_reply(&partial, &self.roster.suggest(&partial))
            }
        };
        Some(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::champion::failure_reply;
    use crate::commands::counter::COUNTERS_LABEL;
    use crate::dataset::counters::{CounterRecord, CounterTable};
    use crate::format::text::SectionFormatter;
    use crate::wiki::document::fake::{FakeDocument, FakeSource};
    use crate::wiki::extractor::ChampionExtractor;

    fn table() -> CounterTable {
        CounterTable::from_records(vec![CounterRecord {
            champion: "Groot".to_string(),
            class: "Skill".to_string(),
            tips: "Bait".to_string(),
            counters: "Deadpool, Domino".to_string(),
        }])
    }

    fn champions() -> ChampionCommand<FakeSource> {
        let page = FakeDocument::default().with_section("Abilities", "Roots");
        ChampionCommand::new(
            ChampionExtractor::new(FakeSource::default().with_page("Groot", page)),
            SectionFormatter::new("example.fandom.com"),
        )
    }

    #[test]
    fn parses_prefix_commands() {
        assert_eq!(
            Command::parse("!champ Spider-Man (Stark Enhanced)"),
            Some(Command::Champion("Spider-Man (Stark Enhanced)".to_string()))
        );
        assert_eq!(
            Command::parse("  !COUNTER   doctor doom "),
            Some(Command::Counter("doctor doom".to_string()))
        );
        assert_eq!(Command::parse("!suggest"), Some(Command::Suggest(String::new())));
        assert_eq!(Command::parse("!champion Groot"), None);
        assert_eq!(Command::parse("hello there"), None);
        assert_eq!(Command::parse("!ch"), None);
    }

    #[test]
    fn dispatches_to_handlers() {
        let table = table();
        let roster = Roster::new(vec!["Groot".to_string(), "Domino".to_string()]);
        let bot = Bot::new(champions(), CounterCommand::new(&table), &roster);

        let champ = bot.dispatch("!champ Groot").expect("reply");
        assert_eq!(champ.title, "Groot");
        assert_eq!(champ.fields.len(), 1);

        let missing = bot.dispatch("!champ Nobody").expect("reply");
        assert_eq!(missing, failure_reply("Nobody"));

        let counter = bot.dispatch("!counter GROOT").expect("reply");
        assert!(counter.field(COUNTERS_LABEL).is_some());

        let suggest = bot.dispatch("!suggest oo").expect("reply");
        assert_eq!(suggest.description.as_deref(), Some("Groot"));

        assert!(bot.dispatch("just chatting").is_none());
    }

    #[test]
    fn empty_arguments_get_usage_help() {
        let table = table();
        let roster = Roster::default();
        let bot = Bot::new(champions(), CounterCommand::new(&table), &roster);
        let reply = bot.dispatch("!champ").expect("reply");
        assert!(reply
            .description
            .as_deref()
            .unwrap_or_default()
            .contains("Please provide a champion name"));
    }
}
