mod api;
mod commands;
mod config;
mod dataset;
mod display;
mod error;
mod export;
mod format;
mod roster;
mod wiki;

use anyhow::Context;
use api::client::WikiClient;
use clap::{Parser, Subcommand, ValueEnum};
use commands::bot::Bot;
use commands::champion::ChampionCommand;
use commands::counter::CounterCommand;
use config::Config;
use dataset::counters::CounterTable;
use display::output::{
    display_dataset_summary, display_error, display_info, display_reply, display_success,
    display_suggestions, with_typing,
};
use format::text::SectionFormatter;
use roster::Roster;
use std::io::{self, BufRead};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wiki::document::DocumentSource;
use wiki::extractor::ChampionExtractor;

#[derive(Parser, Debug)]
#[command(name = "Champ Codex")]
#[command(about = "Champion cards from the game wiki and a counter sheet", long_about = None)]
struct Args {
    /// Wiki host to query (overrides WIKI_DOMAIN)
    #[arg(long, global = true)]
    domain: Option<String>,

    /// Counter sheet CSV (overrides COUNTER_DATA_PATH)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Mode,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Champion card built from the wiki page
    Champ {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Counter tips for a defender from the counter sheet
    Counter {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Autocomplete a partial name
    Suggest {
        partial: Option<String>,

        /// Which roster to search
        #[arg(long, value_enum, default_value = "champions")]
        roster: RosterKind,
    },

    /// Save the extracted wiki data as JSON
    Export {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },

    /// Answer `!champ`, `!counter` and `!suggest` messages read from stdin
    Listen,

    /// Summary of the loaded counter sheet
    Dataset,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RosterKind {
    Champions,
    Defenders,
}

fn main() {
    init_tracing();
    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut config = Config::from_env()?;
    if let Some(domain) = args.domain {
        config.wiki_domain = config::validate_domain(&domain)?;
    }
    if let Some(data) = args.data {
        config.counter_data_path = data;
    }

    // The counter sheet is a startup precondition for every mode.
    let table = CounterTable::load(&config.counter_data_path)
        .context("cannot start without the counter dataset")?;
    if table.is_empty() {
        display_info("Counter dataset has no champions; counter lookups will all miss");
    }
    let champion_roster = Roster::load_or(&config.roster_path, table.champion_names())?;
    let defender_roster = Roster::new(table.champion_names());
    tracing::debug!(
        champions = champion_roster.len(),
        defenders = defender_roster.len(),
        "rosters ready"
    );

    let client = WikiClient::new(&config);
    let formatter = SectionFormatter::new(client.domain());
    let champions = ChampionCommand::new(ChampionExtractor::new(client), formatter);
    let counters = CounterCommand::new(&table);

    match args.command {
        Mode::Champ { name } => {
            let name = name.join(" ");
            let reply = with_typing(&format!("Fetching {}...", name), || {
                champions.handle(&name)
            });
            display_reply(&reply);
        }
        Mode::Counter { name } => {
            display_reply(&counters.handle(&name.join(" ")));
        }
        Mode::Suggest { partial, roster } => {
            let partial = partial.unwrap_or_default();
            let roster = match roster {
                RosterKind::Champions => &champion_roster,
                RosterKind::Defenders => &defender_roster,
            };
            display_suggestions(&partial, &roster.suggest(&partial));
        }
        Mode::Export { name, out } => {
            let name = name.join(" ");
            let document = with_typing(&format!("Fetching {}...", name), || {
                champions.lookup(&name)
            })?;
            let path = export::write_export(&out, &document)?;
            display_success(&format!(
                "Data for {} written to {}",
                document.name,
                path.display()
            ));
        }
        Mode::Listen => listen(&Bot::new(champions, counters, &champion_roster))?,
        Mode::Dataset => display_dataset_summary(&table),
    }

    Ok(())
}

fn listen<S: DocumentSource>(bot: &Bot<'_, S>) -> anyhow::Result<()> {
    display_info("Listening for !champ, !counter and !suggest messages (Ctrl-D to stop)");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let message = line.context("failed to read message from stdin")?;
        if message.trim().is_empty() {
            continue;
        }
        if let Some(reply) = with_typing("typing...", || bot.dispatch(&message)) {
            display_reply(&reply);
        }
    }

    Ok(())
}
