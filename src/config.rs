use crate::error::AppError;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_WIKI_DOMAIN: &str = "marvel-contestofchampions.fandom.com";
const DEFAULT_COUNTER_DATA_PATH: &str = "data/counters.csv";
const DEFAULT_ROSTER_PATH: &str = "data/roster.txt";
const DEFAULT_USER_AGENT: &str = "champ_codex/0.1.0";

#[derive(Debug, Clone)]
pub struct Config {
    pub wiki_domain: String,
    pub counter_data_path: PathBuf,
    pub roster_path: PathBuf,
    pub user_agent: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let wiki_domain = match env::var("WIKI_DOMAIN") {
            Ok(value) => validate_domain(&value)?,
            Err(_) => DEFAULT_WIKI_DOMAIN.to_string(),
        };

        let counter_data_path = env::var("COUNTER_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_COUNTER_DATA_PATH));

        let roster_path = env::var("ROSTER_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_ROSTER_PATH));

        let user_agent =
            env::var("WIKI_USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());

        Ok(Config {
            wiki_domain,
            counter_data_path,
            roster_path,
            user_agent,
        })
    }
}

/// A wiki domain is a bare host name such as `example.fandom.com`.
pub fn validate_domain(value: &str) -> Result<String, AppError> {
    let domain = value.trim();
    if domain.is_empty() || domain.contains('/') || domain.contains(char::is_whitespace) {
        return Err(AppError::ConfigError(format!(
            "wiki domain must be a bare host name, got \"{}\"",
            value
        )));
    }
    Ok(domain.to_string())
}
