use crate::config::Config;
use crate::error::AppError;
use crate::wiki::document::DocumentSource;
use crate::wiki::wikitext::WikitextPage;
use tracing::{debug, warn};

use super::endpoints;
use super::models::*;

/// Blocking MediaWiki client for one wiki domain.
pub struct WikiClient {
    domain: String,
    user_agent: String,
}

impl WikiClient {
    pub fn new(config: &Config) -> Self {
        WikiClient {
            domain: config.wiki_domain.clone(),
            user_agent: config.user_agent.clone(),
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    fn execute_request(&self, title: &str) -> Result<String, AppError> {
        let url = endpoints::api_url(&self.domain);
        debug!(%url, title, "querying wiki");

        // Redirects are not followed; the extractor rejects them.
        let response = ureq::get(&url)
            .set("User-Agent", &self.user_agent)
            .query("action", "query")
            .query("format", "json")
            .query("formatversion", "2")
            .query("prop", "revisions|pageprops")
            .query("rvprop", "content")
            .query("rvslots", "main")
            .query("ppprop", "disambiguation")
            .query("titles", title)
            .call();

        match response {
            Ok(resp) => resp
                .into_string()
                .map_err(|e| AppError::HttpError(e.to_string())),
            Err(ureq::Error::Status(code, _)) => {
                warn!(code, title, "wiki returned an error status");
                Err(AppError::HttpError(format!("HTTP {} from {}", code, url)))
            }
            Err(e) => Err(AppError::HttpError(e.to_string())),
        }
    }

    pub fn parse_response(&self, body: &str) -> Result<Option<WikitextPage>, AppError> {
        let response: QueryResponse =
            serde_json::from_str(body).map_err(|e| AppError::JsonError(e.to_string()))?;

        if let Some(error) = response.error {
            return Err(AppError::HttpError(format!(
                "api error [{}]: {}",
                error.code, error.info
            )));
        }

        let page = match response.query.and_then(|q| q.pages.into_iter().next()) {
            Some(page) => page,
            None => {
                return Err(AppError::JsonError(
                    "invalid MediaWiki response shape".to_string(),
                ))
            }
        };

        if page.missing || page.invalid {
            debug!(title = %page.title, "page does not exist");
            return Ok(None);
        }

        let content = match page.content() {
            Some(content) => content,
            None => return Ok(None),
        };

        Ok(Some(WikitextPage::new(
            &self.domain,
            content,
            page.is_disambiguation(),
        )))
    }
}

impl DocumentSource for WikiClient {
    type Document = WikitextPage;

    fn fetch(&self, title: &str) -> Result<Option<WikitextPage>, AppError> {
        let body = self.execute_request(title)?;
        self.parse_response(&body)
    }
}
