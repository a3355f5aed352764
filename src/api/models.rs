use serde::Deserialize;

// action=query response, formatversion=2
#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub query: Option<QueryBody>,
    #[serde(default)]
    pub error: Option<ApiErrorDto>,
}

#[derive(Debug, Deserialize)]
pub struct QueryBody {
    #[serde(default)]
    pub pages: Vec<PageDto>,
}

#[derive(Debug, Deserialize)]
pub struct PageDto {
    pub title: String,
    #[serde(default)]
    pub missing: bool,
    #[serde(default)]
    pub invalid: bool,
    #[serde(default)]
    pub revisions: Vec<RevisionDto>,
    #[serde(default)]
    pub pageprops: Option<PagePropsDto>,
}

impl PageDto {
    pub fn content(&self) -> Option<&str> {
        self.revisions
            .first()
            .map(|revision| revision.slots.main.content.as_str())
    }

    pub fn is_disambiguation(&self) -> bool {
        self.pageprops
            .as_ref()
            .map(|props| props.disambiguation.is_some())
            .unwrap_or(false)
    }
}

#[derive(Debug, Deserialize)]
pub struct RevisionDto {
    pub slots: SlotsDto,
}

#[derive(Debug, Deserialize)]
pub struct SlotsDto {
    pub main: SlotDto,
}

#[derive(Debug, Deserialize)]
pub struct SlotDto {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct PagePropsDto {
    #[serde(default)]
    pub disambiguation: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDto {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub info: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_existing_page() {
        let body = r#"{
            "batchcomplete": true,
            "query": {"pages": [{
                "pageid": 12, "ns": 0, "title": "Groot",
                "revisions": [{"slots": {"main": {
                    "contentmodel": "wikitext", "content": "== Abilities =="
                }}}]
            }]}
        }"#;
        let response: QueryResponse = serde_json::from_str(body).expect("decode");
        let page = &response.query.expect("query").pages[0];
        assert!(!page.missing);
        assert_eq!(page.content(), Some("== Abilities =="));
        assert!(!page.is_disambiguation());
    }

    #[test]
    fn decodes_missing_and_disambiguation_flags() {
        let body = r#"{"query": {"pages": [
            {"ns": 0, "title": "Nobody", "missing": true},
            {"ns": 0, "title": "Iron Man", "pageprops": {"disambiguation": ""},
             "revisions": [{"slots": {"main": {"content": "x"}}}]}
        ]}}"#;
        let response: QueryResponse = serde_json::from_str(body).expect("decode");
        let pages = response.query.expect("query").pages;
        assert!(pages[0].missing);
        assert!(pages[0].content().is_none());
        assert!(pages[1].is_disambiguation());
    }

    #[test]
    fn decodes_api_error() {
        let body = r#"{"error": {"code": "badtitle", "info": "Bad title"}}"#;
        let response: QueryResponse = serde_json::from_str(body).expect("decode");
        assert_eq!(response.error.expect("error").code, "badtitle");
    }
}
