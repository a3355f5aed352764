// URL builders for a Fandom-hosted MediaWiki.

/// Fandom serves the action API from the site root.
pub fn api_url(domain: &str) -> String {
    format!("https://{}/api.php", domain)
}

pub fn page_url(domain: &str, title: &str) -> String {
    format!("https://{}/wiki/{}", domain, urlencoding::encode(title))
}

/// Redirects to the original upload for `file` (no namespace prefix).
pub fn file_url(domain: &str, file: &str) -> String {
    format!(
        "https://{}/wiki/Special:FilePath/{}",
        domain,
        urlencoding::encode(&file.trim().replace(' ', "_"))
    )
}
